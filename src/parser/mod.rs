//! SLua Parser Module
//!
//! Parses the token stream into an Abstract Syntax Tree (AST).

mod ast;
mod descent_parser;

pub use ast::{
    AssignmentStatement, BinaryExpression, Block, Chunk, DoStatement, ElseStatement,
    ElseifStatement, ExpressionList, IfStatement, LocalNameListStatement, NameList, SyntaxTree,
    Terminator, UnaryExpression, VarList, WhileStatement,
};
pub use descent_parser::{Parser, MAX_SYNTAX_LEVELS};
