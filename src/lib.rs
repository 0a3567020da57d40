//! # SLua - Front End for a Small Lua-like Language
//!
//! Lexical and syntactic front end of a small scripting language: raw source
//! text goes in, a typed token stream comes out of the [`Scanner`], and the
//! [`Parser`] turns those tokens into a [`SyntaxTree`].
//!
//! The grammar covers `do`, `while`, `if/elseif/else`, `local` declarations
//! and assignments, with arithmetic, relational, logical and concatenation
//! expressions over literals, identifiers and parenthesized sub-expressions.
//!
//! ## Quick Start
//!
//! ```rust
//! use slua::{Parser, Scanner, SyntaxTree};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scanner = Scanner::from_source("local x = 1 + 2 * 3");
//! let tree = Parser::new(scanner).parse()?;
//!
//! let SyntaxTree::Chunk(chunk) = &tree else { unreachable!() };
//! assert_eq!(chunk.statements().len(), 1);
//! assert_eq!(tree.to_string(), "(chunk (block (local (x) ((+ 1 (* 2 3))))))");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Code points → Scanner → Tokens → Parser → Syntax Tree
//! ```
//!
//! The parser pulls tokens on demand with one token of lookahead; the scanner
//! pulls code points on demand with one code point of pushback. Nothing is
//! materialized up front.
//!
//! ## Error Handling
//!
//! Parsing is fail-fast. The first lexical or syntax error aborts the whole
//! operation:
//!
//! ```rust
//! let err = slua::parse("do x = 1").unwrap_err();
//! assert_eq!(err.message(), "expect 'end' for 'do' statement");
//!
//! let err = slua::parse("s = 'abc").unwrap_err();
//! assert_eq!(err.message(), "incomplete string at <eof>");
//! ```

/// Version of the SLua front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use error::{Error, Result};
pub use lexer::{Scanner, Token, TokenCategory, TokenValue};
pub use parser::{
    AssignmentStatement, BinaryExpression, Block, Chunk, DoStatement, ElseStatement,
    ElseifStatement, ExpressionList, IfStatement, LocalNameListStatement, MAX_SYNTAX_LEVELS,
    NameList, Parser, SyntaxTree, Terminator, UnaryExpression, VarList, WhileStatement,
};

/// Scans and parses `source` in one go
pub fn parse(source: &str) -> Result<SyntaxTree> {
    Parser::new(Scanner::from_source(source)).parse()
}
