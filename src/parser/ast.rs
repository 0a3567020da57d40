use crate::lexer::{Token, TokenCategory};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Any node of the syntax tree
///
/// The grammar only ever produces these variants; slots that accept an
/// arbitrary sub-tree hold a boxed `SyntaxTree`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyntaxTree {
    /// Root of one parsed unit of source
    Chunk(Chunk),
    /// Statement sequence
    Block(Block),
    /// `do ... end`
    DoStatement(DoStatement),
    /// `while exp do ... end`
    WhileStatement(WhileStatement),
    /// `if exp then ...`
    IfStatement(IfStatement),
    /// `elseif exp then ...`
    ElseifStatement(ElseifStatement),
    /// `else ... end`
    ElseStatement(ElseStatement),
    /// `local a, b = ...`
    LocalNameListStatement(LocalNameListStatement),
    /// `a, b = ...`
    AssignmentStatement(AssignmentStatement),
    /// Assignment targets
    VarList(VarList),
    /// Names declared by `local`
    NameList(NameList),
    /// Comma separated expressions
    ExpressionList(ExpressionList),
    /// Literal or bare identifier leaf
    Terminator(Terminator),
    /// `- exp`, `# exp`, `not exp`
    UnaryExpression(UnaryExpression),
    /// `exp op exp`
    BinaryExpression(BinaryExpression),
}

/// Complete parsed source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Top-level block
    pub block: Block,
}

/// Ordered statements sharing a scope boundary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<SyntaxTree>,
}

/// `do block end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoStatement {
    /// Body
    pub block: Block,
}

/// `while cond do block end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    /// Loop condition
    pub condition: Box<SyntaxTree>,
    /// Loop body
    pub block: Block,
}

/// `if cond then block falseBranch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    /// Branch condition
    pub condition: Box<SyntaxTree>,
    /// Block run when the condition holds
    pub true_branch: Block,
    /// `ElseifStatement`, `ElseStatement`, or nothing when closed by `end`
    pub false_branch: Option<Box<SyntaxTree>>,
}

/// `elseif cond then block falseBranch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseifStatement {
    /// Branch condition
    pub condition: Box<SyntaxTree>,
    /// Block run when the condition holds
    pub true_branch: Block,
    /// Next `ElseifStatement`, `ElseStatement`, or nothing
    pub false_branch: Option<Box<SyntaxTree>>,
}

/// `else block end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElseStatement {
    /// Body
    pub block: Block,
}

/// `local names (= exps)?`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalNameListStatement {
    /// Declared names
    pub names: NameList,
    /// Initial values, if an `=` was present
    pub expressions: Option<ExpressionList>,
}

/// `vars = exps`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStatement {
    /// Assignment targets
    pub variables: VarList,
    /// Assigned values
    pub expressions: ExpressionList,
}

/// Prefix-expressions used as assignment targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarList {
    /// Targets in source order
    pub variables: Vec<SyntaxTree>,
}

/// Identifier tokens declared by `local` (at least one)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameList {
    /// `<id>` tokens in source order
    pub names: Vec<Token>,
}

/// Comma separated expressions (at least one)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionList {
    /// Expressions in source order
    pub expressions: Vec<SyntaxTree>,
}

/// Leaf node: `nil`, `false`, `true`, number, string or identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminator {
    /// The literal or identifier token
    pub token: Token,
}

/// Prefix operator applied to an operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpression {
    /// `-`, `#` or `not`
    pub operator: Token,
    /// Operand
    pub operand: Box<SyntaxTree>,
}

/// Infix operator applied to two operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpression {
    /// Operator token
    pub operator: Token,
    /// Left operand
    pub left: Box<SyntaxTree>,
    /// Right operand
    pub right: Box<SyntaxTree>,
}

impl Chunk {
    /// Top-level statements
    pub fn statements(&self) -> &[SyntaxTree] {
        &self.block.statements
    }
}

impl Block {
    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Whether the block holds no statements
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

macro_rules! impl_from_node {
    ($($node:ident),* $(,)?) => {
        $(
            impl From<$node> for SyntaxTree {
                fn from(node: $node) -> Self {
                    SyntaxTree::$node(node)
                }
            }
        )*
    };
}

impl_from_node!(
    Chunk,
    Block,
    DoStatement,
    WhileStatement,
    IfStatement,
    ElseifStatement,
    ElseStatement,
    LocalNameListStatement,
    AssignmentStatement,
    VarList,
    NameList,
    ExpressionList,
    Terminator,
    UnaryExpression,
    BinaryExpression,
);

// S-expression rendering, e.g. `(+ 1 (* 2 3))`

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter, items: &[T]) -> fmt::Result {
    f.write_str("(")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str(")")
}

fn write_false_branch(f: &mut fmt::Formatter, branch: Option<&SyntaxTree>) -> fmt::Result {
    match branch {
        Some(branch) => write!(f, " {}", branch),
        None => Ok(()),
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyntaxTree::Chunk(node) => fmt::Display::fmt(node, f),
            SyntaxTree::Block(node) => fmt::Display::fmt(node, f),
            SyntaxTree::DoStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::WhileStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::IfStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::ElseifStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::ElseStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::LocalNameListStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::AssignmentStatement(node) => fmt::Display::fmt(node, f),
            SyntaxTree::VarList(node) => fmt::Display::fmt(node, f),
            SyntaxTree::NameList(node) => fmt::Display::fmt(node, f),
            SyntaxTree::ExpressionList(node) => fmt::Display::fmt(node, f),
            SyntaxTree::Terminator(node) => fmt::Display::fmt(node, f),
            SyntaxTree::UnaryExpression(node) => fmt::Display::fmt(node, f),
            SyntaxTree::BinaryExpression(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(chunk {})", self.block)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("(block")?;
        for statement in &self.statements {
            write!(f, " {}", statement)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for DoStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(do {})", self.block)
    }
}

impl fmt::Display for WhileStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(while {} {})", self.condition, self.block)
    }
}

impl fmt::Display for IfStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(if {} {}", self.condition, self.true_branch)?;
        write_false_branch(f, self.false_branch.as_deref())?;
        f.write_str(")")
    }
}

impl fmt::Display for ElseifStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(elseif {} {}", self.condition, self.true_branch)?;
        write_false_branch(f, self.false_branch.as_deref())?;
        f.write_str(")")
    }
}

impl fmt::Display for ElseStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(else {})", self.block)
    }
}

impl fmt::Display for LocalNameListStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(local {}", self.names)?;
        if let Some(expressions) = &self.expressions {
            write!(f, " {}", expressions)?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for AssignmentStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(= {} {})", self.variables, self.expressions)
    }
}

impl fmt::Display for VarList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_list(f, &self.variables)
    }
}

impl fmt::Display for NameList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_list(f, &self.names)
    }
}

impl fmt::Display for ExpressionList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_list(f, &self.expressions)
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.token.category, self.token.text()) {
            (TokenCategory::String, Some(text)) => write!(f, "{:?}", text),
            _ => write!(f, "{}", self.token),
        }
    }
}

impl fmt::Display for UnaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} {})", self.operator, self.operand)
    }
}

impl fmt::Display for BinaryExpression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({} {} {})", self.operator, self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(token: Token) -> Box<SyntaxTree> {
        Box::new(Terminator { token }.into())
    }

    #[test]
    fn test_expression_rendering() {
        let product = BinaryExpression {
            operator: Token::new(TokenCategory::Mul, 1, 5),
            left: leaf(Token::number(2.0, 1, 3)),
            right: leaf(Token::number(3.0, 1, 7)),
        };
        let sum = BinaryExpression {
            operator: Token::new(TokenCategory::Add, 1, 3),
            left: leaf(Token::number(1.0, 1, 1)),
            right: Box::new(product.into()),
        };
        assert_eq!(SyntaxTree::from(sum).to_string(), "(+ 1 (* 2 3))");

        let negated = UnaryExpression {
            operator: Token::new(TokenCategory::Not, 1, 1),
            operand: leaf(Token::id("ok", 1, 5)),
        };
        assert_eq!(negated.to_string(), "(not ok)");
    }

    #[test]
    fn test_string_terminator_is_quoted() {
        let node = Terminator {
            token: Token::string("a\"b\n", 1, 1),
        };
        assert_eq!(node.to_string(), r#""a\"b\n""#);
    }

    #[test]
    fn test_statement_rendering() {
        let local = LocalNameListStatement {
            names: NameList {
                names: vec![Token::id("x", 1, 7), Token::id("y", 1, 10)],
            },
            expressions: None,
        };
        let chunk = Chunk {
            block: Block {
                statements: vec![local.into()],
            },
        };
        assert_eq!(chunk.to_string(), "(chunk (block (local (x y))))");
        assert_eq!(chunk.statements().len(), 1);
        assert!(!chunk.block.is_empty());
        assert_eq!(Block::default().to_string(), "(block)");
    }
}
