use super::ast::{
    AssignmentStatement, BinaryExpression, Block, Chunk, DoStatement, ElseStatement,
    ElseifStatement, ExpressionList, IfStatement, LocalNameListStatement, NameList, SyntaxTree,
    Terminator, UnaryExpression, VarList, WhileStatement,
};
use crate::error::{Error, Result};
use crate::lexer::{Scanner, Token, TokenCategory};

const MODULE: &str = "parser";

/// Binding strength of the prefix operators `-`, `#` and `not`
const UNARY_PRIORITY: u8 = 90;

/// Deepest nesting of blocks, `elseif` arms and sub-expressions accepted
pub const MAX_SYNTAX_LEVELS: usize = 200;

/// Recursive-descent parser for SLua
///
/// Pulls tokens lazily from its [`Scanner`] with one token of lookahead.
/// Statements are parsed LL(1); expressions use precedence climbing over
/// [`operator_priority`]. Nesting deeper than [`MAX_SYNTAX_LEVELS`] is a
/// syntax error.
pub struct Parser<I: Iterator<Item = char>> {
    scanner: Scanner<I>,
    /// Last consumed token
    current: Token,
    /// Scanned but not yet consumed
    look_ahead: Option<Token>,
    /// Current syntax level
    depth: usize,
}

impl<I: Iterator<Item = char>> Parser<I> {
    /// Creates a new parser reading from `scanner`
    pub fn new(scanner: Scanner<I>) -> Self {
        Parser {
            scanner,
            current: Token::eof(),
            look_ahead: None,
            depth: 0,
        }
    }

    /// Parses the whole input into a [`SyntaxTree::Chunk`]
    ///
    /// The first lexical or syntax error aborts the parse.
    pub fn parse(mut self) -> Result<SyntaxTree> {
        match self.parse_chunk() {
            Ok(chunk) => {
                tracing::debug!(statements = chunk.block.len(), "parsed chunk");
                Ok(chunk.into())
            }
            Err(err) => {
                tracing::debug!(error = %err, "parse aborted");
                Err(err)
            }
        }
    }

    // Token management

    fn advance(&mut self) -> Result<&Token> {
        self.current = match self.look_ahead.take() {
            Some(token) => token,
            None => self.scanner.scan()?,
        };
        tracing::trace!(
            category = %self.current.category,
            line = self.current.line,
            column = self.current.column,
            "consumed token"
        );
        Ok(&self.current)
    }

    fn peek(&mut self) -> Result<&Token> {
        let token = match self.look_ahead.take() {
            Some(token) => token,
            None => self.scanner.scan()?,
        };
        Ok(self.look_ahead.insert(token))
    }

    fn peek_category(&mut self) -> Result<TokenCategory> {
        Ok(self.peek()?.category)
    }

    /// Consumes the next token, failing with `message` unless it is `category`
    fn expect(&mut self, category: TokenCategory, message: &str) -> Result<()> {
        if self.advance()?.category != category {
            return Err(Error::syntax(self.current.clone(), message));
        }
        Ok(())
    }

    /// Consumes the keyword a statement was dispatched on
    fn consume_keyword(&mut self, keyword: TokenCategory) -> Result<()> {
        if self.advance()?.category != keyword {
            return Err(Error::internal(MODULE, format!("not a '{}' statement", keyword)));
        }
        Ok(())
    }

    /// Runs `parse` one syntax level deeper
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_SYNTAX_LEVELS {
            return Err(self.look_ahead_error("too many syntax levels"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn look_ahead_error(&mut self, message: &str) -> Error {
        match self.peek() {
            Ok(token) => Error::syntax(token.clone(), message),
            Err(err) => err,
        }
    }

    // Statements

    fn parse_chunk(&mut self) -> Result<Chunk> {
        let block = self.parse_block()?;
        self.expect(TokenCategory::Eof, "expect <eof>")?;
        Ok(Chunk { block })
    }

    fn parse_block(&mut self) -> Result<Block> {
        self.nested(|parser| {
            let mut block = Block::default();
            while !matches!(
                parser.peek_category()?,
                TokenCategory::Eof
                    | TokenCategory::End
                    | TokenCategory::Elseif
                    | TokenCategory::Else
            ) {
                if let Some(statement) = parser.parse_statement()? {
                    block.statements.push(statement);
                }
            }
            Ok(block)
        })
    }

    fn parse_statement(&mut self) -> Result<Option<SyntaxTree>> {
        let statement = match self.peek_category()? {
            TokenCategory::Semicolon => {
                self.advance()?;
                return Ok(None);
            }
            TokenCategory::Do => self.parse_do_statement()?.into(),
            TokenCategory::While => self.parse_while_statement()?.into(),
            TokenCategory::If => self.parse_if_statement()?.into(),
            TokenCategory::Local => self.parse_local_statement()?.into(),
            _ => self.parse_other_statement()?.into(),
        };
        Ok(Some(statement))
    }

    fn parse_do_statement(&mut self) -> Result<DoStatement> {
        self.consume_keyword(TokenCategory::Do)?;
        let block = self.parse_block()?;
        self.expect(TokenCategory::End, "expect 'end' for 'do' statement")?;
        Ok(DoStatement { block })
    }

    fn parse_while_statement(&mut self) -> Result<WhileStatement> {
        self.consume_keyword(TokenCategory::While)?;
        let condition = self.parse_expression()?;
        self.expect(TokenCategory::Do, "expect 'do' for 'while' statement")?;
        let block = self.parse_block()?;
        self.expect(TokenCategory::End, "expect 'end' for 'while' statement")?;
        Ok(WhileStatement {
            condition: Box::new(condition),
            block,
        })
    }

    fn parse_if_statement(&mut self) -> Result<IfStatement> {
        self.consume_keyword(TokenCategory::If)?;
        let condition = self.parse_expression()?;
        self.expect(TokenCategory::Then, "expect 'then' for 'if' statement")?;
        let true_branch = self.parse_block()?;
        let false_branch = self.parse_false_branch()?;
        Ok(IfStatement {
            condition: Box::new(condition),
            true_branch,
            false_branch,
        })
    }

    /// `elseif ...`, `else ... end`, or a bare `end` (no false branch)
    fn parse_false_branch(&mut self) -> Result<Option<Box<SyntaxTree>>> {
        self.nested(Self::parse_branch_arm)
    }

    fn parse_branch_arm(&mut self) -> Result<Option<Box<SyntaxTree>>> {
        match self.peek_category()? {
            TokenCategory::Elseif => Ok(Some(Box::new(self.parse_elseif_statement()?.into()))),
            TokenCategory::Else => Ok(Some(Box::new(self.parse_else_statement()?.into()))),
            TokenCategory::End => {
                self.advance()?;
                Ok(None)
            }
            _ => Err(self.look_ahead_error("expect 'end' for 'if' statement")),
        }
    }

    fn parse_elseif_statement(&mut self) -> Result<ElseifStatement> {
        self.consume_keyword(TokenCategory::Elseif)?;
        let condition = self.parse_expression()?;
        self.expect(TokenCategory::Then, "expect 'then' for 'elseif' statement")?;
        let true_branch = self.parse_block()?;
        let false_branch = self.parse_false_branch()?;
        Ok(ElseifStatement {
            condition: Box::new(condition),
            true_branch,
            false_branch,
        })
    }

    fn parse_else_statement(&mut self) -> Result<ElseStatement> {
        self.consume_keyword(TokenCategory::Else)?;
        let block = self.parse_block()?;
        self.expect(TokenCategory::End, "expect 'end' for 'else' statement")?;
        Ok(ElseStatement { block })
    }

    fn parse_local_statement(&mut self) -> Result<LocalNameListStatement> {
        self.consume_keyword(TokenCategory::Local)?;
        if self.peek_category()? != TokenCategory::Id {
            return Err(self.look_ahead_error("unexpect token after 'local'"));
        }
        let names = self.parse_name_list()?;
        let expressions = if self.peek_category()? == TokenCategory::Assign {
            self.advance()?;
            Some(self.parse_expression_list()?)
        } else {
            None
        };
        Ok(LocalNameListStatement { names, expressions })
    }

    fn parse_name_list(&mut self) -> Result<NameList> {
        self.expect(TokenCategory::Id, "expect <id>")?;
        let mut names = vec![self.current.clone()];
        while self.peek_category()? == TokenCategory::Comma {
            self.advance()?;
            self.expect(TokenCategory::Id, "expect <id> after ','")?;
            names.push(self.current.clone());
        }
        Ok(NameList { names })
    }

    fn parse_expression_list(&mut self) -> Result<ExpressionList> {
        let mut expressions = vec![self.parse_expression()?];
        while self.peek_category()? == TokenCategory::Comma {
            self.advance()?;
            expressions.push(self.parse_expression()?);
        }
        Ok(ExpressionList { expressions })
    }

    /// Assignment: `prefixexp {, prefixexp} = explist`
    fn parse_other_statement(&mut self) -> Result<AssignmentStatement> {
        let mut variables = vec![self.parse_prefix_expression()?];
        loop {
            match self.peek_category()? {
                TokenCategory::Assign => break,
                TokenCategory::Comma => {
                    self.advance()?;
                    variables.push(self.parse_prefix_expression()?);
                }
                _ => return Err(self.look_ahead_error("expect ',' to split var")),
            }
        }
        self.advance()?;
        let expressions = self.parse_expression_list()?;
        Ok(AssignmentStatement {
            variables: VarList { variables },
            expressions,
        })
    }

    // Expressions

    fn parse_expression(&mut self) -> Result<SyntaxTree> {
        self.parse_sub_expression(0)
    }

    /// Parses an operand and folds in every following binary operator that
    /// binds tighter than `limit`; operators of equal priority fold left.
    fn parse_sub_expression(&mut self, limit: u8) -> Result<SyntaxTree> {
        self.nested(|parser| parser.climb(limit))
    }

    fn climb(&mut self, limit: u8) -> Result<SyntaxTree> {
        let category = self.peek_category()?;
        let mut expression = if is_unary_operator(category) {
            let operator = self.advance()?.clone();
            let operand = self.parse_sub_expression(UNARY_PRIORITY)?;
            UnaryExpression {
                operator,
                operand: Box::new(operand),
            }
            .into()
        } else if is_main_expression(category) {
            self.parse_main_expression()?
        } else {
            return Err(self.look_ahead_error("unexpect token for exp"));
        };

        loop {
            let priority = operator_priority(self.peek_category()?);
            if priority <= limit {
                return Ok(expression);
            }
            let operator = self.advance()?.clone();
            let right = self.parse_sub_expression(priority)?;
            expression = BinaryExpression {
                operator,
                left: Box::new(expression),
                right: Box::new(right),
            }
            .into();
        }
    }

    fn parse_main_expression(&mut self) -> Result<SyntaxTree> {
        match self.peek_category()? {
            TokenCategory::Nil
            | TokenCategory::False
            | TokenCategory::True
            | TokenCategory::Number
            | TokenCategory::String => {
                let token = self.advance()?.clone();
                Ok(Terminator { token }.into())
            }
            TokenCategory::Id | TokenCategory::LeftParen => self.parse_prefix_expression(),
            _ => Err(self.look_ahead_error("unexpect token for expression")),
        }
    }

    /// `<id>` or `( exp )`
    fn parse_prefix_expression(&mut self) -> Result<SyntaxTree> {
        match self.advance()?.category {
            TokenCategory::LeftParen => {
                let expression = self.parse_expression()?;
                self.expect(TokenCategory::RightParen, "expect ')'")?;
                Ok(expression)
            }
            TokenCategory::Id => Ok(Terminator {
                token: self.current.clone(),
            }
            .into()),
            _ => Err(Error::syntax(self.current.clone(), "unexpect token here")),
        }
    }
}

fn is_unary_operator(category: TokenCategory) -> bool {
    matches!(
        category,
        TokenCategory::Sub | TokenCategory::Len | TokenCategory::Not
    )
}

fn is_main_expression(category: TokenCategory) -> bool {
    matches!(
        category,
        TokenCategory::Nil
            | TokenCategory::False
            | TokenCategory::True
            | TokenCategory::Number
            | TokenCategory::String
            | TokenCategory::Id
            | TokenCategory::LeftParen
    )
}

/// Binary operator priority; 0 ends an expression
fn operator_priority(category: TokenCategory) -> u8 {
    match category {
        TokenCategory::Mul | TokenCategory::Div => 80,
        TokenCategory::Add | TokenCategory::Sub => 70,
        TokenCategory::Concat => 60,
        TokenCategory::Greater
        | TokenCategory::Less
        | TokenCategory::GreaterEqual
        | TokenCategory::LessEqual
        | TokenCategory::NotEqual
        | TokenCategory::Equal => 50,
        TokenCategory::And => 40,
        TokenCategory::Or => 30,
        _ => 0,
    }
}
