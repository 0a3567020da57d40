use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Syntactic role of the token
    pub category: TokenCategory,
    /// Payload; only `<id>`, `<string>` and `<number>` carry one
    pub value: TokenValue,
    /// Line number where the token starts (1-indexed)
    pub line: usize,
    /// Column number where the token starts (1-indexed, 0 at end of input after a newline)
    pub column: usize,
}

/// Payload slot of a token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenValue {
    /// No payload (keywords, operators, punctuation, end of input)
    NoValue,
    /// Identifier name or de-escaped string literal
    Text(String),
    /// Numeric literal; there is no integer/float distinction
    Number(f64),
}

impl Token {
    /// Creates a token without a payload
    pub fn new(category: TokenCategory, line: usize, column: usize) -> Self {
        Token {
            category,
            value: TokenValue::NoValue,
            line,
            column,
        }
    }

    /// Creates an `<id>` token
    pub fn id(name: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            category: TokenCategory::Id,
            value: TokenValue::Text(name.into()),
            line,
            column,
        }
    }

    /// Creates a `<string>` token holding already de-escaped text
    pub fn string(text: impl Into<String>, line: usize, column: usize) -> Self {
        Token {
            category: TokenCategory::String,
            value: TokenValue::Text(text.into()),
            line,
            column,
        }
    }

    /// Creates a `<number>` token
    pub fn number(value: f64, line: usize, column: usize) -> Self {
        Token {
            category: TokenCategory::Number,
            value: TokenValue::Number(value),
            line,
            column,
        }
    }

    /// Position-less end-of-input token
    pub fn eof() -> Self {
        Token::new(TokenCategory::Eof, 0, 0)
    }

    /// Text payload of an `<id>` or `<string>` token
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Numeric payload of a `<number>` token
    pub fn number_value(&self) -> Option<f64> {
        match self.value {
            TokenValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Whether this token marks the end of input
    pub fn is_eof(&self) -> bool {
        self.category == TokenCategory::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (&self.value, self.category.carries_value()) {
            (TokenValue::Text(text), true) => write!(f, "{}", text),
            (TokenValue::Number(n), true) => write!(f, "{}", n),
            _ => write!(f, "{}", self.category),
        }
    }
}

/// All token categories of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenCategory {
    // Keywords
    /// `and`
    And,
    /// `do`
    Do,
    /// `else`
    Else,
    /// `elseif`
    Elseif,
    /// `end`
    End,
    /// `false`
    False,
    /// `if`
    If,
    /// `local`
    Local,
    /// `nil`
    Nil,
    /// `not`
    Not,
    /// `or`
    Or,
    /// `then`
    Then,
    /// `true`
    True,
    /// `while`
    While,

    // Literal classes
    /// Identifier (`<id>`)
    Id,
    /// String literal (`<string>`)
    String,
    /// Numeric literal (`<number>`)
    Number,

    // Operators and punctuation
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `#`
    Len,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `=`
    Assign,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `==`
    Equal,
    /// `~=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `..`
    Concat,

    // Special
    /// End of input (`<eof>`)
    Eof,
}

impl TokenCategory {
    /// Canonical text of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::And => "and",
            TokenCategory::Do => "do",
            TokenCategory::Else => "else",
            TokenCategory::Elseif => "elseif",
            TokenCategory::End => "end",
            TokenCategory::False => "false",
            TokenCategory::If => "if",
            TokenCategory::Local => "local",
            TokenCategory::Nil => "nil",
            TokenCategory::Not => "not",
            TokenCategory::Or => "or",
            TokenCategory::Then => "then",
            TokenCategory::True => "true",
            TokenCategory::While => "while",
            TokenCategory::Id => "<id>",
            TokenCategory::String => "<string>",
            TokenCategory::Number => "<number>",
            TokenCategory::Add => "+",
            TokenCategory::Sub => "-",
            TokenCategory::Mul => "*",
            TokenCategory::Div => "/",
            TokenCategory::Len => "#",
            TokenCategory::LeftParen => "(",
            TokenCategory::RightParen => ")",
            TokenCategory::Assign => "=",
            TokenCategory::Semicolon => ";",
            TokenCategory::Comma => ",",
            TokenCategory::Equal => "==",
            TokenCategory::NotEqual => "~=",
            TokenCategory::Less => "<",
            TokenCategory::LessEqual => "<=",
            TokenCategory::Greater => ">",
            TokenCategory::GreaterEqual => ">=",
            TokenCategory::Concat => "..",
            TokenCategory::Eof => "<eof>",
        }
    }

    /// Get keyword from string
    pub fn keyword(s: &str) -> Option<TokenCategory> {
        let category = match s {
            "and" => TokenCategory::And,
            "do" => TokenCategory::Do,
            "else" => TokenCategory::Else,
            "elseif" => TokenCategory::Elseif,
            "end" => TokenCategory::End,
            "false" => TokenCategory::False,
            "if" => TokenCategory::If,
            "local" => TokenCategory::Local,
            "nil" => TokenCategory::Nil,
            "not" => TokenCategory::Not,
            "or" => TokenCategory::Or,
            "then" => TokenCategory::Then,
            "true" => TokenCategory::True,
            "while" => TokenCategory::While,
            _ => return None,
        };
        Some(category)
    }

    /// Check if category is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenCategory::And
                | TokenCategory::Do
                | TokenCategory::Else
                | TokenCategory::Elseif
                | TokenCategory::End
                | TokenCategory::False
                | TokenCategory::If
                | TokenCategory::Local
                | TokenCategory::Nil
                | TokenCategory::Not
                | TokenCategory::Or
                | TokenCategory::Then
                | TokenCategory::True
                | TokenCategory::While
        )
    }

    /// Whether tokens of this category carry a value
    pub fn carries_value(&self) -> bool {
        matches!(
            self,
            TokenCategory::Id | TokenCategory::String | TokenCategory::Number
        )
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}
