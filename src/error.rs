//! Error types for the SLua front end

use crate::lexer::Token;
use thiserror::Error;

/// Front end errors
///
/// Both input-driven kinds are fail-fast: the first one raised aborts the
/// whole `scan`/`parse` call that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Malformed character sequence found by the scanner
    ///
    /// **Triggered by:** unterminated strings, bad escapes, a lone `~`,
    /// characters that cannot start any token
    /// **Example:** `'abc` (missing closing quote)
    #[error("{module}:{line}:{column} {message}")]
    LexicalError {
        /// Component that raised the error
        module: &'static str,
        /// Line of the scanner when the error occurred
        line: usize,
        /// Column of the scanner when the error occurred
        column: usize,
        /// Error description
        message: String,
    },

    /// Grammar violation found by the parser
    ///
    /// **Triggered by:** a token the grammar does not allow at this point
    /// **Example:** `do x = 1` (missing `end`)
    #[error("{module}:{}:{}: '{token}' {message}", .token.line, .token.column)]
    SyntaxError {
        /// Component that raised the error
        module: &'static str,
        /// The offending token
        token: Token,
        /// What the parser expected instead
        message: String,
    },

    /// Broken internal invariant; signals a bug in the front end, never bad input
    #[error("{module} internal error: {message}")]
    InternalError {
        /// Component that raised the error
        module: &'static str,
        /// Description of the violated invariant
        message: String,
    },
}

impl Error {
    /// Create a lexical error at the given scanner position
    pub fn lexical(line: usize, column: usize, message: impl Into<String>) -> Self {
        Error::LexicalError {
            module: "scanner",
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a syntax error wrapping the offending token
    pub fn syntax(token: Token, message: impl Into<String>) -> Self {
        Error::SyntaxError {
            module: "parser",
            token,
            message: message.into(),
        }
    }

    /// Create an internal invariant error
    pub fn internal(module: &'static str, message: impl Into<String>) -> Self {
        Error::InternalError {
            module,
            message: message.into(),
        }
    }

    /// Source position the error refers to, if any
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::LexicalError { line, column, .. } => Some((*line, *column)),
            Error::SyntaxError { token, .. } => Some((token.line, token.column)),
            Error::InternalError { .. } => None,
        }
    }

    /// The bare message, without module tag or position
    pub fn message(&self) -> &str {
        match self {
            Error::LexicalError { message, .. }
            | Error::SyntaxError { message, .. }
            | Error::InternalError { message, .. } => message,
        }
    }

    /// Whether this error is an implementation bug rather than bad input
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::InternalError { .. })
    }
}

/// Result type for SLua front end operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenCategory;

    #[test]
    fn test_lexical_error_display() {
        let err = Error::lexical(3, 7, "incomplete string at <eof>");
        assert_eq!(err.to_string(), "scanner:3:7 incomplete string at <eof>");
        assert_eq!(err.position(), Some((3, 7)));
    }

    #[test]
    fn test_syntax_error_display() {
        let token = Token::id("foo", 2, 5);
        let err = Error::syntax(token, "expect ',' to split var");
        assert_eq!(err.to_string(), "parser:2:5: 'foo' expect ',' to split var");
        assert_eq!(err.message(), "expect ',' to split var");

        let err = Error::syntax(Token::new(TokenCategory::Eof, 1, 7), "expect <eof>");
        assert_eq!(err.to_string(), "parser:1:7: '<eof>' expect <eof>");
    }

    #[test]
    fn test_internal_is_distinct() {
        let err = Error::internal("parser", "not a do statement");
        assert!(err.is_internal());
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "parser internal error: not a do statement");
        assert!(!Error::lexical(1, 1, "unexpect character").is_internal());
    }
}
