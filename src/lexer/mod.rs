//! Lexical analysis for SLua
//!
//! Converts a stream of Unicode code points into tokens, one token per call.

pub mod ascii;
mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenCategory, TokenValue};
