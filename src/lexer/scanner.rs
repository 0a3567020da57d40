use super::ascii;
use super::token::{Token, TokenCategory};
use crate::error::{Error, Result};
use std::iter::Fuse;
use std::mem;
use std::str::Chars;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Scanner for SLua source text
///
/// Pulls code points lazily from its input and hands out one token per
/// [`Scanner::scan`] call. Once the input is exhausted every further call
/// yields an `<eof>` token.
///
/// Lines and columns are 1-based. A line break resets the column so the
/// first code point of the next line sits at column 1; only when the input
/// ends right after a line break does the column stay at 0.
pub struct Scanner<I: Iterator<Item = char>> {
    /// Code point source
    input: Fuse<I>,
    /// One code point of pushback; `None` before the first read and at end of input
    current: Option<char>,
    /// Current line number (1-indexed)
    line: usize,
    /// Column of `current` (1-indexed, 0 when nothing has been read on this line)
    column: usize,
    /// Text of the token being accumulated
    buffer: String,
}

impl<'a> Scanner<Chars<'a>> {
    /// Creates a scanner over an in-memory source string
    pub fn from_source(source: &'a str) -> Self {
        Scanner::new(source.chars())
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    /// Creates a new scanner from a stream of code points
    pub fn new(input: impl IntoIterator<Item = char, IntoIter = I>) -> Self {
        Scanner {
            input: input.into_iter().fuse(),
            current: None,
            line: 1,
            column: 0,
            buffer: String::new(),
        }
    }

    /// Current `(line, column)` of the scanner's counters
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Scans the next token
    pub fn scan(&mut self) -> Result<Token> {
        if self.current.is_none() {
            self.current = self.next_char();
        }

        while let Some(ch) = self.current {
            let (line, column) = (self.line, self.column);
            match ch {
                ' ' | '\t' | '\x0b' | '\x0c' => self.current = self.next_char(),
                '\r' | '\n' => self.new_line(),
                '-' => {
                    self.current = self.next_char();
                    if self.current == Some('-') {
                        self.comment();
                    } else {
                        return Ok(Token::new(TokenCategory::Sub, line, column));
                    }
                }
                c if ascii::is_digit(c) => {
                    self.buffer.clear();
                    return self.number(line, column);
                }
                '+' => return Ok(self.single(TokenCategory::Add, line, column)),
                '*' => return Ok(self.single(TokenCategory::Mul, line, column)),
                '/' => return Ok(self.single(TokenCategory::Div, line, column)),
                '#' => return Ok(self.single(TokenCategory::Len, line, column)),
                '(' => return Ok(self.single(TokenCategory::LeftParen, line, column)),
                ')' => return Ok(self.single(TokenCategory::RightParen, line, column)),
                ';' => return Ok(self.single(TokenCategory::Semicolon, line, column)),
                ',' => return Ok(self.single(TokenCategory::Comma, line, column)),
                '.' => {
                    self.current = self.next_char();
                    if self.current == Some('.') {
                        self.current = self.next_char();
                        return Ok(Token::new(TokenCategory::Concat, line, column));
                    }
                    // Leading-dot decimal such as `.5`
                    self.buffer.clear();
                    self.buffer.push('.');
                    return self.fraction(line, column);
                }
                '~' => {
                    self.current = self.next_char();
                    if self.current != Some('=') {
                        return Err(self.error("expect '=' after '~'"));
                    }
                    self.current = self.next_char();
                    return Ok(Token::new(TokenCategory::NotEqual, line, column));
                }
                '=' => {
                    return Ok(self.xequal(
                        TokenCategory::Equal,
                        TokenCategory::Assign,
                        line,
                        column,
                    ))
                }
                '>' => {
                    return Ok(self.xequal(
                        TokenCategory::GreaterEqual,
                        TokenCategory::Greater,
                        line,
                        column,
                    ))
                }
                '<' => {
                    return Ok(self.xequal(
                        TokenCategory::LessEqual,
                        TokenCategory::Less,
                        line,
                        column,
                    ))
                }
                '\'' | '"' => return self.single_line_string(ch, line, column),
                _ => return self.identifier(ch, line, column),
            }
        }

        Ok(Token::new(TokenCategory::Eof, self.line, self.column))
    }

    /// Scans all tokens up to and including the first `<eof>`
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.input.next();
        if ch.is_some() {
            self.column += 1;
        }
        ch
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::lexical(self.line, self.column, message)
    }

    /// Consumes one line break; `\r\n` and `\n\r` count as a single one
    fn new_line(&mut self) {
        let previous = self.current;
        self.current = self.next_char();
        if matches!(self.current, Some('\r' | '\n')) && self.current != previous {
            self.current = self.next_char();
        }
        self.line += 1;
        self.column = usize::from(self.current.is_some());
    }

    fn comment(&mut self) {
        self.current = self.next_char();
        while !matches!(self.current, None | Some('\r' | '\n')) {
            self.current = self.next_char();
        }
    }

    fn single(&mut self, category: TokenCategory, line: usize, column: usize) -> Token {
        self.current = self.next_char();
        Token::new(category, line, column)
    }

    fn xequal(
        &mut self,
        with_equal: TokenCategory,
        without: TokenCategory,
        line: usize,
        column: usize,
    ) -> Token {
        self.current = self.next_char();
        if self.current == Some('=') {
            self.current = self.next_char();
            Token::new(with_equal, line, column)
        } else {
            Token::new(without, line, column)
        }
    }

    fn take_digits(&mut self) {
        while let Some(ch) = self.current.filter(|&c| is_decimal_digit(c)) {
            self.buffer.push(ch);
            self.current = self.next_char();
        }
    }

    fn number(&mut self, line: usize, column: usize) -> Result<Token> {
        self.take_digits();
        if self.current == Some('.') {
            self.buffer.push('.');
            self.current = self.next_char();
        }
        self.fraction(line, column)
    }

    fn fraction(&mut self, line: usize, column: usize) -> Result<Token> {
        self.take_digits();
        let text = mem::take(&mut self.buffer);
        match text.parse::<f64>() {
            Ok(value) => Ok(Token::number(value, line, column)),
            Err(_) => Err(self.error(format!("parse number {} error: invalid syntax", text))),
        }
    }

    fn single_line_string(&mut self, quote: char, line: usize, column: usize) -> Result<Token> {
        self.current = self.next_char();
        self.buffer.clear();
        loop {
            match self.current {
                Some(ch) if ch == quote => break,
                None => return Err(self.error("incomplete string at <eof>")),
                Some('\r' | '\n') => return Err(self.error("incomplete string at <eol>")),
                Some(ch) => self.string_char(ch)?,
            }
        }
        self.current = self.next_char();
        Ok(Token::string(mem::take(&mut self.buffer), line, column))
    }

    fn string_char(&mut self, ch: char) -> Result<()> {
        if ch == '\\' {
            self.current = self.next_char();
            let unescaped = match self.current {
                Some('a') => '\x07',
                Some('b') => '\x08',
                Some('f') => '\x0c',
                Some('n') => '\n',
                Some('r') => '\r',
                Some('t') => '\t',
                Some('v') => '\x0b',
                Some('\\') => '\\',
                Some('"') => '"',
                Some('\'') => '\'',
                _ => return Err(self.error("unexpect character after '\\'")),
            };
            self.buffer.push(unescaped);
        } else {
            self.buffer.push(ch);
        }
        self.current = self.next_char();
        Ok(())
    }

    fn identifier(&mut self, first: char, line: usize, column: usize) -> Result<Token> {
        if !is_letter(first) {
            return Err(self.error("unexpect character"));
        }

        self.buffer.clear();
        self.buffer.push(first);
        self.current = self.next_char();
        while let Some(ch) = self.current.filter(|&c| is_letter(c) || is_decimal_digit(c)) {
            self.buffer.push(ch);
            self.current = self.next_char();
        }

        let text = mem::take(&mut self.buffer);
        Ok(match TokenCategory::keyword(&text) {
            Some(keyword) => Token::new(keyword, line, column),
            None => Token::id(text, line, column),
        })
    }
}

/// Letters that may start an identifier: ASCII letters, `_` and any
/// code point in a Unicode letter category
fn is_letter(ch: char) -> bool {
    ascii::is_letter(ch)
        || ch == '_'
        || (!ch.is_ascii()
            && matches!(
                get_general_category(ch),
                GeneralCategory::UppercaseLetter
                    | GeneralCategory::LowercaseLetter
                    | GeneralCategory::TitlecaseLetter
                    | GeneralCategory::ModifierLetter
                    | GeneralCategory::OtherLetter
            ))
}

/// Unicode decimal digits (`Nd`), ASCII `0-9` included
fn is_decimal_digit(ch: char) -> bool {
    get_general_category(ch) == GeneralCategory::DecimalNumber
}
