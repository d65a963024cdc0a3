use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Path, PathSegment, Token},
    cursor::Cursor,
};

/// Errors produced while turning text into tokens.
///
/// Positions are rune offsets into the input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected end of input at position {position}")]
    UnexpectedEnd { position: usize },

    #[error("unexpected token {found:?} at position {position}")]
    UnexpectedChar { found: char, position: usize },

    #[error("unexpected token {found:?} after {after:?} at position {position}")]
    UnexpectedAfter {
        found: char,
        after: char,
        position: usize,
    },

    #[error("key in path cannot start with {found:?} at position {position}")]
    InvalidKeyStart { found: char, position: usize },

    #[error("error parsing number {text} at position {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("unexpected identifier {name:?} at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("unexpected escaped token {found:?} in string at position {position}")]
    InvalidEscape { found: char, position: usize },
}

fn is_id_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_id_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub struct Lexer {
    input: Cursor<char>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: Cursor::from(input),
        }
    }

    /// Offset of the rune most recently consumed.
    fn last_position(&self) -> usize {
        self.input.position().saturating_sub(1)
    }

    fn next_char(&mut self) -> Result<char, LexError> {
        self.input.bump().ok_or(LexError::UnexpectedEnd {
            position: self.input.position(),
        })
    }

    /// Scans the whole input. The first invalid rune aborts the scan.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        debug!(tokens = tokens.len(), "lexed expression");
        Ok(tokens)
    }

    /// Returns the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        loop {
            let Some(ch) = self.input.bump() else {
                return Ok(None);
            };

            let token = match ch {
                c if c.is_whitespace() => continue,
                '$' => self.read_path()?,
                '-' => match self.input.current() {
                    Some(d) if d.is_ascii_digit() => self.read_number(ch)?,
                    _ => Token::Minus,
                },
                c if c.is_ascii_digit() => self.read_number(c)?,
                c if is_id_start(c) => self.read_keyword(c)?,
                '\'' => Token::String(self.read_string()?),
                '?' => Token::IfNotFound,
                '+' => Token::Plus,
                '(' => Token::LParen,
                ')' => Token::RParen,
                '*' => Token::Star,
                '/' => Token::Slash,
                ',' => Token::Comma,
                '!' => Token::Not,
                '<' => self.with_equals(Token::Lt, Token::LtEq),
                '>' => self.with_equals(Token::Gt, Token::GtEq),
                '=' => self.read_double('=', Token::EqEq)?,
                '&' => self.read_double('&', Token::AndAnd)?,
                '|' => self.read_double('|', Token::OrOr)?,
                c => {
                    return Err(LexError::UnexpectedChar {
                        found: c,
                        position: self.last_position(),
                    });
                }
            };
            return Ok(Some(token));
        }
    }

    fn with_equals(&mut self, single: Token, double: Token) -> Token {
        if self.input.current() == Some('=') {
            self.input.bump();
            double
        } else {
            single
        }
    }

    /// Called after the first rune of a two-rune operator; the second must repeat it.
    fn read_double(&mut self, want: char, token: Token) -> Result<Token, LexError> {
        let next = self.next_char()?;
        if next != want {
            return Err(LexError::UnexpectedAfter {
                found: next,
                after: want,
                position: self.last_position(),
            });
        }
        Ok(token)
    }

    /// Called after `$`. Accepts `.field`, `['field']` and `[index]` segments
    /// until a rune that starts neither.
    fn read_path(&mut self) -> Result<Token, LexError> {
        let mut path = Path::default();

        loop {
            match self.input.current() {
                Some('.') => {
                    self.input.bump();
                    let next = self.next_char()?;
                    if !is_id_start(next) {
                        return Err(LexError::InvalidKeyStart {
                            found: next,
                            position: self.last_position(),
                        });
                    }
                    path.push(PathSegment::Field(self.read_identifier(next)));
                }
                Some('[') => {
                    self.input.bump();
                    path.push(self.read_index()?);
                }
                _ => break,
            }
        }

        Ok(Token::Path(path))
    }

    fn read_index(&mut self) -> Result<PathSegment, LexError> {
        let next = self.next_char()?;
        let segment = match next {
            '\'' => PathSegment::Field(self.read_string()?),
            d if d.is_ascii_digit() => {
                let position = self.last_position();
                let text = self.read_digits(d);
                let index = text
                    .parse::<usize>()
                    .map_err(|_| LexError::InvalidNumber { text, position })?;
                PathSegment::Index(index)
            }
            c => {
                return Err(LexError::UnexpectedChar {
                    found: c,
                    position: self.last_position(),
                });
            }
        };

        match self.next_char()? {
            ']' => Ok(segment),
            c => Err(LexError::UnexpectedChar {
                found: c,
                position: self.last_position(),
            }),
        }
    }

    /// Reads digits with at most one decimal point, starting from `first`.
    /// A second `.` is left in the input.
    fn read_digits(&mut self, first: char) -> String {
        let mut number = String::from(first);
        let mut seen_decimal = false;

        while let Some(ch) = self.input.current() {
            if ch.is_ascii_digit() {
                number.push(ch);
            } else if ch == '.' && !seen_decimal {
                seen_decimal = true;
                number.push(ch);
            } else {
                break;
            }
            self.input.bump();
        }
        number
    }

    fn read_number(&mut self, first: char) -> Result<Token, LexError> {
        let position = self.last_position();
        let text = self.read_digits(first);
        match text.parse::<f64>() {
            // Literals beyond the f64 range parse to infinity.
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(LexError::InvalidNumber { text, position }),
        }
    }

    fn read_identifier(&mut self, first: char) -> String {
        let mut result = String::from(first);
        while let Some(ch) = self.input.current() {
            if !is_id_char(ch) {
                break;
            }
            result.push(ch);
            self.input.bump();
        }
        result
    }

    fn read_keyword(&mut self, first: char) -> Result<Token, LexError> {
        let position = self.last_position();
        let ident = self.read_identifier(first);

        match ident.as_str() {
            "true" => Ok(Token::Boolean(true)),
            "false" => Ok(Token::Boolean(false)),
            "sum" => Ok(Token::Sum),
            "product" => Ok(Token::Product),
            "length" => Ok(Token::Length),
            "and" => Ok(Token::And),
            "or" => Ok(Token::Or),
            _ => Err(LexError::UnknownIdentifier {
                name: ident,
                position,
            }),
        }
    }

    /// Called after the opening `'`. Only `\'` and `\\` are valid escapes.
    fn read_string(&mut self) -> Result<String, LexError> {
        let mut result = String::new();

        loop {
            match self.next_char()? {
                '\'' => return Ok(result),
                '\\' => match self.next_char()? {
                    escaped @ ('\'' | '\\') => result.push(escaped),
                    found => {
                        return Err(LexError::InvalidEscape {
                            found,
                            position: self.last_position(),
                        });
                    }
                },
                ch => result.push(ch),
            }
        }
    }
}

/// Turns expression text into tokens.
///
/// # Examples
///
/// ```
/// use sprig_lang::{lex, Token};
///
/// let tokens = lex("sum(1, 2)").unwrap();
/// assert_eq!(tokens[0], Token::Sum);
/// assert_eq!(tokens.len(), 6);
/// ```
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

#[test]
fn test_keywords() {
    let tokens = lex("true false sum product length and or").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Boolean(true),
            Token::Boolean(false),
            Token::Sum,
            Token::Product,
            Token::Length,
            Token::And,
            Token::Or,
        ]
    );
}

#[test]
fn test_error_positions() {
    let err = lex("1 + @").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            found: '@',
            position: 4
        }
    );
}
