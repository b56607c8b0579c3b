/// Parser for shell lines
///
/// Converts a stream of tokens into a [`Chain`]. Call arguments are
/// JavaScript-style literals and are turned into `serde_json::Value`s here,
/// so the evaluator only ever sees plain JSON.
use super::ast::*;
use super::lexer::{Lexer, LexerError, Token};
use serde_json::{Map, Number, Value};
use std::fmt;

/// Deepest object/array nesting accepted in an argument
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parser for shell lines
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
}

impl Parser {
    /// Create a new parser from a shell line
    pub fn new(input: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(input);
        let tokens = lexer.tokenize().map_err(ParseError::LexerError)?;
        Ok(Self {
            tokens,
            position: 0,
            depth: 0,
        })
    }

    /// Parse the line into a chain
    pub fn parse(&mut self) -> Result<Chain, ParseError> {
        let root = self.expect_identifier("identifier")?;
        let mut steps = Vec::new();

        loop {
            match self.current_token() {
                Token::Dot => {
                    self.advance();
                    let name = self.expect_identifier("method or collection name")?;
                    steps.push(Step::Member(name));
                }
                Token::LeftBracket => {
                    self.advance();
                    let name = match self.current_token().clone() {
                        Token::String(name) => {
                            self.advance();
                            name
                        }
                        found => {
                            return Err(ParseError::UnexpectedToken {
                                expected: "string".to_string(),
                                found,
                            })
                        }
                    };
                    self.expect_token(Token::RightBracket)?;
                    steps.push(Step::Index(name));
                }
                Token::LeftParen => {
                    self.advance();
                    let args = self.parse_sequence(Token::RightParen)?;
                    steps.push(Step::Call(args));
                }
                _ => break,
            }
        }

        self.expect_token(Token::Eof)?;

        Ok(Chain { root, steps })
    }

    /// Parses comma separated values up to `close`, allowing a trailing comma.
    fn parse_sequence(&mut self, close: Token) -> Result<Vec<Value>, ParseError> {
        let mut values = Vec::new();

        while self.current_token() != &close {
            values.push(self.parse_value()?);

            if self.current_token() == &Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect_token(close)?;
        Ok(values)
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.current_token().clone() {
            Token::LeftBrace => {
                self.advance();
                return self.nested(Self::parse_object);
            }
            Token::LeftBracket => {
                self.advance();
                return self.nested(|parser| {
                    parser
                        .parse_sequence(Token::RightBracket)
                        .map(Value::Array)
                });
            }
            Token::String(s) => Value::String(s),
            Token::Integer(i) => Value::from(i),
            Token::Float(f) => float_value(f)?,
            Token::Boolean(b) => Value::Bool(b),
            Token::Null => Value::Null,
            found => {
                return Err(ParseError::UnexpectedToken {
                    expected: "value".to_string(),
                    found,
                })
            }
        };
        self.advance();
        Ok(value)
    }

    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let mut map = Map::new();

        while self.current_token() != &Token::RightBrace {
            let key = match self.current_token().clone() {
                Token::Identifier(key) | Token::String(key) => key,
                Token::Integer(i) => i.to_string(),
                Token::Boolean(b) => b.to_string(),
                Token::Null => "null".to_string(),
                found => {
                    return Err(ParseError::UnexpectedToken {
                        expected: "object key".to_string(),
                        found,
                    })
                }
            };
            self.advance();
            self.expect_token(Token::Colon)?;
            let value = self.parse_value()?;
            map.insert(key, value);

            if self.current_token() == &Token::Comma {
                self.advance();
            } else {
                break;
            }
        }

        self.expect_token(Token::RightBrace)?;
        Ok(Value::Object(map))
    }

    fn nested<F>(&mut self, parse: F) -> Result<Value, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<Value, ParseError>,
    {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn current_token(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn expect_identifier(&mut self, expected: &str) -> Result<String, ParseError> {
        if let Token::Identifier(name) = self.current_token().clone() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: self.current_token().clone(),
            })
        }
    }

    fn expect_token(&mut self, expected: Token) -> Result<(), ParseError> {
        if self.current_token() == &expected {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                expected: format!("{}", expected),
                found: self.current_token().clone(),
            })
        }
    }
}

// JavaScript numbers have no separate integer type: 1.0 and 2e0 print as 1 and 2
fn float_value(f: f64) -> Result<Value, ParseError> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Ok(Value::from(f as i64));
    }
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or(ParseError::InvalidNumber(f))
}

/// Parses a whole line in one call.
pub fn parse_line(input: &str) -> Result<Chain, ParseError> {
    Parser::new(input)?.parse()
}

/// Parser errors
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    LexerError(LexerError),
    UnexpectedToken { expected: String, found: Token },
    InvalidNumber(f64),
    NestingTooDeep(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::LexerError(e) => write!(f, "Lexer error: {}", e),
            ParseError::UnexpectedToken { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            ParseError::InvalidNumber(n) => write!(f, "Number {} cannot be represented", n),
            ParseError::NestingTooDeep(max) => {
                write!(f, "Literal nesting exceeds {} levels", max)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::LexerError(e) => Some(e),
            _ => None,
        }
    }
}
