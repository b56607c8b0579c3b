/// Lexer for shell lines
///
/// Converts raw input such as `db.users.find({age: 30}).limit(5)` into a
/// stream of tokens for parsing. Literals follow JavaScript object-literal
/// rules: single or double quoted strings, bare keys, signed numbers.
use std::fmt;

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Null,

    // Identifiers
    Identifier(String),

    // Punctuation
    Dot,          // .
    Comma,        // ,
    Colon,        // :
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]

    // End of input
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Integer(i) => write!(f, "{}", i),
            Token::Float(fl) => write!(f, "{}", fl),
            Token::String(s) => write!(f, "{:?}", s),
            Token::Boolean(b) => write!(f, "{}", b),
            Token::Null => write!(f, "null"),
            Token::Identifier(id) => write!(f, "{}", id),
            Token::Dot => write!(f, "."),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::LeftParen => write!(f, "("),
            Token::RightParen => write!(f, ")"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::LeftBracket => write!(f, "["),
            Token::RightBracket => write!(f, "]"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer state
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer from input string
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Result<Token, LexerError> {
        self.skip_whitespace();

        if self.position >= self.input.len() {
            return Ok(Token::Eof);
        }

        let ch = self.current_char();

        let single = match ch {
            '.' => Some(Token::Dot),
            ',' => Some(Token::Comma),
            ':' => Some(Token::Colon),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if ch == '"' || ch == '\'' {
            return self.read_string(ch);
        }

        if ch.is_ascii_digit() || (ch == '-' && self.peek_char().is_some_and(|c| c.is_ascii_digit()))
        {
            return self.read_number();
        }

        if is_identifier_start(ch) {
            return Ok(self.read_identifier_or_keyword());
        }

        Err(LexerError::UnexpectedCharacter(ch))
    }

    /// Tokenize entire input into vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            if token == Token::Eof {
                tokens.push(token);
                break;
            }
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn current_char(&self) -> char {
        self.input[self.position]
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while self.position < self.input.len() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    fn consume_digits(&mut self) {
        while self.position < self.input.len() && self.current_char().is_ascii_digit() {
            self.advance();
        }
    }

    fn read_number(&mut self) -> Result<Token, LexerError> {
        let start = self.position;
        let mut is_float = false;

        if self.current_char() == '-' {
            self.advance();
        }
        self.consume_digits();

        if self.position < self.input.len()
            && self.current_char() == '.'
            && self.peek_char().is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.advance();
            self.consume_digits();
        }

        if self.position < self.input.len() && matches!(self.current_char(), 'e' | 'E') {
            is_float = true;
            self.advance();
            if self.position < self.input.len() && matches!(self.current_char(), '+' | '-') {
                self.advance();
            }
            let exponent_start = self.position;
            self.consume_digits();
            if self.position == exponent_start {
                let text: String = self.input[start..self.position].iter().collect();
                return Err(LexerError::InvalidNumber(text));
            }
        }

        let num_str: String = self.input[start..self.position].iter().collect();

        if !is_float {
            if let Ok(value) = num_str.parse::<i64>() {
                return Ok(Token::Integer(value));
            }
        }

        // integers beyond i64 degrade to floats, as in JavaScript
        num_str
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Token::Float)
            .ok_or(LexerError::InvalidNumber(num_str))
    }

    fn read_string(&mut self, quote: char) -> Result<Token, LexerError> {
        self.advance(); // skip opening quote
        let mut string = String::new();

        loop {
            if self.position >= self.input.len() {
                return Err(LexerError::UnterminatedString);
            }
            let ch = self.current_char();
            self.advance();
            match ch {
                c if c == quote => break,
                '\\' => string.push(self.read_escape()?),
                c => string.push(c),
            }
        }

        Ok(Token::String(string))
    }

    fn read_escape(&mut self) -> Result<char, LexerError> {
        if self.position >= self.input.len() {
            return Err(LexerError::UnterminatedString);
        }
        let ch = self.current_char();
        self.advance();
        let escaped = match ch {
            '"' => '"',
            '\'' => '\'',
            '\\' => '\\',
            '/' => '/',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'u' => return self.read_unicode_escape(),
            other => return Err(LexerError::InvalidEscape(other.to_string())),
        };
        Ok(escaped)
    }

    fn read_unicode_escape(&mut self) -> Result<char, LexerError> {
        let high = self.read_hex4()?;
        if !(0xD800..0xDC00).contains(&high) {
            return char::from_u32(high)
                .ok_or_else(|| LexerError::InvalidEscape(format!("u{:04x}", high)));
        }

        // surrogate pair: expect a second \uXXXX carrying the low half
        if self.input.get(self.position) != Some(&'\\') || self.peek_char() != Some('u') {
            return Err(LexerError::InvalidEscape(format!("u{:04x}", high)));
        }
        self.position += 2;
        let low = self.read_hex4()?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(LexerError::InvalidEscape(format!("u{:04x}", low)));
        }
        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or_else(|| LexerError::InvalidEscape(format!("u{:04x}", high)))
    }

    fn read_hex4(&mut self) -> Result<u32, LexerError> {
        if self.position + 4 > self.input.len() {
            return Err(LexerError::UnterminatedString);
        }
        let digits: String = self.input[self.position..self.position + 4].iter().collect();
        let value = u32::from_str_radix(&digits, 16)
            .map_err(|_| LexerError::InvalidEscape(format!("u{}", digits)))?;
        self.position += 4;
        Ok(value)
    }

    fn read_identifier_or_keyword(&mut self) -> Token {
        let start = self.position;

        while self.position < self.input.len() {
            let ch = self.current_char();
            if is_identifier_start(ch) || ch.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();

        match text.as_str() {
            "true" => Token::Boolean(true),
            "false" => Token::Boolean(false),
            "null" | "undefined" => Token::Null,
            _ => Token::Identifier(text),
        }
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

/// Lexer errors
#[derive(Debug, Clone, PartialEq)]
pub enum LexerError {
    UnexpectedCharacter(char),
    InvalidNumber(String),
    InvalidEscape(String),
    UnterminatedString,
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexerError::UnexpectedCharacter(ch) => write!(f, "Unexpected character: '{}'", ch),
            LexerError::InvalidNumber(s) => write!(f, "Invalid number: '{}'", s),
            LexerError::InvalidEscape(s) => write!(f, "Invalid escape sequence: '\\{}'", s),
            LexerError::UnterminatedString => write!(f, "Unterminated string literal"),
        }
    }
}

impl std::error::Error for LexerError {}
