//! Token scanner for Lua-like expressions.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Integer(i64),
    Float(f64),
    String(String),
    Name(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Hash,
    Concat,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    Assign,
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,
    Colon,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Token::Integer(n) => return write!(f, "{n}"),
            Token::Float(x) => return write!(f, "{x}"),
            Token::String(s) => return write!(f, "'{s}'"),
            Token::Name(name) => return f.write_str(name),
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Caret => "^",
            Token::Hash => "#",
            Token::Concat => "..",
            Token::Eq => "==",
            Token::NotEq => "~=",
            Token::Less => "<",
            Token::LessEq => "<=",
            Token::Greater => ">",
            Token::GreaterEq => ">=",
            Token::Assign => "=",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::LBrace => "{",
            Token::RBrace => "}",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::Dot => ".",
            Token::Colon => ":",
            Token::Eof => "<eof>",
        };
        f.write_str(symbol)
    }
}

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    /// Scans the whole input, ending with `Token::Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, String> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token == Token::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn next_token(&mut self) -> Result<Token, String> {
        self.skip_trivia();

        let Some(ch) = self.input.next() else {
            return Ok(Token::Eof);
        };
        let token = match ch {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Caret,
            '#' => Token::Hash,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '{' => Token::LBrace,
            '}' => Token::RBrace,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            ':' => Token::Colon,
            '=' => self.pick('=', Token::Eq, Token::Assign),
            '<' => self.pick('=', Token::LessEq, Token::Less),
            '>' => self.pick('=', Token::GreaterEq, Token::Greater),
            '~' if self.input.peek() == Some(&'=') => {
                self.input.next();
                Token::NotEq
            }
            '.' if self.input.peek() == Some(&'.') => {
                self.input.next();
                Token::Concat
            }
            '.' if self.input.peek().is_some_and(char::is_ascii_digit) => self.read_number('.')?,
            '.' => Token::Dot,
            '"' | '\'' => self.read_string(ch)?,
            ch if ch.is_ascii_digit() => self.read_number(ch)?,
            ch if ch.is_alphabetic() || ch == '_' => self.read_name(ch),
            ch => return Err(format!("unexpected symbol near '{ch}'")),
        };
        Ok(token)
    }

    fn pick(&mut self, next: char, matched: Token, single: Token) -> Token {
        if self.input.peek() == Some(&next) {
            self.input.next();
            matched
        } else {
            single
        }
    }

    /// Skips whitespace and `--` line comments.
    fn skip_trivia(&mut self) {
        loop {
            while self.input.next_if(|c| c.is_whitespace()).is_some() {}
            let mut ahead = self.input.clone();
            if ahead.next() == Some('-') && ahead.next() == Some('-') {
                while self.input.next_if(|c| *c != '\n').is_some() {}
            } else {
                return;
            }
        }
    }

    fn read_name(&mut self, first: char) -> Token {
        let mut name = String::from(first);
        while let Some(ch) = self.input.next_if(|c| c.is_alphanumeric() || *c == '_') {
            name.push(ch);
        }
        Token::Name(name)
    }

    fn read_number(&mut self, first: char) -> Result<Token, String> {
        let mut text = String::from(first);
        if first == '0' && self.input.next_if(|c| *c == 'x' || *c == 'X').is_some() {
            while let Some(ch) = self.input.next_if(char::is_ascii_hexdigit) {
                text.push(ch);
            }
            return i64::from_str_radix(&text, 16)
                .ok()
                .map(Token::Integer)
                .ok_or_else(|| format!("malformed number near '0x{text}'"));
        }

        let mut is_float = first == '.';
        while let Some(&ch) = self.input.peek() {
            match ch {
                '0'..='9' => text.push(ch),
                '.' if !is_float => {
                    let mut ahead = self.input.clone();
                    ahead.next();
                    if ahead.peek() == Some(&'.') {
                        break;
                    }
                    is_float = true;
                    text.push(ch);
                }
                'e' | 'E' => {
                    is_float = true;
                    text.push(ch);
                    self.input.next();
                    if let Some(sign) = self.input.next_if(|c| *c == '+' || *c == '-') {
                        text.push(sign);
                    }
                    continue;
                }
                _ => break,
            }
            self.input.next();
        }

        if !is_float && let Ok(n) = text.parse::<i64>() {
            return Ok(Token::Integer(n));
        }
        text.parse::<f64>()
            .ok()
            .map(Token::Float)
            .ok_or_else(|| format!("malformed number near '{text}'"))
    }

    fn read_string(&mut self, quote: char) -> Result<Token, String> {
        let mut result = String::new();
        while let Some(ch) = self.input.next() {
            match ch {
                c if c == quote => return Ok(Token::String(result)),
                '\n' => break,
                '\\' => result.push(self.read_escape()?),
                c => result.push(c),
            }
        }
        Err(format!("unfinished string near '{quote}{result}'"))
    }

    fn read_escape(&mut self) -> Result<char, String> {
        let escaped = match self.input.next() {
            Some('n') => '\n',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('a') => '\u{7}',
            Some('b') => '\u{8}',
            Some('f') => '\u{c}',
            Some('v') => '\u{b}',
            Some(c @ ('\\' | '"' | '\'' | '\n')) => c,
            Some(d) if d.is_ascii_digit() => {
                let mut code = d.to_digit(10).unwrap_or(0);
                for _ in 0..2 {
                    match self.input.next_if(char::is_ascii_digit) {
                        Some(next) => code = code * 10 + next.to_digit(10).unwrap_or(0),
                        None => break,
                    }
                }
                // Codes name single bytes; 128..=255 map to U+0080..U+00FF.
                u8::try_from(code)
                    .ok()
                    .map(char::from)
                    .ok_or_else(|| "invalid escape sequence".to_string())?
            }
            _ => return Err("invalid escape sequence".to_string()),
        };
        Ok(escaped)
    }
}
