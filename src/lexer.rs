use crate::token::{Token, TokenKind};

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

/// Byte-at-a-time scanner over ASCII source text.
///
/// Once the input is exhausted every further call to [`Lexer::next_token`]
/// yields an `Eof` token.
pub struct Lexer<'a> {
    input: &'a [u8],
    position: usize,
    read_position: usize,
    ch: u8,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        let mut lexer = Lexer {
            input: input.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
            finished: false,
        };
        lexer.read_char();
        lexer
    }

    fn read_char(&mut self) {
        self.ch = self.peek_char();
        self.position = self.read_position;
        if self.read_position <= self.input.len() {
            self.read_position += 1;
        }
    }

    fn peek_char(&self) -> u8 {
        self.input.get(self.read_position).copied().unwrap_or(0)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_whitespace(&mut self) {
        while !self.at_end() && matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    fn read_while(&mut self, predicate: fn(u8) -> bool) -> String {
        let start = self.position;
        while !self.at_end() && predicate(self.ch) {
            self.read_char();
        }
        self.slice(start, self.position)
    }

    fn read_string(&mut self) -> String {
        // opening quote
        self.read_char();
        let start = self.position;
        while !self.at_end() && self.ch != b'"' {
            self.read_char();
        }
        let content = self.slice(start, self.position);
        // closing quote, if any
        self.read_char();
        content
    }

    fn two_char(&mut self, single: TokenKind, double: TokenKind) -> Token {
        let first = self.ch;
        if self.peek_char() == b'=' {
            self.read_char();
            self.read_char();
            Token::new(double, format!("{}=", first as char))
        } else {
            self.read_char();
            Token::new(single, (first as char).to_string())
        }
    }

    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.at_end() {
            self.finished = true;
            return Token::eof();
        }

        let kind = match self.ch {
            b'=' => return self.two_char(TokenKind::Assign, TokenKind::EqualEqual),
            b'!' => return self.two_char(TokenKind::Bang, TokenKind::BangEqual),
            b'<' => return self.two_char(TokenKind::Less, TokenKind::LessEqual),
            b'>' => return self.two_char(TokenKind::Greater, TokenKind::GreaterEqual),
            b'"' => return Token::new(TokenKind::String, self.read_string()),
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b',' => TokenKind::Comma,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            ch if is_letter(ch) => {
                let ident = self.read_while(is_letter);
                let kind = TokenKind::keyword(&ident).unwrap_or(TokenKind::Identifier);
                return Token::new(kind, ident);
            }
            ch if ch.is_ascii_digit() => {
                return Token::new(TokenKind::Integer, self.read_while(|c| c.is_ascii_digit()));
            }
            _ => TokenKind::Illegal,
        };

        let token = Token::new(kind, self.slice(self.position, self.position + 1));
        self.read_char();
        token
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}
