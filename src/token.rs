use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  Illegal,
  Eof,

  Identifier,
  Integer,
  String,

  Assign,
  Plus,
  Minus,
  Star,
  Slash,
  Bang,

  Less,
  Greater,
  LessEqual,
  GreaterEqual,
  EqualEqual,
  BangEqual,

  Comma,
  Semicolon,
  Colon,
  LeftParen,
  RightParen,
  LeftBrace,
  RightBrace,
  LeftBracket,
  RightBracket,

  Function,
  Let,
  True,
  False,
  If,
  Else,
  Return,
}

impl TokenKind {
  pub fn keyword(ident: &str) -> Option<TokenKind> {
    match ident {
      "fn" => Some(TokenKind::Function),
      "let" => Some(TokenKind::Let),
      "true" => Some(TokenKind::True),
      "false" => Some(TokenKind::False),
      "if" => Some(TokenKind::If),
      "else" => Some(TokenKind::Else),
      "return" => Some(TokenKind::Return),
      _ => None,
    }
  }
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      TokenKind::Illegal => "ILLEGAL",
      TokenKind::Eof => "EOF",
      TokenKind::Identifier => "IDENT",
      TokenKind::Integer => "INT",
      TokenKind::String => "STRING",
      TokenKind::Assign => "=",
      TokenKind::Plus => "+",
      TokenKind::Minus => "-",
      TokenKind::Star => "*",
      TokenKind::Slash => "/",
      TokenKind::Bang => "!",
      TokenKind::Less => "<",
      TokenKind::Greater => ">",
      TokenKind::LessEqual => "<=",
      TokenKind::GreaterEqual => ">=",
      TokenKind::EqualEqual => "==",
      TokenKind::BangEqual => "!=",
      TokenKind::Comma => ",",
      TokenKind::Semicolon => ";",
      TokenKind::Colon => ":",
      TokenKind::LeftParen => "(",
      TokenKind::RightParen => ")",
      TokenKind::LeftBrace => "{",
      TokenKind::RightBrace => "}",
      TokenKind::LeftBracket => "[",
      TokenKind::RightBracket => "]",
      TokenKind::Function => "FUNCTION",
      TokenKind::Let => "LET",
      TokenKind::True => "TRUE",
      TokenKind::False => "FALSE",
      TokenKind::If => "IF",
      TokenKind::Else => "ELSE",
      TokenKind::Return => "RETURN",
    };

    f.write_str(name)
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
  pub kind: TokenKind,
  pub literal: String,
}

impl Token {
  pub fn new(kind: TokenKind, literal: impl Into<String>) -> Token {
    Token {
      kind,
      literal: literal.into(),
    }
  }

  pub fn eof() -> Token {
    Token::new(TokenKind::Eof, "")
  }
}
