use super::token::{Token, TokenKind};
use super::Loc;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Hand-written lexer over the raw source text. Whitespace and comments are
/// skipped; every token carries the 1-based line and column of its first
/// character. Malformed input never fails the lexer: it surfaces as an
/// `Unknown` token for the parser to report.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: u32,
    column: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    pub fn next(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let loc = self.loc();
            let c = match self.chars.peek() {
                Some(c) => *c,
                None => return Token::new(TokenKind::Eof, "", loc),
            };
            return match c {
                ';' => self.single(TokenKind::Semicolon, loc),
                '{' => self.single(TokenKind::LBrace, loc),
                '}' => self.single(TokenKind::RBrace, loc),
                '(' => self.single(TokenKind::LParen, loc),
                ')' => self.single(TokenKind::RParen, loc),
                '<' => self.single(TokenKind::Less, loc),
                '>' => self.single(TokenKind::Greater, loc),
                '=' => {
                    self.advance();
                    if self.chars.peek() == Some(&'=') {
                        self.advance();
                        Token::new(TokenKind::EqEq, "==", loc)
                    } else {
                        Token::new(TokenKind::Assign, "=", loc)
                    }
                }
                '!' => {
                    self.advance();
                    if self.chars.peek() == Some(&'=') {
                        self.advance();
                        Token::new(TokenKind::NotEq, "!=", loc)
                    } else {
                        Token::new(TokenKind::Unknown, "!", loc)
                    }
                }
                '+' => {
                    self.advance();
                    if self.chars.peek() == Some(&'+') {
                        self.advance();
                        Token::new(TokenKind::PlusPlus, "++", loc)
                    } else {
                        Token::new(TokenKind::Unknown, "+", loc)
                    }
                }
                '-' => {
                    self.advance();
                    match self.chars.peek() {
                        Some('-') => {
                            self.advance();
                            Token::new(TokenKind::MinusMinus, "--", loc)
                        }
                        Some(d) if d.is_ascii_digit() => self.number(loc, true),
                        _ => Token::new(TokenKind::Unknown, "-", loc),
                    }
                }
                '/' => {
                    self.advance();
                    match self.chars.peek() {
                        Some('/') => {
                            self.line_comment();
                            continue;
                        }
                        Some('*') => {
                            self.block_comment();
                            continue;
                        }
                        _ => Token::new(TokenKind::Unknown, "/", loc),
                    }
                }
                '"' => self.string(loc),
                c if c.is_ascii_digit() => self.number(loc, false),
                c if is_ident_start(c) => self.ident(loc),
                c => {
                    self.advance();
                    Token::new(TokenKind::Unknown, &c.to_string(), loc)
                }
            };
        }
    }

    fn loc(&self) -> Loc {
        Loc::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.chars.peek() {
            if *c == ' ' || *c == '\t' || *c == '\n' || *c == '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn line_comment(&mut self) {
        while let Some(c) = self.chars.peek() {
            if *c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn block_comment(&mut self) {
        self.advance(); // the '*'
        let mut star = false;
        while let Some(c) = self.advance() {
            if star && c == '/' {
                return;
            }
            star = c == '*';
        }
    }

    fn single(&mut self, kind: TokenKind, loc: Loc) -> Token {
        let c = self.advance().unwrap_or_default();
        Token::new(kind, &c.to_string(), loc)
    }

    /// A string literal may not contain a newline; an unterminated literal is
    /// an `Unknown` token holding whatever was collected.
    fn string(&mut self, loc: Loc) -> Token {
        self.advance(); // opening quote
        let mut value = String::new();
        loop {
            match self.chars.peek() {
                None | Some('\n') => return Token::new(TokenKind::Unknown, &value, loc),
                Some('"') => {
                    self.advance();
                    return Token::new(TokenKind::Str, &value, loc);
                }
                Some(_) => value.push(self.advance().unwrap_or_default()),
            }
        }
    }

    fn number(&mut self, loc: Loc, negative: bool) -> Token {
        let mut value = String::new();
        if negative {
            value.push('-');
        }
        while let Some(c) = self.chars.peek() {
            if c.is_ascii_digit() {
                value.push(self.advance().unwrap_or_default());
            } else {
                break;
            }
        }
        Token::new(TokenKind::Number, &value, loc)
    }

    fn ident(&mut self, loc: Loc) -> Token {
        let mut value = String::new();
        while let Some(c) = self.chars.peek() {
            if is_ident_char(*c) {
                value.push(self.advance().unwrap_or_default());
            } else {
                break;
            }
        }
        Token::new(TokenKind::Ident, &value, loc)
    }
}
