use super::Loc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Eof,
    Ident,
    Str,
    Number,
    Semicolon,
    LBrace,
    RBrace,
    LParen,
    RParen,
    EqEq,
    NotEq,
    Assign,
    Less,
    Greater,
    PlusPlus,
    MinusMinus,
    Unknown,
}

/// One lexeme with the location of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub loc: Loc,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str, loc: Loc) -> Token {
        Token {
            kind,
            text: text.to_string(),
            loc,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True for an identifier token spelling exactly `word`.
    pub fn is_word(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }
}

