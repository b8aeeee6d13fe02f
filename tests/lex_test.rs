use turing::lang::{Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(source);
    let mut out = vec![];
    loop {
        let token = lexer.next();
        if token.kind == TokenKind::Eof {
            return out;
        }
        out.push(token.kind);
    }
}

#[test]
fn test_punctuation_and_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("; { } ( ) == != = < > ++ --"),
        vec![
            Semicolon, LBrace, RBrace, LParen, RParen, EqEq, NotEq, Assign, Less, Greater,
            PlusPlus, MinusMinus
        ]
    );
}

#[test]
fn test_identifiers_and_numbers() {
    use TokenKind::*;
    assert_eq!(
        kinds("proc _x9 x 42 -17 -"),
        vec![Ident, Ident, Ident, Number, Number, Unknown]
    );
    let mut lexer = Lexer::new("-17");
    assert_eq!(lexer.next().text, "-17");
}

#[test]
fn test_string_literals() {
    let mut lexer = Lexer::new("\"a b c\"");
    let token = lexer.next();
    assert_eq!(token.kind, TokenKind::Str);
    assert_eq!(token.text, "a b c");
}

#[test]
fn test_string_with_newline_is_unknown() {
    let mut lexer = Lexer::new("\"a\nb\"");
    assert_eq!(lexer.next().kind, TokenKind::Unknown);
}

#[test]
fn test_unterminated_string_is_unknown() {
    let mut lexer = Lexer::new("\"abc");
    assert_eq!(lexer.next().kind, TokenKind::Unknown);
}

#[test]
fn test_comments() {
    assert_eq!(
        kinds("a // rest of line\nb /* span\nlines */ c"),
        vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Ident]
    );
    // an unpaired slash is not a comment
    assert_eq!(kinds("/"), vec![TokenKind::Unknown]);
}

#[test]
fn test_positions() {
    let mut lexer = Lexer::new("ab\n  cd\r\nef");
    let a = lexer.next();
    assert_eq!((a.loc.line, a.loc.column), (1, 1));
    let c = lexer.next();
    assert_eq!((c.loc.line, c.loc.column), (2, 3));
    let e = lexer.next();
    assert_eq!((e.loc.line, e.loc.column), (3, 1));
}

#[test]
fn test_crlf_counts_one_line() {
    let mut lexer = Lexer::new("a\r\nb");
    lexer.next();
    let b = lexer.next();
    assert_eq!(b.loc.line, 2);
}
