use super::ast::{Block, Cond, Inst, Procedure};
use super::diag::Diagnostic;
use super::lex::Lexer;
use super::token::{Token, TokenKind};
use super::{is_system_symbol, Loc, Symbol, BLANK};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Diagnostic>;

/// Everything the parser learned about one source text. `ok` is false when
/// `diagnostics` contains at least one error; the remaining fields hold
/// whatever was collected before the parse stopped.
#[derive(Debug)]
pub struct Parsed {
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
    /// The user alphabet, blank first, in declaration order.
    pub alphabet: Vec<Symbol>,
    /// Initial tape content, placed left to right from position 0.
    pub setup: Vec<Symbol>,
    pub procedures: HashMap<String, Procedure>,
}

pub fn parse(source: &str) -> Parsed {
    Parser::new(source).run()
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    token: Token,
    diagnostics: Vec<Diagnostic>,
    alphabet: Vec<Symbol>,
    alphabet_set: HashSet<Symbol>,
    setup: Vec<Symbol>,
    procedures: HashMap<String, Procedure>,
    declared: HashSet<String>,
    alphabet_defined: bool,
    setup_defined: bool,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Parser<'a> {
        let mut lexer = Lexer::new(source);
        let token = lexer.next();
        let blank: Symbol = Rc::from(BLANK);
        let mut alphabet_set = HashSet::new();
        alphabet_set.insert(blank.clone());
        Parser {
            lexer,
            token,
            diagnostics: vec![],
            alphabet: vec![blank],
            alphabet_set,
            setup: vec![],
            procedures: HashMap::new(),
            declared: HashSet::new(),
            alphabet_defined: false,
            setup_defined: false,
        }
    }

    fn run(mut self) -> Parsed {
        if let Err(diagnostic) = self.program() {
            self.diagnostics.push(diagnostic);
        }
        let mut ok = !self.diagnostics.iter().any(Diagnostic::is_error);
        if ok && !self.procedures.is_empty() && !self.procedures.contains_key("main") {
            self.diagnostics.push(Diagnostic::error(
                Loc::new(1, 1),
                "procedure 'main' is not defined".to_string(),
            ));
            ok = false;
        }
        if ok && self.procedures.is_empty() {
            self.diagnostics.push(Diagnostic::warning(
                Loc::new(1, 1),
                "no procedures are defined (at least 'main' is needed)".to_string(),
            ));
        }
        if ok && !self.alphabet_defined {
            self.diagnostics.push(Diagnostic::warning(
                Loc::new(1, 1),
                "Set_alphabet is not defined".to_string(),
            ));
        }
        if ok && !self.setup_defined {
            self.diagnostics.push(Diagnostic::warning(
                Loc::new(1, 1),
                "Setup is not defined".to_string(),
            ));
        }
        Parsed {
            ok,
            diagnostics: self.diagnostics,
            alphabet: self.alphabet,
            setup: self.setup,
            procedures: self.procedures,
        }
    }

    fn bump(&mut self) {
        self.token = self.lexer.next();
    }

    fn error(&self, loc: Loc, message: String) -> Diagnostic {
        Diagnostic::error(loc, message)
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<Token> {
        if self.token.kind != kind {
            return Err(self.error(self.token.loc, format!("expected {}", what)));
        }
        let token = self.token.clone();
        self.bump();
        Ok(token)
    }

    /// Top-level loop. Only directives and procedure definitions may appear
    /// here; the first error stops the parse.
    fn program(&mut self) -> Result<()> {
        loop {
            match self.token.kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Ident => {
                    let loc = self.token.loc;
                    match self.token.text.as_str() {
                        "Set_alphabet" => self.set_alphabet(loc)?,
                        "Setup" => self.setup_directive(loc)?,
                        "proc" => self.procedure(loc)?,
                        "move_left" | "move_right" | "write" | "call" | "if" | "while" | "x" => {
                            return Err(self.error(
                                loc,
                                format!("'{}' is only allowed inside a procedure", self.token.text),
                            ));
                        }
                        other => {
                            return Err(self.error(loc, format!("unknown command: '{}'", other)));
                        }
                    }
                }
                TokenKind::RBrace => {
                    return Err(self.error(self.token.loc, "unexpected '}'".to_string()));
                }
                TokenKind::Unknown => {
                    return Err(self.error(
                        self.token.loc,
                        format!("unexpected character: '{}'", self.token.text),
                    ));
                }
                _ => {
                    return Err(self.error(self.token.loc, "expected a command".to_string()));
                }
            }
        }
    }

    fn set_alphabet(&mut self, loc: Loc) -> Result<()> {
        if self.setup_defined {
            return Err(self.error(loc, "Set_alphabet must come before Setup".to_string()));
        }
        if self.alphabet_defined {
            return Err(self.error(loc, "Set_alphabet is already defined".to_string()));
        }
        if !self.procedures.is_empty() {
            return Err(self.error(
                loc,
                "Set_alphabet must come before procedure definitions".to_string(),
            ));
        }
        self.bump();
        let literal = self.expect(TokenKind::Str, "a string with the alphabet symbols")?;
        self.expect(TokenKind::Semicolon, "';'")?;
        for word in literal.text.split_whitespace() {
            if word == "blank" {
                return Err(self.error(
                    literal.loc,
                    "the name 'blank' is reserved and cannot be part of the alphabet".to_string(),
                ));
            }
            if is_system_symbol(word) {
                return Err(self.error(
                    literal.loc,
                    format!("the symbol '{}' is reserved for the machine", word),
                ));
            }
            let symbol: Symbol = Rc::from(word);
            if !self.alphabet_set.insert(symbol.clone()) {
                return Err(self.error(
                    literal.loc,
                    format!("duplicate symbol in the alphabet: '{}'", word),
                ));
            }
            self.alphabet.push(symbol);
        }
        self.alphabet_defined = true;
        Ok(())
    }

    fn setup_directive(&mut self, loc: Loc) -> Result<()> {
        if !self.alphabet_defined {
            return Err(self.error(loc, "Setup must come after Set_alphabet".to_string()));
        }
        if self.setup_defined {
            return Err(self.error(loc, "Setup is already defined".to_string()));
        }
        if !self.procedures.is_empty() {
            return Err(self.error(
                loc,
                "Setup must come before procedure definitions".to_string(),
            ));
        }
        self.bump();
        let literal = self.expect(TokenKind::Str, "a string with the initial tape content")?;
        if self.token.is(TokenKind::Semicolon) {
            self.bump();
        }
        for word in literal.text.split_whitespace() {
            let symbol = self.resolve_symbol(word, literal.loc)?;
            self.setup.push(symbol);
        }
        self.setup_defined = true;
        Ok(())
    }

    fn procedure(&mut self, loc: Loc) -> Result<()> {
        if !self.alphabet_defined {
            return Err(self.error(loc, "proc: Set_alphabet must be defined first".to_string()));
        }
        self.bump();
        let name = self.expect(TokenKind::Ident, "a procedure name")?;
        if self.declared.contains(&name.text) {
            return Err(self.error(
                name.loc,
                format!("procedure '{}' is already defined", name.text),
            ));
        }
        self.expect(TokenKind::LParen, "'('")?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        // Declared before the body parses so the body may name itself in a
        // `call`; the flattener reports the recursion.
        self.declared.insert(name.text.clone());
        let body = self.block()?;
        self.procedures.insert(
            name.text.clone(),
            Procedure {
                name: name.text,
                body,
                loc,
            },
        );
        Ok(())
    }

    /// Statements up to and including the closing '}'.
    fn block(&mut self) -> Result<Block> {
        let mut block = Block::new();
        loop {
            match self.token.kind {
                TokenKind::RBrace => {
                    self.bump();
                    return Ok(block);
                }
                TokenKind::Eof => {
                    return Err(self.error(
                        self.token.loc,
                        "unexpected end of file inside a block (missing '}')".to_string(),
                    ));
                }
                TokenKind::Ident => block.push(self.statement()?),
                _ => {
                    return Err(self
                        .error(self.token.loc, "expected a command or '}'".to_string()));
                }
            }
        }
    }

    fn statement(&mut self) -> Result<Inst> {
        let loc = self.token.loc;
        match self.token.text.as_str() {
            "move_left" => {
                self.bump();
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::MoveLeft(loc))
            }
            "move_right" => {
                self.bump();
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::MoveRight(loc))
            }
            "write" => {
                self.bump();
                let literal = self.expect(TokenKind::Str, "a symbol to write")?;
                let symbol = self.resolve_symbol(&literal.text, literal.loc)?;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::Write(loc, symbol))
            }
            "call" => {
                self.bump();
                let name = self.expect(TokenKind::Ident, "a procedure name")?;
                if !self.declared.contains(&name.text) {
                    return Err(self.error(
                        name.loc,
                        format!("procedure '{}' is not defined", name.text),
                    ));
                }
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::Call(loc, name.text))
            }
            "if" => self.if_statement(loc),
            "while" => self.while_statement(loc),
            "x" => self.var_statement(loc),
            "proc" => Err(self.error(loc, "nested procedures are not supported".to_string())),
            "Set_alphabet" | "Setup" => Err(self.error(
                loc,
                format!("{} cannot appear inside a procedure", self.token.text),
            )),
            other => Err(self.error(loc, format!("unknown command: '{}'", other))),
        }
    }

    fn if_statement(&mut self, loc: Loc) -> Result<Inst> {
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.cond()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let then_block = self.block()?;
        let else_block = if self.token.is_word("else") {
            self.bump();
            if self.token.is_word("if") {
                // `else if` chains become a nested IfElse in the else branch.
                let nested_loc = self.token.loc;
                vec![self.if_statement(nested_loc)?]
            } else if self.token.is(TokenKind::LBrace) {
                self.bump();
                self.block()?
            } else {
                return Err(self.error(
                    self.token.loc,
                    "expected '{' or 'if' after 'else'".to_string(),
                ));
            }
        } else {
            vec![]
        };
        Ok(Inst::IfElse(loc, cond, then_block, else_block))
    }

    fn while_statement(&mut self, loc: Loc) -> Result<Inst> {
        self.bump();
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.cond()?;
        self.expect(TokenKind::RParen, "')'")?;
        self.expect(TokenKind::LBrace, "'{'")?;
        let body = self.block()?;
        Ok(Inst::While(loc, cond, body))
    }

    fn var_statement(&mut self, loc: Loc) -> Result<Inst> {
        self.bump();
        match self.token.kind {
            TokenKind::Assign => {
                self.bump();
                let number = self.expect(TokenKind::Number, "a number")?;
                let value = self.parse_i8(&number)?;
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::VarSet(loc, value))
            }
            TokenKind::PlusPlus => {
                self.bump();
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::VarInc(loc))
            }
            TokenKind::MinusMinus => {
                self.bump();
                self.expect(TokenKind::Semicolon, "';'")?;
                Ok(Inst::VarDec(loc))
            }
            _ => Err(self.error(
                self.token.loc,
                "expected '=', '++' or '--' after 'x'".to_string(),
            )),
        }
    }

    // Conditions, loosest operator first: or > xor > and > not > primary.

    fn cond(&mut self) -> Result<Rc<Cond>> {
        self.cond_or()
    }

    fn cond_or(&mut self) -> Result<Rc<Cond>> {
        let mut left = self.cond_xor()?;
        while self.token.is_word("or") {
            let loc = self.token.loc;
            self.bump();
            let right = self.cond_xor()?;
            left = Rc::new(Cond::Or(loc, left, right));
        }
        Ok(left)
    }

    fn cond_xor(&mut self) -> Result<Rc<Cond>> {
        let mut left = self.cond_and()?;
        while self.token.is_word("xor") {
            let loc = self.token.loc;
            self.bump();
            let right = self.cond_and()?;
            left = Rc::new(Cond::Xor(loc, left, right));
        }
        Ok(left)
    }

    fn cond_and(&mut self) -> Result<Rc<Cond>> {
        let mut left = self.cond_not()?;
        while self.token.is_word("and") {
            let loc = self.token.loc;
            self.bump();
            let right = self.cond_not()?;
            left = Rc::new(Cond::And(loc, left, right));
        }
        Ok(left)
    }

    fn cond_not(&mut self) -> Result<Rc<Cond>> {
        if self.token.is_word("not") {
            let loc = self.token.loc;
            self.bump();
            let operand = self.cond_not()?;
            return Ok(Rc::new(Cond::Not(loc, operand)));
        }
        self.cond_primary()
    }

    fn cond_primary(&mut self) -> Result<Rc<Cond>> {
        if self.token.is(TokenKind::LParen) {
            self.bump();
            let inner = self.cond_or()?;
            self.expect(TokenKind::RParen, "')'")?;
            return Ok(inner);
        }
        if self.token.is_word("read") {
            let loc = self.token.loc;
            self.bump();
            let eq = match self.token.kind {
                TokenKind::EqEq => true,
                TokenKind::NotEq => false,
                _ => {
                    return Err(self.error(
                        self.token.loc,
                        "expected '==' or '!=' after 'read'".to_string(),
                    ));
                }
            };
            self.bump();
            let literal = self.expect(TokenKind::Str, "a quoted symbol")?;
            let symbol = self.resolve_symbol(&literal.text, literal.loc)?;
            return Ok(Rc::new(if eq {
                Cond::ReadEq(loc, symbol)
            } else {
                Cond::ReadNeq(loc, symbol)
            }));
        }
        if self.token.is_word("x") {
            let loc = self.token.loc;
            self.bump();
            let less = match self.token.kind {
                TokenKind::Less => true,
                TokenKind::Greater => false,
                _ => {
                    return Err(self.error(
                        self.token.loc,
                        "expected '<' or '>' after 'x' in a condition".to_string(),
                    ));
                }
            };
            self.bump();
            let number = self.expect(TokenKind::Number, "a number")?;
            let value = self.parse_i8(&number)?;
            return Ok(Rc::new(if less {
                Cond::VarLt(loc, value)
            } else {
                Cond::VarGt(loc, value)
            }));
        }
        Err(self.error(
            self.token.loc,
            "expected a condition (read == \"...\", read != \"...\", x < N, not, or '(')"
                .to_string(),
        ))
    }

    /// Resolve a literal's text to an alphabet symbol. `blank` names the
    /// blank; anything else must be in the alphabet.
    fn resolve_symbol(&self, text: &str, loc: Loc) -> Result<Symbol> {
        let symbol: Symbol = if text == "blank" {
            Rc::from(BLANK)
        } else {
            Rc::from(text)
        };
        if symbol.as_ref() != BLANK && !self.alphabet_set.contains(symbol.as_ref()) {
            return Err(self.error(
                loc,
                format!("symbol '{}' is not defined in the alphabet", text),
            ));
        }
        Ok(symbol)
    }

    fn parse_i8(&self, token: &Token) -> Result<i8> {
        match token.text.parse::<i64>() {
            Ok(value) if value >= -128 && value <= 127 => Ok(value as i8),
            Ok(_) => Err(self.error(
                token.loc,
                "the value must be in the range [-128, 127]".to_string(),
            )),
            Err(_) => Err(self.error(token.loc, format!("invalid number: '{}'", token.text))),
        }
    }
}
