use super::Loc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Info,
}

/// A diagnostic message with the 1-based source position it refers to.
/// The compiler never unwinds; everything it has to say ends up in a
/// vector of these.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn error(loc: Loc, message: String) -> Diagnostic {
        Diagnostic {
            level: Level::Error,
            line: loc.line,
            column: loc.column,
            message,
        }
    }

    pub fn warning(loc: Loc, message: String) -> Diagnostic {
        Diagnostic {
            level: Level::Warning,
            line: loc.line,
            column: loc.column,
            message,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Info => write!(f, "info"),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} {}:{}: {}",
            self.level, self.line, self.column, self.message
        )
    }
}
