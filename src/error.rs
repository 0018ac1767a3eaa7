use std::fmt;

use thiserror::Error;

/// 1-based position of a token in the script text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("{span}: unterminated string literal (missing '\"')")]
    UnterminatedString { span: Span },

    #[error("{span}: unexpected character {found:?}")]
    UnexpectedChar { span: Span, found: char },

    #[error("{span}: integer literal {text} does not fit in 64 bits")]
    IntegerOverflow { span: Span, text: String },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::UnexpectedChar { span, .. }
            | LexError::IntegerOverflow { span, .. } => *span,
        }
    }
}

/// Everything that can reject a script. All of it is detected while parsing;
/// allocation and emission never fail on a parsed script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{span}: {message}")]
    Syntax { span: Span, message: String },

    #[error("{span}: unknown statement `{keyword}`")]
    UnknownStatement { span: Span, keyword: String },

    #[error("{span}: {message}")]
    Order { span: Span, message: String },

    #[error("{span}: `{statement}` expects a value between 0 and {max}, found {value}")]
    Range {
        span: Span,
        statement: &'static str,
        value: i64,
        max: u32,
    },

    #[error("{span}: `{statement}` may only appear once (first seen at {first})")]
    DuplicateStatement {
        span: Span,
        statement: &'static str,
        first: Span,
    },

    #[error("{span}: duplicate {namespace} name \"{name}\"")]
    DuplicateName {
        span: Span,
        namespace: &'static str,
        name: String,
    },
}

impl ScriptError {
    pub fn span(&self) -> Span {
        match self {
            ScriptError::Lex(e) => e.span(),
            ScriptError::Syntax { span, .. }
            | ScriptError::UnknownStatement { span, .. }
            | ScriptError::Order { span, .. }
            | ScriptError::Range { span, .. }
            | ScriptError::DuplicateStatement { span, .. }
            | ScriptError::DuplicateName { span, .. } => *span,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScriptError>;
