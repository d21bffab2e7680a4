use std::fmt;

/// Why a known command's arguments were rejected.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationErrorKind {
    /// Fewer argument fields than the command requires.
    Arity { min: usize, got: usize },
    /// An argument that must be an integer did not parse as one.
    NotInteger { index: usize, field: String },
    /// A numeric argument fell outside the command's documented range.
    Range { index: usize, value: f64 },
    /// A keyword argument is not one of the accepted choices.
    InvalidChoice { index: usize, field: String },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arity { min, got } => write!(f, "expected {min} argument(s), got {got}"),
            Self::NotInteger { index, field } => {
                write!(f, "argument {} '{field}' is not an integer", index + 1)
            }
            Self::Range { index, value } => {
                write!(f, "argument {} ({value}) is out of range", index + 1)
            }
            Self::InvalidChoice { index, field } => {
                write!(f, "argument {} '{field}' is not a valid choice", index + 1)
            }
        }
    }
}

/// A rejected line for a known command.
///
/// Displays as the diagnostic line `line <n>: <cmd> <usage>`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("line {line}: {command} {usage}")]
pub struct ValidationError {
    /// 1-based script line number.
    pub line: usize,
    /// Command name as written in the script (may be an alias).
    pub command: String,
    /// Registry usage string for the command.
    pub usage: &'static str,
    pub kind: ValidationErrorKind,
}

/// Recoverable script error: the line is skipped and processing continues.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("line {line}: {command} invalid command")]
    UnknownCommand { line: usize, command: String },

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ScriptError {
    pub fn line(&self) -> usize {
        match self {
            Self::UnknownCommand { line, .. } => *line,
            Self::Invalid(e) => e.line,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/diagnostic.rs"]
mod tests;
