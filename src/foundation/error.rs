use std::path::PathBuf;

/// Convenience result type used across imgsh.
pub type ImgshResult<T> = Result<T, ImgshError>;

/// Top-level error taxonomy for everything that can end a render or a run.
///
/// Recoverable script problems (unknown commands, bad parameters) are not
/// represented here; see [`crate::ScriptError`].
#[derive(thiserror::Error, Debug)]
pub enum ImgshError {
    /// The source image could not be read or decoded.
    #[error("read '{}': {source:#}", .path.display())]
    Bind {
        /// Path named by the bind command or the preload flag.
        path: PathBuf,
        /// Underlying IO or decode failure.
        source: anyhow::Error,
    },

    /// An output destination could not be created or written.
    #[error("write {target}: {source}")]
    Sink {
        /// Human-readable name of the sink (a path or `stdout`).
        target: String,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The script stream failed after it was opened.
    #[error("read script: {0}")]
    Script(#[source] std::io::Error),

    /// A render was requested at end of script but no source image is bound.
    #[error("no source image: use 'read <file>' or preload a source")]
    MissingSource,

    /// A filter could not produce its destination buffer.
    #[error("render error: {0}")]
    Render(String),

    /// The container encoder rejected the rendered image.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImgshError {
    /// Build an [`ImgshError::Bind`] value.
    pub fn bind(path: impl Into<PathBuf>, source: impl Into<anyhow::Error>) -> Self {
        Self::Bind {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Build an [`ImgshError::Sink`] value.
    pub fn sink(target: impl Into<String>, source: std::io::Error) -> Self {
        Self::Sink {
            target: target.into(),
            source,
        }
    }

    /// Build an [`ImgshError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`ImgshError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Whether the script loop can keep going after this error.
    ///
    /// Render and encode failures only cost the current render.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Render(_) | Self::Encode(_))
    }
}

/// Process outcome categories, each with a distinct exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The script ran to completion.
    Success,
    /// The command table was requested instead of a run.
    Usage,
    /// The script file could not be opened.
    ScriptOpen,
    /// The output file could not be created or written.
    OutputOpen,
    /// Batch mode finished without a bound source image.
    MissingSource,
    /// A bind command or preload failed.
    BindFailed,
    /// Any other fatal error.
    Failure,
}

impl ExitOutcome {
    /// Classify a fatal error.
    pub fn from_error(err: &ImgshError) -> Self {
        match err {
            ImgshError::Bind { .. } => Self::BindFailed,
            ImgshError::Sink { .. } => Self::OutputOpen,
            ImgshError::MissingSource => Self::MissingSource,
            ImgshError::Script(_)
            | ImgshError::Render(_)
            | ImgshError::Encode(_)
            | ImgshError::Other(_) => Self::Failure,
        }
    }

    /// Process exit code for this outcome.
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Usage => 1,
            Self::ScriptOpen => 2,
            Self::OutputOpen => 3,
            Self::MissingSource => 4,
            Self::BindFailed => 5,
            Self::Failure => 6,
        }
    }
}

impl From<ExitOutcome> for std::process::ExitCode {
    fn from(outcome: ExitOutcome) -> Self {
        std::process::ExitCode::from(outcome.code())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
