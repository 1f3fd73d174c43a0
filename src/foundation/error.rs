/// Crate-wide result alias.
pub type ReelResult<T> = Result<T, ReelError>;

/// Errors surfaced by the pipeline.
///
/// Recoverable failures (script generation, background fetch, font load) never show up here:
/// their components convert them into fallbacks. What remains is fatal to the current run, and
/// the display prefix names the stage that failed.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid input or invariant violation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid or unreadable run configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Required service credentials are absent.
    #[error("missing credentials: {0}")]
    Credentials(String),

    /// An external service call failed.
    #[error("service error: {0}")]
    Service(String),

    /// Speech synthesis or audio probing failed.
    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    /// Scene or frame rendering failed.
    #[error("render error: {0}")]
    Render(String),

    /// Video encoding failed.
    #[error("video encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn credentials(msg: impl Into<String>) -> Self {
        Self::Credentials(msg.into())
    }

    pub fn service(msg: impl Into<String>) -> Self {
        Self::Service(msg.into())
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
