/// Convenience result type used across StoryReel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error taxonomy for the animation core.
///
/// These are construction-time failures only. Once a sequence, gate or stack is built, runtime
/// anomalies clamp or no-op instead of surfacing here.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid user-provided layout, sequence or transform data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or overriding phase timelines.
    #[error("timeline error: {0}")]
    Timeline(String),

    /// Errors while loading or validating stage configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Timeline`] value.
    pub fn timeline(msg: impl Into<String>) -> Self {
        Self::Timeline(msg.into())
    }

    /// Build a [`ReelError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
