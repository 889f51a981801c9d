/// Convenience result type used across the crate.
pub type RevealResult<T> = Result<T, RevealError>;

/// Top-level error taxonomy for the reveal engine.
///
/// None of these reach the host page: [`crate::LineReveal`] logs them and degrades to "no visible
/// effect".
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Invalid configuration or line definition data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The rendering surface could not be created or resized.
    #[error("surface error: {0}")]
    Surface(String),

    /// The host refused an operation (e.g. attaching the surface node).
    #[error("host error: {0}")]
    Host(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),
}

impl RevealError {
    /// Build a [`RevealError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RevealError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`RevealError::Host`] value.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Build a [`RevealError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for RevealError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
