/// Convenience result type used across motionbox.
pub type MotionResult<T> = Result<T, MotionError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum MotionError {
    /// Invalid user-provided data (graph edits, keyframes, configuration values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while building or driving sequencers.
    #[error("animation error: {0}")]
    Animation(String),

    /// The drawing surface is missing or cannot be used. Fatal for a frame driver.
    #[error("surface error: {0}")]
    Surface(String),

    /// Texture or font data could not be decoded.
    #[error("asset error: {0}")]
    Asset(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MotionError {
    /// Build a [`MotionError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`MotionError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`MotionError::Surface`] value.
    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// Build a [`MotionError::Asset`] value.
    pub fn asset(msg: impl Into<String>) -> Self {
        Self::Asset(msg.into())
    }

    /// Build a [`MotionError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
