/// Convenience result type used across quadwarp.
pub type WarpResult<T> = Result<T, WarpError>;

/// Top-level error taxonomy used by the warp engine.
///
/// Degenerate geometry (singular matrices, zero-extent rectangles, empty visible regions) is
/// never reported here: those cases resolve to fallback constants or a transparent result.
#[derive(thiserror::Error, Debug)]
pub enum WarpError {
    /// Invalid user-provided parameters or raster data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The upstream context failed to render the requested source region.
    #[error("upstream render error: {0}")]
    Upstream(String),

    /// Rendering was stopped by the progress callback.
    #[error("render cancelled")]
    Cancelled,

    /// Errors when serializing or deserializing parameters.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WarpError {
    /// Build a [`WarpError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WarpError::Upstream`] value.
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Build a [`WarpError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Return `true` when the error came from cooperative cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
