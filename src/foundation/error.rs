/// Convenience result type used across storeshots.
pub type StoreshotsResult<T> = Result<T, StoreshotsError>;

/// Top-level error taxonomy used by pipeline APIs.
///
/// A missing source screenshot is not an error: it is reported as
/// [`crate::SlideOutcome::MissingSource`] so the batch can continue.
#[derive(thiserror::Error, Debug)]
pub enum StoreshotsError {
    /// Invalid dimensions, radii or other geometric input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed job or layout configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Failures while rasterizing or compositing a slide.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreshotsError {
    /// Build a [`StoreshotsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoreshotsError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StoreshotsError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
