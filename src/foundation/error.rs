/// Crate-wide result alias.
pub type WallResult<T> = Result<T, WallError>;

/// Errors produced while parsing entries, laying out text, rendering, or writing images.
#[derive(thiserror::Error, Debug)]
pub enum WallError {
    /// Invalid input value or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Malformed source record.
    #[error("parse error: {0}")]
    Parse(String),

    /// Font could not be read or registered.
    #[error("font error: {0}")]
    Font(String),

    /// Text measurement or layout failed.
    #[error("layout error: {0}")]
    Layout(String),

    /// Rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Encoding or writing an output image failed.
    #[error("output error: {0}")]
    Output(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WallError {
    /// Build a [`WallError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WallError::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`WallError::Font`].
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`WallError::Layout`].
    pub fn layout(msg: impl Into<String>) -> Self {
        Self::Layout(msg.into())
    }

    /// Build a [`WallError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`WallError::Output`].
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
