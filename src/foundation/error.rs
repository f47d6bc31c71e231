use std::path::PathBuf;

/// Convenience result type used across the poster engine.
pub type PosterResult<T> = Result<T, PosterError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant except [`PosterError::Other`] aborts a composition before anything is written to
/// disk. Text that does not fit its region is not an error: the layout engine truncates it and
/// flags the resulting block instead.
#[derive(thiserror::Error, Debug)]
pub enum PosterError {
    /// The requested theme name is not one of the known themes.
    #[error("theme '{name}' not found")]
    ThemeNotFound {
        /// Name exactly as the caller supplied it.
        name: String,
    },

    /// Neither the override cover nor the metadata cover could be loaded and decoded.
    #[error("cover unavailable ({reference}): {reason}")]
    CoverUnavailable {
        /// Cover reference(s) that were attempted.
        reference: String,
        /// Human-readable failure description.
        reason: String,
    },

    /// Writing the encoded poster failed.
    #[error("failed to save poster to '{}': {source}", path.display())]
    SaveFailed {
        /// Path the engine attempted to write.
        path: PathBuf,
        /// Underlying IO or encoding failure.
        #[source]
        source: anyhow::Error,
    },

    /// A theme template image could not be loaded.
    #[error("template '{}' unavailable: {reason}", path.display())]
    Template {
        /// Template path derived from the theme table.
        path: PathBuf,
        /// Human-readable failure description.
        reason: String,
    },

    /// Font resources could not be loaded or used.
    #[error("font error: {0}")]
    Font(String),

    /// Invalid configuration or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Failure inside a rasterization backend.
    #[error("render error: {0}")]
    Render(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PosterError {
    /// Build a [`PosterError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PosterError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`PosterError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`PosterError::ThemeNotFound`] value.
    pub fn theme_not_found(name: impl Into<String>) -> Self {
        Self::ThemeNotFound { name: name.into() }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
