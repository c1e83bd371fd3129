/// Convenience result type used across docsynth.
pub type DocsynthResult<T> = Result<T, DocsynthError>;

/// Top-level error taxonomy used by generator APIs.
#[derive(thiserror::Error, Debug)]
pub enum DocsynthError {
    /// Invalid or missing configuration (ranges, weights, counts, collaborator setup).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A sampler could not produce a valid draw.
    #[error("sampling exhausted: {0}")]
    SamplingExhaustion(String),

    /// Degenerate geometry (non-finite coordinates, zero area, projective horizon).
    #[error("geometry error: {0}")]
    Geometry(String),

    /// Text shaping or rasterization failure.
    #[error("render error: {0}")]
    Render(String),

    /// Filesystem failure while persisting output.
    #[error("io error: {context}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// A per-page failure tagged with the page index.
    #[error("page {index}: {source}")]
    Page {
        /// Zero-based page index.
        index: u64,
        /// The error that aborted the page.
        #[source]
        source: Box<DocsynthError>,
    },

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DocsynthError {
    /// Build a [`DocsynthError::Configuration`] value.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a [`DocsynthError::SamplingExhaustion`] value.
    pub fn exhausted(msg: impl Into<String>) -> Self {
        Self::SamplingExhaustion(msg.into())
    }

    /// Build a [`DocsynthError::Geometry`] value.
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    /// Build a [`DocsynthError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`DocsynthError::Io`] value.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Tag an error with the page index that produced it.
    pub fn page(index: u64, source: DocsynthError) -> Self {
        Self::Page {
            index,
            source: Box::new(source),
        }
    }

    /// Return the innermost error, looking through [`DocsynthError::Page`] wrappers.
    pub fn root(&self) -> &DocsynthError {
        match self {
            Self::Page { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
