//! Error types for embed classification and rendering.

/// Error classifying an image destination.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Destination has a scheme but does not parse as a URL.
    #[error("malformed embed url '{url}': {source}")]
    MalformedUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Error that aborts rendering of a document.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Chart widget template failed to render.
    #[error("chart template error: {0}")]
    Template(#[from] minijinja::Error),
}
