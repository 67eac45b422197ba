//! Error types for oEmbed lookups.

/// Failure to obtain an embeddable snippet for a post.
#[derive(Debug, thiserror::Error)]
pub enum OembedError {
    /// HTTP request failed (network error, timeout, invalid JSON body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Provider answered with an error status.
    #[error("HTTP error: {status} - {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// Provider answered without any HTML to embed.
    #[error("oEmbed response contains no html")]
    EmptyHtml,

    /// Network lookups are turned off.
    #[error("oEmbed lookups are disabled")]
    Disabled,

    /// Any other fetcher-specific failure.
    #[error("{0}")]
    Other(String),
}
