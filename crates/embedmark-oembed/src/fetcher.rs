//! The fetcher seam between the embed renderer and the network.

use crate::error::OembedError;

/// Looks up the embeddable HTML for a post URL.
///
/// Implementations return `Err` for every failure, including an empty
/// snippet; callers treat all errors alike.
pub trait OembedFetcher {
    /// Fetch the HTML snippet for `url` rendered with `theme` (`dark` or `light`).
    fn fetch(&self, url: &str, theme: &str) -> Result<String, OembedError>;
}

impl<F> OembedFetcher for F
where
    F: Fn(&str, &str) -> Result<String, OembedError>,
{
    fn fetch(&self, url: &str, theme: &str) -> Result<String, OembedError> {
        self(url, theme)
    }
}

/// Fetcher used when network lookups are turned off.
pub struct OfflineFetcher;

impl OembedFetcher for OfflineFetcher {
    fn fetch(&self, _url: &str, _theme: &str) -> Result<String, OembedError> {
        Err(OembedError::Disabled)
    }
}
