//! Blocking HTTP oEmbed client.

use std::time::Duration;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use tracing::debug;
use ureq::Agent;

use crate::error::OembedError;
use crate::fetcher::OembedFetcher;

/// Public oEmbed endpoint for posts on the canonical domain.
pub const DEFAULT_ENDPOINT: &str = "https://publish.twitter.com/oembed";

/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Query component unreserved characters: A-Z a-z 0-9 - . _ ~
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// The part of an oEmbed response the renderer uses.
#[derive(Debug, Deserialize)]
struct OembedResponse {
    #[serde(default)]
    html: String,
}

/// oEmbed client backed by a `ureq` agent.
pub struct HttpFetcher {
    agent: Agent,
    endpoint: String,
}

impl HttpFetcher {
    /// Create a fetcher for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            endpoint: endpoint.into(),
        }
    }

    /// Build the lookup URL for a post.
    fn request_url(&self, url: &str, theme: &str) -> String {
        let separator = if self.endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{separator}url={}&theme={}&dnt=true",
            self.endpoint,
            utf8_percent_encode(url, QUERY_ENCODE_SET),
            utf8_percent_encode(theme, QUERY_ENCODE_SET),
        )
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT)
    }
}

impl OembedFetcher for HttpFetcher {
    fn fetch(&self, url: &str, theme: &str) -> Result<String, OembedError> {
        let request_url = self.request_url(url, theme);
        debug!(url, theme, "Fetching oEmbed snippet");

        let response = self
            .agent
            .get(&request_url)
            .header("Accept", "application/json")
            .call()?;

        let status = response.status().as_u16();
        let mut body = response.into_body();

        if status >= 400 {
            let error_body = body
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned());
            return Err(OembedError::Status {
                status,
                body: error_body,
            });
        }

        let oembed: OembedResponse = body.read_json()?;
        if oembed.html.trim().is_empty() {
            return Err(OembedError::EmptyHtml);
        }
        Ok(oembed.html)
    }
}
