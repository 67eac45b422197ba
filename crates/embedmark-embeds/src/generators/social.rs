//! Social post embeds resolved through oEmbed.

use std::fmt::Write;

use embedmark_oembed::{OembedError, OembedFetcher};
use embedmark_renderer::escape_html;

use crate::provider::Theme;

/// Render a post by looking it up with `fetcher`.
///
/// On failure a visible error fragment naming `url` is written instead and
/// the lookup error is returned so the caller can report it.
pub(crate) fn tweet(
    fetcher: &dyn OembedFetcher,
    url: &str,
    theme: Theme,
    out: &mut String,
) -> Result<(), OembedError> {
    let result = fetcher
        .fetch(url, theme.as_str())
        .and_then(|html| {
            if html.trim().is_empty() {
                Err(OembedError::EmptyHtml)
            } else {
                Ok(html)
            }
        });

    match result {
        Ok(html) => {
            write!(
                out,
                r#"<div class="embeded-object-wrapper normal-wrapper"><div class="embeded-object twitter-embeded-object normal-object">{html}</div></div>"#
            )
            .unwrap();
            Ok(())
        }
        Err(err) => {
            write!(
                out,
                r#"<div class="embeded-object-wrapper normal-wrapper"><div class="embeded-object twitter-embeded-object normal-object error">Failed to load tweet from {}</div></div>"#,
                escape_html(url)
            )
            .unwrap();
            Err(err)
        }
    }
}
