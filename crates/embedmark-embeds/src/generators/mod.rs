//! Provider HTML generators.
//!
//! Every interpolated value is HTML-escaped; values placed inside URLs are
//! percent-encoded first.

mod chart;
mod social;
mod video;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub(crate) use chart::{anchor_id, tradingview};
pub(crate) use social::tweet;
pub(crate) use video::{bilibili, youtube};

/// Unreserved characters: A-Z a-z 0-9 - . _ ~
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a value for use as a URL path segment or query value.
fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("dQw4w9WgXcQ"), "dQw4w9WgXcQ");
        assert_eq!(encode_component("a b/c?d=e&f"), "a%20b%2Fc%3Fd%3De%26f");
        assert_eq!(encode_component("x\"><script>"), "x%22%3E%3Cscript%3E");
    }
}
