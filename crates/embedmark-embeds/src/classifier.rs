//! URL classification.
//!
//! Rules are tried in table order and the first rule whose host and path
//! shape match decides the outcome. A matching rule that extracts an empty
//! identifier yields no match rather than a blank embed.

use tracing::debug;
use url::Url;

use crate::error::ClassifyError;
use crate::provider::{Provider, Theme};

/// Host the oEmbed endpoint accepts for posts.
const CANONICAL_SOCIAL_HOST: &str = "twitter.com";

/// Successful classification of a destination URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub provider: Provider,
    /// Video id, chart symbol, or full post URL depending on provider.
    pub identifier: String,
    /// Theme from the `theme` query parameter, `None` when absent.
    pub theme: Option<Theme>,
}

/// One recognition rule: a host/path predicate and an extractor.
struct Rule {
    name: &'static str,
    matches: fn(&Url) -> bool,
    extract: fn(&str, &Url) -> Option<Classification>,
}

static RULES: &[Rule] = &[
    Rule {
        name: "youtube-watch",
        matches: is_youtube_watch,
        extract: youtube_watch,
    },
    Rule {
        name: "youtube-short",
        matches: is_youtube_short,
        extract: youtube_short,
    },
    Rule {
        name: "bilibili-video",
        matches: is_bilibili_video,
        extract: bilibili_video,
    },
    Rule {
        name: "twitter-post",
        matches: is_twitter_post,
        extract: twitter_post,
    },
    Rule {
        name: "tradingview-chart",
        matches: is_tradingview_chart,
        extract: tradingview_chart,
    },
];

/// Classify an image destination.
///
/// Returns `Ok(None)` for relative references and for well-formed URLs that
/// name no known provider.
///
/// # Errors
///
/// Returns [`ClassifyError::MalformedUrl`] if the destination looks like an
/// absolute URL but fails to parse.
pub fn classify(destination: &str) -> Result<Option<Classification>, ClassifyError> {
    let url = match Url::parse(destination) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => return Ok(None),
        Err(source) => {
            return Err(ClassifyError::MalformedUrl {
                url: destination.to_owned(),
                source,
            });
        }
    };

    let Some(rule) = RULES.iter().find(|rule| (rule.matches)(&url)) else {
        return Ok(None);
    };

    let classification =
        (rule.extract)(destination, &url).filter(|c| !c.identifier.is_empty());
    debug!(
        rule = rule.name,
        destination,
        matched = classification.is_some(),
        "Classified image destination"
    );
    Ok(classification)
}

fn is_youtube_watch(url: &Url) -> bool {
    host_is(url, &["www.youtube.com"]) && url.path() == "/watch"
}

fn youtube_watch(_: &str, url: &Url) -> Option<Classification> {
    Some(Classification {
        provider: Provider::YouTube,
        identifier: query_value(url, "v")?,
        theme: None,
    })
}

fn is_youtube_short(url: &Url) -> bool {
    host_is(url, &["youtu.be"])
}

fn youtube_short(_: &str, url: &Url) -> Option<Classification> {
    Some(Classification {
        provider: Provider::YouTube,
        identifier: decoded_path(url.path()),
        theme: None,
    })
}

fn is_bilibili_video(url: &Url) -> bool {
    host_is(url, &["www.bilibili.com"]) && url.path().starts_with("/video/")
}

fn bilibili_video(_: &str, url: &Url) -> Option<Classification> {
    let rest = url.path().strip_prefix("/video/")?;
    Some(Classification {
        provider: Provider::Bilibili,
        identifier: decoded_path(rest),
        theme: None,
    })
}

fn is_twitter_post(url: &Url) -> bool {
    host_is(url, &["twitter.com", "m.twitter.com", "x.com"])
}

fn twitter_post(original: &str, url: &Url) -> Option<Classification> {
    let identifier = if url.host_str() == Some("x.com") {
        let mut canonical = url.clone();
        canonical.set_host(Some(CANONICAL_SOCIAL_HOST)).ok()?;
        canonical.into()
    } else {
        original.to_owned()
    };
    Some(Classification {
        provider: Provider::Twitter,
        identifier,
        theme: query_theme(url),
    })
}

fn is_tradingview_chart(url: &Url) -> bool {
    host_is(url, &["tradingview.com", "www.tradingview.com"])
}

fn tradingview_chart(_: &str, url: &Url) -> Option<Classification> {
    Some(Classification {
        provider: Provider::TradingView,
        identifier: query_value(url, "symbol")?,
        theme: query_theme(url),
    })
}

fn host_is(url: &Url, hosts: &[&str]) -> bool {
    url.host_str().is_some_and(|host| hosts.contains(&host))
}

/// First value of a query parameter, percent-decoded.
fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn query_theme(url: &Url) -> Option<Theme> {
    query_value(url, "theme").map(|value| Theme::from_query(Some(&value)))
}

/// Path remainder with surrounding slashes trimmed, percent-decoded.
fn decoded_path(path: &str) -> String {
    percent_encoding::percent_decode_str(path.trim_matches('/'))
        .decode_utf8_lossy()
        .into_owned()
}
