//! oEmbed lookups for social post embeds.
//!
//! The embed renderer never talks to the network directly. It asks an
//! [`OembedFetcher`] for the HTML snippet of a post and degrades to an inline
//! error when the lookup fails. Bounding latency is the fetcher's job:
//! [`HttpFetcher`] applies a global request timeout and reports it as an
//! ordinary [`OembedError`].
//!
//! Lookups are neither cached nor deduplicated; a document with many posts
//! performs one request per post.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use embedmark_oembed::{HttpFetcher, OembedFetcher};
//!
//! let fetcher = HttpFetcher::new("https://publish.twitter.com/oembed", Duration::from_secs(5));
//! let html = fetcher.fetch("https://twitter.com/rustlang/status/1", "dark");
//! ```

mod error;
mod fetcher;
mod http;

pub use error::OembedError;
pub use fetcher::{OembedFetcher, OfflineFetcher};
pub use http::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, HttpFetcher};
