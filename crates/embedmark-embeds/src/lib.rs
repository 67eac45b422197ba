//! Rich media embeds for markdown image links.
//!
//! Image-style links that point at a known media provider are replaced by
//! provider markup when the document is rendered:
//!
//! | Link | Output |
//! |------|--------|
//! | `www.youtube.com/watch?v=<id>`, `youtu.be/<id>` | YouTube player iframe |
//! | `www.bilibili.com/video/<bvid>` | Bilibili player iframe |
//! | `twitter.com`, `m.twitter.com`, `x.com` posts | oEmbed snippet |
//! | `tradingview.com` charts with `?symbol=` | TradingView widget |
//!
//! Every other image renders exactly as it would without the extension.
//!
//! # Example
//!
//! ```
//! use embedmark_embeds::{EmbedExtension, SequentialIds};
//! use embedmark_oembed::OfflineFetcher;
//! use embedmark_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let mut embeds = EmbedExtension::new(OfflineFetcher).with_anchor_ids(SequentialIds::new());
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .convert("![](https://youtu.be/dQw4w9WgXcQ)", &mut embeds)
//!     .unwrap();
//! assert!(result.html.contains(r#"src="https://www.youtube.com/embed/dQw4w9WgXcQ""#));
//! ```

mod anchor;
mod classifier;
mod error;
mod generators;
mod node;
mod options;
mod provider;
mod render;
mod transform;

use embedmark_oembed::OembedFetcher;
use embedmark_renderer::{Document, Extension};
use minijinja::Environment;

pub use anchor::{AnchorIds, RandomIds, SequentialIds};
pub use classifier::{Classification, classify};
pub use error::{ClassifyError, RenderError};
pub use node::{Diagnostic, EmbedNode, EmbedmarkNode};
pub use options::EmbedOptions;
pub use provider::{Provider, Theme};
pub use transform::transform;

/// Markdown extension that turns provider links into embeds.
///
/// Holds per-document state (warnings, issued anchor ids) that is reset at
/// the start of each transform pass, so one instance can convert many
/// documents in sequence.
pub struct EmbedExtension {
    options: EmbedOptions,
    fetcher: Box<dyn OembedFetcher>,
    anchors: Box<dyn AnchorIds>,
    templates: Environment<'static>,
    warnings: Vec<String>,
}

impl EmbedExtension {
    /// Create an extension that resolves social posts with `fetcher`.
    ///
    /// Chart anchors are random by default; see [`Self::with_anchor_ids`].
    pub fn new(fetcher: impl OembedFetcher + 'static) -> Self {
        Self {
            options: EmbedOptions::default(),
            fetcher: Box::new(fetcher),
            anchors: Box::new(RandomIds::new()),
            templates: Environment::new(),
            warnings: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// Use `anchors` for chart widget ids.
    #[must_use]
    pub fn with_anchor_ids(mut self, anchors: impl AnchorIds + 'static) -> Self {
        self.anchors = Box::new(anchors);
        self
    }

    pub fn options(&self) -> &EmbedOptions {
        &self.options
    }
}

impl Extension for EmbedExtension {
    type Node = EmbedmarkNode;
    type Error = RenderError;

    fn transform(&mut self, document: &mut Document<'_, EmbedmarkNode>) {
        self.warnings.clear();
        self.anchors.reset();
        transform::transform(document, &self.options, &mut self.warnings);
    }

    fn render_node(&mut self, node: &EmbedmarkNode, out: &mut String) -> Result<(), RenderError> {
        match node {
            EmbedmarkNode::Embed(embed) => self.render_embed_node(embed, out),
            EmbedmarkNode::Diagnostic(diagnostic) => {
                render::render_diagnostic(diagnostic, out);
                Ok(())
            }
        }
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
