//! Tree-based markdown renderer with pluggable backends.
//!
//! This crate provides a generic [`MarkdownRenderer`] that parses markdown with
//! pulldown-cmark, builds a mutable [`Document`] tree, lets an [`Extension`]
//! rewrite that tree once, and serializes it through a [`RenderBackend`].
//!
//! # Architecture
//!
//! - [`Document`] / [`Node`]: the parsed tree. Images are childless
//!   [`NodeKind::Image`] nodes carrying a [`LinkReference`].
//! - [`Extension`]: a transform pass over the tree plus a render hook for the
//!   extension's own [`NodeKind::Custom`] nodes.
//! - [`HtmlBackend`]: produces semantic HTML5.
//!
//! # Example
//!
//! ```
//! use embedmark_renderer::{HtmlBackend, MarkdownRenderer, NoExtension};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .with_title_extraction()
//!     .convert("# Hello\n\n**Bold** text", &mut NoExtension)
//!     .unwrap();
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! ```

mod backend;
mod extension;
mod html;
mod renderer;
mod state;
mod tree;
mod util;

pub use backend::RenderBackend;
pub use extension::{Extension, NoExtension};
pub use html::HtmlBackend;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
pub use tree::{Document, LinkReference, Node, NodeKind};
