//! Extension hooks for the document pipeline.
//!
//! An extension is registered for one conversion and is invoked twice:
//! once to transform the freshly parsed tree, and once per
//! [`NodeKind::Custom`](crate::NodeKind::Custom) node during serialization.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use embedmark_renderer::{Document, Extension, HtmlBackend, MarkdownRenderer, Node};
//!
//! struct Shout;
//!
//! impl Extension for Shout {
//!     type Node = String;
//!     type Error = Infallible;
//!
//!     fn transform(&mut self, document: &mut Document<'_, String>) {
//!         document.children.push(Node::custom("HELLO".to_owned()));
//!     }
//!
//!     fn render_node(&mut self, node: &String, out: &mut String) -> Result<(), Infallible> {
//!         out.push_str(&format!("<b>{node}</b>"));
//!         Ok(())
//!     }
//! }
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .convert("hi", &mut Shout)
//!     .unwrap();
//! assert_eq!(result.html, "<p>hi</p><b>HELLO</b>");
//! ```

use std::convert::Infallible;

use crate::tree::Document;

/// Transform pass plus custom-node renderer.
pub trait Extension {
    /// Node type this extension inserts into the tree.
    type Node;
    /// Error that aborts rendering of the whole document.
    type Error;

    /// Rewrite the parsed tree. Called exactly once per document.
    fn transform(&mut self, document: &mut Document<'_, Self::Node>);

    /// Render one custom node into `out`.
    fn render_node(&mut self, node: &Self::Node, out: &mut String) -> Result<(), Self::Error>;

    /// Warnings collected during transform and rendering.
    ///
    /// Default implementation returns empty slice.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Extension that leaves the document untouched.
pub struct NoExtension;

impl Extension for NoExtension {
    type Node = Infallible;
    type Error = Infallible;

    fn transform(&mut self, _document: &mut Document<'_, Infallible>) {}

    fn render_node(&mut self, node: &Infallible, _out: &mut String) -> Result<(), Infallible> {
        match *node {}
    }
}
