//! Render dispatcher for embed and diagnostic nodes.

use tracing::warn;

use crate::EmbedExtension;
use crate::error::RenderError;
use crate::generators;
use crate::node::{Diagnostic, EmbedNode};
use crate::provider::Provider;

impl EmbedExtension {
    /// Render one embed node into `out`.
    ///
    /// Lookup failures for social posts degrade to an inline error fragment
    /// and a warning.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Template`] if the chart widget template fails.
    pub fn render_embed_node(
        &mut self,
        node: &EmbedNode,
        out: &mut String,
    ) -> Result<(), RenderError> {
        match node.provider() {
            Provider::YouTube => {
                generators::youtube(node.identifier(), self.options.iframe_height, out);
            }
            Provider::Bilibili => {
                generators::bilibili(node.identifier(), self.options.iframe_height, out);
            }
            Provider::Twitter => {
                if let Err(err) =
                    generators::tweet(self.fetcher.as_ref(), node.identifier(), node.theme(), out)
                {
                    warn!(url = node.identifier(), error = %err, "Failed to load tweet");
                    self.warnings
                        .push(format!("failed to load tweet from {}: {err}", node.identifier()));
                }
            }
            Provider::TradingView => {
                let anchor = generators::anchor_id(self.anchors.next_id());
                generators::tradingview(
                    &self.templates,
                    &anchor,
                    node.identifier(),
                    node.theme(),
                    self.options.chart_script,
                    out,
                )?;
            }
        }
        Ok(())
    }
}

/// Render a diagnostic as an HTML comment.
pub(crate) fn render_diagnostic(diagnostic: &Diagnostic, out: &mut String) {
    out.push_str("<!-- ");
    out.push_str(&defuse_comment(&diagnostic.message));
    out.push_str(" -->");
}

/// Break up `--` runs so the text cannot end the comment.
fn defuse_comment(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        result.push(c);
        if c == '-' && chars.peek() == Some(&'-') {
            result.push(' ');
        }
    }
    result
}
