//! Render backend trait for format-specific rendering.
//!
//! The renderer walks the document tree generically and hands the elements
//! whose markup differs between output formats to the backend.

use std::fmt::Write;

use crate::state::escape_html;

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide format-specific rendering for:
/// - Code blocks (`<pre><code>` in HTML)
/// - Blockquotes
/// - Images (`<img>` in HTML)
/// - Paragraph openers carrying presentation classes
pub trait RenderBackend {
    /// Render a code block.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Title attribute, empty when absent
    /// * `out` - Output buffer to write to
    fn image(src: &str, alt: &str, title: &str, out: &mut String);

    /// Render a paragraph start tag.
    ///
    /// `classes` are presentation classes attached to the paragraph node by an
    /// extension's transform pass. Default renders them as a `class` attribute.
    fn paragraph_start(classes: &[String], out: &mut String) {
        if classes.is_empty() {
            out.push_str("<p>");
        } else {
            write!(out, r#"<p class="{}">"#, escape_html(&classes.join(" "))).unwrap();
        }
    }

    /// Render a hard break.
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }

    /// Render a task list marker.
    fn task_list_marker(checked: bool, out: &mut String) {
        if checked {
            out.push_str(r#"<input type="checkbox" checked disabled> "#);
        } else {
            out.push_str(r#"<input type="checkbox" disabled> "#);
        }
    }
}
