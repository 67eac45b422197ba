//! HTML backend for markdown rendering.

use std::fmt::Write;

use crate::backend::RenderBackend;
use crate::state::escape_html;

/// HTML render backend.
///
/// Produces semantic HTML5 with `<pre><code>` for code blocks, `<blockquote>`
/// for blockquotes and `<img>` for images.
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
        if let Some(lang) = lang {
            write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            )
            .unwrap();
        } else {
            write!(out, "<pre><code>{}</code></pre>", escape_html(content)).unwrap();
        }
    }

    fn blockquote_start(out: &mut String) {
        out.push_str("<blockquote>");
    }

    fn blockquote_end(out: &mut String) {
        out.push_str("</blockquote>");
    }

    fn image(src: &str, alt: &str, title: &str, out: &mut String) {
        let title_attr = if title.is_empty() {
            String::new()
        } else {
            format!(r#" title="{}""#, escape_html(title))
        };
        write!(
            out,
            r#"<img src="{}"{title_attr} alt="{}">"#,
            escape_html(src),
            escape_html(alt)
        )
        .unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        HtmlBackend::code_block(Some("rust"), "fn main() {}", &mut out);
        assert_eq!(
            out,
            r#"<pre><code class="language-rust">fn main() {}</code></pre>"#
        );
    }

    #[test]
    fn test_code_block_without_language() {
        let mut out = String::new();
        HtmlBackend::code_block(None, "a < b", &mut out);
        assert_eq!(out, "<pre><code>a &lt; b</code></pre>");
    }

    #[test]
    fn test_image() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "", &mut out);
        assert_eq!(out, r#"<img src="image.png" alt="Alt text">"#);
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        HtmlBackend::image("image.png", "Alt text", "Image title", &mut out);
        assert_eq!(
            out,
            r#"<img src="image.png" title="Image title" alt="Alt text">"#
        );
    }

    #[test]
    fn test_image_escapes_src() {
        let mut out = String::new();
        HtmlBackend::image(r#"a.png?x=1&y="2""#, "", "", &mut out);
        assert_eq!(out, r#"<img src="a.png?x=1&amp;y=&quot;2&quot;" alt="">"#);
    }

    #[test]
    fn test_paragraph_start_plain() {
        let mut out = String::new();
        HtmlBackend::paragraph_start(&[], &mut out);
        assert_eq!(out, "<p>");
    }

    #[test]
    fn test_paragraph_start_with_classes() {
        let mut out = String::new();
        HtmlBackend::paragraph_start(&["embed".to_owned(), "wide".to_owned()], &mut out);
        assert_eq!(out, r#"<p class="embed wide">"#);
    }
}
