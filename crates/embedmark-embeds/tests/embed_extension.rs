//! End-to-end conversions through `MarkdownRenderer` with the embed extension.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use embedmark_embeds::{EmbedExtension, EmbedOptions, SequentialIds, Theme};
use embedmark_oembed::{OembedError, OfflineFetcher};
use embedmark_renderer::{HtmlBackend, MarkdownRenderer, NoExtension};
use pretty_assertions::assert_eq;

fn convert(markdown: &str, extension: &mut EmbedExtension) -> embedmark_renderer::RenderResult {
    MarkdownRenderer::<HtmlBackend>::new()
        .convert(markdown, extension)
        .unwrap()
}

fn offline() -> EmbedExtension {
    EmbedExtension::new(OfflineFetcher).with_anchor_ids(SequentialIds::new())
}

fn plain(markdown: &str) -> String {
    MarkdownRenderer::<HtmlBackend>::new()
        .convert(markdown, &mut NoExtension)
        .unwrap()
        .html
}

/// Fetcher that records every lookup and answers with a fixed snippet.
fn recording_fetcher(
    calls: &Rc<RefCell<Vec<(String, String)>>>,
) -> impl Fn(&str, &str) -> Result<String, OembedError> + 'static {
    let calls = Rc::clone(calls);
    move |url: &str, theme: &str| -> Result<String, OembedError> {
        calls.borrow_mut().push((url.to_owned(), theme.to_owned()));
        Ok(format!("<blockquote class=\"twitter-tweet\">{theme}</blockquote>"))
    }
}

#[test]
fn test_youtube_watch_link() {
    let result = convert("![](https://www.youtube.com/watch?v=dQw4w9WgXcQ)", &mut offline());
    assert_eq!(
        result.html,
        r#"<p><div class="embeded-object-wrapper"><iframe class="embeded-object youtube-embeded-object" width="100%" height="400" src="https://www.youtube.com/embed/dQw4w9WgXcQ" title="YouTube video player" frameborder="0" allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share" allowfullscreen></iframe></div></p>"#
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_youtube_watch_and_short_link_agree() {
    let watch = convert("![](https://www.youtube.com/watch?v=dQw4w9WgXcQ)", &mut offline());
    let short = convert("![](https://youtu.be/dQw4w9WgXcQ)", &mut offline());
    assert_eq!(watch.html, short.html);
    assert!(short.html.contains(r#"/embed/dQw4w9WgXcQ""#));
}

#[test]
fn test_bilibili_link() {
    let result = convert("![](https://www.bilibili.com/video/BV1GJ411x7h7)", &mut offline());
    assert!(
        result
            .html
            .contains("//player.bilibili.com/player.html?bvid=BV1GJ411x7h7&amp;page=1")
    );
}

#[test]
fn test_iframe_height_option() {
    let mut extension = offline().with_options(EmbedOptions::default().with_iframe_height(315));
    let result = convert("![](https://youtu.be/abc)", &mut extension);
    assert!(result.html.contains(r#"height="315""#));
}

#[test]
fn test_unmatched_images_are_byte_identical() {
    let markdown = "# Gallery\n\n![cat](cat.png \"A cat\") and ![](https://example.com/dog.jpg)\n\n\
                    ![](https://vimeo.com/1234) ![](https://www.youtube.com/channel/UC1)";
    let result = convert(markdown, &mut offline());
    assert_eq!(result.html, plain(markdown));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_tweet_fetch_failure_still_converts() {
    let result = convert(
        "Look:\n\n![](https://twitter.com/user/status/123?theme=light)\n\nEnd.",
        &mut offline(),
    );
    assert!(result.html.contains(
        "Failed to load tweet from https://twitter.com/user/status/123?theme=light"
    ));
    assert!(result.html.starts_with("<p>Look:</p>"));
    assert!(result.html.ends_with("<p>End.</p>"));
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("https://twitter.com/user/status/123?theme=light"));
}

#[test]
fn test_tweet_error_fetcher() {
    let failing = |_: &str, _: &str| -> Result<String, OembedError> {
        Err(OembedError::Other("connection reset".to_owned()))
    };
    let mut extension = EmbedExtension::new(failing);
    let result = convert("![](https://twitter.com/a/status/1)", &mut extension);
    assert!(result.html.contains("Failed to load tweet from https://twitter.com/a/status/1"));
    assert!(result.warnings[0].contains("connection reset"));
}

#[test]
fn test_tweet_snippet_is_wrapped() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut extension = EmbedExtension::new(recording_fetcher(&calls));
    let result = convert("![](https://twitter.com/a/status/1)", &mut extension);

    assert_eq!(
        result.html,
        r#"<p><div class="embeded-object-wrapper normal-wrapper"><div class="embeded-object twitter-embeded-object normal-object"><blockquote class="twitter-tweet">dark</blockquote></div></div></p>"#
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_x_links_are_fetched_from_canonical_domain() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut extension = EmbedExtension::new(recording_fetcher(&calls));
    convert(
        "![](https://x.com/a/status/1)\n\n![](https://m.twitter.com/b/status/2?theme=light)",
        &mut extension,
    );

    assert_eq!(
        *calls.borrow(),
        vec![
            ("https://twitter.com/a/status/1".to_owned(), "dark".to_owned()),
            (
                "https://m.twitter.com/b/status/2?theme=light".to_owned(),
                "light".to_owned()
            ),
        ]
    );
}

#[test]
fn test_theme_normalization() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut extension = EmbedExtension::new(recording_fetcher(&calls));
    convert(
        "![](https://twitter.com/a/status/1?theme=dark) \
         ![](https://twitter.com/a/status/2?theme=sepia) \
         ![](https://twitter.com/a/status/3?theme=) \
         ![](https://twitter.com/a/status/4)",
        &mut extension,
    );

    let themes: Vec<String> = calls.borrow().iter().map(|(_, t)| t.clone()).collect();
    assert_eq!(themes, vec!["dark", "light", "light", "dark"]);
}

#[test]
fn test_default_theme_option() {
    let mut extension =
        offline().with_options(EmbedOptions::default().with_default_theme(Theme::Light));
    let result = convert(
        "![](https://www.tradingview.com/chart/?symbol=NASDAQ:AAPL)",
        &mut extension,
    );
    assert!(result.html.contains(r#""theme": "light""#));
}

#[test]
fn test_chart_anchor_ids_are_distinct() {
    let markdown = "![](https://www.tradingview.com/chart/?symbol=BITFINEX%3ABTCUSD)\n\n\
                    ![](https://tradingview.com/chart/?symbol=NASDAQ:AAPL&theme=light)";
    let result = convert(markdown, &mut offline());

    assert!(result.html.contains(r#"<div id="tradingview_0" "#));
    assert!(result.html.contains(r#"<div id="tradingview_1" "#));
    assert!(result.html.contains(r#""symbol": "BITFINEX:BTCUSD""#));
    assert!(result.html.contains(r#""symbol": "NASDAQ:AAPL""#));
}

#[test]
fn test_random_chart_anchor_ids_are_distinct() {
    let markdown = "![](https://tradingview.com/?symbol=A) ".repeat(50);
    let result = convert(&markdown, &mut EmbedExtension::new(OfflineFetcher));

    let ids: HashSet<&str> = result
        .html
        .match_indices(r#"<div id=""#)
        .map(|(start, _)| {
            let rest = &result.html[start + 9..];
            &rest[..rest.find('"').unwrap()]
        })
        .collect();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_anchor_ids_restart_per_document() {
    let mut extension = offline();
    let markdown = "![](https://tradingview.com/?symbol=A)";
    let first = convert(markdown, &mut extension);
    let second = convert(markdown, &mut extension);
    assert_eq!(first.html, second.html);
}

#[test]
fn test_malformed_url_keeps_image_and_adds_comment() {
    let result = convert("![broken](https://[::1/watch)", &mut offline());
    assert!(result.html.starts_with(
        r#"<p><img src="https://[::1/watch" alt="broken"><!-- malformed embed url"#
    ));
    assert!(result.html.ends_with(" --></p>"));
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn test_malformed_url_comment_stays_inside_heading() {
    let result = convert("# T ![x](https://[::1/watch)", &mut offline());
    assert!(result.html.starts_with(
        r#"<h1 id="t">T <img src="https://[::1/watch" alt="x"><!-- malformed embed url"#
    ));
    assert!(result.html.ends_with(" --></h1>"));
}

#[test]
fn test_plain_image_in_heading_matches_host() {
    let markdown = "# P ![b](b.svg)";
    let result = convert(markdown, &mut offline());
    assert_eq!(result.html, r#"<h1 id="p">P <img src="b.svg" alt="b"></h1>"#);
    assert_eq!(result.html, plain(markdown));
}

#[test]
fn test_warnings_reset_between_documents() {
    let mut extension = offline();
    let first = convert("![](https://[::1/watch)", &mut extension);
    let second = convert("no embeds here", &mut extension);
    assert_eq!(first.warnings.len(), 1);
    assert!(second.warnings.is_empty());
}

#[test]
fn test_container_class_option() {
    let mut extension =
        offline().with_options(EmbedOptions::default().with_container_class("embed-block"));
    let result = convert("![](https://youtu.be/abc)\n\n![](cat.png)", &mut extension);
    assert!(result.html.starts_with(r#"<p class="embed-block"><div"#));
    assert!(result.html.ends_with(r#"<p><img src="cat.png" alt=""></p>"#));
}

#[test]
fn test_embed_inside_list_item() {
    let result = convert("- ![](https://youtu.be/abc)\n- text", &mut offline());
    assert!(result.html.contains("<li><div class=\"embeded-object-wrapper\">"));
}
