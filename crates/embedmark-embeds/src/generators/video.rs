//! Static iframe templates for video providers.

use std::fmt::Write;

use embedmark_renderer::escape_html;

use super::encode_component;

const YOUTUBE_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

/// Render a YouTube player iframe.
pub(crate) fn youtube(video_id: &str, height: u32, out: &mut String) {
    let src = format!("https://www.youtube.com/embed/{}", encode_component(video_id));
    write!(
        out,
        r#"<div class="embeded-object-wrapper"><iframe class="embeded-object youtube-embeded-object" width="100%" height="{height}" src="{}" title="YouTube video player" frameborder="0" allow="{YOUTUBE_ALLOW}" allowfullscreen></iframe></div>"#,
        escape_html(&src)
    )
    .unwrap();
}

/// Render a Bilibili player iframe.
pub(crate) fn bilibili(bvid: &str, height: u32, out: &mut String) {
    let src = format!(
        "//player.bilibili.com/player.html?bvid={}&page=1",
        encode_component(bvid)
    );
    write!(
        out,
        r#"<div class="embeded-object-wrapper"><iframe class="embeded-object bilibili-embeded-object" width="100%" height="{height}" src="{}" scrolling="no" border="0" framespacing="0" allowfullscreen="true" frameborder="no"></iframe></div>"#,
        escape_html(&src)
    )
    .unwrap();
}
