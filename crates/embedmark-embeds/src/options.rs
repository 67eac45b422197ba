//! Rendering options for embeds.

use crate::provider::Theme;

/// Options controlling embed markup.
#[derive(Clone, Debug)]
pub struct EmbedOptions {
    /// Theme for posts and charts whose URL has no `theme` parameter.
    pub default_theme: Theme,
    /// Height of video iframes in pixels.
    pub iframe_height: u32,
    /// Class added to a paragraph that directly contains an embed. Embeds in
    /// headings, tight list items, links or table cells get no class.
    pub container_class: Option<String>,
    /// Whether chart widgets include the `tv.js` loader script.
    pub chart_script: bool,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            default_theme: Theme::Dark,
            iframe_height: 400,
            container_class: None,
            chart_script: true,
        }
    }
}

impl EmbedOptions {
    #[must_use]
    pub fn with_default_theme(mut self, theme: Theme) -> Self {
        self.default_theme = theme;
        self
    }

    #[must_use]
    pub fn with_iframe_height(mut self, height: u32) -> Self {
        self.iframe_height = height;
        self
    }

    #[must_use]
    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = Some(class.into());
        self
    }

    /// Omit the chart loader script (for pages that load it once globally).
    #[must_use]
    pub fn without_chart_script(mut self) -> Self {
        self.chart_script = false;
        self
    }
}
