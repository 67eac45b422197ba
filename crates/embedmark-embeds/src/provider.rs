//! Provider and theme vocabulary.

use std::fmt;

/// Media source an embed is rendered for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    /// `www.youtube.com/watch?v=<id>` and `youtu.be/<id>`.
    YouTube,
    /// `www.bilibili.com/video/<bvid>`.
    Bilibili,
    /// Posts on `twitter.com`, `m.twitter.com` and `x.com`.
    Twitter,
    /// Charts on `tradingview.com`.
    TradingView,
}

impl Provider {
    /// Lowercase provider name used in class names and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "youtube",
            Self::Bilibili => "bilibili",
            Self::Twitter => "twitter",
            Self::TradingView => "tradingview",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color scheme requested for social posts and charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Normalize a `theme` query value.
    ///
    /// Absent means [`Theme::Dark`]; any value other than the literal `dark`
    /// means [`Theme::Light`].
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            None | Some("dark") => Self::Dark,
            Some(_) => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_theme_absent_is_dark() {
        assert_eq!(Theme::from_query(None), Theme::Dark);
    }

    #[test]
    fn test_theme_dark_is_dark() {
        assert_eq!(Theme::from_query(Some("dark")), Theme::Dark);
    }

    #[test]
    fn test_theme_other_values_are_light() {
        for value in ["light", "", "Dark", "DARK", "blue", "dark "] {
            assert_eq!(Theme::from_query(Some(value)), Theme::Light, "{value:?}");
        }
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::YouTube.to_string(), "youtube");
        assert_eq!(Provider::TradingView.as_str(), "tradingview");
    }
}
