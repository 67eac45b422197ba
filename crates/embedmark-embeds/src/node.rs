//! Nodes the embed pass inserts into the document tree.

use embedmark_renderer::LinkReference;

use crate::classifier::Classification;
use crate::provider::{Provider, Theme};

/// A classified media embed.
///
/// Replaces the image it was built from and keeps that image's destination
/// and title. The identifier is never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedNode {
    provider: Provider,
    identifier: String,
    theme: Theme,
    destination: String,
    title: String,
}

impl EmbedNode {
    /// Create an embed node, or `None` if `identifier` is empty.
    pub fn new(
        provider: Provider,
        identifier: impl Into<String>,
        theme: Theme,
        link: &LinkReference,
    ) -> Option<Self> {
        let identifier = identifier.into();
        if identifier.is_empty() {
            return None;
        }
        Some(Self {
            provider,
            identifier,
            theme,
            destination: link.destination.clone(),
            title: link.title.clone(),
        })
    }

    /// Build from a classification, falling back to `default_theme` when the
    /// URL carried no theme.
    pub(crate) fn from_classification(
        classification: Classification,
        default_theme: Theme,
        link: &LinkReference,
    ) -> Option<Self> {
        Self::new(
            classification.provider,
            classification.identifier,
            classification.theme.unwrap_or(default_theme),
            link,
        )
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    /// Video id, chart symbol, or canonical post URL.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Destination of the replaced image.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Title of the replaced image.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Marker inserted after an image whose destination failed to parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Destination of the offending image.
    pub destination: String,
    pub message: String,
}

/// Extension node type of the embed pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EmbedmarkNode {
    Embed(EmbedNode),
    Diagnostic(Diagnostic),
}
