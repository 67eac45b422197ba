//! `embedmark convert` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use embedmark_config::{CliSettings, Config};
use embedmark_embeds::{EmbedExtension, EmbedOptions, Theme};
use embedmark_oembed::{HttpFetcher, OfflineFetcher};
use embedmark_renderer::{HtmlBackend, MarkdownRenderer, RenderResult};
use tracing::debug;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (`-` reads stdin).
    input: PathBuf,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover embedmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Do not look up social posts over the network.
    #[arg(long)]
    pub offline: bool,

    /// oEmbed endpoint URL (overrides config).
    #[arg(long, env = "EMBEDMARK_OEMBED_ENDPOINT", conflicts_with = "offline")]
    oembed_endpoint: Option<String>,

    /// Default theme for posts and charts (overrides config).
    #[arg(long, value_parser = ["dark", "light"])]
    theme: Option<String>,

    /// Extract the first H1 as the document title and report it.
    #[arg(long)]
    pub title: bool,

    /// Enable verbose output (debug logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading, rendering, or writing fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            oembed_enabled: self.offline.then_some(false),
            oembed_endpoint: self.oembed_endpoint,
            default_theme: self.theme,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            debug!(path = %path.display(), "Loaded configuration");
        }

        let markdown = read_input(&self.input)?;
        let result = convert(&markdown, &config, self.title)?;

        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }
        if let Some(title) = &result.title {
            output.info(&format!("Title: {title}"));
        }

        match &self.output {
            Some(path) => {
                std::fs::write(path, &result.html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(result.html.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}

/// Convert markdown with embeds configured from `config`.
fn convert(markdown: &str, config: &Config, extract_title: bool) -> Result<RenderResult, CliError> {
    let options = embed_options_from_config(config);
    let extension = if config.oembed.enabled {
        EmbedExtension::new(HttpFetcher::new(
            config.oembed.endpoint.clone(),
            config.oembed.timeout(),
        ))
    } else {
        EmbedExtension::new(OfflineFetcher)
    };
    let mut extension = extension.with_options(options);

    let mut renderer = MarkdownRenderer::<HtmlBackend>::new();
    if extract_title {
        renderer = renderer.with_title_extraction();
    }
    Ok(renderer.convert(markdown, &mut extension)?)
}

/// Build embed options from the `[embeds]` section.
fn embed_options_from_config(config: &Config) -> EmbedOptions {
    let embeds = &config.embeds;
    let mut options = EmbedOptions::default()
        .with_default_theme(Theme::from_query(Some(&embeds.default_theme)))
        .with_iframe_height(embeds.iframe_height);
    if let Some(class) = &embeds.container_class {
        options = options.with_container_class(class.trim());
    }
    options
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let result = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin())
    } else {
        std::fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Input {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn offline_config() -> Config {
        let mut config = Config::default();
        config.oembed.enabled = false;
        config
    }

    #[test]
    fn test_embed_options_from_default_config() {
        let options = embed_options_from_config(&Config::default());
        assert_eq!(options.default_theme, Theme::Dark);
        assert_eq!(options.iframe_height, 400);
        assert_eq!(options.container_class, None);
    }

    #[test]
    fn test_embed_options_from_custom_config() {
        let mut config = Config::default();
        config.embeds.default_theme = "light".to_owned();
        config.embeds.iframe_height = 300;
        config.embeds.container_class = Some(" embed ".to_owned());

        let options = embed_options_from_config(&config);
        assert_eq!(options.default_theme, Theme::Light);
        assert_eq!(options.iframe_height, 300);
        assert_eq!(options.container_class.as_deref(), Some("embed"));
    }

    #[test]
    fn test_convert_offline() {
        let result = convert(
            "# Demo\n\n![](https://youtu.be/abc)\n\n![](https://x.com/a/status/1)",
            &offline_config(),
            true,
        )
        .unwrap();

        assert_eq!(result.title.as_deref(), Some("Demo"));
        assert!(result.html.contains("https://www.youtube.com/embed/abc"));
        assert!(result.html.contains("Failed to load tweet from https://twitter.com/a/status/1"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_read_input_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "hello").unwrap();
        assert_eq!(read_input(file.path()).unwrap(), "hello");
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_input(&dir.path().join("missing.md")).unwrap_err();
        assert!(err.to_string().contains("missing.md"));
    }
}
