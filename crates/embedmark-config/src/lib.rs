//! Configuration management for embedmark.
//!
//! Parses `embedmark.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `oembed.endpoint` supports environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override oEmbed lookups (false = offline).
    pub oembed_enabled: Option<bool>,
    /// Override oEmbed endpoint.
    pub oembed_endpoint: Option<String>,
    /// Override default embed theme.
    pub default_theme: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "embedmark.toml";

/// Largest accepted iframe height in pixels.
const MAX_IFRAME_HEIGHT: u32 = 4000;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Embed rendering configuration.
    pub embeds: EmbedsConfig,
    /// oEmbed lookup configuration.
    pub oembed: OembedConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Embed rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EmbedsConfig {
    /// Theme used when a link carries no `theme` parameter.
    pub default_theme: String,
    /// Height of video iframes in pixels.
    pub iframe_height: u32,
    /// Class added to paragraphs that contain an embed.
    pub container_class: Option<String>,
}

impl Default for EmbedsConfig {
    fn default() -> Self {
        Self {
            default_theme: "dark".to_owned(),
            iframe_height: 400,
            container_class: None,
        }
    }
}

/// oEmbed lookup configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct OembedConfig {
    /// Whether social posts are looked up over the network.
    pub enabled: bool,
    /// oEmbed endpoint URL.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OembedConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://publish.twitter.com/oembed".to_owned(),
            timeout_secs: 10,
        }
    }
}

impl OembedConfig {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`oembed.endpoint`").
        field: String,
        /// Error message (e.g., "${`OEMBED_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `embedmark.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(enabled) = settings.oembed_enabled {
            self.oembed.enabled = enabled;
        }
        if let Some(endpoint) = &settings.oembed_endpoint {
            self.oembed.endpoint.clone_from(endpoint);
        }
        if let Some(theme) = &settings.default_theme {
            self.embeds.default_theme.clone_from(theme);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_embeds()?;
        self.validate_oembed()?;
        Ok(())
    }

    /// Validate embeds configuration.
    fn validate_embeds(&self) -> Result<(), ConfigError> {
        let theme = self.embeds.default_theme.as_str();
        if theme != "dark" && theme != "light" {
            return Err(ConfigError::Validation(format!(
                "embeds.default_theme must be \"dark\" or \"light\", got \"{theme}\""
            )));
        }

        let height = self.embeds.iframe_height;
        if height == 0 {
            return Err(ConfigError::Validation(
                "embeds.iframe_height must be greater than 0".to_owned(),
            ));
        }
        if height > MAX_IFRAME_HEIGHT {
            return Err(ConfigError::Validation(format!(
                "embeds.iframe_height cannot exceed {MAX_IFRAME_HEIGHT}"
            )));
        }

        if let Some(class) = &self.embeds.container_class {
            require_non_empty(class.trim(), "embeds.container_class")?;
        }

        Ok(())
    }

    /// Validate oEmbed configuration.
    fn validate_oembed(&self) -> Result<(), ConfigError> {
        // Endpoint is irrelevant when lookups are off
        if !self.oembed.enabled {
            return Ok(());
        }

        require_non_empty(&self.oembed.endpoint, "oembed.endpoint")?;
        require_http_url(&self.oembed.endpoint, "oembed.endpoint")?;

        if self.oembed.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "oembed.timeout_secs must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.oembed.endpoint = expand::expand_env(&self.oembed.endpoint, "oembed.endpoint")?;
        Ok(())
    }
}
