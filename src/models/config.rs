//! Configuration model.

use crate::core::registry::SiteVariant;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site variant whose providers are offered.
    pub site: SiteVariant,
    /// Provider to start on instead of the site default.
    pub default_provider: Option<String>,
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// File holding guide acknowledgements and watch history.
    pub state_file: PathBuf,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key or Bearer token.
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteVariant::default(),
            default_provider: None,
            tmdb: TmdbConfig::default(),
            state_file: dirs_config_path().join("state.json"),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: std::env::var("TMDB_API_KEY").ok(),
            language: "en-US".to_string(),
        }
    }
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("jflix")
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> crate::Result<Config> {
    let mut config: Config = toml::from_str(content)?;
    if config.tmdb.api_key.is_none() {
        config.tmdb.api_key = std::env::var("TMDB_API_KEY").ok();
    }
    if config.tmdb.language.trim().is_empty() {
        return Err(crate::Error::InvalidConfig("tmdb.language is empty".to_string()));
    }
    if config.state_file.as_os_str().is_empty() {
        return Err(crate::Error::InvalidConfig("state_file is empty".to_string()));
    }
    Ok(config)
}

/// Load configuration from file.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        match std::fs::read_to_string(&config_path) {
            Ok(content) => match parse_config(&content) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring invalid {}: {}", config_path.display(), e),
            },
            Err(e) => tracing::warn!("Failed to read {}: {}", config_path.display(), e),
        }
    }

    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config(
            r#"
site = "premium"
default_provider = "2embed"

[tmdb]
language = "ko-KR"
"#,
        )
        .unwrap();

        assert_eq!(config.site, SiteVariant::Premium);
        assert_eq!(config.default_provider.as_deref(), Some("2embed"));
        assert_eq!(config.tmdb.language, "ko-KR");
        assert!(config.state_file.ends_with("state.json"));
    }

    #[test]
    fn test_parse_invalid_site() {
        assert!(parse_config(r#"site = "deluxe""#).is_err());
    }

    #[test]
    fn test_parse_empty_state_file() {
        assert!(matches!(
            parse_config(r#"state_file = """#),
            Err(crate::Error::InvalidConfig(_))
        ));
    }
}
