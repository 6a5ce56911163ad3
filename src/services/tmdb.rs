//! TMDB API client.
//!
//! Supplies the title and season/episode counts that drive the navigator.

use crate::models::config::TmdbConfig;
use crate::models::media::{MediaDetails, MediaKind};
use crate::Result;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB client settings.
#[derive(Debug, Clone)]
pub struct TmdbSettings {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbSettings {
    /// Create settings from an API key or token.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        let api_key = api_key.into();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            language: language.into(),
            use_bearer,
        }
    }

    /// Create settings from the application config.
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(crate::Error::TmdbApiKeyMissing)?;
        Ok(Self::new(api_key, config.language.clone()))
    }
}

/// Details endpoint for a media kind. Every episodic kind is a TMDB TV show.
pub fn details_path(kind: MediaKind, id: &str) -> String {
    let id = urlencoding::encode(id);
    if kind.is_episodic() {
        format!("tv/{}", id)
    } else {
        format!("movie/{}", id)
    }
}

/// TMDB API client.
pub struct TmdbClient {
    settings: TmdbSettings,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(settings: TmdbSettings) -> Self {
        let client = reqwest::Client::new();
        Self { settings, client }
    }

    /// Create a new TMDB client from the application config.
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        Ok(Self::new(TmdbSettings::from_config(config)?))
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.settings.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.settings.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    pub fn build_url(&self, path: &str) -> String {
        let language = urlencoding::encode(&self.settings.language);
        if self.settings.use_bearer {
            format!("{}/{}?language={}", TMDB_BASE_URL, path, language)
        } else {
            format!(
                "{}/{}?api_key={}&language={}",
                TMDB_BASE_URL, path, self.settings.api_key, language
            )
        }
    }

    /// Fetch details for a media item.
    pub async fn get_details(&self, kind: MediaKind, id: &str) -> Result<MediaDetails> {
        let url = self.build_url(&details_path(kind, id));
        tracing::debug!("Fetching TMDB details for {} {}", kind, id);

        let resp = self.build_request(&url).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(crate::Error::MediaNotFound(format!("{} {}", kind, id)));
        }
        if !status.is_success() {
            return Err(crate::Error::TmdbRequestError(format!(
                "{} for {} {}",
                status, kind, id
            )));
        }

        let details = resp.json().await?;
        Ok(details)
    }
}
