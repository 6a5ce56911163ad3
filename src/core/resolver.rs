//! Playback resolver.
//!
//! Pure mapping from a media reference and a playback selection to the
//! embed URL and the security attributes of the embedding frame. Resolution
//! never fails: unknown providers fall back to the site default and CSP
//! construction falls back to a generic policy.

use crate::core::registry::{ProviderDescriptor, ProviderRegistry};
use crate::models::media::{MediaReference, PlaybackSelection};
use serde::{Deserialize, Serialize};
use url::Url;

/// Directives that do not depend on the provider origin.
const CSP_COMMON_DIRECTIVES: &str = "img-src * data:; media-src * data:; font-src * data:; object-src 'none'; frame-src *; connect-src *; child-src blob:;";

/// Result of resolving a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPlayback {
    /// Provider actually used, after any fallback.
    pub provider_id: String,
    /// Fully-qualified embed URL.
    pub url: String,
    /// Frame sandbox tokens.
    pub sandbox_flags: String,
    /// Frame CSP; `None` means the attribute must be absent.
    pub csp: Option<String>,
    /// Whether the requested provider was unknown.
    pub fell_back: bool,
}

/// Resolves selections against one site's providers.
#[derive(Debug, Clone, Default)]
pub struct PlaybackResolver {
    registry: ProviderRegistry,
}

impl PlaybackResolver {
    /// Create a resolver over `registry`.
    pub fn new(registry: ProviderRegistry) -> Self {
        Self { registry }
    }

    /// Underlying registry.
    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Resolve `selection` for `media`.
    pub fn resolve(&self, media: &MediaReference, selection: &PlaybackSelection) -> ResolvedPlayback {
        let fell_back = !self.registry.contains(&selection.provider_id);
        let provider = self.registry.get_provider(&selection.provider_id);

        // Movies never carry a season/episode.
        let episode = if media.kind.is_episodic() {
            selection.episode
        } else {
            None
        };

        let url = provider.url_for(media, episode);
        tracing::debug!("Resolved {} {} on {}: {}", media.kind, media.id, provider.id, url);

        ResolvedPlayback {
            provider_id: provider.id.to_string(),
            csp: csp_for(provider, &url),
            url,
            sandbox_flags: self.registry.sandbox_flags().to_string(),
            fell_back,
        }
    }
}

/// CSP for a provider's resolved URL, or `None` for trusted providers.
pub fn csp_for(provider: &ProviderDescriptor, url: &str) -> Option<String> {
    if provider.is_trusted() {
        None
    } else {
        Some(build_csp(url))
    }
}

/// Build a CSP scoped to `self` plus the origin of `url`.
///
/// Falls back to [`generic_csp`] when `url` is not an absolute http(s) URL
/// with a host.
pub fn build_csp(url: &str) -> String {
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        tracing::warn!("Embed URL is not a valid HTTP(S) URL, applying generic CSP: {}", url);
        return generic_csp();
    }

    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().map(str::to_string),
        Err(e) => {
            tracing::error!("Failed to parse embed URL {} for CSP: {}", url, e);
            return generic_csp();
        }
    };

    match host {
        Some(host) => {
            let sources = format!("'self' https://{host} https:");
            csp_with_sources(&sources)
        }
        None => {
            tracing::error!("Embed URL {} has no host, applying generic CSP", url);
            generic_csp()
        }
    }
}

/// CSP used when the provider origin cannot be determined.
pub fn generic_csp() -> String {
    csp_with_sources("'self' https:")
}

fn csp_with_sources(sources: &str) -> String {
    format!(
        "default-src {sources}; script-src {sources} 'unsafe-inline' 'unsafe-eval'; style-src {sources} 'unsafe-inline' 'unsafe-eval'; {CSP_COMMON_DIRECTIVES}"
    )
}
