//! Provider registry.
//!
//! A fixed table of third-party embed providers. Each entry carries its own
//! URL construction strategy and security policy, so adding or removing a
//! provider is a table edit. Sites expose a subset of the table.

use crate::models::media::{EpisodeRef, MediaKind, MediaReference};
use crate::utils::text::slugify;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Builds the embed URL for a provider.
pub type UrlBuilder = fn(&ProviderDescriptor, &MediaReference, Option<EpisodeRef>) -> String;

/// Query string shared by every Videasy episode URL.
const VIDEASY_EPISODE_QUERY: &str = "nextEpisode=true&autoplayNextEpisode=true&episodeSelector=true";

/// How far the embedding frame trusts a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityPolicy {
    /// No CSP attribute at all.
    Trusted,
    /// CSP scoped to the resolved URL's origin.
    Restricted,
}

/// Static description of one embed provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDescriptor {
    /// Short identifier, as used by the server buttons.
    pub id: &'static str,
    /// Role-based alternative id.
    pub alias: &'static str,
    /// Display label.
    pub label: &'static str,
    /// Root of the embed endpoint.
    pub base_url: &'static str,
    /// URL construction strategy.
    pub build_url: UrlBuilder,
    /// Frame security policy.
    pub security: SecurityPolicy,
    /// Notice panel shown while this provider is active.
    pub notice_panel: Option<&'static str>,
    /// Local storage key of the one-time usage guide, if any.
    pub guide_key: Option<&'static str>,
}

impl ProviderDescriptor {
    /// Build the embed URL for `media`.
    pub fn url_for(&self, media: &MediaReference, episode: Option<EpisodeRef>) -> String {
        (self.build_url)(self, media, episode)
    }

    /// Whether `id` names this provider, by id or alias.
    pub fn matches(&self, id: &str) -> bool {
        self.id == id || self.alias == id
    }

    /// Whether the frame should run without a CSP for this provider.
    pub fn is_trusted(&self) -> bool {
        self.security == SecurityPolicy::Trusted
    }

    /// Panel ids toggled on while this provider is active.
    pub fn panels(&self) -> Vec<String> {
        let mut panels = Vec::with_capacity(2);
        if let Some(notice) = self.notice_panel {
            panels.push(notice.to_string());
        }
        panels.push(format!("{}-features", self.id));
        panels
    }
}

/// Every provider known to the player, in button order.
pub static PROVIDERS: [ProviderDescriptor; 5] = [
    ProviderDescriptor {
        id: "vidsrcxyz",
        alias: "primary-embed",
        label: "VidSrc.xyz",
        base_url: "https://vidsrc.xyz/embed/",
        build_url: vidsrc_xyz_url,
        security: SecurityPolicy::Restricted,
        notice_panel: Some("server1-notice"),
        guide_key: None,
    },
    ProviderDescriptor {
        id: "videasy",
        alias: "colorized-embed",
        label: "Videasy",
        base_url: "https://player.videasy.net/",
        build_url: videasy_url,
        security: SecurityPolicy::Trusted,
        notice_panel: Some("server2-notice"),
        guide_key: Some("server1InfoDismissedAt"),
    },
    ProviderDescriptor {
        id: "2embed",
        alias: "anime-embed",
        label: "2Embed",
        base_url: "https://www.2embed.cc/",
        build_url: two_embed_url,
        security: SecurityPolicy::Trusted,
        notice_panel: Some("server3-notice"),
        guide_key: Some("server2InfoDismissedAt"),
    },
    ProviderDescriptor {
        id: "vidsrcto",
        alias: "path-embed",
        label: "VidSrc.to",
        base_url: "https://vidsrc.to/embed/",
        build_url: vidsrc_to_url,
        security: SecurityPolicy::Restricted,
        notice_panel: None,
        guide_key: None,
    },
    ProviderDescriptor {
        id: "multiembed",
        alias: "query-embed",
        label: "MultiEmbed",
        base_url: "https://multiembed.mov/?video_id=",
        build_url: multi_embed_url,
        security: SecurityPolicy::Restricted,
        notice_panel: None,
        guide_key: None,
    },
];

/// Color hint passed to Videasy, by content kind.
pub fn color_hint(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Anime => "F43F5E",
        MediaKind::KoreanDrama => "10B981",
        MediaKind::Cartoon => "FF9900",
        MediaKind::Movie | MediaKind::Tv => "8B5CF6",
    }
}

fn vidsrc_xyz_url(p: &ProviderDescriptor, media: &MediaReference, episode: Option<EpisodeRef>) -> String {
    let (base, id) = (p.base_url, &media.id);
    if !media.kind.is_episodic() {
        return format!("{base}movie?tmdb={id}");
    }
    match episode {
        Some(ep) => format!(
            "{base}tv?tmdb={id}&season={}&episode={}",
            ep.season, ep.episode
        ),
        None if media.kind == MediaKind::Tv => format!("{base}tv?tmdb={id}"),
        None => format!("{base}tv?tmdb={id}&season=1&episode=1"),
    }
}

fn videasy_url(p: &ProviderDescriptor, media: &MediaReference, episode: Option<EpisodeRef>) -> String {
    let (base, id) = (p.base_url, &media.id);
    if !media.kind.is_episodic() {
        return format!("{base}movie/{id}");
    }
    let ep = episode.unwrap_or_default();
    format!(
        "{base}tv/{id}/{}/{}?{VIDEASY_EPISODE_QUERY}&color={}",
        ep.season,
        ep.episode,
        color_hint(media.kind)
    )
}

fn two_embed_url(p: &ProviderDescriptor, media: &MediaReference, episode: Option<EpisodeRef>) -> String {
    let (base, id) = (p.base_url, &media.id);
    if !media.kind.is_episodic() {
        return format!("{base}embed/{id}");
    }

    // Anime is addressed by title slug and a flat episode number.
    if media.kind == MediaKind::Anime {
        match media.title.as_deref().map(slugify).filter(|s| !s.is_empty()) {
            Some(slug) => {
                let number = episode.map(|ep| ep.episode).unwrap_or(1);
                return format!("{base}embedanime/{slug}-episode-{number}");
            }
            None => {
                tracing::warn!(
                    "No title for anime {}, using the TV embed form on {}",
                    id,
                    p.id
                );
            }
        }
    }

    match episode {
        Some(ep) => format!("{base}embedtv/{id}&s={}&e={}", ep.season, ep.episode),
        None if media.kind == MediaKind::Tv => format!("{base}embedtvfull/{id}"),
        None => format!("{base}embedtv/{id}&s=1&e=1"),
    }
}

fn vidsrc_to_url(p: &ProviderDescriptor, media: &MediaReference, episode: Option<EpisodeRef>) -> String {
    let (base, id) = (p.base_url, &media.id);
    if !media.kind.is_episodic() {
        return format!("{base}movie/{id}");
    }
    match episode {
        Some(ep) => format!("{base}tv/{id}/{}/{}", ep.season, ep.episode),
        None => format!("{base}tv/{id}"),
    }
}

fn multi_embed_url(p: &ProviderDescriptor, media: &MediaReference, episode: Option<EpisodeRef>) -> String {
    let (base, id) = (p.base_url, &media.id);
    if !media.kind.is_episodic() {
        return format!("{base}{id}&tmdb=1");
    }
    let ep = episode.unwrap_or_default();
    format!("{base}{id}&tmdb=1&s={}&e={}", ep.season, ep.episode)
}

/// Site variant, each with its own provider subset and frame sandbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteVariant {
    /// Ad-supported site with all providers.
    #[default]
    Standard,
    /// Ad-free premium site.
    Premium,
}

impl SiteVariant {
    /// Provider ids offered on this site; the first is the default.
    pub fn provider_ids(&self) -> &'static [&'static str] {
        match self {
            SiteVariant::Standard => &["vidsrcxyz", "videasy", "2embed", "vidsrcto", "multiembed"],
            SiteVariant::Premium => &["videasy", "2embed"],
        }
    }

    /// Sandbox attribute applied to the embedding frame.
    pub fn sandbox_flags(&self) -> &'static str {
        match self {
            SiteVariant::Standard => {
                "allow-scripts allow-same-origin allow-presentation allow-forms allow-popups allow-downloads"
            }
            SiteVariant::Premium => "allow-scripts allow-same-origin allow-presentation",
        }
    }
}

impl std::fmt::Display for SiteVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteVariant::Standard => write!(f, "standard"),
            SiteVariant::Premium => write!(f, "premium"),
        }
    }
}

impl FromStr for SiteVariant {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(SiteVariant::Standard),
            "premium" | "noads" => Ok(SiteVariant::Premium),
            _ => Err(crate::Error::UnknownSiteVariant(s.to_string())),
        }
    }
}

/// Immutable provider lookup for one site.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    site: SiteVariant,
    providers: Vec<&'static ProviderDescriptor>,
    default_index: usize,
}

impl ProviderRegistry {
    /// Registry for a site with its built-in default provider.
    pub fn for_site(site: SiteVariant) -> Self {
        let providers = site
            .provider_ids()
            .iter()
            .filter_map(|id| PROVIDERS.iter().find(|p| p.id == *id))
            .collect();

        Self {
            site,
            providers,
            default_index: 0,
        }
    }

    /// Registry whose default provider is overridden, e.g. from config.
    ///
    /// An override that is not part of the site keeps the built-in default.
    pub fn with_default(site: SiteVariant, default_id: Option<&str>) -> Self {
        let mut registry = Self::for_site(site);
        if let Some(id) = default_id {
            match registry.providers.iter().position(|p| p.matches(id)) {
                Some(index) => registry.default_index = index,
                None => tracing::warn!(
                    "Configured default provider '{}' is not available on the {} site",
                    id,
                    site
                ),
            }
        }
        registry
    }

    /// Site this registry serves.
    pub fn site(&self) -> SiteVariant {
        self.site
    }

    /// Sandbox flags for this site.
    pub fn sandbox_flags(&self) -> &'static str {
        self.site.sandbox_flags()
    }

    /// Providers in button order.
    pub fn providers(&self) -> &[&'static ProviderDescriptor] {
        &self.providers
    }

    /// Default provider.
    pub fn default_provider(&self) -> &'static ProviderDescriptor {
        self.providers[self.default_index]
    }

    /// Look up a provider by id or alias.
    pub fn lookup(&self, id: &str) -> Option<&'static ProviderDescriptor> {
        self.providers.iter().copied().find(|p| p.matches(id))
    }

    /// Whether `id` is available on this site.
    pub fn contains(&self, id: &str) -> bool {
        self.lookup(id).is_some()
    }

    /// Look up a provider, falling back to the default for unknown ids.
    pub fn get_provider(&self, id: &str) -> &'static ProviderDescriptor {
        match self.lookup(id) {
            Some(provider) => provider,
            None => {
                let fallback = self.default_provider();
                tracing::warn!(
                    "Unknown provider '{}', falling back to '{}'",
                    id,
                    fallback.id
                );
                fallback
            }
        }
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::for_site(SiteVariant::default())
    }
}
