//! Resolve command implementation.

use crate::core::resolver::{PlaybackResolver, ResolvedPlayback};
use crate::models::media::{EpisodeRef, MediaKind, MediaReference, PlaybackSelection};
use crate::Result;
use colored::Colorize;

/// What to resolve.
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    pub id: String,
    pub kind: MediaKind,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub provider: Option<String>,
    pub title: Option<String>,
}

impl ResolveRequest {
    /// Media reference and selection for this request.
    ///
    /// A lone season or episode defaults the other to 1.
    pub fn to_selection(&self, resolver: &PlaybackResolver) -> (MediaReference, PlaybackSelection) {
        let mut media = MediaReference::new(self.id.clone(), self.kind);
        media.title = self.title.clone();

        let provider_id = self
            .provider
            .clone()
            .unwrap_or_else(|| resolver.registry().default_provider().id.to_string());

        let episode = match (self.season, self.episode) {
            (None, None) => None,
            (season, episode) => Some(EpisodeRef::new(season.unwrap_or(1), episode.unwrap_or(1))),
        };

        (media, PlaybackSelection { provider_id, episode })
    }
}

/// Resolve and print a playback.
pub fn resolve(resolver: &PlaybackResolver, request: &ResolveRequest, format: &str) -> Result<()> {
    let (media, selection) = request.to_selection(resolver);
    let resolved = resolver.resolve(&media, &selection);

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&resolved)?),
        _ => print_resolved(&resolved, &selection.provider_id),
    }

    Ok(())
}

fn print_resolved(resolved: &ResolvedPlayback, requested: &str) {
    if resolved.fell_back {
        println!(
            "{} unknown provider '{}', using '{}'",
            "⚠️ ".yellow(),
            requested,
            resolved.provider_id
        );
    }
    println!("  {} {}", "Provider:".bold(), resolved.provider_id);
    println!("  {} {}", "URL:".bold(), resolved.url.cyan());
    println!("  {} {}", "Sandbox:".bold(), resolved.sandbox_flags);
    match &resolved.csp {
        Some(csp) => println!("  {} {}", "CSP:".bold(), csp),
        None => println!("  {} {}", "CSP:".bold(), "none".green()),
    }
}
