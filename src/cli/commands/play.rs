//! Play command implementation.
//!
//! Drives the navigator the way the player page does: render the provider
//! controls, load the default embed, apply TMDB metadata, then follow the
//! requested season/episode. Every render effect is printed.

use crate::core::effects::RenderEffect;
use crate::core::navigator::Navigator;
use crate::core::resolver::PlaybackResolver;
use crate::models::media::{MediaDetails, MediaKind, MediaReference};
use crate::services::tmdb::TmdbClient;
use crate::utils::store::KeyValueStore;
use crate::Result;
use colored::Colorize;

/// What to play.
#[derive(Debug, Clone)]
pub struct PlayRequest {
    pub id: String,
    pub kind: MediaKind,
    pub provider: Option<String>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

/// Run the navigator for a request.
pub async fn play<S: KeyValueStore>(
    resolver: PlaybackResolver,
    tmdb: Option<&TmdbClient>,
    store: S,
    request: &PlayRequest,
    format: &str,
) -> Result<()> {
    let media = MediaReference::new(request.id.clone(), request.kind);
    let mut navigator = Navigator::new(resolver, media, store);
    if let Some(provider) = &request.provider {
        navigator = navigator.with_provider(provider);
    }

    let mut steps: Vec<(String, Vec<RenderEffect>)> = Vec::new();
    steps.push(("start".to_string(), navigator.start()));

    let token = navigator.begin_metadata_load();
    let details = match tmdb {
        Some(client) => match client.get_details(request.kind, &request.id).await {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!("Metadata unavailable for {} {}: {}", request.kind, request.id, e);
                MediaDetails::default()
            }
        },
        None => {
            tracing::warn!("No TMDB client configured, continuing without metadata");
            MediaDetails::default()
        }
    };
    steps.push(("metadata".to_string(), navigator.apply_metadata(token, &details)));

    if let Some(season) = request.season {
        steps.push((format!("season {}", season), navigator.select_season(season)));
        if request.episode.is_none() {
            if let Some(ep) = navigator.selection().episode {
                steps.push((format!("episode {}", ep.episode), navigator.select_episode(ep.episode)));
            }
        }
    }
    if let Some(episode) = request.episode {
        steps.push((format!("episode {}", episode), navigator.select_episode(episode)));
    }

    match format {
        "json" => {
            let effects: Vec<&RenderEffect> = steps.iter().flat_map(|(_, e)| e.iter()).collect();
            println!("{}", serde_json::to_string_pretty(&effects)?);
        }
        _ => {
            let title = navigator.media().title.clone().unwrap_or_else(|| request.id.clone());
            println!("{} {}", "▶️  Playing".bold().cyan(), title.bold());
            println!();
            for (label, effects) in &steps {
                print_step(label, effects);
            }
            print_summary(&navigator);
        }
    }

    Ok(())
}

fn print_step(label: &str, effects: &[RenderEffect]) {
    println!("{}", format!("[{}]", label).bold());
    if effects.is_empty() {
        println!("  (no changes)");
    }
    for effect in effects {
        println!("  - {}", effect);
    }
    println!();
}

fn print_summary<S: KeyValueStore>(navigator: &Navigator<S>) {
    println!("{}", "Summary:".bold());
    println!("  {} {:?}", "State:".bold(), navigator.state());
    if !navigator.season_tabs().is_empty() {
        let tabs: Vec<String> = navigator.season_tabs().iter().map(|s| s.to_string()).collect();
        println!("  {} {}", "Seasons:".bold(), tabs.join(", "));
    }
    if let Some(playback) = navigator.current_playback() {
        println!("  {} {}", "Provider:".bold(), playback.provider_id);
        println!("  {} {}", "URL:".bold(), playback.url.cyan());
    }
}
