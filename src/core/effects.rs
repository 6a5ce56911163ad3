//! Render effects.
//!
//! The navigator and the playback frame never touch the page. They return
//! these effects in order, and the page layer applies them.

use serde::{Deserialize, Serialize};

/// One change to apply to the player page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum RenderEffect {
    /// Show the loading overlay with a message.
    ShowLoading { message: String },
    /// Replace the loading overlay content with an error message.
    ShowError { message: String },
    /// Hide the loading overlay.
    HideLoading,
    /// Hide the embedding frame.
    HideFrame,
    /// Reveal the embedding frame.
    ShowFrame,
    /// Set the frame's sandbox attribute.
    SetSandbox { flags: String },
    /// Set the frame's csp attribute.
    SetCsp { policy: String },
    /// Remove the frame's csp attribute.
    RemoveCsp,
    /// Point the frame at a new URL.
    SetFrameSource { url: String },
    /// Re-register the frame's load and error handlers.
    AttachFrameHandlers,
    /// Rebuild the season tabs.
    RenderSeasonTabs { seasons: Vec<u32> },
    /// Drop all season and episode navigation.
    ClearNavigation,
    /// Mark one season tab active after clearing the others.
    ActivateSeasonTab { season: u32 },
    /// Rebuild the episode tile grid for a season.
    RenderEpisodeGrid { season: u32, episode_count: u32 },
    /// Mark one tile active after clearing every tile's styling.
    ActivateEpisodeTile {
        season: u32,
        episode: u32,
        style_class: String,
    },
    /// Mark one provider button active after clearing the others.
    ActivateProviderButton {
        provider_id: String,
        style_class: String,
    },
    /// Hide every provider notice and feature panel.
    HideProviderPanels,
    /// Show one panel by id.
    ShowPanel { id: String },
    /// Update the "Season X Episode Y" label.
    SetEpisodeLabel { text: String },
    /// Scroll the player into view.
    ScrollToPlayer,
    /// Open a provider's usage guide overlay.
    OpenProviderGuide { provider_id: String },
    /// Close a provider's usage guide overlay.
    CloseProviderGuide { provider_id: String },
}

impl std::fmt::Display for RenderEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderEffect::ShowLoading { message } => write!(f, "show loading: {}", message),
            RenderEffect::ShowError { message } => write!(f, "show error: {}", message),
            RenderEffect::HideLoading => write!(f, "hide loading"),
            RenderEffect::HideFrame => write!(f, "hide frame"),
            RenderEffect::ShowFrame => write!(f, "show frame"),
            RenderEffect::SetSandbox { flags } => write!(f, "sandbox = {}", flags),
            RenderEffect::SetCsp { policy } => write!(f, "csp = {}", policy),
            RenderEffect::RemoveCsp => write!(f, "remove csp"),
            RenderEffect::SetFrameSource { url } => write!(f, "src = {}", url),
            RenderEffect::AttachFrameHandlers => write!(f, "attach onload/onerror"),
            RenderEffect::RenderSeasonTabs { seasons } => {
                let list: Vec<String> = seasons.iter().map(|s| s.to_string()).collect();
                write!(f, "season tabs [{}]", list.join(", "))
            }
            RenderEffect::ClearNavigation => write!(f, "clear navigation"),
            RenderEffect::ActivateSeasonTab { season } => write!(f, "activate season {}", season),
            RenderEffect::RenderEpisodeGrid {
                season,
                episode_count,
            } => write!(f, "episode grid for season {} ({} episodes)", season, episode_count),
            RenderEffect::ActivateEpisodeTile {
                season,
                episode,
                style_class,
            } => write!(f, "activate S{}E{} ({})", season, episode, style_class),
            RenderEffect::ActivateProviderButton {
                provider_id,
                style_class,
            } => write!(f, "activate provider {} ({})", provider_id, style_class),
            RenderEffect::HideProviderPanels => write!(f, "hide provider panels"),
            RenderEffect::ShowPanel { id } => write!(f, "show panel #{}", id),
            RenderEffect::SetEpisodeLabel { text } => write!(f, "label = {}", text),
            RenderEffect::ScrollToPlayer => write!(f, "scroll to player"),
            RenderEffect::OpenProviderGuide { provider_id } => {
                write!(f, "open guide for {}", provider_id)
            }
            RenderEffect::CloseProviderGuide { provider_id } => {
                write!(f, "close guide for {}", provider_id)
            }
        }
    }
}
