//! Episode/season navigator.
//!
//! Owns the playback selection for one media reference and keeps the
//! navigation controls (provider buttons, season tabs, episode tiles) in step
//! with it. Every transition returns the render effects the page must apply;
//! the navigator itself never touches the page.
//!
//! Metadata arrives asynchronously. Each request takes a [`MetadataToken`]
//! and only the response for the latest token is applied, so a slow response
//! cannot overwrite navigation for a newer one.

use crate::core::effects::RenderEffect;
use crate::core::frame::PlaybackFrame;
use crate::core::guide;
use crate::core::history;
use crate::core::registry::ProviderDescriptor;
use crate::core::resolver::{PlaybackResolver, ResolvedPlayback};
use crate::models::media::{EpisodeRef, MediaDetails, MediaKind, MediaReference, PlaybackSelection, SeasonSummary};
use crate::utils::store::KeyValueStore;

/// Source of the current time in epoch milliseconds.
pub type Clock = fn() -> i64;

fn system_clock() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    /// No metadata yet, or no playable seasons.
    Unselected,
    /// A season tab is active; its default episode is highlighted.
    SeasonSelected { season: u32 },
    /// An episode tile was chosen and is playing.
    EpisodeSelected { season: u32, episode: u32 },
}

/// Identifies one metadata request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataToken(u64);

#[derive(Debug, Clone)]
struct ProviderButton {
    id: &'static str,
    active: bool,
}

#[derive(Debug, Clone)]
struct SeasonTab {
    season: u32,
    episode_count: u32,
    active: bool,
}

#[derive(Debug, Clone)]
struct EpisodeTile {
    episode: u32,
    active: bool,
    style_class: Option<&'static str>,
}

/// Label shown above the player for an episode.
pub fn episode_label(kind: MediaKind, episode: EpisodeRef) -> String {
    match kind {
        MediaKind::Anime | MediaKind::KoreanDrama => {
            if episode.season > 1 {
                format!("Season {} - Episode {}", episode.season, episode.episode)
            } else {
                format!("Episode {}", episode.episode)
            }
        }
        _ => format!("Season {} Episode {}", episode.season, episode.episode),
    }
}

/// Stateful player navigation for one media reference.
pub struct Navigator<S: KeyValueStore> {
    resolver: PlaybackResolver,
    media: MediaReference,
    selection: PlaybackSelection,
    state: NavigatorState,
    frame: PlaybackFrame,
    store: S,
    clock: Clock,
    buttons: Vec<ProviderButton>,
    tabs: Vec<SeasonTab>,
    tiles: Vec<EpisodeTile>,
    metadata_generation: u64,
    last_resolved: Option<ResolvedPlayback>,
}

impl<S: KeyValueStore> Navigator<S> {
    /// Create a navigator on the site's default provider.
    pub fn new(resolver: PlaybackResolver, media: MediaReference, store: S) -> Self {
        let registry = resolver.registry();
        let selection = PlaybackSelection::new(registry.default_provider().id);
        let buttons = registry
            .providers()
            .iter()
            .map(|p| ProviderButton {
                id: p.id,
                active: false,
            })
            .collect();

        Self {
            resolver,
            media,
            selection,
            state: NavigatorState::Unselected,
            frame: PlaybackFrame::new(),
            store,
            clock: system_clock,
            buttons,
            tabs: Vec::new(),
            tiles: Vec::new(),
            metadata_generation: 0,
            last_resolved: None,
        }
    }

    /// Start on a specific provider instead of the default.
    ///
    /// Unknown ids fall back to the default provider.
    pub fn with_provider(mut self, provider_id: &str) -> Self {
        let provider = self.resolver.registry().get_provider(provider_id);
        self.selection.provider_id = provider.id.to_string();
        self
    }

    /// Replace the clock used for guide timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Media being played.
    pub fn media(&self) -> &MediaReference {
        &self.media
    }

    /// Current provider and season/episode choice.
    pub fn selection(&self) -> &PlaybackSelection {
        &self.selection
    }

    /// Current navigation state.
    pub fn state(&self) -> NavigatorState {
        self.state
    }

    /// Embedding frame attributes.
    pub fn frame(&self) -> &PlaybackFrame {
        &self.frame
    }

    /// Backing key/value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume the navigator, returning its store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Last playback applied to the frame.
    pub fn current_playback(&self) -> Option<&ResolvedPlayback> {
        self.last_resolved.as_ref()
    }

    /// Provider whose button is active.
    pub fn active_provider(&self) -> Option<&'static str> {
        self.buttons.iter().find(|b| b.active).map(|b| b.id)
    }

    /// Ids of all active provider buttons.
    pub fn active_provider_buttons(&self) -> Vec<&'static str> {
        self.buttons.iter().filter(|b| b.active).map(|b| b.id).collect()
    }

    /// Rendered season tabs.
    pub fn season_tabs(&self) -> Vec<u32> {
        self.tabs.iter().map(|t| t.season).collect()
    }

    /// Seasons whose tab is active.
    pub fn active_season_tabs(&self) -> Vec<u32> {
        self.tabs.iter().filter(|t| t.active).map(|t| t.season).collect()
    }

    /// Number of tiles in the current episode grid.
    pub fn episode_tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Episodes whose tile is active.
    pub fn active_episode_tiles(&self) -> Vec<EpisodeRef> {
        let season = self.current_season().unwrap_or(0);
        self.tiles
            .iter()
            .filter(|t| t.active)
            .map(|t| EpisodeRef::new(season, t.episode))
            .collect()
    }

    /// Tiles that carry any kind-specific styling class.
    pub fn styled_episode_tiles(&self) -> Vec<u32> {
        self.tiles
            .iter()
            .filter(|t| t.style_class.is_some())
            .map(|t| t.episode)
            .collect()
    }

    /// Render the provider controls and perform the initial load.
    pub fn start(&mut self) -> Vec<RenderEffect> {
        let provider = self.resolver.registry().get_provider(&self.selection.provider_id);
        tracing::debug!("Starting player for {} {} on {}", self.media.kind, self.media.id, provider.id);

        let message = self.loading_message(provider);
        let mut effects = self.activate_provider(provider);
        effects.extend(self.frame.begin_loading(message));
        effects.extend(self.reload());
        effects
    }

    /// Switch provider, keeping the current season/episode.
    ///
    /// Selecting the already active provider reloads the frame without
    /// touching any styling. Episodic media with no episode selected loads
    /// S1E1.
    pub fn select_provider(&mut self, provider_id: &str) -> Vec<RenderEffect> {
        let provider = self.resolver.registry().get_provider(provider_id);
        let mut effects = Vec::new();

        if self.active_provider() != Some(provider.id) {
            effects.extend(self.activate_provider(provider));
        } else {
            tracing::debug!("Provider {} already active, reloading", provider.id);
        }

        let message = self.loading_message(provider);
        effects.extend(self.frame.begin_loading(message));

        let mut selection = self.selection.clone();
        if self.media.kind.is_episodic() && selection.episode.is_none() {
            selection.episode = Some(EpisodeRef::default());
        }
        effects.extend(self.load(&selection));
        effects
    }

    /// Start a metadata request.
    pub fn begin_metadata_load(&mut self) -> MetadataToken {
        self.metadata_generation += 1;
        MetadataToken(self.metadata_generation)
    }

    /// Apply a metadata response.
    ///
    /// Responses for anything but the latest request are discarded.
    pub fn apply_metadata(&mut self, token: MetadataToken, details: &MediaDetails) -> Vec<RenderEffect> {
        if token.0 != self.metadata_generation {
            tracing::debug!(
                "Discarding stale metadata for {} (request {}, latest {})",
                self.media.id,
                token.0,
                self.metadata_generation
            );
            return Vec::new();
        }

        if self.media.title.is_none() {
            self.media.title = details.display_title().map(str::to_string);
        }

        if !self.media.kind.is_episodic() {
            return Vec::new();
        }

        let seasons: Vec<SeasonSummary> = details.playable_seasons();
        if seasons.is_empty() {
            tracing::warn!("No playable seasons for {} {}", self.media.kind, self.media.id);
            self.tabs.clear();
            self.tiles.clear();
            self.state = NavigatorState::Unselected;
            return vec![RenderEffect::ClearNavigation];
        }

        self.tabs = seasons
            .iter()
            .map(|s| SeasonTab {
                season: s.season_number,
                episode_count: s.episode_count,
                active: false,
            })
            .collect();
        self.tiles.clear();

        let mut effects = vec![RenderEffect::RenderSeasonTabs {
            seasons: self.season_tabs(),
        }];

        let remembered = history::load_last_watched(&self.store, &self.media.id)
            .filter(|ep| self.season_episode_count(ep.season).is_some_and(|n| ep.episode <= n));

        match remembered {
            Some(ep) => {
                tracing::debug!("Resuming {} at S{}E{}", self.media.id, ep.season, ep.episode);
                effects.extend(self.select_season(ep.season));
                effects.extend(self.play_selected(false));
            }
            None => {
                let first = seasons[0].season_number;
                effects.extend(self.select_season(first));
            }
        }

        effects
    }

    /// Activate a season tab and rebuild its episode grid.
    ///
    /// Highlights the remembered episode of that season, or episode 1. The
    /// frame is not reloaded until an episode is chosen.
    pub fn select_season(&mut self, season: u32) -> Vec<RenderEffect> {
        if !self.media.kind.is_episodic() {
            tracing::debug!("Ignoring season selection for a movie");
            return Vec::new();
        }

        let Some(episode_count) = self.season_episode_count(season) else {
            tracing::warn!("Season {} has no episodes for {}", season, self.media.id);
            return Vec::new();
        };

        for tab in &mut self.tabs {
            tab.active = tab.season == season;
        }
        self.tiles = (1..=episode_count)
            .map(|episode| EpisodeTile {
                episode,
                active: false,
                style_class: None,
            })
            .collect();

        let episode = history::load_last_watched(&self.store, &self.media.id)
            .filter(|ep| ep.season == season && ep.episode <= episode_count)
            .map(|ep| ep.episode)
            .unwrap_or(1);

        self.selection.episode = Some(EpisodeRef::new(season, episode));
        self.state = NavigatorState::SeasonSelected { season };

        let mut effects = vec![
            RenderEffect::ActivateSeasonTab { season },
            RenderEffect::RenderEpisodeGrid {
                season,
                episode_count,
            },
        ];
        effects.push(self.activate_tile(season, episode));
        effects
    }

    /// Play an episode of the active season.
    pub fn select_episode(&mut self, episode: u32) -> Vec<RenderEffect> {
        if !self.media.kind.is_episodic() {
            tracing::debug!("Ignoring episode selection for a movie");
            return Vec::new();
        }

        let Some(season) = self.current_season() else {
            tracing::warn!("No season selected, ignoring episode {}", episode);
            return Vec::new();
        };

        if episode == 0 || episode as usize > self.tiles.len() {
            tracing::warn!("Season {} has no episode {}", season, episode);
            return Vec::new();
        }

        self.selection.episode = Some(EpisodeRef::new(season, episode));
        let mut effects = vec![self.activate_tile(season, episode)];
        effects.extend(self.play_selected(true));
        effects
    }

    /// Play the following episode, moving into the next season at the end
    /// of the current one.
    pub fn next_episode(&mut self) -> Vec<RenderEffect> {
        let Some(current) = self.selection.episode else {
            return Vec::new();
        };

        if (current.episode as usize) < self.tiles.len() {
            return self.select_episode(current.episode + 1);
        }

        let next_season = self
            .tabs
            .iter()
            .map(|t| t.season)
            .find(|s| *s > current.season);

        match next_season {
            Some(season) => {
                let mut effects = self.select_season(season);
                effects.extend(self.select_episode(1));
                effects
            }
            None => Vec::new(),
        }
    }

    /// Play the preceding episode, moving into the previous season's last
    /// episode at the start of the current one.
    pub fn previous_episode(&mut self) -> Vec<RenderEffect> {
        let Some(current) = self.selection.episode else {
            return Vec::new();
        };

        if current.episode > 1 {
            return self.select_episode(current.episode - 1);
        }

        let previous = self
            .tabs
            .iter()
            .rev()
            .find(|t| t.season < current.season)
            .map(|t| (t.season, t.episode_count));

        match previous {
            Some((season, last_episode)) => {
                let mut effects = self.select_season(season);
                effects.extend(self.select_episode(last_episode));
                effects
            }
            None => Vec::new(),
        }
    }

    /// Dismiss a provider's usage guide for the suppression window.
    pub fn acknowledge_guide(&mut self, provider_id: &str) -> Vec<RenderEffect> {
        let Some(provider) = self.resolver.registry().lookup(provider_id) else {
            tracing::warn!("Unknown provider '{}', no guide to acknowledge", provider_id);
            return Vec::new();
        };
        let Some(key) = provider.guide_key else {
            tracing::debug!("Provider {} has no guide", provider.id);
            return Vec::new();
        };

        guide::acknowledge_guide(&mut self.store, key, (self.clock)());
        vec![RenderEffect::CloseProviderGuide {
            provider_id: provider.id.to_string(),
        }]
    }

    /// The frame reported a successful load.
    pub fn on_frame_load(&mut self) -> Vec<RenderEffect> {
        self.frame.on_load()
    }

    /// The frame reported a load failure.
    pub fn on_frame_error(&mut self) -> Vec<RenderEffect> {
        self.frame.on_error()
    }

    fn current_season(&self) -> Option<u32> {
        match self.state {
            NavigatorState::Unselected => None,
            NavigatorState::SeasonSelected { season } => Some(season),
            NavigatorState::EpisodeSelected { season, .. } => Some(season),
        }
    }

    fn season_episode_count(&self, season: u32) -> Option<u32> {
        self.tabs
            .iter()
            .find(|t| t.season == season && t.episode_count > 0)
            .map(|t| t.episode_count)
    }

    fn activate_provider(&mut self, provider: &'static ProviderDescriptor) -> Vec<RenderEffect> {
        for button in &mut self.buttons {
            button.active = button.id == provider.id;
        }
        self.selection.provider_id = provider.id.to_string();

        let mut effects = vec![
            RenderEffect::ActivateProviderButton {
                provider_id: provider.id.to_string(),
                style_class: self.media.kind.style_class().to_string(),
            },
            RenderEffect::HideProviderPanels,
        ];
        effects.extend(provider.panels().into_iter().map(|id| RenderEffect::ShowPanel { id }));

        if let Some(key) = provider.guide_key {
            if guide::should_show_guide(&self.store, key, (self.clock)()) {
                effects.push(RenderEffect::OpenProviderGuide {
                    provider_id: provider.id.to_string(),
                });
            }
        }

        effects
    }

    fn activate_tile(&mut self, season: u32, episode: u32) -> RenderEffect {
        let class = self.media.kind.tile_class();
        for tile in &mut self.tiles {
            tile.active = false;
            tile.style_class = None;
        }
        if let Some(tile) = self.tiles.iter_mut().find(|t| t.episode == episode) {
            tile.active = true;
            tile.style_class = Some(class);
        }

        RenderEffect::ActivateEpisodeTile {
            season,
            episode,
            style_class: class.to_string(),
        }
    }

    /// Load the selected episode, update the label and remember it.
    fn play_selected(&mut self, scroll: bool) -> Vec<RenderEffect> {
        let Some(episode) = self.selection.episode else {
            return Vec::new();
        };
        self.state = NavigatorState::EpisodeSelected {
            season: episode.season,
            episode: episode.episode,
        };

        let provider = self.resolver.registry().get_provider(&self.selection.provider_id);
        let message = self.loading_message(provider);
        let mut effects = self.frame.begin_loading(message);
        effects.extend(self.reload());
        effects.push(RenderEffect::SetEpisodeLabel {
            text: episode_label(self.media.kind, episode),
        });

        history::save_last_watched(&mut self.store, &self.media.id, episode);

        if scroll {
            effects.push(RenderEffect::ScrollToPlayer);
        }
        effects
    }

    /// Resolve the current selection and point the frame at it.
    fn reload(&mut self) -> Vec<RenderEffect> {
        let selection = self.selection.clone();
        self.load(&selection)
    }

    /// Resolve `selection` and point the frame at it.
    fn load(&mut self, selection: &PlaybackSelection) -> Vec<RenderEffect> {
        let resolved = self.resolver.resolve(&self.media, selection);
        if resolved.fell_back {
            self.selection.provider_id = resolved.provider_id.clone();
        }
        let effects = self.frame.apply(&resolved);
        self.last_resolved = Some(resolved);
        effects
    }

    fn loading_message(&self, provider: &ProviderDescriptor) -> String {
        let kind = self.media.kind;
        if !kind.is_episodic() {
            return format!("Loading movie from {}...", provider.id);
        }

        let episode = self.selection.episode.unwrap_or_default();
        let position = match kind {
            MediaKind::Anime | MediaKind::Cartoon => format!("episode {}", episode.episode),
            _ => format!("S{}:E{}", episode.season, episode.episode),
        };
        format!("Loading {} {} from {}...", kind.label(), position, provider.id)
    }
}
