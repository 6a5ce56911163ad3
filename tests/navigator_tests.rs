//! Integration tests for the episode/season navigator.
//!
//! Tests cover:
//! - Initial load and metadata application
//! - Season/episode/provider transitions and active-state invariants
//! - Guides, watch history and stale metadata
//! - Frame load/error handling

use jflix_player::core::effects::RenderEffect;
use jflix_player::core::frame::{Overlay, LOAD_ERROR_MESSAGE};
use jflix_player::core::navigator::{Navigator, NavigatorState};
use jflix_player::core::registry::{ProviderRegistry, SiteVariant};
use jflix_player::core::resolver::PlaybackResolver;
use jflix_player::models::media::{EpisodeRef, MediaDetails, MediaKind, MediaReference, SeasonSummary};
use jflix_player::utils::store::{KeyValueStore, MemoryStore};

const NOW: i64 = 1_760_000_000_000;
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

fn fixed_clock() -> i64 {
    NOW
}

fn month_later_clock() -> i64 {
    NOW + 31 * DAY_MS
}

fn got_details() -> MediaDetails {
    MediaDetails {
        id: 1399,
        name: Some("Game of Thrones".to_string()),
        title: None,
        seasons: vec![
            SeasonSummary { season_number: 0, episode_count: 0 },
            SeasonSummary { season_number: 1, episode_count: 10 },
            SeasonSummary { season_number: 2, episode_count: 8 },
            SeasonSummary { season_number: 3, episode_count: 10 },
        ],
    }
}

fn navigator_with_store(kind: MediaKind, store: MemoryStore) -> Navigator<MemoryStore> {
    let resolver = PlaybackResolver::new(ProviderRegistry::for_site(SiteVariant::Standard));
    Navigator::new(resolver, MediaReference::new("1399", kind), store).with_clock(fixed_clock)
}

fn loaded(kind: MediaKind) -> Navigator<MemoryStore> {
    let mut nav = navigator_with_store(kind, MemoryStore::new());
    nav.start();
    let token = nav.begin_metadata_load();
    nav.apply_metadata(token, &got_details());
    nav
}

fn frame_src<S: KeyValueStore>(nav: &Navigator<S>) -> String {
    nav.frame().src().unwrap_or_default().to_string()
}

// ========== INITIAL LOAD TESTS ==========

#[test]
fn test_start_loads_default_provider() {
    let mut nav = navigator_with_store(MediaKind::Tv, MemoryStore::new());
    let effects = nav.start();

    assert_eq!(nav.state(), NavigatorState::Unselected);
    assert_eq!(nav.active_provider_buttons(), vec!["vidsrcxyz"]);
    assert_eq!(frame_src(&nav), "https://vidsrc.xyz/embed/tv?tmdb=1399");
    assert!(effects.contains(&RenderEffect::ShowPanel {
        id: "server1-notice".to_string()
    }));
    assert!(effects.contains(&RenderEffect::AttachFrameHandlers));
    assert!(nav.frame().csp().is_some());
}

#[test]
fn test_metadata_renders_playable_seasons() {
    let nav = loaded(MediaKind::Tv);

    assert_eq!(nav.season_tabs(), vec![1, 2, 3]);
    assert_eq!(nav.active_season_tabs(), vec![1]);
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(1, 1)]);
    assert_eq!(nav.episode_tile_count(), 10);
    assert_eq!(nav.state(), NavigatorState::SeasonSelected { season: 1 });
    assert_eq!(nav.media().title.as_deref(), Some("Game of Thrones"));
}

#[test]
fn test_no_seasons_degrades_without_navigation() {
    let mut nav = navigator_with_store(MediaKind::Tv, MemoryStore::new());
    nav.start();
    let token = nav.begin_metadata_load();
    let details = MediaDetails {
        id: 1,
        name: Some("Pilot Only".to_string()),
        title: None,
        seasons: vec![SeasonSummary { season_number: 1, episode_count: 0 }],
    };

    let effects = nav.apply_metadata(token, &details);
    assert_eq!(effects, vec![RenderEffect::ClearNavigation]);
    assert_eq!(nav.state(), NavigatorState::Unselected);
    assert!(nav.season_tabs().is_empty());
    assert!(nav.select_episode(1).is_empty());

    // Providers still resolve with the default first episode.
    nav.select_provider("videasy");
    assert!(frame_src(&nav).starts_with("https://player.videasy.net/tv/1399/1/1?"));

    nav.select_provider("vidsrcto");
    assert_eq!(frame_src(&nav), "https://vidsrc.to/embed/tv/1399/1/1");

    nav.select_provider("2embed");
    assert_eq!(frame_src(&nav), "https://www.2embed.cc/embedtv/1399&s=1&e=1");
    assert_eq!(nav.state(), NavigatorState::Unselected);
}

#[test]
fn test_provider_switch_before_metadata_loads_first_episode() {
    let mut nav = navigator_with_store(MediaKind::Tv, MemoryStore::new());
    nav.start();
    assert_eq!(frame_src(&nav), "https://vidsrc.xyz/embed/tv?tmdb=1399");

    nav.select_provider("vidsrcto");
    assert_eq!(frame_src(&nav), "https://vidsrc.to/embed/tv/1399/1/1");

    nav.select_provider("vidsrcxyz");
    assert_eq!(
        frame_src(&nav),
        "https://vidsrc.xyz/embed/tv?tmdb=1399&season=1&episode=1"
    );
    assert!(nav.selection().episode.is_none());
}

#[test]
fn test_stale_metadata_is_discarded() {
    let mut nav = navigator_with_store(MediaKind::Tv, MemoryStore::new());
    nav.start();

    let first = nav.begin_metadata_load();
    let second = nav.begin_metadata_load();

    assert!(nav.apply_metadata(first, &got_details()).is_empty());
    assert!(nav.season_tabs().is_empty());

    assert!(!nav.apply_metadata(second, &got_details()).is_empty());
    assert_eq!(nav.season_tabs(), vec![1, 2, 3]);
}

// ========== TRANSITION TESTS ==========

#[test]
fn test_select_season() {
    let mut nav = loaded(MediaKind::Tv);
    let effects = nav.select_season(2);

    assert_eq!(nav.active_season_tabs(), vec![2]);
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(2, 1)]);
    assert_eq!(nav.episode_tile_count(), 8);
    assert_eq!(nav.active_provider(), Some("vidsrcxyz"));
    assert!(effects.contains(&RenderEffect::RenderEpisodeGrid {
        season: 2,
        episode_count: 8
    }));
}

#[test]
fn test_select_empty_season_is_ignored() {
    let mut nav = loaded(MediaKind::Tv);
    assert!(nav.select_season(0).is_empty());
    assert!(nav.select_season(9).is_empty());
    assert_eq!(nav.active_season_tabs(), vec![1]);
}

#[test]
fn test_select_episode() {
    let mut nav = loaded(MediaKind::Tv);
    nav.select_season(2);
    let effects = nav.select_episode(5);

    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(2, 5)]);
    assert_eq!(nav.styled_episode_tiles(), vec![5]);
    assert_eq!(nav.active_season_tabs(), vec![2]);
    assert_eq!(nav.state(), NavigatorState::EpisodeSelected { season: 2, episode: 5 });
    assert_eq!(nav.active_provider(), Some("vidsrcxyz"));
    assert_eq!(
        frame_src(&nav),
        "https://vidsrc.xyz/embed/tv?tmdb=1399&season=2&episode=5"
    );
    assert!(effects.contains(&RenderEffect::SetEpisodeLabel {
        text: "Season 2 Episode 5".to_string()
    }));
    assert!(effects.contains(&RenderEffect::ScrollToPlayer));
    assert_eq!(
        nav.store().get("lastWatched_1399").unwrap().as_deref(),
        Some(r#"{"season":2,"episode":5}"#)
    );
}

#[test]
fn test_select_episode_out_of_range() {
    let mut nav = loaded(MediaKind::Tv);
    assert!(nav.select_episode(0).is_empty());
    assert!(nav.select_episode(11).is_empty());
    assert_eq!(nav.state(), NavigatorState::SeasonSelected { season: 1 });
}

#[test]
fn test_anime_tile_styling_and_label() {
    let mut nav = loaded(MediaKind::Anime);
    nav.select_season(2);
    let effects = nav.select_episode(3);

    assert!(effects.contains(&RenderEffect::ActivateEpisodeTile {
        season: 2,
        episode: 3,
        style_class: "anime".to_string()
    }));
    assert!(effects.contains(&RenderEffect::SetEpisodeLabel {
        text: "Season 2 - Episode 3".to_string()
    }));
    assert_eq!(nav.styled_episode_tiles(), vec![3]);
}

#[test]
fn test_select_provider_keeps_episode() {
    let mut nav = loaded(MediaKind::Tv);
    nav.select_season(3);
    nav.select_episode(7);

    let effects = nav.select_provider("colorized-embed");
    assert_eq!(nav.active_provider_buttons(), vec!["videasy"]);
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(3, 7)]);
    assert_eq!(nav.active_season_tabs(), vec![3]);
    assert!(frame_src(&nav).contains("/1399/3/7"));
    assert!(frame_src(&nav).ends_with("color=8B5CF6"));
    assert!(effects.contains(&RenderEffect::RemoveCsp));
    assert!(nav.frame().csp().is_none());
    assert!(effects.contains(&RenderEffect::ShowLoading {
        message: "Loading TV show S3:E7 from videasy...".to_string()
    }));
}

#[test]
fn test_select_provider_is_idempotent() {
    let mut nav = loaded(MediaKind::Tv);

    let first = nav.select_provider("vidsrcto");
    let first_url = frame_src(&nav);
    let second = nav.select_provider("vidsrcto");

    assert_eq!(frame_src(&nav), first_url);
    assert!(first
        .iter()
        .any(|e| matches!(e, RenderEffect::ActivateProviderButton { .. })));
    assert!(!second.iter().any(|e| matches!(
        e,
        RenderEffect::ActivateProviderButton { .. } | RenderEffect::HideProviderPanels
    )));
    assert_eq!(nav.active_provider_buttons(), vec!["vidsrcto"]);
}

#[test]
fn test_unknown_provider_selects_default() {
    let mut nav = loaded(MediaKind::Tv);
    nav.select_provider("multiembed");
    nav.select_provider("bogus-provider");

    assert_eq!(nav.active_provider(), Some("vidsrcxyz"));
    assert_eq!(nav.selection().provider_id, "vidsrcxyz");
}

#[test]
fn test_next_and_previous_cross_seasons() {
    let mut nav = loaded(MediaKind::Tv);
    nav.select_episode(10);

    nav.next_episode();
    assert_eq!(nav.state(), NavigatorState::EpisodeSelected { season: 2, episode: 1 });
    assert_eq!(nav.active_season_tabs(), vec![2]);

    nav.previous_episode();
    assert_eq!(nav.state(), NavigatorState::EpisodeSelected { season: 1, episode: 10 });
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(1, 10)]);

    nav.select_season(3);
    nav.select_episode(10);
    assert!(nav.next_episode().is_empty());

    nav.select_season(1);
    nav.select_episode(1);
    assert!(nav.previous_episode().is_empty());
}

// ========== MOVIE TESTS ==========

#[test]
fn test_movie_has_no_navigation() {
    let resolver = PlaybackResolver::new(ProviderRegistry::for_site(SiteVariant::Standard));
    let mut nav = Navigator::new(resolver, MediaReference::new("603", MediaKind::Movie), MemoryStore::new())
        .with_clock(fixed_clock);

    nav.start();
    assert_eq!(frame_src(&nav), "https://vidsrc.xyz/embed/movie?tmdb=603");

    let token = nav.begin_metadata_load();
    let details = MediaDetails {
        id: 603,
        title: Some("The Matrix".to_string()),
        ..Default::default()
    };
    assert!(nav.apply_metadata(token, &details).is_empty());
    assert_eq!(nav.media().title.as_deref(), Some("The Matrix"));
    assert!(nav.select_season(1).is_empty());
    assert!(nav.select_episode(1).is_empty());

    nav.select_provider("multiembed");
    assert_eq!(frame_src(&nav), "https://multiembed.mov/?video_id=603&tmdb=1");
}

// ========== GUIDE & HISTORY TESTS ==========

#[test]
fn test_guide_shown_until_acknowledged() {
    let mut nav = loaded(MediaKind::Tv);

    let effects = nav.select_provider("videasy");
    assert!(effects.contains(&RenderEffect::OpenProviderGuide {
        provider_id: "videasy".to_string()
    }));

    let effects = nav.acknowledge_guide("videasy");
    assert_eq!(
        effects,
        vec![RenderEffect::CloseProviderGuide {
            provider_id: "videasy".to_string()
        }]
    );

    nav.select_provider("vidsrcxyz");
    let effects = nav.select_provider("videasy");
    assert!(!effects
        .iter()
        .any(|e| matches!(e, RenderEffect::OpenProviderGuide { .. })));

    // A month later the guide comes back.
    let store = nav.into_store();
    let mut later = navigator_with_store(MediaKind::Tv, store).with_clock(month_later_clock);
    later.start();
    let effects = later.select_provider("videasy");
    assert!(effects.contains(&RenderEffect::OpenProviderGuide {
        provider_id: "videasy".to_string()
    }));
}

#[test]
fn test_guide_not_shown_for_plain_providers() {
    let mut nav = loaded(MediaKind::Tv);
    let effects = nav.select_provider("vidsrcto");
    assert!(!effects
        .iter()
        .any(|e| matches!(e, RenderEffect::OpenProviderGuide { .. })));
    assert!(nav.acknowledge_guide("vidsrcto").is_empty());
}

#[test]
fn test_resume_last_watched() {
    let mut store = MemoryStore::new();
    store
        .set("lastWatched_1399", r#"{"season":3,"episode":4}"#)
        .unwrap();

    let mut nav = navigator_with_store(MediaKind::Tv, store);
    nav.start();
    let token = nav.begin_metadata_load();
    nav.apply_metadata(token, &got_details());

    assert_eq!(nav.active_season_tabs(), vec![3]);
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(3, 4)]);
    assert_eq!(nav.state(), NavigatorState::EpisodeSelected { season: 3, episode: 4 });
    assert_eq!(
        frame_src(&nav),
        "https://vidsrc.xyz/embed/tv?tmdb=1399&season=3&episode=4"
    );
}

#[test]
fn test_resume_ignores_vanished_episode() {
    let mut store = MemoryStore::new();
    store
        .set("lastWatched_1399", r#"{"season":2,"episode":20}"#)
        .unwrap();

    let mut nav = navigator_with_store(MediaKind::Tv, store);
    nav.start();
    let token = nav.begin_metadata_load();
    nav.apply_metadata(token, &got_details());

    assert_eq!(nav.active_season_tabs(), vec![1]);
    assert_eq!(nav.state(), NavigatorState::SeasonSelected { season: 1 });
}

#[test]
fn test_season_remembers_episode() {
    let mut nav = loaded(MediaKind::Tv);
    nav.select_episode(6);
    nav.select_season(2);
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(2, 1)]);

    nav.select_season(1);
    assert_eq!(nav.active_episode_tiles(), vec![EpisodeRef::new(1, 6)]);
}

// ========== FRAME EVENT TESTS ==========

#[test]
fn test_frame_error_and_recovery() {
    let mut nav = loaded(MediaKind::Tv);
    nav.select_episode(2);

    let effects = nav.on_frame_error();
    assert!(effects.contains(&RenderEffect::ShowError {
        message: LOAD_ERROR_MESSAGE.to_string()
    }));
    assert!(!nav.frame().is_visible());

    // Retrying the same provider reloads the frame.
    let registrations = nav.frame().handler_registrations();
    nav.select_provider("vidsrcxyz");
    assert_eq!(nav.frame().handler_registrations(), registrations + 1);

    nav.on_frame_load();
    assert!(nav.frame().is_visible());
    assert_eq!(nav.frame().overlay(), &Overlay::Hidden);
}
