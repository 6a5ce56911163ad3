//! Last-watched episode persistence, keyed by media id.

use crate::models::media::EpisodeRef;
use crate::utils::store::KeyValueStore;

/// Store key for a media id.
pub fn history_key(media_id: &str) -> String {
    format!("lastWatched_{}", media_id)
}

/// Last watched episode for `media_id`, if a readable one is stored.
pub fn load_last_watched<S: KeyValueStore + ?Sized>(store: &S, media_id: &str) -> Option<EpisodeRef> {
    let key = history_key(media_id);
    match store.get(&key) {
        Ok(Some(value)) => match serde_json::from_str::<EpisodeRef>(&value) {
            Ok(episode) if episode.season > 0 && episode.episode > 0 => Some(episode),
            Ok(_) => None,
            Err(e) => {
                tracing::debug!("Ignoring unreadable {}: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}

/// Remember `episode` as the last watched one for `media_id`.
pub fn save_last_watched<S: KeyValueStore + ?Sized>(store: &mut S, media_id: &str, episode: EpisodeRef) {
    let key = history_key(media_id);
    let result = serde_json::to_string(&episode)
        .map_err(crate::Error::from)
        .and_then(|value| store.set(&key, &value));

    if let Err(e) = result {
        tracing::warn!("Failed to save {}: {}", key, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::store::MemoryStore;

    #[test]
    fn test_save_and_load() {
        let mut store = MemoryStore::new();
        assert!(load_last_watched(&store, "1399").is_none());

        save_last_watched(&mut store, "1399", EpisodeRef::new(3, 7));
        assert_eq!(load_last_watched(&store, "1399"), Some(EpisodeRef::new(3, 7)));
        assert_eq!(
            store.get("lastWatched_1399").unwrap().as_deref(),
            Some(r#"{"season":3,"episode":7}"#)
        );
    }

    #[test]
    fn test_corrupt_value_is_ignored() {
        let mut store = MemoryStore::new();
        store.set("lastWatched_1", "{not json").unwrap();
        assert!(load_last_watched(&store, "1").is_none());

        store.set("lastWatched_2", r#"{"season":0,"episode":4}"#).unwrap();
        assert!(load_last_watched(&store, "2").is_none());
    }
}
