//! One-time provider usage guides.
//!
//! Some providers come with an instructional overlay. Once acknowledged it
//! stays hidden for 30 days; the acknowledgement time is stored as epoch
//! milliseconds under the provider's guide key.

use crate::utils::store::KeyValueStore;

/// How long an acknowledgement suppresses the guide.
pub const GUIDE_SUPPRESSION_MS: i64 = 30 * 24 * 60 * 60 * 1000;

/// Whether the guide stored under `key` should be shown at `now_ms`.
///
/// Missing or unreadable acknowledgements show the guide.
pub fn should_show_guide<S: KeyValueStore + ?Sized>(store: &S, key: &str, now_ms: i64) -> bool {
    let stored = match store.get(key) {
        Ok(Some(value)) => value,
        Ok(None) => return true,
        Err(e) => {
            tracing::warn!("Failed to read guide state {}: {}", key, e);
            return true;
        }
    };

    match stored.trim().parse::<i64>() {
        Ok(acknowledged_at) => now_ms
            .checked_sub(acknowledged_at)
            .map_or(true, |elapsed| elapsed > GUIDE_SUPPRESSION_MS),
        Err(_) => true,
    }
}

/// Record that the guide under `key` was acknowledged at `now_ms`.
///
/// Storage failures are logged and otherwise ignored.
pub fn acknowledge_guide<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, now_ms: i64) {
    if let Err(e) = store.set(key, &now_ms.to_string()) {
        tracing::warn!("Failed to save guide state {}: {}", key, e);
    }
}
