//! CLI command implementations.

pub mod guide;
pub mod play;
pub mod providers;
pub mod resolve;

use crate::utils::store::{FileStore, KeyValueStore, MemoryStore};
use std::path::Path;

/// Open the state file, falling back to an in-memory store when it cannot
/// be read.
pub fn open_store(path: &Path, ephemeral: bool) -> Box<dyn KeyValueStore> {
    if ephemeral {
        return Box::new(MemoryStore::new());
    }
    match FileStore::open(path) {
        Ok(store) => {
            tracing::debug!("Using state file {}", store.path().display());
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("Using in-memory state, {} is unusable: {}", path.display(), e);
            Box::new(MemoryStore::new())
        }
    }
}
