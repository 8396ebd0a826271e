use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use super::loader::{load_or_report, LoadOutcome};

// ---------------------------------------------------------------------------
// Single-entry load memo
// ---------------------------------------------------------------------------

/// Remembers the last load outcome, keyed by path.
///
/// The loader runs under the lock, so concurrent first accesses read the file
/// exactly once. Failed loads are cached as well and their message replays.
#[derive(Default)]
pub struct DatasetCache {
    entry: Mutex<Option<(PathBuf, Arc<LoadOutcome>)>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached outcome for `path`, running `loader` on a miss.
    pub fn get_or_load<F>(&self, path: &Path, loader: F) -> Arc<LoadOutcome>
    where
        F: FnOnce(&Path) -> LoadOutcome,
    {
        let mut entry = self.entry.lock().unwrap_or_else(|p| p.into_inner());
        if let Some((cached_path, outcome)) = entry.as_ref() {
            if cached_path == path {
                return Arc::clone(outcome);
            }
        }
        let outcome = Arc::new(loader(path));
        *entry = Some((path.to_path_buf(), Arc::clone(&outcome)));
        outcome
    }
}

/// Process-wide cache, alive until the process exits.
pub fn global() -> &'static DatasetCache {
    static CACHE: OnceLock<DatasetCache> = OnceLock::new();
    CACHE.get_or_init(DatasetCache::new)
}

/// Load `path` through the process-wide cache.
pub fn load_cached(path: &Path) -> Arc<LoadOutcome> {
    global().get_or_load(path, load_or_report)
}
