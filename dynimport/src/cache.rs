use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::plugin::OnLoadResult;

// Per-path transform cache, busted by content inequality rather than mtime.
// Lives for the plugin's lifetime; no eviction, no size bound.
#[derive(Debug, Default)]
pub struct TransformCache {
    entries: DashMap<PathBuf, CacheEntry>,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    contents: String,
    output: OnLoadResult,
}

impl TransformCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_if_fresh(&self, path: &Path, contents: &str) -> Option<OnLoadResult> {
        let entry = self.entries.get(path)?;
        (entry.contents == contents).then(|| entry.output.clone())
    }

    pub fn store(&self, path: PathBuf, contents: String, output: OnLoadResult) {
        self.entries.insert(path, CacheEntry { contents, output });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
