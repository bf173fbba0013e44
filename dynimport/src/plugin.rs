use std::path::{Path, PathBuf};
use std::sync::Arc;

use path_slash::PathExt;
use serde::{Deserialize, Serialize};

use crate::cache::TransformCache;
use crate::error::DynimportError;
use crate::glob_resolve::{FsGlobResolver, GlobResolver};
use crate::options::{DynimportOptions, PluginConfig};
use crate::rewrite::rewrite_dynamic_imports;

pub const PLUGIN_NAME: &str = "dynimport";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnLoadArgs {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnLoadResult {
    pub contents: String,
    pub loader: String,
}

pub struct DynimportPlugin {
    config: PluginConfig,
    cache: TransformCache,
    resolver: Arc<dyn GlobResolver>,
}

// Manual impl: `resolver` is a trait object without a `Debug` bound.
impl std::fmt::Debug for DynimportPlugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynimportPlugin")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl DynimportPlugin {
    pub fn new(options: DynimportOptions) -> Result<Self, DynimportError> {
        Self::with_resolver(options, Arc::new(FsGlobResolver))
    }

    pub fn with_resolver(
        options: DynimportOptions,
        resolver: Arc<dyn GlobResolver>,
    ) -> Result<Self, DynimportError> {
        Ok(Self {
            config: PluginConfig::from_options(&options)?,
            cache: TransformCache::new(),
            resolver,
        })
    }

    // Host-side registration test: does this plugin want the load request?
    pub fn wants(&self, path: &Path) -> bool {
        self.config.filter.is_match(path.to_slash_lossy().as_ref())
    }

    pub fn load(&self, args: &OnLoadArgs) -> Result<OnLoadResult, DynimportError> {
        let path = dunce::canonicalize(&args.path).unwrap_or_else(|_| args.path.clone());
        let contents = std::fs::read_to_string(&path).map_err(|source| DynimportError::Io {
            path: path.clone(),
            source,
        })?;
        if let Some(hit) = self.cache.get_if_fresh(&path, &contents) {
            return Ok(hit);
        }

        let source_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let rewritten =
            rewrite_dynamic_imports(&contents, source_dir, &self.config, self.resolver.as_ref());
        let output = OnLoadResult {
            contents: rewritten,
            loader: self.loader_for(&path),
        };
        self.cache.store(path, contents, output.clone());
        Ok(output)
    }

    pub fn cached_paths(&self) -> usize {
        self.cache.len()
    }

    fn loader_for(&self, path: &Path) -> String {
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json {
            "json".to_string()
        } else {
            self.config.loader.clone()
        }
    }
}
