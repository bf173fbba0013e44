use std::path::Path;

use globset::GlobBuilder;
use ignore::WalkBuilder;
use path_slash::PathExt;
use thiserror::Error;

use crate::classify::normalize_lexically;

#[derive(Debug, Error)]
pub enum GlobResolveError {
    #[error("invalid glob pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

// Glob-expansion collaborator: given a pattern and a base directory, return
// the matching paths relative to that directory, spelled the way the import
// would spell them. Injectable so hosts and tests can substitute their own.
pub trait GlobResolver: Send + Sync {
    fn resolve(&self, pattern: &str, base_dir: &Path) -> Result<Vec<String>, GlobResolveError>;
}

#[derive(Debug, Default)]
pub struct FsGlobResolver;

impl GlobResolver for FsGlobResolver {
    fn resolve(&self, pattern: &str, base_dir: &Path) -> Result<Vec<String>, GlobResolveError> {
        let (prefix, trimmed) = split_parent_prefix(strip_current_dir(pattern));
        let walk_root = if prefix.is_empty() {
            base_dir.to_path_buf()
        } else {
            normalize_lexically(&base_dir.join(&prefix))
        };
        let flattened = flatten_inner_recursion(trimmed);
        let matcher = GlobBuilder::new(&flattened)
            .literal_separator(true)
            .build()
            .map_err(|source| GlobResolveError::Pattern {
                pattern: pattern.to_string(),
                source,
            })?
            .compile_matcher();
        if !walk_root.is_dir() {
            return Ok(vec![]);
        }

        let mut spellings = WalkBuilder::new(&walk_root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .build()
            .filter_map(|result| result.ok())
            .map(|entry| entry.into_path())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let rel = path.strip_prefix(&walk_root).ok()?.to_slash_lossy();
                matcher
                    .is_match(rel.as_ref())
                    .then(|| format!("{prefix}{rel}"))
            })
            .collect::<Vec<_>>();
        spellings.sort();
        Ok(spellings)
    }
}

fn strip_current_dir(pattern: &str) -> &str {
    let mut rest = pattern;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    rest
}

// globset rejects `**` glued to literal text; JS glob engines read such a
// `**` as a single `*`. Derived patterns hit this whenever an interpolation
// sits mid-segment, so the matcher follows the JS reading.
fn flatten_inner_recursion(pattern: &str) -> String {
    pattern
        .split('/')
        .map(|segment| {
            if segment == "**" || !segment.contains("**") {
                segment.to_string()
            } else {
                segment.replace("**", "*")
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

// `../`-leading patterns walk from the parent directory but keep the prefix
// on the returned spelling, so emitted imports still point outside the base.
fn split_parent_prefix(pattern: &str) -> (String, &str) {
    let mut prefix = String::new();
    let mut rest = pattern;
    while let Some(stripped) = rest.strip_prefix("../") {
        prefix.push_str("../");
        rest = stripped;
    }
    (prefix, rest)
}
