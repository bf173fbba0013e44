use std::path::{Component, Path, PathBuf};

use once_cell::sync::Lazy;
use path_slash::PathExt;
use regex::Regex;

use crate::options::PluginConfig;

pub static INTERPOLATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$\{[^}]*\}").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    // Splice the call argument with a template literal of this absolute path;
    // the call itself stays a real dynamic import.
    RewriteAbsolute { absolute: String },
    // Queue for glob resolution and module-map synthesis.
    GlobTransform,
    Keep,
}

pub fn classify(destination: &str, source_dir: &Path, config: &PluginConfig) -> Classification {
    let extension = extension_of(destination);
    let absolute = is_absolute_path(destination);
    match extension.as_deref() {
        Some(".json") => Classification::RewriteAbsolute {
            absolute: absolutize(destination, source_dir),
        },
        Some(".js") if config.change_relative_to_absolute && !absolute => {
            Classification::RewriteAbsolute {
                absolute: absolutize(destination, source_dir),
            }
        }
        Some(ext)
            if config.transform_extensions.iter().any(|t| t == ext)
                && INTERPOLATION_RE.is_match(destination) =>
        {
            Classification::GlobTransform
        }
        _ => Classification::Keep,
    }
}

// Extension of the final path component, dot-prefixed. `${...}` text counts
// as-is, so `./mod-${x}.js` reports `.js`.
pub fn extension_of(destination: &str) -> Option<String> {
    Path::new(destination)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}

pub fn is_absolute_path(destination: &str) -> bool {
    destination.starts_with('/') || Path::new(destination).is_absolute()
}

pub fn absolutize(destination: &str, source_dir: &Path) -> String {
    let joined = if is_absolute_path(destination) {
        PathBuf::from(destination)
    } else {
        source_dir.join(destination)
    };
    normalize_lexically(&joined).to_slash_lossy().to_string()
}

// Folds `.` and `..` without touching the filesystem; globbed targets may
// not exist yet and `${...}` segments never will.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let tail_is_parent = out
                    .components()
                    .next_back()
                    .is_some_and(|tail| tail == Component::ParentDir);
                if tail_is_parent {
                    out.push("..");
                } else if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
