use std::fs;
use std::path::{Path, PathBuf};

// Shared helper for the integration tests: lay a fixture file down under a
// temp root, creating parent directories on the way.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create fixture parent directories");
    }
    fs::write(&path, contents).expect("write fixture file");
    path
}
