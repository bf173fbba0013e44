use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DynimportError {
    #[error("invalid plugin options: {message}")]
    Config { message: String },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
