use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormationError {
    #[error("cannot read formation file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid formation document: {0}")]
    Json(#[from] serde_json::Error),
}
