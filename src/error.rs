use std::path::PathBuf;
use thiserror::Error;

/// Failures while acquiring the checklist document.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("failed to fetch {url}: unexpected status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to parse YAML from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },
}
