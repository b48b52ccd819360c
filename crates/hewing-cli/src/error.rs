use std::path::PathBuf;

use hewing_net::NetError;
use hewing_rules::loader::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path}: {source}")]
    Load { path: PathBuf, source: LoadError },
    #[error("invalid station config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error(transparent)]
    Net(#[from] NetError),
    #[error("station rejected {0}")]
    Rejected(String),
}
