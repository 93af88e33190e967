use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("cannot find package \"{identifier}\" in {}", search_root.display())]
    NotFound { identifier: String, search_root: PathBuf },
    #[error("{0}")]
    Tool(String),
    #[error("failed to run `{program}`: {source}")]
    Spawn { program: String, source: std::io::Error },
    #[error("invalid package metadata: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DepGraphError {
    #[error("failed to import {package}: {source}")]
    Resolution { package: String, source: ResolveError },

    #[error("{0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
