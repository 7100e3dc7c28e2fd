use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Registry returned {status} for {url}: check that the repository path exists")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid registry URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported registry type: {0}")]
    UnsupportedKind(String),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Nothing under the prefix produced a version. `listed` is the number of
    /// items the registry returned before any filtering.
    #[error("no versions found for {prefix}")]
    NoVersionsFound { prefix: String, listed: usize },

    /// Versions exist under the prefix but none contains the filter.
    #[error("no version {filter} found for {prefix}")]
    NoMatchingVersion {
        filter: String,
        prefix: String,
        available: usize,
    },
}

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("Failed to read patterns file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write patterns file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse patterns file: {0}")]
    Parse(#[from] toml::de::Error),
}
