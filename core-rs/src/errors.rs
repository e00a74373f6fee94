//! Error types for the namespace registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Unable to fetch remote registry {url}: {reason}")]
    FetchFailure { url: String, reason: String },

    #[error("Unable to save local registry file {path}: {reason}")]
    CacheWriteFailure { path: String, reason: String },

    #[error("Unable to parse registry {path}: {reason}")]
    ParseFailure { path: String, reason: String },

    #[error("Unable to map namespace: {0}")]
    UnresolvedNamespace(String),

    #[error("No {scheme} URI for namespace: {namespace}")]
    MissingScheme { namespace: String, scheme: String },

    #[error("Prefix not in registry: {0}")]
    UnknownPrefix(String),

    #[error("Unknown URI scheme: {0}")]
    UnknownScheme(String),

    #[error("Unknown unregistered namespace action: {0}")]
    UnknownAction(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl RegistryError {
    /// Whether the registry itself is unusable after this error
    ///
    /// Fetch, cache and parse failures leave no registry to resolve against;
    /// every other variant is local to a single lookup.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RegistryError::FetchFailure { .. }
                | RegistryError::CacheWriteFailure { .. }
                | RegistryError::ParseFailure { .. }
                | RegistryError::UnresolvedNamespace(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
