/**
 * settings.rs
 * Registry settings, loadable from a YAML file
 *
 * Format:
 * ```yaml
 * remoteUrl: https://example.org/registry.csv
 * localDir: /var/cache/nsreg
 * localFile: registry.csv
 * cacheTimeDays: 1
 * unregisteredNsAction: continue
 * uriSchemePriority: [original, bio2rdf, identifiers.org]
 * defaultUriSchemes: [xsd, rdf, rdfs, owl, void, dc]
 * httpTimeoutSecs: 60
 * ```
 *
 * Every key is optional; missing keys take the defaults below.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::{RegistryError, Result};
use crate::parser::UriScheme;

/// Published registry spreadsheet, CSV export
pub const DEFAULT_REMOTE_URL: &str = "https://docs.google.com/spreadsheet/pub?key=0AmzqhEUDpIPvdFR0UFhDUTZJdnNYdnJwdHdvNVlJR1E&single=true&gid=0&output=csv";

pub const DEFAULT_LOCAL_FILE: &str = "registry.csv";

pub const DEFAULT_CACHE_TIME_DAYS: u32 = 1;

pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// Namespaces that always resolve through their provider URI
pub const DEFAULT_URI_SCHEME_NAMESPACES: [&str; 6] = ["xsd", "rdf", "rdfs", "owl", "void", "dc"];

pub const ENV_REMOTE_URL: &str = "NSREG_REMOTE_URL";
pub const ENV_CACHE_DIR: &str = "NSREG_CACHE_DIR";
pub const ENV_CACHE_DAYS: &str = "NSREG_CACHE_DAYS";

/// What to do when a prefix is not in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnregisteredAction {
    /// Record the miss and carry on with the input / a bio2rdf URI
    #[default]
    Continue,
    /// Abort on the first unresolved prefix
    Die,
    /// Return no URI when no scheme applies
    Fail,
}

impl UnregisteredAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnregisteredAction::Continue => "continue",
            UnregisteredAction::Die => "die",
            UnregisteredAction::Fail => "fail",
        }
    }
}

impl fmt::Display for UnregisteredAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnregisteredAction {
    type Err = RegistryError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "continue" => Ok(UnregisteredAction::Continue),
            "die" => Ok(UnregisteredAction::Die),
            "fail" => Ok(UnregisteredAction::Fail),
            _ => Err(RegistryError::UnknownAction(s.to_string())),
        }
    }
}

/// Registry settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Where the registry CSV is downloaded from (http(s):// or file://)
    pub remote_url: String,
    /// Directory holding the cached copy
    pub local_dir: PathBuf,
    /// File name of the cached copy inside `local_dir`
    pub local_file: String,
    /// Days a cached copy stays fresh; 0 never refreshes an existing copy
    pub cache_time_days: u32,
    pub unregistered_ns_action: UnregisteredAction,
    pub uri_scheme_priority: Vec<UriScheme>,
    pub default_uri_schemes: Vec<String>,
    pub http_timeout_secs: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            remote_url: DEFAULT_REMOTE_URL.to_string(),
            local_dir: PathBuf::from("."),
            local_file: DEFAULT_LOCAL_FILE.to_string(),
            cache_time_days: DEFAULT_CACHE_TIME_DAYS,
            unregistered_ns_action: UnregisteredAction::Continue,
            uri_scheme_priority: UriScheme::ALL.to_vec(),
            default_uri_schemes: DEFAULT_URI_SCHEME_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl RegistryConfig {
    /// Load settings from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| {
            RegistryError::InvalidConfig(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: RegistryConfig = serde_yaml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    /// Save settings as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path.as_ref(), yaml)?;
        Ok(())
    }

    /// Reject settings the registry cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.remote_url.trim().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "null or empty remote registry URL".to_string(),
            ));
        }

        if self.local_dir.as_os_str().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "null or empty local registry file location".to_string(),
            ));
        }

        if self.local_file.trim().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "localFile cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Override settings from `NSREG_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var(ENV_REMOTE_URL) {
            self.set_remote_url(&url)?;
        }
        if let Ok(dir) = std::env::var(ENV_CACHE_DIR) {
            self.set_local_dir(dir)?;
        }
        if let Ok(days) = std::env::var(ENV_CACHE_DAYS) {
            self.cache_time_days = days.trim().parse().map_err(|_| {
                RegistryError::InvalidConfig(format!("{} is not a day count: {}", ENV_CACHE_DAYS, days))
            })?;
        }
        Ok(())
    }

    pub fn set_remote_url(&mut self, url: &str) -> Result<()> {
        if url.trim().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "null or empty remote registry URL".to_string(),
            ));
        }
        self.remote_url = url.trim().to_string();
        Ok(())
    }

    pub fn set_local_dir<P: Into<PathBuf>>(&mut self, dir: P) -> Result<()> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(RegistryError::InvalidConfig(
                "null or empty local registry file location".to_string(),
            ));
        }
        self.local_dir = dir;
        Ok(())
    }

    /// Full path of the cached registry file
    pub fn local_registry_path(&self) -> PathBuf {
        self.local_dir.join(&self.local_file)
    }

    /// Replace the scheme priority from textual names
    pub fn set_scheme_priority_names<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        self.uri_scheme_priority = names
            .iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<UriScheme>>>()?;
        Ok(())
    }
}
