//! Keeps the local registry copy in line with the remote one
//!
//! There is no file locking: two processes refreshing the same cache file
//! at once may interleave their writes.

use super::cache_policy::{CachePolicy, Freshness};
use super::fetcher::RegistryFetcher;
use crate::errors::{RegistryError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// What `ensure_fresh` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The remote registry was written to the cache path
    Downloaded { bytes: usize, freshness: Freshness },
    /// The cached copy was kept
    Skipped(Freshness),
}

impl FetchOutcome {
    pub fn downloaded(&self) -> bool {
        matches!(self, FetchOutcome::Downloaded { .. })
    }
}

pub struct RegistrySource<'f> {
    fetcher: &'f dyn RegistryFetcher,
}

impl<'f> RegistrySource<'f> {
    pub fn new(fetcher: &'f dyn RegistryFetcher) -> Self {
        Self { fetcher }
    }

    /// Download the registry unless the cached copy is fresh enough
    pub fn ensure_fresh(&self, local_path: &Path, remote_url: &str, cache_time_days: u32) -> Result<FetchOutcome> {
        let freshness = CachePolicy::new(cache_time_days).check(local_path)?;

        match freshness {
            Freshness::Missing => warn!(path = %local_path.display(), "no local copy of registry"),
            Freshness::Frozen { age_days } => warn!(
                age_days,
                "registry cache time is 0, keeping local copy without update"
            ),
            Freshness::Stale { age_days } => info!(age_days, "registry is set to be updated"),
            Freshness::Fresh { age_days } => info!(age_days, "registry is up to date"),
        }

        if !freshness.needs_fetch() {
            return Ok(FetchOutcome::Skipped(freshness));
        }

        let bytes = self.download(local_path, remote_url)?;
        Ok(FetchOutcome::Downloaded { bytes, freshness })
    }

    /// Download unconditionally; returns the number of bytes written
    pub fn download(&self, local_path: &Path, remote_url: &str) -> Result<usize> {
        info!(url = remote_url, "downloading dataset registry");
        let body = self.fetcher.fetch(remote_url)?;
        write_atomically(local_path, body.as_bytes())?;
        info!(path = %local_path.display(), bytes = body.len(), "download complete");
        Ok(body.len())
    }
}

/// Write next to `path`, then rename over it
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let failure = |e: std::io::Error| RegistryError::CacheWriteFailure {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(failure)?;
    }

    let partial = partial_path(path);
    fs::write(&partial, contents).map_err(failure)?;
    fs::rename(&partial, path).map_err(|e| {
        let _ = fs::remove_file(&partial);
        failure(e)
    })
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".part");
    path.with_file_name(name)
}
