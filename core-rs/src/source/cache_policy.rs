//! Freshness of the locally cached registry
//!
//! The only signal is the calendar date of the cache file's modification
//! time. No content hash or ETag is consulted.

use crate::errors::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// State of the cache file relative to the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// No cached copy
    Missing,
    /// Cache time 0: the copy is never refreshed, however old
    Frozen { age_days: i64 },
    Stale { age_days: i64 },
    Fresh { age_days: i64 },
}

impl Freshness {
    pub fn needs_fetch(&self) -> bool {
        matches!(self, Freshness::Missing | Freshness::Stale { .. })
    }
}

/// Whole days between two dates, direction ignored
pub fn age_in_days(modified: NaiveDate, today: NaiveDate) -> i64 {
    (today - modified).num_days().abs()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    cache_time_days: u32,
}

impl CachePolicy {
    pub fn new(cache_time_days: u32) -> Self {
        Self { cache_time_days }
    }

    pub fn cache_time_days(&self) -> u32 {
        self.cache_time_days
    }

    /// Decide from the cache file's modification date (None: no file)
    pub fn decide(&self, modified: Option<NaiveDate>, today: NaiveDate) -> Freshness {
        let Some(modified) = modified else {
            return Freshness::Missing;
        };

        let age_days = age_in_days(modified, today);
        if self.cache_time_days == 0 {
            Freshness::Frozen { age_days }
        } else if age_days >= i64::from(self.cache_time_days) {
            Freshness::Stale { age_days }
        } else {
            Freshness::Fresh { age_days }
        }
    }

    /// Decide for the file at `path` against today's local date
    pub fn check(&self, path: &Path) -> Result<Freshness> {
        let today = Local::now().date_naive();
        Ok(self.decide(modified_date(path)?, today))
    }
}

/// Local calendar date of the file's mtime, None when the file does not exist
pub fn modified_date(path: &Path) -> Result<Option<NaiveDate>> {
    match fs::metadata(path) {
        Ok(metadata) => {
            let modified: DateTime<Local> = metadata.modified()?.into();
            Ok(Some(modified.date_naive()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
