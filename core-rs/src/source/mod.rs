//! Source module for the registry CSV
//!
//! Decides whether the locally cached registry is still fresh and downloads
//! the remote copy when it is not.

pub mod cache_policy;
pub mod fetcher;
pub mod registry_source;

pub use cache_policy::{age_in_days, CachePolicy, Freshness};
pub use fetcher::{HttpFetcher, RegistryFetcher};
pub use registry_source::{FetchOutcome, RegistrySource};
