//! # nsreg Core - namespace registry
//!
//! Resolves short, human-typed namespace prefixes (`ko`, `GI`, `NCBI_Gene`)
//! to canonical prefixes and fully-qualified URIs, using a tabular registry of
//! datasets and ontologies that is downloaded, cached locally and parsed once
//! per process.
//!
//! ## Pipeline
//!
//! ```text
//!  remote CSV ──fetch──▶ local cache ──parse──▶ RegistryIndex
//!  (RegistrySource, freshness by mtime)         entries + alias map + URI index
//!                                                        │
//!                     PrefixResolver ◀───────────────────┤
//!                     UriResolver    ◀───────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use nsreg_core::{Registry, RegistryConfig, RegistryParser};
//!
//! let csv = "Preferred Prefix,Alt-prefix,Provider Base URI\nkegg,ko(KEGG Orthology),\n";
//! let registry = Registry::from_index(RegistryConfig::default(), RegistryParser::parse(csv).unwrap());
//!
//! assert_eq!(registry.preferred_prefix("KO").unwrap().as_deref(), Some("kegg"));
//! assert_eq!(registry.map_qname("ko:K00001").unwrap(), "kegg:K00001");
//! assert_eq!(
//!     registry.fq_uri("ko:K00001", None).unwrap().as_deref(),
//!     Some("http://bio2rdf.org/kegg:K00001")
//! );
//! ```

pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod parser;
pub mod registry;
pub mod resolver;
pub mod source;

pub use config::{RegistryConfig, UnregisteredAction};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, NoMatchLog, TracingSink};
pub use errors::{RegistryError, Result};
pub use parser::{EntryKind, RegistryEntry, RegistryIndex, RegistryParser, UriScheme};
pub use registry::Registry;
pub use resolver::{normalize_prefix, PrefixResolver, QName, UriResolver};
pub use source::{CachePolicy, FetchOutcome, Freshness, HttpFetcher, RegistryFetcher, RegistrySource};

/// Crate version, used in the HTTP user agent
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
