//! Registry facade
//!
//! Owns the configuration, builds the registry snapshot on first use and
//! answers prefix and URI queries against it.
//!
//! A `Registry` is single-threaded (`!Sync`): initialization is guarded by an
//! unsynchronized once-cell and the no-match log by a `RefCell`.

use crate::config::{RegistryConfig, UnregisteredAction};
use crate::diagnostics::{DiagnosticSink, NoMatchLog, TracingSink};
use crate::errors::{RegistryError, Result};
use crate::parser::{RegistryEntry, RegistryIndex, RegistryParser, UriScheme};
use crate::resolver::{self, PrefixResolver, UriResolver, DEFAULT_DELIMITER};
use crate::source::{FetchOutcome, HttpFetcher, RegistryFetcher, RegistrySource};
use once_cell::unsync::OnceCell;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub struct Registry {
    config: RegistryConfig,
    /// None: a blocking HTTP fetcher is built from the config when needed
    fetcher: Option<Box<dyn RegistryFetcher>>,
    sink: Box<dyn DiagnosticSink>,
    snapshot: OnceCell<RegistryIndex>,
    no_match: RefCell<NoMatchLog>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl Registry {
    pub fn new(config: RegistryConfig) -> Self {
        Registry {
            config,
            fetcher: None,
            sink: Box::new(TracingSink),
            snapshot: OnceCell::new(),
            no_match: RefCell::new(NoMatchLog::new()),
        }
    }

    /// Registry over an already parsed index; nothing is fetched or read
    pub fn from_index(config: RegistryConfig, index: RegistryIndex) -> Self {
        let mut registry = Self::new(config);
        registry.snapshot = OnceCell::with_value(index);
        registry
    }

    /// Use `fetcher` instead of the HTTP client for downloads
    pub fn with_fetcher(mut self, fetcher: Box<dyn RegistryFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Send resolution diagnostics to `sink` instead of `tracing`
    pub fn with_sink(mut self, sink: Box<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    // ---------------------------------------------------------------
    // lifecycle
    // ---------------------------------------------------------------

    /// Fetch (if the cache is stale) and parse the registry, once
    ///
    /// Later calls return the same snapshot until [`reset`](Self::reset).
    pub fn initialize(&self) -> Result<&RegistryIndex> {
        self.snapshot.get_or_try_init(|| self.load())
    }

    pub fn is_initialized(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// Drop the snapshot so the next query fetches and parses again
    pub fn reset(&mut self) {
        self.snapshot.take();
    }

    fn load(&self) -> Result<RegistryIndex> {
        self.config.validate()?;
        let path = self.config.local_registry_path();
        self.with_source(|source| {
            source.ensure_fresh(&path, &self.config.remote_url, self.config.cache_time_days)
        })?;
        debug!(path = %path.display(), "parsing registry");
        RegistryParser::parse_file(&path)
    }

    /// Bring the cache file up to date without parsing it
    pub fn refresh(&self) -> Result<FetchOutcome> {
        self.config.validate()?;
        let path = self.config.local_registry_path();
        self.with_source(|source| {
            source.ensure_fresh(&path, &self.config.remote_url, self.config.cache_time_days)
        })
    }

    /// Download the remote registry regardless of cache age
    pub fn download(&self) -> Result<usize> {
        self.config.validate()?;
        let path = self.config.local_registry_path();
        self.with_source(|source| source.download(&path, &self.config.remote_url))
    }

    fn with_source<T>(&self, run: impl FnOnce(&RegistrySource<'_>) -> Result<T>) -> Result<T> {
        match &self.fetcher {
            Some(fetcher) => run(&RegistrySource::new(fetcher.as_ref())),
            None => {
                let http = HttpFetcher::new(Duration::from_secs(self.config.http_timeout_secs))?;
                run(&RegistrySource::new(&http))
            }
        }
    }

    fn prefix_resolver(&self) -> Result<PrefixResolver<'_>> {
        let index = self.initialize()?;
        Ok(PrefixResolver::new(
            index,
            self.config.unregistered_ns_action,
            &self.no_match,
            self.sink.as_ref(),
        ))
    }

    fn uri_resolver(&self) -> Result<UriResolver<'_>> {
        Ok(UriResolver::new(
            self.prefix_resolver()?,
            &self.config.uri_scheme_priority,
            &self.config.default_uri_schemes,
        ))
    }

    // ---------------------------------------------------------------
    // queries
    // ---------------------------------------------------------------

    /// Whether `prefix` is a canonical key, as typed
    pub fn is_prefix(&self, prefix: &str) -> Result<bool> {
        Ok(self.prefix_resolver()?.is_known_prefix(prefix))
    }

    /// Canonical prefix for any known spelling, `None` when unknown
    pub fn preferred_prefix(&self, prefix: &str) -> Result<Option<String>> {
        self.prefix_resolver()?.resolve_preferred(prefix)
    }

    /// `ko:K00001` -> `kegg:K00001`
    pub fn map_qname(&self, qname: &str) -> Result<String> {
        self.map_qname_with(qname, DEFAULT_DELIMITER)
    }

    pub fn map_qname_with(&self, qname: &str, delimiter: &str) -> Result<String> {
        self.uri_resolver()?.map_qname(qname, delimiter)
    }

    /// Fully-qualified URI; `scheme` forces one scheme instead of the priority order
    ///
    /// `Ok(None)` only under [`UnregisteredAction::Fail`].
    pub fn fq_uri(&self, qname: &str, scheme: Option<UriScheme>) -> Result<Option<String>> {
        self.uri_resolver()?.resolve_uri(qname, scheme)
    }

    /// `http://bio2rdf.org/<qname>` without resolving anything
    pub fn bio2rdf_uri(&self, qname: &str) -> String {
        resolver::bio2rdf_uri(qname)
    }

    /// `http://bio2rdf.org/<mapped qname>`
    pub fn mapped_bio2rdf_uri(&self, qname: &str) -> Result<String> {
        Ok(resolver::bio2rdf_uri(&self.map_qname(qname)?))
    }

    pub fn identifiers_org_uri(&self, qname: &str) -> Result<Option<String>> {
        self.uri_resolver()?.identifiers_org_uri(qname)
    }

    /// Entry for a canonical prefix
    pub fn entry(&self, prefix: &str) -> Result<&RegistryEntry> {
        self.initialize()?
            .get(prefix)
            .ok_or_else(|| RegistryError::UnknownPrefix(prefix.to_string()))
    }

    /// Canonical prefix owning a provider or alternate base URI
    pub fn prefix_for_uri(&self, uri: &str) -> Result<Option<&str>> {
        Ok(self.initialize()?.prefix_for_uri(uri.trim()))
    }

    // ---------------------------------------------------------------
    // configuration
    // ---------------------------------------------------------------

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    pub fn set_remote_url(&mut self, url: &str) -> Result<&mut Self> {
        self.config.set_remote_url(url)?;
        Ok(self)
    }

    pub fn remote_url(&self) -> &str {
        &self.config.remote_url
    }

    pub fn set_local_registry_dir<P: Into<PathBuf>>(&mut self, dir: P) -> Result<&mut Self> {
        self.config.set_local_dir(dir)?;
        Ok(self)
    }

    pub fn local_registry_path(&self) -> PathBuf {
        self.config.local_registry_path()
    }

    pub fn local_registry_dir(&self) -> &Path {
        &self.config.local_dir
    }

    /// Days a cached copy is used before refreshing; 0 never refreshes
    pub fn set_cache_time(&mut self, days: u32) -> &mut Self {
        self.config.cache_time_days = days;
        self
    }

    pub fn cache_time(&self) -> u32 {
        self.config.cache_time_days
    }

    pub fn set_unregistered_action(&mut self, action: UnregisteredAction) -> &mut Self {
        self.config.unregistered_ns_action = action;
        self
    }

    pub fn unregistered_action(&self) -> UnregisteredAction {
        self.config.unregistered_ns_action
    }

    pub fn set_uri_scheme_priority(&mut self, schemes: Vec<UriScheme>) -> &mut Self {
        self.config.uri_scheme_priority = schemes;
        self
    }

    pub fn uri_scheme_priority(&self) -> &[UriScheme] {
        &self.config.uri_scheme_priority
    }

    /// Replace the namespaces that always use their provider URI
    pub fn set_default_uri_schemes(&mut self, namespaces: Vec<String>) -> &mut Self {
        self.config.default_uri_schemes = namespaces;
        self
    }

    pub fn add_default_uri_scheme(&mut self, namespace: &str) -> &mut Self {
        if !self.config.default_uri_schemes.iter().any(|ns| ns == namespace) {
            self.config.default_uri_schemes.push(namespace.to_string());
        }
        self
    }

    pub fn default_uri_schemes(&self) -> &[String] {
        &self.config.default_uri_schemes
    }

    // ---------------------------------------------------------------
    // diagnostics
    // ---------------------------------------------------------------

    /// Unresolved prefixes and how often each was asked for
    pub fn no_match_list(&self) -> BTreeMap<String, u64> {
        self.no_match.borrow().counts().clone()
    }

    pub fn clear_no_match_list(&self) {
        self.no_match.borrow_mut().clear();
    }

    pub fn no_match_notices(&self) -> Vec<String> {
        self.no_match.borrow().notices()
    }

    /// Write one NOTICE line per unresolved prefix to `out`
    pub fn print_no_match_list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for notice in self.no_match_notices() {
            writeln!(out, "{}", notice)?;
        }
        Ok(())
    }
}
