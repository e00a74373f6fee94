//! Resolution diagnostics
//!
//! Lookups that cannot be mapped are reported to a [`DiagnosticSink`] instead
//! of being printed. The registry defaults to [`TracingSink`];
//! [`CollectingSink`] keeps them in memory for callers that want to inspect
//! them afterwards.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// Something worth telling the caller about during resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// First occurrence of a prefix with no canonical or alias mapping
    UnmappedPrefix { prefix: String },
    /// No scheme produced a URI for the qname
    NoUri { qname: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnmappedPrefix { prefix } => write!(f, "Unable to map {}", prefix),
            Diagnostic::NoUri { qname } => write!(f, "Unable to find a uri for {}", qname),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: Diagnostic);
}

/// Forwards diagnostics to `tracing` at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
    }
}

/// Keeps every diagnostic; clones share the same buffer
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    reports: Rc<RefCell<Vec<Diagnostic>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> Vec<Diagnostic> {
        self.reports.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.reports.borrow_mut().clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.reports.borrow_mut().push(diagnostic);
    }
}

/// Occurrence counts of raw prefixes that could not be resolved
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NoMatchLog {
    counts: BTreeMap<String, u64>,
}

impl NoMatchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more miss; returns the updated count
    pub fn record(&mut self, prefix: &str) -> u64 {
        let count = self.counts.entry(prefix.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn count(&self, prefix: &str) -> u64 {
        self.counts.get(prefix).copied().unwrap_or(0)
    }

    pub fn counts(&self) -> &BTreeMap<String, u64> {
        &self.counts
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// One NOTICE line per unresolved prefix
    pub fn notices(&self) -> Vec<String> {
        self.counts
            .iter()
            .map(|(prefix, n)| {
                format!(
                    "NOTICE: Unable to find namespace {} in registry: {} occurrences",
                    prefix, n
                )
            })
            .collect()
    }
}
