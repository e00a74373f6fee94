//! Prefix normalization and alias resolution

use crate::config::UnregisteredAction;
use crate::diagnostics::{Diagnostic, DiagnosticSink, NoMatchLog};
use crate::errors::{RegistryError, Result};
use crate::parser::RegistryIndex;
use std::cell::RefCell;

/// Lowercase, trim and drop everything outside `[a-z0-9]`
///
/// ```
/// use nsreg_core::resolver::normalize_prefix;
///
/// assert_eq!(normalize_prefix(" KEGG-Pathway "), "keggpathway");
/// assert_eq!(normalize_prefix("NCBI_Gene"), "ncbigene");
/// ```
pub fn normalize_prefix(prefix: &str) -> String {
    prefix
        .trim()
        .chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Resolves any known spelling of a prefix to its canonical form
pub struct PrefixResolver<'a> {
    index: &'a RegistryIndex,
    action: UnregisteredAction,
    no_match: &'a RefCell<NoMatchLog>,
    sink: &'a dyn DiagnosticSink,
}

impl<'a> PrefixResolver<'a> {
    pub fn new(
        index: &'a RegistryIndex,
        action: UnregisteredAction,
        no_match: &'a RefCell<NoMatchLog>,
        sink: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            index,
            action,
            no_match,
            sink,
        }
    }

    pub fn index(&self) -> &'a RegistryIndex {
        self.index
    }

    pub fn action(&self) -> UnregisteredAction {
        self.action
    }

    pub(crate) fn sink(&self) -> &'a dyn DiagnosticSink {
        self.sink
    }

    /// Exact canonical key, no normalization
    pub fn is_known_prefix(&self, prefix: &str) -> bool {
        self.index.contains(prefix)
    }

    /// Canonical prefix for `prefix` without recording misses
    ///
    /// Exact key first, then the normalized alias map, then the base-URI index.
    pub fn lookup(&self, prefix: &str) -> Option<&'a str> {
        if let Some(entry) = self.index.get(prefix) {
            return Some(entry.prefix.as_str());
        }

        self.index
            .alias(&normalize_prefix(prefix))
            .or_else(|| self.index.prefix_for_uri(prefix.trim()))
    }

    /// Canonical prefix for `prefix`
    ///
    /// A miss is counted in the no-match log (reported to the sink the first
    /// time) and yields `Ok(None)`, or `UnresolvedNamespace` under
    /// [`UnregisteredAction::Die`].
    pub fn resolve_preferred(&self, prefix: &str) -> Result<Option<String>> {
        if let Some(preferred) = self.lookup(prefix) {
            return Ok(Some(preferred.to_string()));
        }

        let occurrences = self.no_match.borrow_mut().record(prefix);
        if occurrences == 1 {
            self.sink.report(Diagnostic::UnmappedPrefix {
                prefix: prefix.to_string(),
            });
        }

        if self.action == UnregisteredAction::Die {
            return Err(RegistryError::UnresolvedNamespace(prefix.to_string()));
        }

        Ok(None)
    }
}
