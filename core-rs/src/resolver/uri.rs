//! qname to URI resolution with scheme priority

use super::prefix::PrefixResolver;
use super::qname::{QName, DEFAULT_DELIMITER};
use crate::config::UnregisteredAction;
use crate::diagnostics::Diagnostic;
use crate::errors::{RegistryError, Result};
use crate::parser::{RegistryEntry, UriScheme, BIO2RDF_BASE};

/// `http://bio2rdf.org/<qname>`, taken as given
pub fn bio2rdf_uri(qname: &str) -> String {
    format!("{}{}", BIO2RDF_BASE, qname)
}

/// Builds URIs for qnames from the per-namespace scheme templates
pub struct UriResolver<'a> {
    prefixes: PrefixResolver<'a>,
    priority: &'a [UriScheme],
    default_namespaces: &'a [String],
}

/// A qname whose prefix went through resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedQName {
    pub qname: QName,
    /// Whether the prefix is canonical, as opposed to the unresolved input
    pub resolved: bool,
}

impl<'a> UriResolver<'a> {
    pub fn new(
        prefixes: PrefixResolver<'a>,
        priority: &'a [UriScheme],
        default_namespaces: &'a [String],
    ) -> Self {
        Self {
            prefixes,
            priority,
            default_namespaces,
        }
    }

    /// Parse `qname` and swap its prefix for the canonical one when known
    pub fn map(&self, qname: &str, delimiter: &str) -> Result<MappedQName> {
        let parsed = QName::parse_with(qname, delimiter);
        match self.prefixes.resolve_preferred(&parsed.prefix)? {
            Some(preferred) => Ok(MappedQName {
                qname: parsed.with_prefix(preferred),
                resolved: true,
            }),
            None => Ok(MappedQName {
                qname: parsed,
                resolved: false,
            }),
        }
    }

    /// `ko:K00001` -> `kegg:K00001`; the input prefix is kept when unresolved
    pub fn map_qname(&self, qname: &str, delimiter: &str) -> Result<String> {
        Ok(self.map(qname, delimiter)?.qname.to_string())
    }

    /// Fully-qualified URI for `qname`
    ///
    /// Order of precedence:
    /// 1. namespaces in the default-scheme list use their provider URI
    /// 2. an explicitly requested scheme
    /// 3. the first scheme in priority order the namespace supports
    /// 4. `None` under [`UnregisteredAction::Fail`], else the bio2rdf URI
    pub fn resolve_uri(&self, qname: &str, scheme: Option<UriScheme>) -> Result<Option<String>> {
        let mapped = self.map(qname, DEFAULT_DELIMITER)?.qname;
        let ns = mapped.prefix.as_str();
        let id = mapped.identifier();
        let entry = self.prefixes.index().get(ns);

        if self.default_namespaces.iter().any(|d| d == ns) {
            let base = required_scheme(entry, ns, UriScheme::Original)?;
            return Ok(Some(format!("{}{}", base, id)));
        }

        if let Some(scheme) = scheme {
            let base = required_scheme(entry, ns, scheme)?;
            return Ok(Some(format!("{}{}", base, id)));
        }

        let preferred = entry.and_then(|e| {
            self.priority
                .iter()
                .find_map(|scheme| e.scheme(*scheme))
        });
        if let Some(base) = preferred {
            return Ok(Some(format!("{}{}", base, id)));
        }

        if self.prefixes.action() == UnregisteredAction::Fail {
            self.prefixes.sink().report(Diagnostic::NoUri {
                qname: mapped.to_string(),
            });
            return Ok(None);
        }

        Ok(Some(bio2rdf_uri(&mapped.to_string())))
    }

    /// identifiers.org URI when the namespace carries the cross-reference
    pub fn identifiers_org_uri(&self, qname: &str) -> Result<Option<String>> {
        let mapped = self.map(qname, DEFAULT_DELIMITER)?.qname;
        Ok(self
            .prefixes
            .index()
            .get(&mapped.prefix)
            .and_then(|e| e.scheme(UriScheme::IdentifiersOrg))
            .map(|base| format!("{}{}", base, mapped.identifier())))
    }
}

fn required_scheme<'e>(entry: Option<&'e RegistryEntry>, ns: &str, scheme: UriScheme) -> Result<&'e str> {
    entry
        .and_then(|e| e.scheme(scheme))
        .ok_or_else(|| RegistryError::MissingScheme {
            namespace: ns.to_string(),
            scheme: scheme.to_string(),
        })
}
