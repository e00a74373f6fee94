//! Registry entry record and the URI schemes derived for it

use crate::errors::RegistryError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Base of the uniform bio2rdf URI space
pub const BIO2RDF_BASE: &str = "http://bio2rdf.org/";

/// Base of the identifiers.org resolver
///
/// The collection path segment is not part of the template, so these URIs are
/// best-effort only.
pub const IDENTIFIERS_ORG_BASE: &str = "http://identifiers.org/";

/// Named URI-construction strategy for a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UriScheme {
    /// Provider base URI
    #[serde(rename = "original")]
    Original,
    /// `http://bio2rdf.org/<prefix>:`
    #[serde(rename = "bio2rdf")]
    Bio2Rdf,
    /// `http://identifiers.org/`
    #[serde(rename = "identifiers.org")]
    IdentifiersOrg,
}

impl UriScheme {
    pub const ALL: [UriScheme; 3] = [UriScheme::Original, UriScheme::Bio2Rdf, UriScheme::IdentifiersOrg];

    pub fn as_str(&self) -> &'static str {
        match self {
            UriScheme::Original => "original",
            UriScheme::Bio2Rdf => "bio2rdf",
            UriScheme::IdentifiersOrg => "identifiers.org",
        }
    }
}

impl fmt::Display for UriScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UriScheme {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        UriScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RegistryError::UnknownScheme(s.to_string()))
    }
}

/// Where an entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A real registry row
    Dataset,
    /// Synthetic `<prefix>_vocabulary` namespace
    Vocabulary,
    /// Synthetic `<prefix>_resource` namespace
    Resource,
}

impl EntryKind {
    /// Suffix appended to the owning prefix for synthetic entries
    pub fn suffix(&self) -> Option<&'static str> {
        match self {
            EntryKind::Dataset => None,
            EntryKind::Vocabulary => Some("_vocabulary"),
            EntryKind::Resource => Some("_resource"),
        }
    }
}

/// One namespace of the registry, keyed by its preferred prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub prefix: String,
    pub kind: EntryKind,
    pub alternate_prefixes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_uri: Option<String>,
    pub alternate_uris: Vec<String>,
    /// identifiers.org (MIRIAM) cross-reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifiers_org_ref: Option<String>,
    /// Descriptive columns by column name, passed through untouched
    pub fields: BTreeMap<String, String>,
    pub schemes: BTreeMap<UriScheme, String>,
}

impl RegistryEntry {
    /// A synthetic sibling namespace (`kegg_vocabulary`, `kegg_resource`)
    pub fn synthetic(owner: &str, kind: EntryKind) -> Self {
        let prefix = format!("{}{}", owner, kind.suffix().unwrap_or_default());
        let mut entry = RegistryEntry {
            prefix,
            kind,
            alternate_prefixes: Vec::new(),
            provider_uri: None,
            alternate_uris: Vec::new(),
            identifiers_org_ref: None,
            fields: BTreeMap::new(),
            schemes: BTreeMap::new(),
        };
        entry.set_bio2rdf_scheme();
        entry
    }

    pub fn set_bio2rdf_scheme(&mut self) {
        let uri = format!("{}{}:", BIO2RDF_BASE, self.prefix);
        self.schemes.insert(UriScheme::Bio2Rdf, uri);
    }

    /// URI template for `scheme`, if the entry supports it
    pub fn scheme(&self, scheme: UriScheme) -> Option<&str> {
        self.schemes.get(&scheme).map(String::as_str)
    }

    pub fn has_scheme(&self, scheme: UriScheme) -> bool {
        self.schemes.contains_key(&scheme)
    }

    /// Descriptive column by name (`title`, `license`, ...); empty values read as absent
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.field("description")
    }

    pub fn organization(&self) -> Option<&str> {
        self.field("organization")
    }

    pub fn license(&self) -> Option<&str> {
        self.field("license")
    }

    pub fn homepage(&self) -> Option<&str> {
        self.field("homepage")
    }

    pub fn is_synthetic(&self) -> bool {
        self.kind != EntryKind::Dataset
    }
}
