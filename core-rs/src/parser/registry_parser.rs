//! CSV registry parser
//!
//! Turns the registry spreadsheet export into a [`RegistryIndex`]:
//! - one [`RegistryEntry`] per row plus `_vocabulary` / `_resource` siblings
//! - alias map: normalized prefix and synonyms -> canonical prefix
//! - URI index: provider and alternate base URIs -> canonical prefix

use super::columns::{
    ALTERNATE_PREFIX, ALTERNATE_URI, COLUMNS, DESCRIPTIVE_COLUMNS, MIRIAM, PREFERRED_PREFIX,
    PROVIDER_URI,
};
use super::entry::{EntryKind, RegistryEntry, UriScheme, BIO2RDF_BASE, IDENTIFIERS_ORG_BASE};
use super::index::RegistryIndex;
use crate::errors::{RegistryError, Result};
use crate::resolver::normalize_prefix;
use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Parenthetical annotation on a synonym, e.g. `ko(KEGG Orthology)`
static ANNOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)?").unwrap());

pub struct RegistryParser;

impl RegistryParser {
    /// Parse registry CSV held in memory
    pub fn parse(raw: &str) -> Result<RegistryIndex> {
        Self::parse_reader(raw.as_bytes(), "<memory>")
    }

    /// Parse the locally cached registry file
    pub fn parse_file(path: &Path) -> Result<RegistryIndex> {
        let file = File::open(path).map_err(|e| RegistryError::ParseFailure {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse_reader(file, &path.display().to_string())
    }

    /// Parse registry CSV from any reader; `origin` names the source in errors
    pub fn parse_reader<R: Read>(reader: R, origin: &str) -> Result<RegistryIndex> {
        let mut csv = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut index = RegistryIndex::new();
        let mut rows = 0usize;

        for record in csv.records() {
            let record = record.map_err(|e| RegistryError::ParseFailure {
                path: origin.to_string(),
                reason: e.to_string(),
            })?;
            if Self::add_row(&mut index, &record) {
                rows += 1;
            }
        }

        info!(
            origin,
            rows,
            entries = index.len(),
            aliases = index.alias_count(),
            "parsed registry"
        );
        Ok(index)
    }

    /// Add one spreadsheet row; returns false when the row has no prefix
    fn add_row(index: &mut RegistryIndex, record: &StringRecord) -> bool {
        let column = |i: usize| record.get(i).unwrap_or("");

        let prefix = column(PREFERRED_PREFIX).trim();
        if prefix.is_empty() {
            debug!(position = ?record.position(), "skipping row without prefix");
            return false;
        }

        let fields: BTreeMap<String, String> = COLUMNS
            .iter()
            .take(DESCRIPTIVE_COLUMNS)
            .enumerate()
            .map(|(i, name)| (name.to_string(), column(i).to_string()))
            .collect();

        let provider_uri = non_empty(column(PROVIDER_URI));
        let identifiers_org_ref = non_empty(column(MIRIAM));
        let alternate_prefixes = split_synonyms(column(ALTERNATE_PREFIX));
        let alternate_uris = split_list(column(ALTERNATE_URI));

        let mut schemes = BTreeMap::new();
        if let Some(uri) = &provider_uri {
            schemes.insert(UriScheme::Original, uri.clone());
        }
        schemes.insert(UriScheme::Bio2Rdf, format!("{}{}:", BIO2RDF_BASE, prefix));
        if identifiers_org_ref.is_some() {
            schemes.insert(UriScheme::IdentifiersOrg, IDENTIFIERS_ORG_BASE.to_string());
        }

        index.insert(RegistryEntry {
            prefix: prefix.to_string(),
            kind: EntryKind::Dataset,
            alternate_prefixes: alternate_prefixes.clone(),
            provider_uri: provider_uri.clone(),
            alternate_uris: alternate_uris.clone(),
            identifiers_org_ref,
            fields,
            schemes,
        });
        index.merge_synthetic(prefix, EntryKind::Vocabulary);
        index.merge_synthetic(prefix, EntryKind::Resource);

        index.add_alias(normalize_prefix(prefix), prefix);
        for synonym in &alternate_prefixes {
            let normalized = normalize_prefix(synonym);
            if !normalized.is_empty() {
                index.add_alias(normalized, prefix);
            }
        }

        if let Some(uri) = provider_uri {
            index.add_uri(uri, prefix);
            for alt in alternate_uris {
                index.add_uri(alt, prefix);
            }
        }

        true
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Comma-separated cell, trimmed, blanks dropped
fn split_list(cell: &str) -> Vec<String> {
    cell.split(',').filter_map(non_empty).collect()
}

/// Synonym cell with annotations removed: `ko(KEGG Orthology), KO` -> `[ko, KO]`
fn split_synonyms(cell: &str) -> Vec<String> {
    cell.split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| non_empty(&ANNOTATION.replace_all(s, "")))
        .collect()
}
