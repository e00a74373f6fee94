/**
 * parser module
 *
 * - columns: fixed spreadsheet column layout
 * - entry: registry entry record and URI schemes
 * - index: entry, alias and URI lookup tables
 * - registry_parser: CSV -> RegistryIndex
 */

pub mod columns;
pub mod entry;
pub mod index;
pub mod registry_parser;

pub use entry::{EntryKind, RegistryEntry, UriScheme, BIO2RDF_BASE, IDENTIFIERS_ORG_BASE};
pub use index::RegistryIndex;
pub use registry_parser::RegistryParser;
