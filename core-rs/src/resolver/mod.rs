/**
 * resolver module
 *
 * - prefix: prefix normalization and alias resolution
 * - qname: `prefix:identifier` parsing
 * - uri: URI construction with scheme priority
 */

pub mod prefix;
pub mod qname;
pub mod uri;

pub use prefix::{normalize_prefix, PrefixResolver};
pub use qname::{QName, DEFAULT_DELIMITER};
pub use uri::{bio2rdf_uri, MappedQName, UriResolver};
