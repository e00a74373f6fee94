//! Fixed column layout of the registry spreadsheet

/// Column names in spreadsheet order
pub const COLUMNS: [&str; 28] = [
    "preferredPrefix",  // [0] Preferred Prefix
    "alternatePrefix",  // [1] Alt-prefix
    "providerURI",      // [2] Provider Base URI
    "alternateURI",     // [3] Alternative Base URI
    "miriam",           // [4] MIRIAM
    "bioportal",        // [5] BioPortal Ontology ID
    "datahub",          // [6] thedatahub
    "abbreviation",     // [7] Abbreviation
    "title",            // [8] Title
    "description",      // [9] Description
    "pubmed",           // [10] PubMed ID
    "organization",     // [11] Organization
    "type",             // [12] warehouse, dataset or terminology
    "keywords",         // [13] Keywords
    "homepage",         // [14] Homepage
    "homepage_up",      // [15] homepage still available?
    "subnamespace",     // [16] sub-namespace in dataset
    "partOfCollection", // [17] part of collection
    "license",          // [18] License URL
    "licenseText",      // [19] License Text
    "rights",           // [20] Rights
    "id_regex",         // [21] ID regex
    "example_id",       // [22] ExampleID
    "html_template",    // [23] Provider HTML URL
    "empty",            // [24]
    "miriam_notes",     // [25] MIRIAM curator notes
    "miriam_coverage",  // [26] MIRIAM coverage
    "miriam_updates",   // [27] updates
];

/// Only the leading columns are copied into an entry's descriptive fields
pub const DESCRIPTIVE_COLUMNS: usize = 24;

pub const PREFERRED_PREFIX: usize = 0;
pub const ALTERNATE_PREFIX: usize = 1;
pub const PROVIDER_URI: usize = 2;
pub const ALTERNATE_URI: usize = 3;
pub const MIRIAM: usize = 4;

/// Column index for a column name
pub fn column_index(name: &str) -> Option<usize> {
    COLUMNS.iter().position(|c| *c == name)
}
