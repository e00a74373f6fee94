//! Contract Tests - Resolution Invariants
//!
//! This file aggregates all contract test modules.
//! Contract tests pin down behavior that downstream RDF converters rely on:
//! a change here silently rewrites every URI they emit.

// Contract test modules
mod contracts {
    // Prefix normalization and alias resolution
    mod prefix_resolution {
        include!("prefix_resolution_contracts.rs");
    }

    // URI scheme selection
    mod uri_scheme {
        include!("uri_scheme_contracts.rs");
    }
}
