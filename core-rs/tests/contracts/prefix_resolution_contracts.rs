// Prefix Resolution Contract Tests
//
// Canonical prefixes end up in published URIs. Any change to how a spelling
// maps to its canonical prefix changes identifiers in already-converted data.

use nsreg_core::{normalize_prefix, Registry, RegistryConfig, RegistryParser, UnregisteredAction};

const REGISTRY: &str = "\
Preferred Prefix,Alt-prefix,Provider Base URI,Alternative Base URI,MIRIAM
kegg,\"ko(KEGG Orthology),KEGG-Pathway\",,,
ko,,http://example.org/ko/,,
ncbigene,\"geneid,NCBI_Gene,GI\",http://www.ncbi.nlm.nih.gov/gene/,http://identifiers.org/ncbigene/,MIR:00000069
NCBI_Taxon,taxon,http://purl.obolibrary.org/obo/NCBITaxon_,,
";

fn registry(action: UnregisteredAction) -> Registry {
    let mut config = RegistryConfig::default();
    config.unregistered_ns_action = action;
    Registry::from_index(config, RegistryParser::parse(REGISTRY).unwrap())
}

/// INVARIANT: normalize(normalize(p)) == normalize(p)
/// BREAKS: alias lookups for prefixes stored in normalized form
#[test]
fn normalization_is_idempotent() {
    for raw in ["ko", "KO", " NCBI_Gene ", "KEGG-Pathway", "uni.prot:kb", "Ωmega42", "", "___"] {
        let once = normalize_prefix(raw);
        assert_eq!(normalize_prefix(&once), once, "normalize not idempotent for {:?}", raw);
        assert!(
            once.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()),
            "normalized {:?} contains characters outside [a-z0-9]: {:?}",
            raw,
            once
        );
    }
}

/// INVARIANT: an exact canonical key wins over any alias claiming the same spelling
/// BREAKS: `ko` namespace would silently become `kegg`
#[test]
fn exact_key_precedes_alias() {
    let registry = registry(UnregisteredAction::Continue);

    assert_eq!(registry.preferred_prefix("ko").unwrap().as_deref(), Some("ko"));
    assert_eq!(registry.map_qname("ko:K00001").unwrap(), "ko:K00001");

    // other spellings still reach kegg
    assert_eq!(registry.preferred_prefix("KEGG-Pathway").unwrap().as_deref(), Some("kegg"));
}

/// INVARIANT: every synonym resolves to the canonical prefix, whatever its case or punctuation
/// BREAKS: mixed-case input (`GI`, `NCBI_Gene`) producing unmapped qnames
#[test]
fn synonyms_resolve_to_canonical() {
    let registry = registry(UnregisteredAction::Die);

    for spelling in ["geneid", "GeneID", "NCBI_Gene", "ncbi-gene", "GI", " gi "] {
        assert_eq!(
            registry.preferred_prefix(spelling).unwrap().as_deref(),
            Some("ncbigene"),
            "{:?} did not resolve",
            spelling
        );
    }
}

/// INVARIANT: canonical prefixes keep their registry spelling
/// BREAKS: URIs built for namespaces registered in mixed case
#[test]
fn canonical_spelling_preserved() {
    let registry = registry(UnregisteredAction::Continue);

    assert_eq!(registry.preferred_prefix("ncbitaxon").unwrap().as_deref(), Some("NCBI_Taxon"));
    assert_eq!(registry.preferred_prefix("TAXON").unwrap().as_deref(), Some("NCBI_Taxon"));
    assert!(registry.is_prefix("NCBI_Taxon").unwrap());
    assert!(!registry.is_prefix("ncbi_taxon").unwrap());
}

/// INVARIANT: an unmapped qname comes back unchanged and is counted, never dropped
/// BREAKS: data loss under the default `continue` action
#[test]
fn unmapped_qname_passes_through() {
    let registry = registry(UnregisteredAction::Continue);

    assert_eq!(registry.map_qname("nowhere:42").unwrap(), "nowhere:42");
    assert_eq!(registry.map_qname("nowhere").unwrap(), "nowhere:");
    assert_eq!(registry.no_match_list().get("nowhere"), Some(&2));
}

/// INVARIANT: the identifier part of a qname is never altered by mapping
/// BREAKS: case-sensitive identifiers (`K00001`, `P12345`)
#[test]
fn identifier_untouched_by_mapping() {
    let registry = registry(UnregisteredAction::Continue);

    for (input, expected) in [
        ("geneid:ABC-def_1", "ncbigene:ABC-def_1"),
        ("GI:12:34", "ncbigene:12:34"),
        ("taxon:9606", "NCBI_Taxon:9606"),
    ] {
        assert_eq!(registry.map_qname(input).unwrap(), expected);
    }
}
