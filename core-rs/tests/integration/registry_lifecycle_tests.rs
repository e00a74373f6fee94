//! Integration tests for the complete registry lifecycle
//!
//! Tests the full path from remote CSV to resolved URIs:
//! - Download into an empty cache
//! - Parsing and lazy initialization
//! - Prefix, qname and URI resolution
//! - No-match diagnostics and unregistered-namespace actions

use nsreg_core::{
    CollectingSink, Diagnostic, Registry, RegistryConfig, RegistryError, RegistryFetcher,
    UnregisteredAction, UriScheme,
};
use std::cell::Cell;
use std::fs;
use std::rc::Rc;
use tempfile::TempDir;

const REGISTRY_CSV: &str = "\
Preferred Prefix,Alt-prefix,Provider Base URI,Alternative Base URI,MIRIAM,BioPortal Ontology ID,thedatahub,Abbreviation,Title,Description,PubMed ID,Organization
kegg,\"ko(KEGG Orthology),KEGG-Pathway\",,,,,,KEGG,Kyoto Encyclopedia of Genes and Genomes,,,Kanehisa Laboratories
go,\"GO,gene ontology\",http://purl.obolibrary.org/obo/GO_,,MIR:00000022,,,GO,Gene Ontology
ncbigene,\"geneid,NCBI_Gene\",http://www.ncbi.nlm.nih.gov/gene/,\"http://identifiers.org/ncbigene/,http://www.ncbi.nlm.nih.gov/entrez/gene/\",MIR:00000069
pubchem,,,,MIR:00000034
rdf,,http://www.w3.org/1999/02/22-rdf-syntax-ns#,,
rdfs,,http://www.w3.org/2000/01/rdf-schema#,,
owl,,http://www.w3.org/2002/07/owl#,,
xsd,,http://www.w3.org/2001/XMLSchema#,,
";

/// Serves a fixed body and counts requests
struct StaticFetcher {
    body: &'static str,
    calls: Rc<Cell<usize>>,
}

impl RegistryFetcher for StaticFetcher {
    fn fetch(&self, _url: &str) -> nsreg_core::Result<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.body.to_string())
    }
}

fn registry_in(temp_dir: &TempDir) -> (Registry, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let fetcher = StaticFetcher {
        body: REGISTRY_CSV,
        calls: calls.clone(),
    };

    let mut config = RegistryConfig::default();
    config.set_remote_url("https://registry.example.org/registry.csv").unwrap();
    config.set_local_dir(temp_dir.path().join("cache")).unwrap();

    (Registry::new(config).with_fetcher(Box::new(fetcher)), calls)
}

#[test]
fn test_complete_registry_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let (registry, calls) = registry_in(&temp_dir);

    // 1. Nothing happens until the first query
    assert!(!registry.is_initialized());
    assert_eq!(calls.get(), 0);

    // 2. First query downloads and parses
    assert!(registry.is_prefix("kegg").unwrap());
    assert_eq!(calls.get(), 1);
    assert_eq!(
        fs::read_to_string(registry.local_registry_path()).unwrap(),
        REGISTRY_CSV
    );

    // 3. Later queries reuse the snapshot
    assert_eq!(registry.preferred_prefix("ko").unwrap(), Some("kegg".to_string()));
    assert_eq!(registry.map_qname("GeneID:1017").unwrap(), "ncbigene:1017");
    assert_eq!(calls.get(), 1);

    // 4. Entry details pass through untouched
    let kegg = registry.entry("kegg").unwrap();
    assert_eq!(kegg.title(), Some("Kyoto Encyclopedia of Genes and Genomes"));
    assert_eq!(kegg.organization(), Some("Kanehisa Laboratories"));
    assert_eq!(kegg.alternate_prefixes, vec!["ko".to_string(), "KEGG-Pathway".to_string()]);
}

#[test]
fn test_second_registry_uses_fresh_cache() {
    let temp_dir = TempDir::new().unwrap();

    let (first, first_calls) = registry_in(&temp_dir);
    first.initialize().unwrap();
    assert_eq!(first_calls.get(), 1);

    let (second, second_calls) = registry_in(&temp_dir);
    assert!(second.is_prefix("go").unwrap());
    assert_eq!(second_calls.get(), 0);
}

#[test]
fn test_scenario_kegg_orthology() {
    let temp_dir = TempDir::new().unwrap();
    let (registry, _) = registry_in(&temp_dir);

    assert_eq!(registry.preferred_prefix("ko").unwrap(), Some("kegg".to_string()));
    assert_eq!(
        registry.fq_uri("ko:K00001", None).unwrap().as_deref(),
        Some("http://bio2rdf.org/kegg:K00001")
    );
    assert_eq!(
        registry.mapped_bio2rdf_uri("ko:K00001").unwrap(),
        "http://bio2rdf.org/kegg:K00001"
    );
    assert_eq!(registry.bio2rdf_uri("ko:K00001"), "http://bio2rdf.org/ko:K00001");
}

#[test]
fn test_scenario_rdf_always_uses_provider_uri() {
    let temp_dir = TempDir::new().unwrap();
    let (mut registry, _) = registry_in(&temp_dir);

    assert_eq!(
        registry.fq_uri("rdf:type", None).unwrap().as_deref(),
        Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    );

    registry.set_uri_scheme_priority(vec![UriScheme::Bio2Rdf, UriScheme::Original]);
    assert_eq!(
        registry.fq_uri("rdf:type", None).unwrap().as_deref(),
        Some("http://www.w3.org/1999/02/22-rdf-syntax-ns#type")
    );
    assert_eq!(
        registry.fq_uri("owl:Class", None).unwrap().as_deref(),
        Some("http://www.w3.org/2002/07/owl#Class")
    );

    // not in the default list: priority applies
    assert_eq!(
        registry.fq_uri("go:0008150", None).unwrap().as_deref(),
        Some("http://bio2rdf.org/go:0008150")
    );
}

#[test]
fn test_scenario_unknown_prefix_continues() {
    let temp_dir = TempDir::new().unwrap();
    let sink = CollectingSink::new();
    let (registry, _) = registry_in(&temp_dir);
    let registry = registry.with_sink(Box::new(sink.clone()));

    assert_eq!(registry.map_qname("zzz:123").unwrap(), "zzz:123");
    assert_eq!(registry.no_match_list().get("zzz"), Some(&1));

    assert_eq!(registry.map_qname("zzz:456").unwrap(), "zzz:456");
    assert_eq!(registry.no_match_list().get("zzz"), Some(&2));

    assert_eq!(
        registry.fq_uri("zzz:123", None).unwrap().as_deref(),
        Some("http://bio2rdf.org/zzz:123")
    );

    // warned once, counted every time
    assert_eq!(
        sink.reports(),
        vec![Diagnostic::UnmappedPrefix { prefix: "zzz".to_string() }]
    );
    assert_eq!(registry.no_match_list().get("zzz"), Some(&3));
}

#[test]
fn test_die_action_stops_resolution() {
    let temp_dir = TempDir::new().unwrap();
    let (mut registry, _) = registry_in(&temp_dir);
    registry.set_unregistered_action(UnregisteredAction::Die);

    assert!(matches!(
        registry.map_qname("zzz:123"),
        Err(RegistryError::UnresolvedNamespace(ref p)) if p == "zzz"
    ));
    assert!(matches!(
        registry.fq_uri("zzz:123", None),
        Err(RegistryError::UnresolvedNamespace(_))
    ));

    // the registry itself stays usable
    assert_eq!(registry.map_qname("ko:K00001").unwrap(), "kegg:K00001");
}

#[test]
fn test_fail_action_yields_no_uri() {
    let temp_dir = TempDir::new().unwrap();
    let (mut registry, _) = registry_in(&temp_dir);
    registry.set_unregistered_action(UnregisteredAction::Fail);

    assert_eq!(registry.fq_uri("zzz:123", None).unwrap(), None);
    assert_eq!(registry.map_qname("zzz:123").unwrap(), "zzz:123");
    assert_eq!(
        registry.fq_uri("ko:K00001", None).unwrap().as_deref(),
        Some("http://bio2rdf.org/kegg:K00001")
    );
}

#[test]
fn test_explicit_schemes() {
    let temp_dir = TempDir::new().unwrap();
    let (registry, _) = registry_in(&temp_dir);

    assert_eq!(
        registry.fq_uri("NCBI_Gene:1017", Some(UriScheme::Bio2Rdf)).unwrap().as_deref(),
        Some("http://bio2rdf.org/ncbigene:1017")
    );
    assert_eq!(
        registry.fq_uri("geneid:1017", Some(UriScheme::IdentifiersOrg)).unwrap().as_deref(),
        Some("http://identifiers.org/1017")
    );
    assert!(matches!(
        registry.fq_uri("ko:K00001", Some(UriScheme::IdentifiersOrg)),
        Err(RegistryError::MissingScheme { .. })
    ));
}

#[test]
fn test_synthetic_namespaces_resolve() {
    let temp_dir = TempDir::new().unwrap();
    let (registry, _) = registry_in(&temp_dir);

    assert!(registry.is_prefix("kegg_vocabulary").unwrap());
    assert_eq!(
        registry.fq_uri("kegg_vocabulary:Pathway", None).unwrap().as_deref(),
        Some("http://bio2rdf.org/kegg_vocabulary:Pathway")
    );
    assert_eq!(
        registry.fq_uri("go_resource:abc", None).unwrap().as_deref(),
        Some("http://bio2rdf.org/go_resource:abc")
    );
}

#[test]
fn test_alternate_uris_resolve_to_prefix() {
    let temp_dir = TempDir::new().unwrap();
    let (registry, _) = registry_in(&temp_dir);

    assert_eq!(
        registry.prefix_for_uri("http://www.ncbi.nlm.nih.gov/entrez/gene/").unwrap(),
        Some("ncbigene")
    );
    assert_eq!(
        registry.preferred_prefix("http://identifiers.org/ncbigene/").unwrap(),
        Some("ncbigene".to_string())
    );
}

#[test]
fn test_file_url_remote() {
    let temp_dir = TempDir::new().unwrap();
    let remote = temp_dir.path().join("published.csv");
    fs::write(&remote, REGISTRY_CSV).unwrap();

    let mut registry = Registry::default();
    registry
        .set_remote_url(&format!("file://{}", remote.display()))
        .unwrap()
        .set_local_registry_dir(temp_dir.path().join("cache"))
        .unwrap();

    assert_eq!(registry.preferred_prefix("Gene Ontology").unwrap(), Some("go".to_string()));
    assert!(registry.local_registry_path().exists());
}

#[test]
fn test_settings_file_drives_registry() {
    let temp_dir = TempDir::new().unwrap();
    let remote = temp_dir.path().join("published.csv");
    fs::write(&remote, REGISTRY_CSV).unwrap();

    let settings = temp_dir.path().join("nsreg.yaml");
    fs::write(
        &settings,
        format!(
            "remoteUrl: file://{}\nlocalDir: {}\nunregisteredNsAction: fail\nuriSchemePriority: [identifiers.org, bio2rdf]\n",
            remote.display(),
            temp_dir.path().join("cache").display()
        ),
    )
    .unwrap();

    let registry = Registry::new(RegistryConfig::load(&settings).unwrap());

    assert_eq!(
        registry.fq_uri("go:0008150", None).unwrap().as_deref(),
        Some("http://identifiers.org/0008150")
    );
    assert_eq!(registry.fq_uri("nope:1", None).unwrap(), None);
}
