//! Integration tests for the assess() end-to-end pipeline.
//!
//! Uses a MockSource that replays canned lookup and record responses
//! without touching the network, so these tests run offline.

use async_trait::async_trait;
use chemrisk_core::assess;
use chemrisk_core::error::ChemriskError;
use chemrisk_core::identifier::IdentifierKind;
use chemrisk_core::model::{RiskTier, ScalarProperties};
use chemrisk_core::record::Section;
use chemrisk_core::source::{CompoundSource, SourceError};
use serde_json::json;
use std::sync::Mutex;

/// Canned outcome for one mock endpoint.
enum Reply<T> {
    Value(T),
    Status(u16),
    Malformed(&'static str),
    Transport,
}

impl<T: Clone> Reply<T> {
    fn produce(&self) -> Result<T, SourceError> {
        match self {
            Reply::Value(v) => Ok(v.clone()),
            Reply::Status(code) => Err(SourceError::Status(*code)),
            Reply::Malformed(detail) => Err(SourceError::Malformed(detail.to_string())),
            Reply::Transport => Err(transport_error()),
        }
    }
}

/// Builds a real reqwest error (invalid URL) without any network traffic.
fn transport_error() -> SourceError {
    let err = reqwest::Client::new()
        .get("http://")
        .build()
        .expect_err("empty-host URL must fail to build");
    SourceError::Transport(err)
}

struct MockSource {
    calls: Mutex<Vec<String>>,
    formula: Reply<Vec<u32>>,
    inchi: Reply<Vec<u32>>,
    inchikey: Reply<Vec<u32>>,
    name: Reply<Vec<u32>>,
    properties: Reply<ScalarProperties>,
    record: Reply<Vec<Section>>,
}

impl Default for MockSource {
    fn default() -> Self {
        MockSource {
            calls: Mutex::new(Vec::new()),
            formula: Reply::Value(vec![]),
            inchi: Reply::Value(vec![]),
            inchikey: Reply::Value(vec![]),
            name: Reply::Value(vec![]),
            properties: Reply::Value(ScalarProperties::default()),
            record: Reply::Value(vec![]),
        }
    }
}

impl MockSource {
    fn log(&self, entry: String) {
        self.calls.lock().unwrap().push(entry);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompoundSource for MockSource {
    async fn cids_by_formula(&self, formula: &str) -> Result<Vec<u32>, SourceError> {
        self.log(format!("formula:{formula}"));
        self.formula.produce()
    }

    async fn cids_by_inchi(&self, inchi: &str) -> Result<Vec<u32>, SourceError> {
        self.log(format!("inchi:{inchi}"));
        self.inchi.produce()
    }

    async fn cids_by_inchikey(&self, inchikey: &str) -> Result<Vec<u32>, SourceError> {
        self.log(format!("inchikey:{inchikey}"));
        self.inchikey.produce()
    }

    async fn cids_by_name(&self, name: &str) -> Result<Vec<u32>, SourceError> {
        self.log(format!("name:{name}"));
        self.name.produce()
    }

    async fn properties(&self, cid: u32) -> Result<ScalarProperties, SourceError> {
        self.log(format!("properties:{cid}"));
        self.properties.produce()
    }

    async fn full_record(&self, cid: u32) -> Result<Vec<Section>, SourceError> {
        self.log(format!("record:{cid}"));
        self.record.produce()
    }

    fn source_name(&self) -> &str {
        "mock"
    }
}

fn sections(value: serde_json::Value) -> Vec<Section> {
    serde_json::from_value(value).unwrap()
}

/// A record carrying GHS statements, a toxicity excerpt and naming data.
fn aspirin_like_record() -> Vec<Section> {
    sections(json!([
        {
            "TOCHeading": "Names and Identifiers",
            "Section": [
                {
                    "TOCHeading": "Computed Descriptors",
                    "Section": [
                        {
                            "TOCHeading": "IUPAC Name",
                            "Information": [
                                {"Value": {"StringWithMarkup": [{"String": "2-acetyloxybenzoic acid"}]}}
                            ]
                        }
                    ]
                },
                {
                    "TOCHeading": "Synonyms",
                    "Information": [
                        {"Value": {"StringWithMarkup": [{"String": "aspirin"}]}},
                        {"Value": {"StringWithMarkup": [{"String": "acetylsalicylic acid"}]}}
                    ]
                }
            ]
        },
        {
            "TOCHeading": "Safety and Hazards",
            "Section": [
                {
                    "TOCHeading": "GHS Classification",
                    "Section": [
                        {
                            "TOCHeading": "Signal Word",
                            "Information": [
                                {"Value": {"StringWithMarkup": [{"String": "Warning"}]}}
                            ]
                        },
                        {
                            "TOCHeading": "GHS Hazard Statements",
                            "Information": [
                                {"Value": {"StringWithMarkup": [
                                    {"String": "H302: Harmful if swallowed"},
                                    {"String": "H318: Causes serious eye damage"}
                                ]}}
                            ]
                        },
                        {
                            "TOCHeading": "Precautionary Statement Codes",
                            "Information": [
                                {"Value": {"StringWithMarkup": [{"String": "P264, P270, P301+P312"}]}}
                            ]
                        }
                    ]
                }
            ]
        },
        {
            "TOCHeading": "Toxicity",
            "Section": [
                {
                    "TOCHeading": "Non-Human Toxicity Excerpts",
                    "Information": [
                        {"Value": {"StringWithMarkup": [{"String": "LD50 Rat oral 200 mg/kg"}]}}
                    ]
                }
            ]
        }
    ]))
}

#[tokio::test]
async fn numeric_query_resolves_locally() {
    let source = MockSource {
        properties: Reply::Value(ScalarProperties {
            molecular_weight: Some(180.16),
            iupac_name: Some("2-acetyloxybenzoic acid".to_string()),
            inchi: Some("InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)".to_string()),
            molecular_formula: Some("C9H8O4".to_string()),
        }),
        record: Reply::Value(aspirin_like_record()),
        ..Default::default()
    };

    let result = assess("2244", &source).await.unwrap();

    assert_eq!(result.cid, 2244);
    assert_eq!(result.query_type, IdentifierKind::Cid);
    assert_eq!(result.compound_name, "2-acetyloxybenzoic acid");
    assert_eq!(
        result.record_url,
        "https://pubchem.ncbi.nlm.nih.gov/compound/2244"
    );
    // Numeric IDs validate locally; only the two data fetches hit the source.
    let calls = source.calls();
    assert!(calls.contains(&"properties:2244".to_string()));
    assert!(calls.contains(&"record:2244".to_string()));
    assert_eq!(calls.len(), 2);
}

#[tokio::test]
async fn formula_lookup_falls_back_to_name() {
    let source = MockSource {
        formula: Reply::Status(404),
        name: Reply::Value(vec![962]),
        record: Reply::Value(aspirin_like_record()),
        ..Default::default()
    };

    let result = assess("H2O", &source).await.unwrap();

    assert_eq!(result.cid, 962);
    assert_eq!(result.query_type, IdentifierKind::Formula);
    let calls = source.calls();
    assert_eq!(calls[0], "formula:H2O");
    assert_eq!(calls[1], "name:H2O");
}

#[tokio::test]
async fn unresolved_name_is_not_found() {
    let source = MockSource::default();

    let err = assess("definitely-not-a-compound", &source)
        .await
        .unwrap_err();

    match err {
        ChemriskError::NotFound { kind, query } => {
            assert_eq!(kind, IdentifierKind::Name);
            assert_eq!(query, "definitely-not-a-compound");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
    // No data fetches after a failed resolution.
    assert_eq!(source.calls(), vec!["name:definitely-not-a-compound"]);
}

#[tokio::test]
async fn hazard_evidence_flows_into_scoring() {
    let source = MockSource {
        name: Reply::Value(vec![2244]),
        record: Reply::Value(aspirin_like_record()),
        ..Default::default()
    };

    let result = assess("aspirin", &source).await.unwrap();

    assert_eq!(result.ghs.signal_word.as_deref(), Some("Warning"));
    assert_eq!(
        result.ghs.hazard_statements,
        vec!["H302: Harmful if swallowed", "H318: Causes serious eye damage"]
    );
    assert_eq!(
        result.ghs.precautionary_statements,
        vec!["P264", "P270", "P301+P312"]
    );
    assert_eq!(result.toxicity.animal_effects.len(), 1);
    assert_eq!(result.toxicity.ld50, vec!["LD50 Rat oral 200 mg/kg"]);
    // H302 + H318 = 14 health, +5 toxicity presence.
    assert_eq!(result.risk.score, 19);
    assert_eq!(result.risk.tier, RiskTier::Low);
    assert_eq!(result.synonyms, vec!["aspirin", "acetylsalicylic acid"]);
}

#[tokio::test]
async fn malformed_record_with_good_properties_degrades() {
    let source = MockSource {
        name: Reply::Value(vec![702]),
        properties: Reply::Value(ScalarProperties {
            molecular_weight: Some(46.07),
            iupac_name: Some("ethanol".to_string()),
            ..Default::default()
        }),
        record: Reply::Malformed("unexpected HTML body"),
        ..Default::default()
    };

    let result = assess("ethanol", &source).await.unwrap();

    assert_eq!(result.compound_name, "ethanol");
    assert!(result.ghs.hazard_statements.is_empty());
    assert_eq!(result.risk.tier, RiskTier::Unknown);
}

#[tokio::test]
async fn empty_properties_and_failed_record_is_unavailable() {
    let source = MockSource {
        name: Reply::Value(vec![702]),
        properties: Reply::Status(500),
        record: Reply::Status(503),
        ..Default::default()
    };

    let err = assess("ethanol", &source).await.unwrap_err();
    assert!(matches!(err, ChemriskError::Unavailable { .. }));
}

#[tokio::test]
async fn empty_properties_and_malformed_record_is_malformed() {
    let source = MockSource {
        name: Reply::Value(vec![702]),
        properties: Reply::Status(404),
        record: Reply::Malformed("truncated JSON"),
        ..Default::default()
    };

    let err = assess("ethanol", &source).await.unwrap_err();
    match err {
        ChemriskError::MalformedData { cid, .. } => assert_eq!(cid, 702),
        other => panic!("expected MalformedData, got {other:?}"),
    }
}

#[tokio::test]
async fn property_transport_survived_by_record_evidence() {
    let source = MockSource {
        name: Reply::Value(vec![2244]),
        properties: Reply::Transport,
        record: Reply::Value(aspirin_like_record()),
        ..Default::default()
    };

    let result = assess("aspirin", &source).await.unwrap();

    // Properties are empty apart from the folded-in IUPAC fallback.
    assert_eq!(
        result.properties.iupac_name.as_deref(),
        Some("2-acetyloxybenzoic acid")
    );
    assert!(result.properties.molecular_weight.is_none());
    assert_eq!(result.compound_name, "2-acetyloxybenzoic acid");
    assert!(!result.ghs.hazard_statements.is_empty());
}

#[tokio::test]
async fn property_transport_with_empty_record_escalates() {
    let source = MockSource {
        name: Reply::Value(vec![2244]),
        properties: Reply::Transport,
        record: Reply::Value(vec![]),
        ..Default::default()
    };

    let err = assess("aspirin", &source).await.unwrap_err();
    match err {
        ChemriskError::Transport { cid, .. } => assert_eq!(cid, 2244),
        other => panic!("expected Transport, got {other:?}"),
    }
}

#[tokio::test]
async fn property_transport_and_failed_record_is_unavailable() {
    let source = MockSource {
        name: Reply::Value(vec![2244]),
        properties: Reply::Transport,
        record: Reply::Status(500),
        ..Default::default()
    };

    let err = assess("aspirin", &source).await.unwrap_err();
    assert!(matches!(err, ChemriskError::Unavailable { .. }));
}

#[tokio::test]
async fn display_name_falls_back_to_synonym_then_placeholder() {
    let with_synonyms = MockSource {
        name: Reply::Value(vec![31200]),
        record: Reply::Value(sections(json!([
            {
                "TOCHeading": "Names and Identifiers",
                "Section": [
                    {
                        "TOCHeading": "Synonyms",
                        "Information": [
                            {"Value": {"StringWithMarkup": [{"String": "limonene"}]}}
                        ]
                    }
                ]
            }
        ]))),
        ..Default::default()
    };
    let result = assess("limonene", &with_synonyms).await.unwrap();
    assert_eq!(result.compound_name, "limonene");

    let bare = MockSource {
        name: Reply::Value(vec![31200]),
        properties: Reply::Value(ScalarProperties {
            molecular_weight: Some(136.23),
            ..Default::default()
        }),
        ..Default::default()
    };
    let result = assess("limonene", &bare).await.unwrap();
    assert_eq!(result.compound_name, "Compound CID 31200");
}

#[tokio::test]
async fn inchi_query_uses_inchi_lookup() {
    let inchi = "InChI=1S/C9H8O4/c1-6(10)13-8-5-3-2-4-7(8)9(11)12/h2-5H,1H3,(H,11,12)";
    let source = MockSource {
        inchi: Reply::Value(vec![2244]),
        record: Reply::Value(aspirin_like_record()),
        ..Default::default()
    };

    let result = assess(inchi, &source).await.unwrap();

    assert_eq!(result.cid, 2244);
    assert_eq!(result.query_type, IdentifierKind::Inchi);
    assert_eq!(source.calls()[0], format!("inchi:{inchi}"));
}
