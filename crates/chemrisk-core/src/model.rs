use crate::identifier::IdentifierKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar compound properties from the PubChem property endpoint.
///
/// Every field may be absent; an all-empty value is a valid, expected state
/// (the record traversal can still produce evidence without it).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iupac_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inchi: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub molecular_formula: Option<String>,
}

impl ScalarProperties {
    pub fn is_empty(&self) -> bool {
        self.molecular_weight.is_none()
            && self.iupac_name.is_none()
            && self.inchi.is_none()
            && self.molecular_formula.is_none()
    }
}

/// A GHS pictogram reference extracted from the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhsSymbol {
    pub url: String,
    pub description: String,
}

/// GHS classification evidence: pictograms, signal word, H- and P-statements.
///
/// Statement lists are deduplicated case-sensitively, insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HazardEvidence {
    pub symbols: Vec<GhsSymbol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signal_word: Option<String>,
    pub hazard_statements: Vec<String>,
    pub precautionary_statements: Vec<String>,
}

/// Toxicity excerpts, each list capped at 5 entries after deduplication.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToxicityEvidence {
    pub ld50: Vec<String>,
    pub lc50: Vec<String>,
    pub human_effects: Vec<String>,
    pub animal_effects: Vec<String>,
}

impl ToxicityEvidence {
    pub fn is_empty(&self) -> bool {
        self.ld50.is_empty()
            && self.lc50.is_empty()
            && self.human_effects.is_empty()
            && self.animal_effects.is_empty()
    }
}

/// Environmental-fate excerpts, each list capped at 5 entries after dedup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentalEvidence {
    pub aquatic_toxicity: Vec<String>,
    pub biodegradability: Vec<String>,
    pub bioaccumulation: Vec<String>,
}

/// Discrete risk tier derived from the heuristic score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
    Unknown,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "Low"),
            RiskTier::Medium => write!(f, "Medium"),
            RiskTier::High => write!(f, "High"),
            RiskTier::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Bounded, explainable risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Heuristic score clamped to 0-100.
    pub score: u32,
    pub tier: RiskTier,
    /// Explanations in evaluation order.
    pub reasons: Vec<String>,
}

/// Everything assembled for one request. Built once, never mutated after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// The raw query as received (trimmed).
    pub query: String,
    /// Detected identifier kind.
    pub query_type: IdentifierKind,
    /// Canonical PubChem compound ID.
    pub cid: u32,
    /// Display name: IUPAC name, else traversal fallback, else first synonym,
    /// else a CID placeholder.
    pub compound_name: String,
    pub risk: RiskAssessment,
    pub properties: ScalarProperties,
    pub ghs: HazardEvidence,
    pub toxicity: ToxicityEvidence,
    pub environmental: EnvironmentalEvidence,
    /// Up to 10 deduplicated synonyms, first-come priority.
    pub synonyms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canonical PubChem record URL for the compound.
    pub record_url: String,
}
