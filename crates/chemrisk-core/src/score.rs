//! Risk scoring over the collected evidence.
//!
//! The score is additive with capped pools: GHS health codes feed a pool
//! capped at 40, GHS environmental codes one capped at 25, and the remaining
//! heuristics (weight, persistence, bioaccumulation, toxicity presence) add
//! fixed bonuses. The clamped total maps onto a tier.

use crate::model::{
    EnvironmentalEvidence, HazardEvidence, RiskAssessment, RiskTier, ScalarProperties,
    ToxicityEvidence,
};

const SEVERE_HEALTH_CODES: [&str; 11] = [
    "H300", "H310", "H330", "H301", "H311", "H331", "H340", "H350", "H360", "H370", "H372",
];
const MODERATE_HEALTH_CODES: [&str; 12] = [
    "H302", "H312", "H332", "H314", "H318", "H334", "H317", "H341", "H351", "H361", "H371", "H373",
];
// H290 (corrosive to metals) is scored alongside the aquatic codes.
const HIGH_ENV_CODES: [&str; 3] = ["H400", "H410", "H290"];
const MEDIUM_ENV_CODES: [&str; 2] = ["H401", "H411"];
const LOW_ENV_CODES: [&str; 3] = ["H402", "H412", "H413"];

const SEVERE_HEALTH_POINTS: u32 = 15;
const MODERATE_HEALTH_POINTS: u32 = 7;
const HEALTH_POOL_CAP: u32 = 40;
const ENV_POOL_CAP: u32 = 25;

const MAX_SCORE: u32 = 100;
const HIGH_THRESHOLD: u32 = 65;
const MEDIUM_THRESHOLD: u32 = 30;

const NO_HAZARD_REASON: &str = "No significant environmental or health hazards identified from \
     available GHS, property, and toxicity/environmental excerpts.";
const INSUFFICIENT_DATA_REASON: &str = "Insufficient specific hazard data found in PubChem record \
     for a comprehensive risk assessment.";

/// Score the evidence gathered for one compound.
pub fn calculate_risk(
    properties: &ScalarProperties,
    ghs: &HazardEvidence,
    toxicity: &ToxicityEvidence,
    environmental: &EnvironmentalEvidence,
) -> RiskAssessment {
    let mut score: u32 = 0;
    let mut reasons: Vec<String> = Vec::new();

    let mut health_pool: u32 = 0;
    let mut env_pool: u32 = 0;
    let mut first_severe: Option<&str> = None;
    let mut first_moderate: Option<&str> = None;
    let mut first_env: Option<&str> = None;
    let mut has_h290 = false;

    for statement in &ghs.hazard_statements {
        let Some(code) = hazard_code(statement) else {
            continue;
        };
        if SEVERE_HEALTH_CODES.contains(&code) {
            health_pool += SEVERE_HEALTH_POINTS;
            first_severe.get_or_insert(statement);
        } else if MODERATE_HEALTH_CODES.contains(&code) {
            health_pool += MODERATE_HEALTH_POINTS;
            first_moderate.get_or_insert(statement);
        } else if code.starts_with("H4") || code == "H290" {
            if HIGH_ENV_CODES.contains(&code) {
                env_pool += 15;
            } else if MEDIUM_ENV_CODES.contains(&code) {
                env_pool += 10;
            } else if LOW_ENV_CODES.contains(&code) {
                env_pool += 5;
            }
            first_env.get_or_insert(statement);
            has_h290 |= code == "H290";
        }
    }

    score += health_pool.min(HEALTH_POOL_CAP);
    score += env_pool.min(ENV_POOL_CAP);

    if let Some(statement) = first_severe {
        reasons.push(format!(
            "GHS: Contains severe health hazards (e.g., {}...).",
            statement_code(statement)
        ));
    }
    if let Some(statement) = first_moderate {
        reasons.push(format!(
            "GHS: Contains moderate health hazards (e.g., {}...).",
            statement_code(statement)
        ));
    }
    if let Some(statement) = first_env {
        if has_h290 {
            reasons.push(format!(
                "GHS: Classified as corrosive to metals and/or hazardous to the aquatic environment (e.g., {}...).",
                statement_code(statement)
            ));
        } else {
            reasons.push(format!(
                "GHS: Classified as hazardous to the aquatic environment (e.g., {}...).",
                statement_code(statement)
            ));
        }
    }

    // Weight heuristics: heavy halogenated molecules first, then very heavy
    // molecules regardless of halogenation.
    let halogenated = properties
        .inchi
        .as_deref()
        .is_some_and(formula_layer_halogenated);
    match properties.molecular_weight {
        Some(w) if w > 500.0 && halogenated => {
            score += 10;
            reasons.push(
                "High Molecular Weight (>500 Da) with halogenation suggests potential persistence."
                    .to_string(),
            );
        }
        Some(w) if w > 700.0 => {
            score += 5;
            reasons.push("Very High Molecular Weight (>700 Da) may indicate persistence.".to_string());
        }
        _ => {}
    }

    let persistent = environmental.biodegradability.iter().any(|b| {
        let lower = b.to_lowercase();
        lower.contains("not readily biodegradable") || lower.contains("persistent")
    });
    let bioaccumulative = !environmental.bioaccumulation.is_empty();

    if persistent {
        score += 10;
        reasons.push("Data indicates persistence/low biodegradability.".to_string());
    } else if !environmental.biodegradability.is_empty() {
        // Small presence bonus even when the excerpts say "readily biodegradable".
        score += 2;
    }

    if bioaccumulative {
        score += 8;
        reasons.push("Bioaccumulation potential indicated by data.".to_string());
    }

    if !toxicity.is_empty() {
        score += 5;
        if health_pool < 10 {
            reasons.push("Toxicity data found (check details/GHS).".to_string());
        }
    }

    let final_score = score.min(MAX_SCORE);
    let mut tier = if final_score >= HIGH_THRESHOLD {
        RiskTier::High
    } else if final_score >= MEDIUM_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::Low
    };

    let has_hazard_data = !ghs.hazard_statements.is_empty()
        || !toxicity.ld50.is_empty()
        || !toxicity.lc50.is_empty()
        || !toxicity.human_effects.is_empty()
        || !environmental.aquatic_toxicity.is_empty()
        || persistent
        || bioaccumulative;

    if final_score < 5 && !has_hazard_data {
        tier = RiskTier::Unknown;
        reasons.clear();
        reasons.push(INSUFFICIENT_DATA_REASON.to_string());
    } else if tier == RiskTier::Low && reasons.is_empty() {
        reasons.push(NO_HAZARD_REASON.to_string());
    }

    RiskAssessment {
        score: final_score,
        tier,
        reasons,
    }
}

/// Leading H-code of a statement, if it has the "H" + three digits shape.
fn hazard_code(statement: &str) -> Option<&str> {
    let bytes = statement.as_bytes();
    if bytes.len() >= 4 && bytes[0] == b'H' && bytes[1..4].iter().all(u8::is_ascii_digit) {
        Some(&statement[..4])
    } else {
        None
    }
}

/// Statement text up to the first colon, used as the short code in reasons.
fn statement_code(statement: &str) -> &str {
    statement.split(':').next().unwrap_or(statement)
}

/// Halogen check restricted to the formula layer of the InChI (the segment
/// after the first '/'), so letters in the "InChI=" prefix or in later
/// layers cannot trigger it.
fn formula_layer_halogenated(inchi: &str) -> bool {
    let Some(formula) = inchi.split('/').nth(1) else {
        return false;
    };
    formula.contains("Cl")
        || formula.contains("Br")
        || formula.contains('F')
        || formula.contains('I')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghs_with(statements: &[&str]) -> HazardEvidence {
        HazardEvidence {
            hazard_statements: statements.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_severe_code_stays_low() {
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H300: Fatal if swallowed"]),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        assert_eq!(risk.score, 15);
        assert_eq!(risk.tier, RiskTier::Low);
        assert_eq!(
            risk.reasons,
            vec!["GHS: Contains severe health hazards (e.g., H300...)."]
        );
    }

    #[test]
    fn test_health_pool_capped_at_40() {
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H300: a", "H310: b", "H330: c", "H301: d"]),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        // 4 x 15 = 60 capped to 40.
        assert_eq!(risk.score, 40);
        assert_eq!(risk.tier, RiskTier::Medium);
    }

    #[test]
    fn test_env_pool_capped_at_25() {
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H400: a", "H410: b", "H411: c"]),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        // 15 + 15 + 10 = 40 capped to 25.
        assert_eq!(risk.score, 25);
        assert_eq!(risk.reasons.len(), 1);
        assert!(risk.reasons[0].starts_with("GHS: Classified as hazardous to the aquatic"));
    }

    #[test]
    fn test_h290_changes_env_reason() {
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H290: May be corrosive to metals"]),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        assert_eq!(risk.score, 15);
        assert!(risk.reasons[0].starts_with("GHS: Classified as corrosive to metals"));
    }

    #[test]
    fn test_unknown_when_no_hazard_data() {
        let risk = calculate_risk(
            &ScalarProperties {
                molecular_weight: Some(180.16),
                ..Default::default()
            },
            &HazardEvidence::default(),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        assert_eq!(risk.score, 0);
        assert_eq!(risk.tier, RiskTier::Unknown);
        assert_eq!(
            risk.reasons,
            vec![
                "Insufficient specific hazard data found in PubChem record for a comprehensive \
                 risk assessment."
            ]
        );
    }

    #[test]
    fn test_biodegradable_bonus_still_unknown() {
        // A biodegradability excerpt without persistence wording scores 2 but
        // counts as no hazard data, so the tier collapses to Unknown.
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &HazardEvidence::default(),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence {
                biodegradability: vec!["Readily biodegradable in water".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(risk.score, 2);
        assert_eq!(risk.tier, RiskTier::Unknown);
    }

    #[test]
    fn test_persistence_and_bioaccumulation() {
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &HazardEvidence::default(),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence {
                biodegradability: vec!["Not readily biodegradable".to_string()],
                bioaccumulation: vec!["BCF = 1200 in fish".to_string()],
                ..Default::default()
            },
        );
        assert_eq!(risk.score, 18);
        assert_eq!(risk.tier, RiskTier::Low);
        assert_eq!(risk.reasons.len(), 2);
    }

    #[test]
    fn test_toxicity_reason_suppressed_by_high_health_pool() {
        let toxicity = ToxicityEvidence {
            ld50: vec!["LD50 Rat oral 50 mg/kg".to_string()],
            ..Default::default()
        };
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H300: Fatal if swallowed"]),
            &toxicity,
            &EnvironmentalEvidence::default(),
        );
        // 15 health + 5 toxicity presence, reason list only mentions GHS.
        assert_eq!(risk.score, 20);
        assert_eq!(risk.reasons.len(), 1);

        let mild = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H302: Harmful if swallowed"]),
            &toxicity,
            &EnvironmentalEvidence::default(),
        );
        assert_eq!(mild.score, 12);
        assert!(mild
            .reasons
            .iter()
            .any(|r| r == "Toxicity data found (check details/GHS)."));
    }

    #[test]
    fn test_halogenated_weight_heuristic() {
        let properties = ScalarProperties {
            molecular_weight: Some(520.0),
            inchi: Some("InChI=1S/C20H10Br4O5/c21-11...".to_string()),
            ..Default::default()
        };
        let risk = calculate_risk(
            &properties,
            &HazardEvidence::default(),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        assert_eq!(risk.score, 10);
        assert!(risk.reasons[0].contains("halogenation"));

        // Same weight without halogens scores nothing below 700 Da.
        let plain = ScalarProperties {
            molecular_weight: Some(520.0),
            inchi: Some("InChI=1S/C30H48O3/c1-25...".to_string()),
            ..Default::default()
        };
        let risk = calculate_risk(
            &plain,
            &HazardEvidence::default(),
            &ToxicityEvidence::default(),
            &EnvironmentalEvidence::default(),
        );
        assert_eq!(risk.score, 0);
        assert_eq!(risk.tier, RiskTier::Unknown);
    }

    #[test]
    fn test_high_tier_reached() {
        let risk = calculate_risk(
            &ScalarProperties::default(),
            &ghs_with(&["H300: a", "H310: b", "H330: c", "H400: d", "H410: e"]),
            &ToxicityEvidence {
                ld50: vec!["LD50 Rat oral 5 mg/kg".to_string()],
                ..Default::default()
            },
            &EnvironmentalEvidence {
                biodegradability: vec!["persistent in soil".to_string()],
                bioaccumulation: vec!["high BCF".to_string()],
                ..Default::default()
            },
        );
        // 40 + 25 + 10 + 8 + 5 = 88.
        assert_eq!(risk.score, 88);
        assert_eq!(risk.tier, RiskTier::High);
    }

    #[test]
    fn test_formula_layer_halogen_check() {
        assert!(formula_layer_halogenated("InChI=1S/CCl4/c2-1(3,4)5"));
        assert!(formula_layer_halogenated("InChI=1S/C2H5Br/c1-2-3/h2H2,1H3"));
        // No formula layer, or halogen letters only outside it.
        assert!(!formula_layer_halogenated("InChI=1S"));
        assert!(!formula_layer_halogenated("InChI=1S/C6H12O6/c7-1-3(9)5(11)6(12)4(10)2-8"));
    }
}
