//! Depth-first extraction of hazard, toxicity, environmental-fate, naming and
//! descriptive evidence from the PUG-View section tree.
//!
//! Heading matching is deliberately literal (exact vs substring per heading,
//! as the upstream documents require) and malformed or missing nodes are
//! skipped silently; partial extraction always beats failing the request.

mod excerpts;
mod ghs;
mod names;

use crate::model::{EnvironmentalEvidence, GhsSymbol, HazardEvidence, ToxicityEvidence};
use crate::record::Section;
use std::collections::HashSet;

const MAX_EXCERPTS: usize = 5;
const MAX_SYNONYMS: usize = 10;

/// Everything the traversal pulls out of one record.
#[derive(Debug, Clone, Default)]
pub struct ExtractedRecord {
    pub ghs: HazardEvidence,
    pub toxicity: ToxicityEvidence,
    pub environmental: EnvironmentalEvidence,
    pub synonyms: Vec<String>,
    /// IUPAC name found in the record, used when the property fetch missed it.
    pub iupac_fallback: Option<String>,
    pub description: Option<String>,
}

impl ExtractedRecord {
    /// True when the traversal produced no evidence of any kind.
    pub fn is_empty(&self) -> bool {
        self.ghs.symbols.is_empty()
            && self.ghs.signal_word.is_none()
            && self.ghs.hazard_statements.is_empty()
            && self.ghs.precautionary_statements.is_empty()
            && self.toxicity.is_empty()
            && self.environmental.aquatic_toxicity.is_empty()
            && self.environmental.biodegradability.is_empty()
            && self.environmental.bioaccumulation.is_empty()
            && self.synonyms.is_empty()
            && self.iupac_fallback.is_none()
            && self.description.is_none()
    }
}

/// Accumulator threaded through the recursive walk. Excerpt lists collect
/// unbounded here; deduplication and capping happen once in `finish`.
#[derive(Debug, Default)]
struct ExtractContext {
    symbols: Vec<GhsSymbol>,
    seen_symbol_urls: HashSet<String>,
    signal_word: Option<String>,
    hazard_statements: Vec<String>,
    seen_hazard_statements: HashSet<String>,
    precautionary_statements: Vec<String>,
    seen_precautionary: HashSet<String>,
    ld50: Vec<String>,
    lc50: Vec<String>,
    human_effects: Vec<String>,
    animal_effects: Vec<String>,
    aquatic_toxicity: Vec<String>,
    biodegradability: Vec<String>,
    bioaccumulation: Vec<String>,
    synonyms: Vec<String>,
    iupac_fallback: Option<String>,
    description: Option<String>,
}

impl ExtractContext {
    fn add_hazard_statement(&mut self, statement: &str) {
        if self.seen_hazard_statements.insert(statement.to_string()) {
            self.hazard_statements.push(statement.to_string());
        }
    }

    fn add_precautionary_code(&mut self, code: &str) {
        if self.seen_precautionary.insert(code.to_string()) {
            self.precautionary_statements.push(code.to_string());
        }
    }

    fn finish(self) -> ExtractedRecord {
        ExtractedRecord {
            ghs: HazardEvidence {
                symbols: self.symbols,
                signal_word: self.signal_word,
                hazard_statements: self.hazard_statements,
                precautionary_statements: self.precautionary_statements,
            },
            toxicity: ToxicityEvidence {
                ld50: dedup_truncate(self.ld50, MAX_EXCERPTS),
                lc50: dedup_truncate(self.lc50, MAX_EXCERPTS),
                human_effects: dedup_truncate(self.human_effects, MAX_EXCERPTS),
                animal_effects: dedup_truncate(self.animal_effects, MAX_EXCERPTS),
            },
            environmental: EnvironmentalEvidence {
                aquatic_toxicity: dedup_truncate(self.aquatic_toxicity, MAX_EXCERPTS),
                biodegradability: dedup_truncate(self.biodegradability, MAX_EXCERPTS),
                bioaccumulation: dedup_truncate(self.bioaccumulation, MAX_EXCERPTS),
            },
            synonyms: dedup_truncate(self.synonyms, MAX_SYNONYMS),
            iupac_fallback: self.iupac_fallback,
            description: self.description,
        }
    }
}

/// Extract evidence from the top-level sections of a record.
pub fn extract_record(sections: &[Section]) -> ExtractedRecord {
    let mut ctx = ExtractContext::default();
    for section in sections {
        crawl(section, &mut ctx);
    }
    ctx.finish()
}

fn crawl(node: &Section, ctx: &mut ExtractContext) {
    let heading = node.toc_heading.as_str();

    if heading == "GHS Classification" {
        ghs::collect_classification(node, ctx);
    }

    // Fallback discovery only while the primary sets are still empty.
    if heading == "Hazards Identification" && ctx.hazard_statements.is_empty() {
        ghs::collect_hazards_identification(node, ctx);
    }
    if heading.contains("Hazard")
        && !node.information.is_empty()
        && ctx.hazard_statements.is_empty()
    {
        ghs::scan_generic_hazard(node, ctx);
    }
    if heading.contains("Precaution")
        && !node.information.is_empty()
        && ctx.precautionary_statements.is_empty()
    {
        ghs::scan_generic_precaution(node, ctx);
    }

    excerpts::collect_toxicity(node, ctx);
    excerpts::collect_environmental(node, ctx);

    if heading == "Names and Identifiers" {
        names::collect(node, ctx);
    }

    // Once a description is chosen, stop walking into Record Description
    // nodes; everything else still recurses.
    if ctx.description.is_some() && heading == "Record Description" {
        return;
    }
    for child in &node.section {
        crawl(child, ctx);
    }
}

/// Insertion-order dedup followed by truncation to `cap`.
fn dedup_truncate(items: Vec<String>, cap: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
            if out.len() == cap {
                break;
            }
        }
    }
    out
}
