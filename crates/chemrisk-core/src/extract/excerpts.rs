//! Routing of free-text excerpts into toxicity and environmental-fate lists.
//!
//! Only the first text fragment of each entry is considered here; a single
//! fragment may land in several lists when it matches several patterns.

use super::ExtractContext;
use crate::record::Section;

/// Headings (substring match) that contribute toxicity excerpts.
const TOXICITY_HEADINGS: [&str; 6] = [
    "Toxicity",
    "Toxicological Information",
    "Acute Effects",
    "Human Toxicity Excerpts",
    "Non-Human Toxicity Excerpts",
    "Health Hazard",
];

/// Headings (substring match) that contribute environmental excerpts.
const ENVIRONMENTAL_HEADINGS: [&str; 7] = [
    "Ecotoxicity",
    "Environmental Fate",
    "Ecotoxicity Values",
    "Environmental Biodegradation",
    "Environmental Bioconcentration",
    "Bioaccumulation",
    "Ecological Information",
];

pub(super) fn collect_toxicity(node: &Section, ctx: &mut ExtractContext) {
    let heading = node.toc_heading.as_str();
    if !TOXICITY_HEADINGS.iter().any(|h| heading.contains(h)) {
        return;
    }
    for info in &node.information {
        let Some(text) = info.first_string() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        if matches_lethal_dose(text, ['L', 'D']) {
            ctx.ld50.push(text.to_string());
        }
        if matches_lethal_dose(text, ['L', 'C']) {
            ctx.lc50.push(text.to_string());
        }
        if heading == "Human Toxicity Excerpts" {
            ctx.human_effects.push(text.to_string());
        }
        if heading == "Non-Human Toxicity Excerpts" {
            ctx.animal_effects.push(text.to_string());
        }
    }
}

pub(super) fn collect_environmental(node: &Section, ctx: &mut ExtractContext) {
    let heading = node.toc_heading.as_str();
    if !ENVIRONMENTAL_HEADINGS.iter().any(|h| heading.contains(h)) {
        return;
    }
    for info in &node.information {
        let Some(text) = info.first_string() else {
            continue;
        };
        if text.is_empty() {
            continue;
        }
        let lower = text.to_lowercase();
        if matches_aquatic_endpoint(text) || lower.contains("aquatic") {
            ctx.aquatic_toxicity.push(text.to_string());
        }
        if lower.contains("biodegrad") || lower.contains("persist") {
            ctx.biodegradability.push(text.to_string());
        }
        if lower.contains("accumul") || lower.contains("bcf") || lower.contains("bioconcentration")
        {
            ctx.bioaccumulation.push(text.to_string());
        }
    }
}

/// Case-insensitive match of the LD50/LDLo family: the two-letter prefix
/// followed by "50", or by "Lo" with at most one character in between
/// (covers "LD-Lo" style spellings). Pass `['L','C']` for the LC family.
fn matches_lethal_dose(text: &str, prefix: [char; 2]) -> bool {
    let chars: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    let fifty = ['5', '0'];
    let lo = ['L', 'O'];
    (0..chars.len()).any(|i| {
        chars[i..].starts_with(&prefix) && {
            let rest = &chars[i + 2..];
            rest.starts_with(&fifty)
                || rest.starts_with(&lo)
                || (rest.len() >= 3 && rest[1..].starts_with(&lo))
        }
    })
}

/// Case-insensitive match of aquatic endpoint codes: LC/EC/IC/ErC/NOEC/LOEC
/// followed by "50" with at most one character in between.
fn matches_aquatic_endpoint(text: &str) -> bool {
    const PREFIXES: [&[char]; 6] = [
        &['L', 'C'],
        &['E', 'C'],
        &['I', 'C'],
        &['E', 'R', 'C'],
        &['N', 'O', 'E', 'C'],
        &['L', 'O', 'E', 'C'],
    ];
    let chars: Vec<char> = text.chars().map(|c| c.to_ascii_uppercase()).collect();
    let fifty = ['5', '0'];
    PREFIXES.iter().any(|prefix| {
        (0..chars.len()).any(|i| {
            chars[i..].starts_with(prefix) && {
                let rest = &chars[i + prefix.len()..];
                rest.starts_with(&fifty) || (rest.len() >= 3 && rest[1..].starts_with(&fifty))
            }
        })
    })
}
