//! Names-and-Identifiers extraction: IUPAC fallback name, synonyms, and the
//! single record description chosen by fixed priority.

use super::ExtractContext;
use crate::record::Section;

/// Priority tags for description selection. These are empirically observed
/// annotations in upstream records, reproduced as fixed policy.
const DESC_PHYSICAL: &str = "Physical Description";
const DESC_HAZARDS_SUMMARY: &str = "Hazards Summary";
const DESC_REF_PRIMARY: i64 = 43;
const DESC_REF_SECONDARY: i64 = 72;

pub(super) fn collect(node: &Section, ctx: &mut ExtractContext) {
    for sub in &node.section {
        let sub_heading = sub.toc_heading.as_str();

        if ctx.iupac_fallback.is_none() && sub_heading == "Computed Descriptors" {
            collect_computed_iupac(sub, ctx);
        } else if ctx.iupac_fallback.is_none() && sub_heading == "IUPAC Name" {
            if let Some(name) = sub.information.first().and_then(|i| i.first_string()) {
                if !name.is_empty() {
                    ctx.iupac_fallback = Some(name.to_string());
                }
            }
        } else if sub_heading.contains("Synonyms") {
            collect_synonyms(sub, ctx);
        } else if sub_heading == "Record Description" && ctx.description.is_none() {
            ctx.description = choose_description(sub);
        }
    }
}

fn collect_computed_iupac(sub: &Section, ctx: &mut ExtractContext) {
    for descriptor in &sub.section {
        if descriptor.toc_heading != "IUPAC Name" {
            continue;
        }
        if let Some(name) = descriptor.information.first().and_then(|i| i.first_string()) {
            if !name.is_empty() {
                ctx.iupac_fallback = Some(name.to_string());
                return;
            }
        }
    }
}

/// Top-level entries contribute their first fragment; one level of nested
/// sub-sections contributes every fragment.
fn collect_synonyms(sub: &Section, ctx: &mut ExtractContext) {
    for info in &sub.information {
        if let Some(synonym) = info.first_string() {
            if !synonym.is_empty() {
                ctx.synonyms.push(synonym.to_string());
            }
        }
    }
    for nested in &sub.section {
        for info in &nested.information {
            for fragment in &info.value.string_with_markup {
                if !fragment.string.is_empty() {
                    ctx.synonyms.push(fragment.string.clone());
                }
            }
        }
    }
}

/// Pick exactly one description: Physical Description > Hazards Summary >
/// reference 43 > reference 72 > first available entry. Each entry is
/// bucketed by its first matching tag only.
fn choose_description(sub: &Section) -> Option<String> {
    let mut physical = None;
    let mut hazards_summary = None;
    let mut ref_primary = None;
    let mut ref_secondary = None;
    let mut first = None;

    for info in &sub.information {
        let Some(text) = info.first_string().filter(|t| !t.is_empty()) else {
            continue;
        };
        if first.is_none() {
            first = Some(text);
        }
        if info.description.as_deref() == Some(DESC_PHYSICAL) {
            physical.get_or_insert(text);
        } else if info.description.as_deref() == Some(DESC_HAZARDS_SUMMARY) {
            hazards_summary.get_or_insert(text);
        } else if info.reference_number == Some(DESC_REF_PRIMARY) {
            ref_primary.get_or_insert(text);
        } else if info.reference_number == Some(DESC_REF_SECONDARY) {
            ref_secondary.get_or_insert(text);
        }
    }

    physical
        .or(hazards_summary)
        .or(ref_primary)
        .or(ref_secondary)
        .or(first)
        .map(str::to_string)
}
