//! GHS classification collection, including the fallback discovery paths
//! used when a record lacks the canonical "GHS Classification" section.

use super::ExtractContext;
use crate::model::GhsSymbol;
use crate::record::Section;
use tracing::debug;

const DEFAULT_PICTOGRAM_CAPTION: &str = "GHS Pictogram";

/// Primary path: the "GHS Classification" section and its immediate
/// sub-sections, matched by exact sub-heading.
pub(super) fn collect_classification(node: &Section, ctx: &mut ExtractContext) {
    for sub in &node.section {
        match sub.toc_heading.as_str() {
            "Pictograms" => collect_pictograms(sub, ctx),
            "Signal Word" => {
                if let Some(signal) = sub.information.first().and_then(|i| i.first_string()) {
                    if !signal.is_empty() {
                        ctx.signal_word = Some(signal.to_string());
                    }
                }
            }
            "GHS Hazard Statements" => collect_hazard_fragments(sub, ctx),
            "Precautionary Statement Codes" => {
                for info in &sub.information {
                    if let Some(text) = info.first_string() {
                        add_precaution_tokens(text, ctx, |_| true);
                    }
                }
            }
            _ => {}
        }
    }
}

fn collect_pictograms(sub: &Section, ctx: &mut ExtractContext) {
    for info in &sub.information {
        let Some(fragment) = info.value.string_with_markup.first() else {
            continue;
        };
        for markup in fragment.markup.iter().filter(|m| m.kind == "Icon") {
            let Some(url) = markup.url.as_deref() else {
                continue;
            };
            if ctx.seen_symbol_urls.insert(url.to_string()) {
                ctx.symbols.push(GhsSymbol {
                    url: url.to_string(),
                    description: markup
                        .extra
                        .clone()
                        .unwrap_or_else(|| DEFAULT_PICTOGRAM_CAPTION.to_string()),
                });
            }
        }
    }
}

/// Fallback: "GHS Hazard Statements" or "GHS Classification" sub-sections
/// directly under "Hazards Identification".
pub(super) fn collect_hazards_identification(node: &Section, ctx: &mut ExtractContext) {
    for sub in &node.section {
        if matches!(
            sub.toc_heading.as_str(),
            "GHS Hazard Statements" | "GHS Classification"
        ) && !sub.information.is_empty()
        {
            collect_hazard_fragments(sub, ctx);
        }
    }
}

/// Last-resort scan of any heading containing "Hazard".
pub(super) fn scan_generic_hazard(node: &Section, ctx: &mut ExtractContext) {
    for info in &node.information {
        for fragment in &info.value.string_with_markup {
            if is_hazard_statement(&fragment.string) {
                debug!(
                    heading = %node.toc_heading,
                    statement = %fragment.string,
                    "hazard statement found in generic section"
                );
                ctx.add_hazard_statement(&fragment.string);
            }
        }
    }
}

/// Last-resort scan of any heading containing "Precaution": only tokens
/// starting with "P" are taken from the split fragments.
pub(super) fn scan_generic_precaution(node: &Section, ctx: &mut ExtractContext) {
    for info in &node.information {
        if let Some(text) = info.first_string() {
            add_precaution_tokens(text, ctx, |token| token.starts_with('P'));
        }
    }
}

fn collect_hazard_fragments(sub: &Section, ctx: &mut ExtractContext) {
    for info in &sub.information {
        for fragment in &info.value.string_with_markup {
            if is_hazard_statement(&fragment.string) {
                ctx.add_hazard_statement(&fragment.string);
            }
        }
    }
}

fn add_precaution_tokens(text: &str, ctx: &mut ExtractContext, keep: impl Fn(&str) -> bool) {
    for token in text.split([',', '\n']) {
        let token = token.trim();
        if !token.is_empty() && keep(token) {
            ctx.add_precautionary_code(token);
        }
    }
}

/// True if the text starts with an H-code: "H" followed by three digits.
pub(super) fn is_hazard_statement(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 4 && bytes[0] == b'H' && bytes[1..4].iter().all(u8::is_ascii_digit)
}
