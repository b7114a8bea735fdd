//! Typed view of the PUG-View record tree.
//!
//! PubChem's full-record endpoint returns a deeply nested, loosely-structured
//! document: heading-labeled sections containing sub-sections and annotated
//! value entries. Every field here defaults to empty so that arbitrary missing
//! keys deserialize cleanly instead of failing the request.

use serde::Deserialize;

/// Top-level full-record response: `{"Record": {"Section": [...]}}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FullRecordResponse {
    pub record: RecordBody,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RecordBody {
    pub section: Vec<Section>,
}

/// A heading-labeled section node, optionally nesting further sections
/// and/or annotated value entries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Section {
    #[serde(rename = "TOCHeading")]
    pub toc_heading: String,
    pub section: Vec<Section>,
    pub information: Vec<Information>,
}

/// An annotated value entry inside a section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Information {
    /// Free-text tag describing the entry (e.g. "Physical Description").
    pub description: Option<String>,
    /// Numeric reference-source tag.
    pub reference_number: Option<i64>,
    pub value: InformationValue,
}

impl Information {
    /// First text fragment of this entry, if any.
    pub fn first_string(&self) -> Option<&str> {
        self.value
            .string_with_markup
            .first()
            .map(|s| s.string.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InformationValue {
    pub string_with_markup: Vec<StringWithMarkup>,
}

/// A marked-up text fragment; markup may embed pictogram image references.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct StringWithMarkup {
    pub string: String,
    pub markup: Vec<Markup>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Markup {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "URL")]
    pub url: Option<String>,
    /// Caption text attached to the markup (pictogram description).
    pub extra: Option<String>,
}
