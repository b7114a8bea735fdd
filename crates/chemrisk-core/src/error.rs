use crate::identifier::IdentifierKind;
use crate::source::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum ChemriskError {
    #[error("no PubChem compound found for {kind} query \"{query}\"")]
    NotFound { kind: IdentifierKind, query: String },

    #[error("failed to retrieve essential data from PubChem: {detail}")]
    Unavailable { detail: String },

    #[error("transport failure talking to PubChem for CID {cid}: {source}")]
    Transport {
        cid: u32,
        #[source]
        source: SourceError,
    },

    #[error("malformed PubChem response for CID {cid}: {detail}")]
    MalformedData { cid: u32, detail: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ChemriskError {
    /// User-facing guidance for a failed lookup, phrased per identifier kind.
    ///
    /// Only meaningful for `NotFound`; other variants fall back to their
    /// Display text.
    pub fn guidance(&self) -> String {
        match self {
            ChemriskError::NotFound { kind, query } => match kind {
                IdentifierKind::Cid => format!("CID \"{query}\" not found or invalid."),
                IdentifierKind::Formula => format!(
                    "No compound found for formula \"{query}\". Check formatting or try the name."
                ),
                IdentifierKind::Name => format!(
                    "Compound name \"{query}\" not found. Check spelling or try a synonym/CID/formula."
                ),
                IdentifierKind::Inchi => format!(
                    "InChI string \"{query}\" did not resolve to a CID. Check formatting or try another identifier."
                ),
                IdentifierKind::InchiKey => format!(
                    "Could not find a PubChem Compound ID for the inchikey query: \"{query}\"."
                ),
            },
            other => other.to_string(),
        }
    }
}
