//! The fetch seam between the assessment pipeline and the external database.
//!
//! Keeping this behind a trait lets tests drive the whole pipeline with an
//! in-memory source, mirroring how the extraction backend is pluggable.

use crate::model::ScalarProperties;
use crate::record::Section;
use async_trait::async_trait;

/// Failure modes of a single upstream call. The caller decides which of
/// these degrade and which escalate.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Network-level failure (connect, timeout, mid-body disconnect).
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("unexpected upstream status {0}")]
    Status(u16),

    /// Response was not JSON or did not parse into the expected shape.
    #[error("malformed upstream response: {0}")]
    Malformed(String),
}

/// Backend for compound lookups against the external chemistry database.
#[async_trait]
pub trait CompoundSource: Send + Sync {
    /// CIDs matching a molecular formula.
    async fn cids_by_formula(&self, formula: &str) -> Result<Vec<u32>, SourceError>;

    /// CIDs matching a full InChI string. Sent as a form body since the
    /// descriptor contains characters unsafe in a URL path.
    async fn cids_by_inchi(&self, inchi: &str) -> Result<Vec<u32>, SourceError>;

    /// CIDs matching an InChIKey.
    async fn cids_by_inchikey(&self, inchikey: &str) -> Result<Vec<u32>, SourceError>;

    /// CIDs matching a compound name (complete-match semantics).
    async fn cids_by_name(&self, name: &str) -> Result<Vec<u32>, SourceError>;

    /// Scalar properties for a CID.
    async fn properties(&self, cid: u32) -> Result<ScalarProperties, SourceError>;

    /// Full hierarchical record (top-level sections) for a CID.
    async fn full_record(&self, cid: u32) -> Result<Vec<Section>, SourceError>;

    /// Name of this backend (for diagnostics).
    fn source_name(&self) -> &str;
}
