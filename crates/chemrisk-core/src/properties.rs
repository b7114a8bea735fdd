//! Scalar property fetch with its degrade-or-escalate policy.

use crate::error::ChemriskError;
use crate::model::ScalarProperties;
use crate::source::{CompoundSource, SourceError};
use tracing::warn;

/// Fetch scalar properties for a resolved CID.
///
/// A non-2xx status or a malformed body degrades to empty properties so the
/// record traversal can still run; a transport failure escalates with the
/// CID and underlying cause attached.
pub async fn fetch_properties(
    source: &dyn CompoundSource,
    cid: u32,
) -> Result<ScalarProperties, ChemriskError> {
    match source.properties(cid).await {
        Ok(properties) => Ok(properties),
        Err(SourceError::Status(code)) => {
            warn!(cid, code, "property fetch returned non-success status");
            Ok(ScalarProperties::default())
        }
        Err(SourceError::Malformed(detail)) => {
            warn!(cid, detail = %detail, "property fetch returned malformed data");
            Ok(ScalarProperties::default())
        }
        Err(err @ SourceError::Transport(_)) => Err(ChemriskError::Transport { cid, source: err }),
    }
}
