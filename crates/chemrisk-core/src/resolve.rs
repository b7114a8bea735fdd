//! Identifier resolution: classified query -> canonical CID.
//!
//! Every failure mode here collapses to "not found"; resolution never
//! surfaces an error to the caller. The only automatic retry is the
//! documented formula -> name fallback.

use crate::identifier::{Identifier, IdentifierKind};
use crate::source::{CompoundSource, SourceError};
use tracing::{debug, warn};

/// Resolve a classified identifier to a canonical CID.
///
/// - `cid`: local validation only, no network call.
/// - `formula`: formula lookup; on a non-2xx status or an empty result,
///   retried once as a name lookup with the identical raw string.
/// - `inchi` / `inchikey` / `name`: single lookup, no fallback.
pub async fn resolve_cid(source: &dyn CompoundSource, identifier: &Identifier) -> Option<u32> {
    let raw = identifier.raw.as_str();
    debug!(query = raw, kind = %identifier.kind, "resolving identifier");

    match identifier.kind {
        IdentifierKind::Cid => raw.parse::<u32>().ok().filter(|cid| *cid > 0),
        IdentifierKind::Formula => match source.cids_by_formula(raw).await {
            Ok(cids) => match first_valid(cids) {
                Some(cid) => Some(cid),
                None => {
                    debug!(query = raw, "formula lookup empty, retrying as name");
                    name_lookup(source, raw).await
                }
            },
            Err(SourceError::Status(code)) => {
                warn!(query = raw, code, "formula lookup failed, retrying as name");
                name_lookup(source, raw).await
            }
            Err(err) => {
                warn!(query = raw, error = %err, "formula lookup failed");
                None
            }
        },
        IdentifierKind::Inchi => first_or_log(source.cids_by_inchi(raw).await, raw),
        IdentifierKind::InchiKey => first_or_log(source.cids_by_inchikey(raw).await, raw),
        IdentifierKind::Name => name_lookup(source, raw).await,
    }
}

async fn name_lookup(source: &dyn CompoundSource, raw: &str) -> Option<u32> {
    first_or_log(source.cids_by_name(raw).await, raw)
}

fn first_or_log(result: Result<Vec<u32>, SourceError>, raw: &str) -> Option<u32> {
    match result {
        Ok(cids) => first_valid(cids),
        Err(err) => {
            warn!(query = raw, error = %err, "lookup failed");
            None
        }
    }
}

/// Take the first returned ID, rejecting the zero sentinel.
fn first_valid(cids: Vec<u32>) -> Option<u32> {
    cids.into_iter().next().filter(|cid| *cid > 0)
}
