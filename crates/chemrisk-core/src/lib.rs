pub mod error;
pub mod extract;
pub mod identifier;
pub mod model;
pub mod properties;
pub mod pubchem;
pub mod record;
pub mod resolve;
pub mod score;
pub mod source;

use error::ChemriskError;
use identifier::Identifier;
use model::{AssessmentResult, ScalarProperties};
use record::Section;
use source::{CompoundSource, SourceError};
use tracing::{info, warn};

/// Base URL of the public compound record pages linked in results.
pub const PUBCHEM_COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/compound";

/// Main API entry point: assess the environmental and health risk of one
/// compound identified by `query` (CID, formula, InChI, InChIKey, or name).
///
/// Classifies the identifier, resolves it to a CID, fetches scalar
/// properties and the hierarchical record concurrently, extracts hazard
/// evidence, and scores it. Resolution failure is always a not-found
/// outcome; a single unusable data source degrades, both unusable fail
/// the request.
pub async fn assess(
    query: &str,
    source: &dyn CompoundSource,
) -> Result<AssessmentResult, ChemriskError> {
    let identifier = Identifier::classify(query);

    let Some(cid) = resolve::resolve_cid(source, &identifier).await else {
        return Err(ChemriskError::NotFound {
            kind: identifier.kind,
            query: identifier.raw,
        });
    };
    info!(cid, query = %identifier.raw, kind = %identifier.kind, "resolved identifier");

    // Both fetches depend only on the CID; run them concurrently.
    let (properties_result, record_result) = tokio::join!(
        properties::fetch_properties(source, cid),
        source.full_record(cid),
    );

    // A transport failure on the property side is held back until we know
    // whether the record yields enough evidence to proceed without it.
    let (mut properties, property_transport) = match properties_result {
        Ok(properties) => (properties, None),
        Err(err) => (ScalarProperties::default(), Some(err)),
    };

    let sections = reconcile_record(cid, record_result, &properties, &property_transport)?;

    let extracted = extract::extract_record(&sections);
    if let Some(err) = property_transport {
        if extracted.is_empty() {
            return Err(err);
        }
        warn!(cid, "property fetch failed, continuing on record evidence alone");
    }

    // Fold the traversal's IUPAC name in when the property fetch missed it.
    if properties.iupac_name.is_none() {
        properties.iupac_name = extracted.iupac_fallback.clone();
    }

    let compound_name = properties
        .iupac_name
        .clone()
        .or_else(|| extracted.synonyms.first().cloned())
        .unwrap_or_else(|| format!("Compound CID {cid}"));

    let risk = score::calculate_risk(
        &properties,
        &extracted.ghs,
        &extracted.toxicity,
        &extracted.environmental,
    );
    info!(cid, score = risk.score, tier = %risk.tier, "assessment complete");

    Ok(AssessmentResult {
        query: identifier.raw,
        query_type: identifier.kind,
        cid,
        compound_name,
        risk,
        properties,
        ghs: extracted.ghs,
        toxicity: extracted.toxicity,
        environmental: extracted.environmental,
        synonyms: extracted.synonyms,
        description: extracted.description,
        record_url: format!("{PUBCHEM_COMPOUND_URL}/{cid}"),
    })
}

/// Decide whether a record-fetch failure is survivable. With usable
/// properties in hand the traversal just runs on an empty tree; with
/// nothing else to fall back on the request fails.
fn reconcile_record(
    cid: u32,
    record_result: Result<Vec<Section>, SourceError>,
    properties: &ScalarProperties,
    property_transport: &Option<ChemriskError>,
) -> Result<Vec<Section>, ChemriskError> {
    let record_err = match record_result {
        Ok(sections) => return Ok(sections),
        Err(err) => err,
    };

    if let Some(transport) = property_transport {
        return Err(ChemriskError::Unavailable {
            detail: format!("property fetch failed ({transport}); record fetch failed ({record_err})"),
        });
    }
    if properties.is_empty() {
        return match record_err {
            SourceError::Malformed(detail) => Err(ChemriskError::MalformedData { cid, detail }),
            other => Err(ChemriskError::Unavailable {
                detail: format!("no property data and record fetch failed: {other}"),
            }),
        };
    }

    warn!(cid, error = %record_err, "record fetch failed, proceeding with properties only");
    Ok(Vec::new())
}
