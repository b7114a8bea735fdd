//! PubChem PUG REST / PUG View client.
//!
//! Request shapes are fixed by the upstream API:
//! - `GET /rest/pug/compound/{namespace}/{value}/cids/JSON` for lookups
//! - `POST /rest/pug/compound/inchi/cids/JSON` with a form body for InChI
//! - `GET /rest/pug/compound/cid/{cid}/property/{props}/JSON`
//! - `GET /rest/pug_view/data/compound/{cid}/JSON`

use crate::model::ScalarProperties;
use crate::record::{FullRecordResponse, Section};
use crate::source::{CompoundSource, SourceError};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use tracing::debug;

const PUBCHEM_BASE: &str = "https://pubchem.ncbi.nlm.nih.gov";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The four scalar properties requested per compound, comma-joined into one
/// path segment as PUG REST expects.
const PROPERTY_LIST: &str = "MolecularWeight,IUPACName,InChI,MolecularFormula";

pub struct PubChemClient {
    http: Client,
    base: Url,
}

impl PubChemClient {
    pub fn new() -> Result<Self, SourceError> {
        Self::with_base_url(PUBCHEM_BASE)
    }

    /// Build a client against a non-default base URL (local stubs in tests).
    pub fn with_base_url(base: &str) -> Result<Self, SourceError> {
        let base = Url::parse(base)
            .map_err(|e| SourceError::Malformed(format!("invalid base URL: {e}")))?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("chemrisk/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base })
    }

    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, SourceError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::Malformed("base URL cannot carry a path".into()))?
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, SourceError> {
        debug!(%url, "pubchem GET");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        decode_json(response).await
    }

    async fn cids(&self, namespace: &str, value: &str) -> Result<Vec<u32>, SourceError> {
        let url = self.url_with_segments(&["rest", "pug", "compound", namespace, value, "cids", "JSON"])?;
        let parsed: IdentifierListResponse = self.get_json(url).await?;
        Ok(parsed.identifier_list.cid)
    }
}

async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, SourceError> {
    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status(status.as_u16()));
    }
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"));
    if !is_json {
        return Err(SourceError::Malformed(
            "response content-type is not application/json".into(),
        ));
    }
    response.json().await.map_err(|e| {
        if e.is_decode() {
            SourceError::Malformed(e.to_string())
        } else {
            SourceError::Transport(e)
        }
    })
}

#[async_trait]
impl CompoundSource for PubChemClient {
    async fn cids_by_formula(&self, formula: &str) -> Result<Vec<u32>, SourceError> {
        self.cids("formula", formula).await
    }

    async fn cids_by_inchi(&self, inchi: &str) -> Result<Vec<u32>, SourceError> {
        let url = self.url_with_segments(&["rest", "pug", "compound", "inchi", "cids", "JSON"])?;
        debug!(%url, "pubchem POST");
        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .form(&[("inchi", inchi)])
            .send()
            .await?;
        let parsed: IdentifierListResponse = decode_json(response).await?;
        Ok(parsed.identifier_list.cid)
    }

    async fn cids_by_inchikey(&self, inchikey: &str) -> Result<Vec<u32>, SourceError> {
        self.cids("inchikey", inchikey).await
    }

    async fn cids_by_name(&self, name: &str) -> Result<Vec<u32>, SourceError> {
        let mut url =
            self.url_with_segments(&["rest", "pug", "compound", "name", name, "cids", "JSON"])?;
        url.query_pairs_mut().append_pair("name_type", "complete");
        let parsed: IdentifierListResponse = self.get_json(url).await?;
        Ok(parsed.identifier_list.cid)
    }

    async fn properties(&self, cid: u32) -> Result<ScalarProperties, SourceError> {
        let url = self.url_with_segments(&[
            "rest",
            "pug",
            "compound",
            "cid",
            &cid.to_string(),
            "property",
            PROPERTY_LIST,
            "JSON",
        ])?;
        let parsed: PropertyTableResponse = self.get_json(url).await?;
        let Some(entry) = parsed
            .property_table
            .properties
            .into_iter()
            .find(|p| p.cid == Some(cid))
        else {
            return Err(SourceError::Malformed(
                "property table missing an entry for the requested CID".into(),
            ));
        };
        Ok(ScalarProperties {
            molecular_weight: entry.molecular_weight,
            iupac_name: entry.iupac_name,
            inchi: entry.inchi,
            molecular_formula: entry.molecular_formula,
        })
    }

    async fn full_record(&self, cid: u32) -> Result<Vec<Section>, SourceError> {
        let url = self.url_with_segments(&[
            "rest",
            "pug_view",
            "data",
            "compound",
            &cid.to_string(),
            "JSON",
        ])?;
        let parsed: FullRecordResponse = self.get_json(url).await?;
        Ok(parsed.record.section)
    }

    fn source_name(&self) -> &str {
        "pubchem"
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct IdentifierListResponse {
    identifier_list: IdentifierList,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IdentifierList {
    #[serde(rename = "CID")]
    cid: Vec<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct PropertyTableResponse {
    property_table: PropertyTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct PropertyTable {
    properties: Vec<RawProperties>,
}

/// One row of the property table. PubChem serves `MolecularWeight` as a JSON
/// string, so the weight accepts either representation.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
struct RawProperties {
    #[serde(rename = "CID")]
    cid: Option<u32>,
    #[serde(deserialize_with = "number_or_string")]
    molecular_weight: Option<f64>,
    #[serde(rename = "IUPACName")]
    iupac_name: Option<String>,
    #[serde(rename = "InChI")]
    inchi: Option<String>,
    molecular_formula: Option<String>,
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<NumberOrString>::deserialize(deserializer)? {
        None => None,
        Some(NumberOrString::Number(v)) => Some(v),
        Some(NumberOrString::Text(s)) => s.trim().parse().ok(),
    })
}
