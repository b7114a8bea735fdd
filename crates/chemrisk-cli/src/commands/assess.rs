use anyhow::Context;
use chemrisk_core::error::ChemriskError;
use chemrisk_core::pubchem::PubChemClient;

use crate::output;

pub fn run(query: &str, output_format: &str, verbose: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;

    let result = runtime.block_on(async {
        let client = PubChemClient::new()
            .map_err(|e| anyhow::anyhow!("building PubChem client: {e}"))?;
        chemrisk_core::assess(query, &client)
            .await
            .map_err(|e| match e {
                // NotFound carries per-kind guidance worth showing directly.
                err @ ChemriskError::NotFound { .. } => anyhow::anyhow!("{}", err.guidance()),
                err => anyhow::anyhow!(err),
            })
    })?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result, verbose),
    }

    Ok(())
}
