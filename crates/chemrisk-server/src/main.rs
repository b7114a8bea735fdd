mod app;

use app::AppState;
use chemrisk_core::pubchem::PubChemClient;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "chemrisk_server=info,chemrisk_core=info,tower_http=info".into()
        }))
        .init();

    let source = PubChemClient::new().map_err(|e| anyhow::anyhow!("building PubChem client: {e}"))?;
    let state = AppState {
        source: Arc::new(source),
    };

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(3000);
    let addr = format!("0.0.0.0:{port}");
    info!(%addr, "starting chemrisk server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app::router(state)).await?;

    Ok(())
}
