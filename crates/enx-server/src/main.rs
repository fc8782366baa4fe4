use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;

use enx_export::ExportSigner;

use enx_server::config::Config;
use enx_server::routes::build_router;
use enx_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // A service that cannot sign must not serve; bail before binding.
    let signing_key = enx_crypto::load_signing_key(&config.signature_key_path)
        .context("refusing to start without a usable signing key")?;
    info!(
        key_id = %config.verification_key_id,
        key_version = %config.verification_key_version,
        "signature key loaded"
    );

    let store = enx_db::TekStore::open(&config.db_path)
        .with_context(|| format!("opening database at {}", config.db_path.display()))?;
    info!(db_path = %config.db_path.display(), "storage initialized");

    let signer = ExportSigner::new(
        signing_key,
        config.verification_key_id.clone(),
        config.verification_key_version.clone(),
    );
    let state = Arc::new(AppState {
        store,
        signer,
        base_url: config.base_url.clone(),
    });

    let app = build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
