//! Causeway Engine - Main entry point.
//!
//! Composes the bridge and waits for shutdown. Wire transports attach
//! to sessions opened from the [`App`]; this binary owns only the
//! shared composition and process lifecycle.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use causeway_engine::{App, BridgeConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "causeway_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Causeway Engine");

    let config = BridgeConfig::from_env();
    tracing::info!(
        third_party_capes = config.allow_third_party_capes,
        fetch_pool = config.fetch_pool_size(),
        "Bridge configured"
    );

    // Kept alive for the process lifetime; transports open sessions
    // from it as connections arrive.
    let _app = App::new(config);

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}
