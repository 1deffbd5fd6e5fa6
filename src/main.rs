use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imposter::{config::ServerConfig, dispatch::AppState, state::Registry, words::Catalog};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imposter=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Imposter...");

    let config = ServerConfig::from_env();

    let catalog = match &config.words_file {
        Some(path) => {
            let catalog = Catalog::from_file(path).map_err(|e| {
                tracing::error!("Failed to load word file {}: {}", path.display(), e);
                e
            })?;
            tracing::info!(
                "Loaded {} categories from {}",
                catalog.len(),
                path.display()
            );
            catalog
        }
        None => Catalog::builtin(),
    };

    let state = AppState::spawn(Registry::new(catalog, config.session_config()));
    let app = imposter::build_router(state, &config.static_dir);

    let addr = config.bind_addr();
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
