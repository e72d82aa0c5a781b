//! Car Xpress API - Main Entry Point

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use car_xpress_api::infrastructure::driven_adapters::car_repository::MongoCarRepository;
use car_xpress_api::infrastructure::driven_adapters::config::AppConfig;
use car_xpress_api::infrastructure::driven_adapters::database;
use car_xpress_api::infrastructure::driven_adapters::firebase::FirebaseTokenVerifier;
use car_xpress_api::infrastructure::driving_adapters::api_rest::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "car_xpress_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Load configuration
    let config = AppConfig::load()?;
    tracing::info!("Configuration loaded successfully");

    // Connect to MongoDB
    let database = database::connect(&config.database).await?;
    tracing::info!(database = %config.database.name, "Connected to MongoDB");

    // Create repository
    let car_repository = MongoCarRepository::new(&database, &config.database.collection);
    car_repository.setup_indexes().await?;
    tracing::info!(collection = %config.database.collection, "Car collection ready");

    // Create token verifier
    let token_verifier = FirebaseTokenVerifier::from_config(&config.firebase)?;
    tracing::info!(project_id = %token_verifier.project_id(), "Firebase token verifier ready");

    // Create application state
    let app_state = AppState::new(
        Arc::new(car_repository),
        Arc::new(token_verifier),
        &config.catalog,
    );

    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Car Xpress app listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
