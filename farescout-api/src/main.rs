use std::net::SocketAddr;
use std::sync::Arc;

use farescout_api::{app, AppState};
use farescout_core::orchestrator::FlightSearchOrchestrator;
use farescout_store::{app_config::Config, FileKvStore, SessionStore, SkyProviderClient};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "farescout_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Farescout API on port {}", config.server.port);

    let sessions = Arc::new(SessionStore::new(FileKvStore::new(&config.storage.path)));
    let provider = Arc::new(SkyProviderClient::new(&config.provider));
    let search = Arc::new(FlightSearchOrchestrator::new(
        provider,
        config.provider.location_endpoints.clone(),
        config.search.currency.clone(),
        config.search.cabin_class.clone(),
    ));

    let app = app(AppState { sessions, search });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
