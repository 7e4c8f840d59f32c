use std::error::Error;

use gather_server::catalog::{RouteCatalog, StationSearchIndex};
use gather_server::config::AppConfig;
use gather_server::remote::CallableClient;
use gather_server::storage::{JsonFileStore, Preferences};
use gather_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;

    let routes = match &config.route_colors_path {
        Some(path) => RouteCatalog::load(path)?,
        None => RouteCatalog::bundled()?,
    };
    let stations = match &config.stations_path {
        Some(path) => StationSearchIndex::load(path)?,
        None => StationSearchIndex::bundled()?,
    };
    info!(
        routes = routes.len(),
        stations = stations.station_count(),
        "catalogs loaded"
    );

    let store = JsonFileStore::new(&config.storage_path);
    let preferences =
        Preferences::new(store).with_max_category_stations(config.max_category_stations);

    let mut state = AppState::new(routes, stations, preferences);
    match config.callable_client_config() {
        Some(client_config) => {
            info!(url = %client_config.base_url, "meetup functions enabled");
            state = state.with_remote(CallableClient::new(client_config)?);
        }
        None => warn!("GATHER_FUNCTIONS_URL not set, meetup endpoints disabled"),
    }

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "gather server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
