//! Storefront entry-point: loads configuration, wires the menu source and
//! serves the REST API with OpenAPI docs.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use storefront::domain::ports::CatalogRepository;
use storefront::inbound::http::health::HealthState;
use storefront::inbound::http::session_config::{BuildMode, session_settings};
use storefront::outbound::menu::{JsonFileMenuRepository, StaticMenuRepository};
use storefront::settings::StorefrontSettings;

fn menu_source(settings: &StorefrontSettings) -> Arc<dyn CatalogRepository> {
    match settings.menu_path() {
        Some(path) => {
            info!(path = %path.display(), "serving menu from file");
            Arc::new(JsonFileMenuRepository::new(path))
        }
        None => {
            info!("serving built-in menu");
            Arc::new(StaticMenuRepository)
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StorefrontSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("configuration error: {err}")))?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        settings.bind_addr(),
        menu_source(&settings),
    );
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::prometheus_metrics()?));

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %settings.bind_addr(), "starting storefront");
    create_server(health_state, config)?.await
}
