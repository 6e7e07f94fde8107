mod config;
mod domain;
mod storage;
mod widget;
mod widget_api;

use std::{path::Path, sync::Arc};

use config::Config;
use poem::{Server, listener::TcpListener};
use storage::{JsonFilePreferences, ReadingBooksStore};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt::SubscriberBuilder, prelude::*};
use widget::{WidgetController, WidgetRegistry};
use widget_api::ReadingWidgetApi;

type WidgetResult<T> = anyhow::Result<T>;

#[tokio::main]
async fn main() -> WidgetResult<()> {
    // Respect RUST_LOG if set, default to info for our crate and poem.
    let default_filter = format!("{}=info,poem=info", env!("CARGO_PKG_NAME"));
    let env_filter = std::env::var("RUST_LOG").unwrap_or(default_filter);
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false)
        .with_level(true)
        .pretty()
        .finish()
        .with(ErrorLayer::default())
        .init();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting reading books widget host"
    );
    // Load environment variables from .env files
    if Path::new(".env.local").exists() {
        dotenvy::from_filename(".env.local")?;
    } else if Path::new(".env").exists() {
        dotenvy::from_filename(".env")?;
    };
    let config = Config::load()?;
    if let Err(e) = config.validate() {
        return Err(anyhow::anyhow!(e));
    }

    let prefs = Arc::new(JsonFilePreferences::new(&config.preferences_path));
    let store = ReadingBooksStore::new(prefs);
    let reading = store.load_reading_books().len();
    tracing::info!(
        preferences = %config.preferences_path.display(),
        reading,
        step = config.progress_step,
        "opened preference store"
    );

    let registry = Arc::new(WidgetRegistry::new(store.clone(), config.progress_step));
    let controller = Arc::new(WidgetController::new(store, registry.clone()));
    run_poem(registry, controller, Arc::new(config)).await?;
    Ok(())
}

pub async fn run_poem(
    registry: Arc<WidgetRegistry>,
    controller: Arc<WidgetController>,
    config: Arc<Config>,
) -> WidgetResult<()> {
    let bind_addr = config.bind_addr.clone();
    let server_url = format!("http://{}", bind_addr);
    let api = ReadingWidgetApi {
        registry,
        controller,
        config,
    };
    let app = widget_api::app(api, &server_url);

    tracing::info!(%bind_addr, "starting HTTP server");
    Server::new(TcpListener::bind(bind_addr)).run(app).await?;
    Ok(())
}
