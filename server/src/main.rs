// server/src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

use storefront::{db, seed};
use storefront_server::web::configure_app_routes;
use storefront_server::{AppConfig, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))) // RUST_LOG overrides
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront server...");

  let app_config = AppConfig::from_env().context("Failed to load application configuration")?;

  let db_pool = db::connect(&app_config.database_url, app_config.database_max_connections)
    .await
    .context("Failed to open the database")?;

  if app_config.seed_db {
    let seeded = seed::seed_catalog(&db_pool).await.context("Failed to seed the catalog")?;
    if seeded {
      tracing::info!("Sample catalog loaded.");
    }
  }

  let server_address = app_config.bind_address();
  let app_state = AppState::new(db_pool, app_config);

  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("Failed to bind {}", server_address))?
  .run()
  .await
  .context("Server terminated with an error")?;

  Ok(())
}
