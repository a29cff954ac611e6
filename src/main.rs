// src/main.rs

use stackrent::config::AppConfig;
use stackrent::services::seed;
use stackrent::state::AppState;
use stackrent::store::PgStore;
use stackrent::web::host_rewrite::AdminHostRewrite;
use stackrent::web::routes;

use actix_web::{web as actix_data, App, HttpServer};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting stackrent server...");

  // Load application configuration
  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      panic!("Configuration error: {}", e);
    }
  };

  // Initialize Database Pool
  let db_pool = match PgPool::connect(&app_config.database_url).await {
    Ok(pool) => {
      tracing::info!("Successfully connected to the database.");
      pool
    }
    Err(e) => {
      tracing::error!(error = %e, "Failed to connect to the database.");
      panic!("Database connection error: {}", e);
    }
  };

  let store = Arc::new(PgStore::new(db_pool));

  // Seed catalog and bootstrap admin if configured
  if app_config.seed_db {
    if let Err(e) = seed::run(store.as_ref()).await {
      tracing::error!(error = %e, "Failed to seed database.");
    }
  }

  // Create AppState
  let app_state = AppState {
    store: store.clone(),
    config: app_config.clone(),
  };

  // Configure and Start Actix Web Server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  let admin_hostname = app_config.admin_hostname.clone();
  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .wrap(AdminHostRewrite::new(admin_hostname.clone()))
      .configure(routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
