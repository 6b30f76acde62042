// cart_service/src/main.rs

// Declare modules for the application
mod config;
mod db;
mod errors;
mod models;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::db::PgCartRepository;
use crate::errors::Result as AppResult; // Use the app's Result alias
use crate::services::HttpProductCatalog;
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer}; // Renamed web to actix_data
use cart_core::{CartRepository, CartService, InMemoryCartRepository};
use sqlx::PgPool;
use std::sync::Arc;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // RUST_LOG overrides the default `info` level
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting cart service...");

  let app_state = match build_state().await {
    Ok(state) => state,
    Err(e) => {
      tracing::error!(error = %e, "Failed to initialize the cart service.");
      return Err(std::io::Error::other(e.to_string()));
    }
  };

  let server_address = format!("{}:{}", app_state.config.server_host, app_state.config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}

async fn build_state() -> AppResult<AppState> {
  let app_config = Arc::new(AppConfig::from_env()?);
  let repository = build_repository(&app_config).await?;
  let catalog = HttpProductCatalog::new(&app_config.product_service_url, app_config.product_lookup_timeout)?;

  let cart_service =
    CartService::new(repository, Arc::new(catalog)).with_lookup_timeout(app_config.product_lookup_timeout);

  Ok(AppState {
    cart_service,
    config: app_config,
  })
}

async fn build_repository(app_config: &AppConfig) -> AppResult<Arc<dyn CartRepository>> {
  match &app_config.database_url {
    Some(database_url) => {
      let pool = PgPool::connect(database_url).await?;
      let repository = PgCartRepository::new(pool);
      repository.ensure_schema().await?;
      tracing::info!("Connected to the database; carts are stored in Postgres.");
      Ok(Arc::new(repository))
    }
    None => {
      tracing::warn!("DATABASE_URL is not set; carts are kept in memory and lost on restart.");
      Ok(Arc::new(InMemoryCartRepository::new()))
    }
  }
}
