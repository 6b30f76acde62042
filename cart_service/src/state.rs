// cart_service/src/state.rs
use crate::config::AppConfig;
use cart_core::CartService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub cart_service: CartService,
  pub config: Arc<AppConfig>, // Share loaded config
}
