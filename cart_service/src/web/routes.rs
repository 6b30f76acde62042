// cart_service/src/web/routes.rs

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::cart_handlers;

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

/// Undecodable JSON bodies answer 400 with the regular error shape.
fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  AppError::Validation(format!("Invalid JSON body: {}", err)).into()
}

// This function will be called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .route("/health", web::get().to(health_check_handler))
    .service(
      web::scope("/api/cart")
        .route("", web::get().to(cart_handlers::get_cart_handler))
        .route("", web::post().to(cart_handlers::add_to_cart_handler))
        .route("", web::delete().to(cart_handlers::clear_cart_handler))
        .route("/{item_id}", web::put().to(cart_handlers::update_cart_item_handler))
        .route("/{item_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
    );
}
