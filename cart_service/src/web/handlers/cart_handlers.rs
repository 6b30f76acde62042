// cart_service/src/web/handlers/cart_handlers.rs

use actix_web::{web, FromRequest, HttpRequest, HttpResponse};
use cart_core::{validation, AddOutcome, UserId};
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::config::DEFAULT_AUTH_USER_HEADER;
use crate::errors::AppError;
use crate::state::AppState;

// --- Caller identity ---
// Authentication happens upstream; this extractor only reads the identity
// header that layer sets. A missing or blank value is a 401.
#[derive(Debug)]
pub struct AuthenticatedUser {
  pub user_id: UserId,
}

impl FromRequest for AuthenticatedUser {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let raw = match req.app_data::<web::Data<AppState>>() {
      Some(state) => req.headers().get(&state.config.auth_user_header),
      None => req.headers().get(DEFAULT_AUTH_USER_HEADER),
    }
    .and_then(|value| value.to_str().ok());

    let result = UserId::parse(raw).map(|user_id| AuthenticatedUser { user_id }).map_err(|e| {
      warn!(path = %req.path(), "AuthenticatedUser extractor: missing or blank identity header.");
      AppError::from(e)
    });
    futures_util::future::ready(result)
  }
}

// --- Request DTOs ---
// Fields stay untyped so that wrong types are reported as validation errors
// with a field-specific message.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub product_id: Option<Value>,
  pub quantity: Option<Value>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateCartItemRequestPayload {
  pub quantity: Option<Value>,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let view = app_state.cart_service.get_cart(&auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, req_payload, auth_user),
    fields(user_id = %auth_user.user_id)
)]
pub async fn add_to_cart_handler(
  auth_user: AuthenticatedUser, // First, so a missing identity wins over a bad body
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let product_id = validation::product_id(req_payload.product_id.as_ref())?;
  let quantity = validation::quantity(req_payload.quantity.as_ref())?;

  let (view, outcome) = app_state
    .cart_service
    .add_item(&auth_user.user_id, &product_id, quantity)
    .await?;

  info!(product_id = %product_id, quantity = quantity.get(), ?outcome, "Add to cart successful.");
  match outcome {
    AddOutcome::Created => Ok(HttpResponse::Created().json(view)),
    AddOutcome::Updated => Ok(HttpResponse::Ok().json(view)),
  }
}

#[instrument(
    name = "handler::update_cart_item",
    skip(app_state, path, req_payload, auth_user),
    fields(user_id = %auth_user.user_id, item_id = %path.as_str())
)]
pub async fn update_cart_item_handler(
  auth_user: AuthenticatedUser,
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<UpdateCartItemRequestPayload>,
) -> Result<HttpResponse, AppError> {
  // Quantity is checked before the cart is looked up.
  let quantity = validation::quantity(req_payload.quantity.as_ref())?;
  let view = app_state
    .cart_service
    .update_item(&auth_user.user_id, path.as_str(), quantity)
    .await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(
    name = "handler::remove_cart_item",
    skip(app_state, path, auth_user),
    fields(user_id = %auth_user.user_id, item_id = %path.as_str())
)]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let view = app_state.cart_service.remove_item(&auth_user.user_id, path.as_str()).await?;
  Ok(HttpResponse::Ok().json(view))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.user_id))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
  let view = app_state.cart_service.clear_cart(&auth_user.user_id).await?;
  Ok(HttpResponse::Ok().json(view))
}
