// cart_core/src/model/view.rs

//! Response-only shapes. Recomputed on every read, never persisted.

use serde::Serialize;

use super::cart::{CartLine, CartRecord, UserId};
use crate::catalog::ProductDetails;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder-product.jpg";
pub const UNKNOWN_PRODUCT_NAME: &str = "Unknown Product";
pub const UNAVAILABLE_PRODUCT_NAME: &str = "Product unavailable";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedCartLine {
  pub id: String,
  pub product_id: String,
  pub quantity: u32,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub image: String,
  pub stock: u64,
}

impl EnrichedCartLine {
  /// Joins a stored line with whatever the product service returned.
  pub fn from_details(line: &CartLine, details: ProductDetails) -> Self {
    Self {
      id: line.id.clone(),
      product_id: line.product_id.clone(),
      quantity: line.quantity.get(),
      name: details.name.unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string()),
      description: details.description.unwrap_or_default(),
      price: details.price.unwrap_or(0.0),
      image: details.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
      stock: details.stock.unwrap_or(0),
    }
  }

  /// The degraded line used when the lookup failed.
  pub fn placeholder(line: &CartLine) -> Self {
    Self {
      id: line.id.clone(),
      product_id: line.product_id.clone(),
      quantity: line.quantity.get(),
      name: UNAVAILABLE_PRODUCT_NAME.to_string(),
      description: String::new(),
      price: 0.0,
      image: PLACEHOLDER_IMAGE.to_string(),
      stock: 0,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
  /// `None` when the user has no stored cart.
  pub id: Option<String>,
  pub user_id: UserId,
  pub items: Vec<EnrichedCartLine>,
}

impl CartView {
  pub fn empty(user_id: UserId) -> Self {
    Self {
      id: None,
      user_id,
      items: Vec::new(),
    }
  }

  pub fn from_record(record: &CartRecord, items: Vec<EnrichedCartLine>) -> Self {
    Self {
      id: Some(record.id.clone()),
      user_id: record.user_id.clone(),
      items,
    }
  }
}
