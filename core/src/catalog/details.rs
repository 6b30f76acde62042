// cart_core/src/catalog/details.rs

//! Tolerant projection of product-service payloads.
//!
//! The product service is not under our control and its documents come in
//! several shapes, so every field is optional and resolved by precedence:
//!
//! | field | precedence |
//! |---|---|
//! | name | `name` → `title` |
//! | description | `description` |
//! | price | `pricing.price` → `price` |
//! | image | `images[0]` (string or `{url}`) → `image` → `thumbnail` |
//! | stock | `inventory.quantity` → `inventory.available` → `stock` |
//!
//! Fields that are absent or unusable stay `None`; defaults are applied when
//! the enriched line is built.

use serde_json::{Map, Value};

use crate::error::LookupError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
  pub name: Option<String>,
  pub description: Option<String>,
  pub price: Option<f64>,
  pub image: Option<String>,
  pub stock: Option<u64>,
}

impl ProductDetails {
  /// Extracts details from a decoded response body. A body that is not a
  /// JSON object (after unwrapping a `data` / `product` envelope) is malformed.
  pub fn from_json(body: &Value) -> Result<Self, LookupError> {
    let product = unwrap_envelope(body)
      .ok_or_else(|| LookupError::Malformed("expected a JSON object".to_string()))?;

    Ok(Self {
      name: non_empty_str(product.get("name")).or_else(|| non_empty_str(product.get("title"))),
      description: non_empty_str(product.get("description")),
      price: nested(product, "pricing", "price")
        .and_then(number_like)
        .or_else(|| product.get("price").and_then(number_like))
        .map(|p| if p.is_finite() && p > 0.0 { p } else { 0.0 }),
      image: first_image(product.get("images"))
        .or_else(|| non_empty_str(product.get("image")))
        .or_else(|| non_empty_str(product.get("thumbnail"))),
      stock: nested(product, "inventory", "quantity")
        .and_then(number_like)
        .or_else(|| nested(product, "inventory", "available").and_then(number_like))
        .or_else(|| product.get("stock").and_then(number_like))
        .map(clamp_stock),
    })
  }
}

fn unwrap_envelope(body: &Value) -> Option<&Map<String, Value>> {
  let outer = body.as_object()?;
  for key in ["data", "product"] {
    if let Some(inner) = outer.get(key).and_then(Value::as_object) {
      return Some(inner);
    }
  }
  Some(outer)
}

fn nested<'a>(obj: &'a Map<String, Value>, outer: &str, inner: &str) -> Option<&'a Value> {
  obj.get(outer)?.as_object()?.get(inner)
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
  match value? {
    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
    _ => None,
  }
}

/// Numbers, or strings holding a number ("9.99").
fn number_like(value: &Value) -> Option<f64> {
  match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  }
}

fn clamp_stock(raw: f64) -> u64 {
  if raw.is_finite() && raw > 0.0 {
    raw.floor() as u64
  } else {
    0
  }
}

fn first_image(images: Option<&Value>) -> Option<String> {
  match images?.as_array()?.first()? {
    Value::String(url) if !url.trim().is_empty() => Some(url.clone()),
    Value::Object(obj) => non_empty_str(obj.get("url")),
    _ => None,
  }
}
