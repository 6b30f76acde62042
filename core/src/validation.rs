// cart_core/src/validation.rs

//! Checks on raw request fields. Request bodies are kept as loose JSON so
//! that a wrong type is reported as a validation error, not a decode error.

use serde_json::Value;

use crate::error::{CartError, CartResult};
use crate::model::Quantity;

/// `productId` must be a non-empty string.
pub fn product_id(raw: Option<&Value>) -> CartResult<String> {
  match raw {
    Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
    _ => Err(CartError::validation("productId is required and must be a non-empty string.")),
  }
}

/// `quantity` must be a finite whole number between 1 and `u32::MAX`.
pub fn quantity(raw: Option<&Value>) -> CartResult<Quantity> {
  let invalid = || CartError::validation("quantity must be a whole number of at least 1.");
  let number = match raw {
    Some(Value::Number(n)) => n,
    _ => return Err(invalid()),
  };
  if let Some(q) = number.as_u64() {
    let q = u32::try_from(q).map_err(|_| invalid())?;
    return Quantity::new(q).map_err(|_| invalid());
  }
  // 2.0 is accepted, 2.5 and negatives are not.
  match number.as_f64() {
    Some(f) if f.is_finite() && f.fract() == 0.0 && f >= 1.0 && f <= f64::from(u32::MAX) => {
      Quantity::new(f as u32).map_err(|_| invalid())
    }
    _ => Err(invalid()),
  }
}
