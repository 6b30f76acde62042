// cart_core/src/model/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{CartError, CartResult};

/// Opaque identity handed to us by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
  /// A missing or blank identity means the caller is not authenticated.
  pub fn parse(raw: Option<&str>) -> CartResult<Self> {
    match raw.map(str::trim) {
      Some(value) if !value.is_empty() => Ok(UserId(value.to_string())),
      _ => Err(CartError::AuthenticationRequired),
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// A line quantity. Zero is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
  pub fn new(value: u32) -> CartResult<Self> {
    if value == 0 {
      return Err(CartError::validation("Quantity must be at least 1."));
    }
    Ok(Quantity(value))
  }

  pub fn get(self) -> u32 {
    self.0
  }

  pub fn checked_add(self, other: Quantity) -> CartResult<Self> {
    self
      .0
      .checked_add(other.0)
      .map(Quantity)
      .ok_or_else(|| CartError::validation("Resulting quantity is too large."))
  }
}

impl TryFrom<u32> for Quantity {
  type Error = CartError;

  fn try_from(value: u32) -> Result<Self, Self::Error> {
    Quantity::new(value)
  }
}

impl From<Quantity> for u32 {
  fn from(q: Quantity) -> Self {
    q.0
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub id: String,
  pub product_id: String,
  pub quantity: Quantity,
}

impl CartLine {
  pub fn new(product_id: impl Into<String>, quantity: Quantity) -> Self {
    Self {
      id: Uuid::new_v4().to_string(),
      product_id: product_id.into(),
      quantity,
    }
  }
}

/// Result of [`CartRecord::add_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
  Appended,
  Incremented,
}

/// A user's stored cart: one record per user, product ids unique within `items`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
  pub id: String,
  pub user_id: UserId,
  pub items: Vec<CartLine>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl CartRecord {
  pub fn new(user_id: UserId) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4().to_string(),
      user_id,
      items: Vec::new(),
      created_at: now,
      updated_at: now,
    }
  }

  /// Resolves `item_id` to one line: a line id match wins over a product id match.
  fn line_index(&self, item_id: &str) -> Option<usize> {
    self
      .items
      .iter()
      .position(|line| line.id == item_id)
      .or_else(|| self.items.iter().position(|line| line.product_id == item_id))
  }

  /// Increments an existing line for `product_id` or appends a new one.
  /// On overflow the record is left untouched.
  pub fn add_line(&mut self, product_id: &str, quantity: Quantity) -> CartResult<LineChange> {
    let change = match self.items.iter_mut().find(|line| line.product_id == product_id) {
      Some(line) => {
        line.quantity = line.quantity.checked_add(quantity)?;
        LineChange::Incremented
      }
      None => {
        self.items.push(CartLine::new(product_id, quantity));
        LineChange::Appended
      }
    };
    self.touch();
    Ok(change)
  }

  /// Replaces the quantity of the addressed line. Not additive.
  pub fn set_quantity(&mut self, item_id: &str, quantity: Quantity) -> CartResult<()> {
    let index = self
      .line_index(item_id)
      .ok_or_else(|| CartError::not_found(format!("Item {} is not in the cart.", item_id)))?;
    self.items[index].quantity = quantity;
    self.touch();
    Ok(())
  }

  /// Returns `false` when no line matched; the record is then unchanged.
  pub fn remove_line(&mut self, item_id: &str) -> bool {
    match self.line_index(item_id) {
      Some(index) => {
        self.items.remove(index);
        self.touch();
        true
      }
      None => false,
    }
  }

  pub fn clear(&mut self) {
    self.items.clear();
    self.touch();
  }

  fn touch(&mut self) {
    self.updated_at = Utc::now();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn qty(n: u32) -> Quantity {
    Quantity::new(n).unwrap()
  }

  fn cart() -> CartRecord {
    CartRecord::new(UserId::parse(Some("u1")).unwrap())
  }

  #[test]
  fn user_id_rejects_missing_and_blank() {
    assert!(matches!(UserId::parse(None), Err(CartError::AuthenticationRequired)));
    assert!(matches!(UserId::parse(Some("   ")), Err(CartError::AuthenticationRequired)));
    assert_eq!(UserId::parse(Some(" u1 ")).unwrap().as_str(), "u1");
  }

  #[test]
  fn quantity_zero_is_rejected() {
    assert!(matches!(Quantity::new(0), Err(CartError::Validation(_))));
    assert!(serde_json::from_str::<Quantity>("0").is_err());
    assert_eq!(serde_json::from_str::<Quantity>("3").unwrap().get(), 3);
  }

  #[test]
  fn adding_same_product_twice_increments_single_line() {
    let mut c = cart();
    assert_eq!(c.add_line("p1", qty(2)).unwrap(), LineChange::Appended);
    assert_eq!(c.add_line("p1", qty(3)).unwrap(), LineChange::Incremented);
    assert_eq!(c.items.len(), 1);
    assert_eq!(c.items[0].quantity.get(), 5);
  }

  #[test]
  fn add_overflow_leaves_line_unchanged() {
    let mut c = cart();
    c.add_line("p1", qty(u32::MAX)).unwrap();
    assert!(matches!(c.add_line("p1", qty(1)), Err(CartError::Validation(_))));
    assert_eq!(c.items[0].quantity.get(), u32::MAX);
  }

  #[test]
  fn set_quantity_replaces_and_addresses_by_line_or_product_id() {
    let mut c = cart();
    c.add_line("p1", qty(2)).unwrap();
    let line_id = c.items[0].id.clone();

    c.set_quantity("p1", qty(7)).unwrap();
    assert_eq!(c.items[0].quantity.get(), 7);

    c.set_quantity(&line_id, qty(1)).unwrap();
    assert_eq!(c.items[0].quantity.get(), 1);

    assert!(matches!(c.set_quantity("nope", qty(1)), Err(CartError::NotFound(_))));
  }

  #[test]
  fn remove_missing_line_is_a_no_op() {
    let mut c = cart();
    c.add_line("p1", qty(1)).unwrap();
    let before = c.clone();
    assert!(!c.remove_line("p9"));
    assert_eq!(c, before);
    assert!(c.remove_line("p1"));
    assert!(c.items.is_empty());
  }

  #[test]
  fn line_id_match_wins_over_product_id_match() {
    let mut c = cart();
    c.add_line("p1", qty(1)).unwrap();
    let first_id = c.items[0].id.clone();
    // A product whose id collides with the first line's id.
    c.add_line(&first_id, qty(4)).unwrap();

    c.set_quantity(&first_id, qty(9)).unwrap();
    assert_eq!(c.items[0].quantity.get(), 9);
    assert_eq!(c.items[1].quantity.get(), 4);

    assert!(c.remove_line(&first_id));
    assert_eq!(c.items.len(), 1);
    assert_eq!(c.items[0].product_id, first_id);

    // With the line gone, the same id now addresses the product.
    assert!(c.remove_line(&first_id));
    assert!(c.items.is_empty());
  }

  #[test]
  fn record_serializes_as_camel_case_json() {
    let mut c = cart();
    c.add_line("p1", qty(2)).unwrap();
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["userId"], "u1");
    assert_eq!(json["items"][0]["productId"], "p1");
    assert_eq!(json["items"][0]["quantity"], 2);
  }
}
