// cart_service/src/models/cart_row.rs

use cart_core::{CartLine, CartRecord, UserId};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One row of the `carts` table, minus the `user_id` key. Lines are stored as a
/// JSONB array in cart order.
#[derive(Debug, Clone, FromRow)]
pub struct CartRow {
  pub id: Uuid,
  pub items: Json<Vec<CartLine>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl CartRow {
  /// `user_id` is the key the row was looked up by.
  pub fn into_record(self, user_id: &UserId) -> CartRecord {
    CartRecord {
      id: self.id.to_string(),
      user_id: user_id.clone(),
      items: self.items.0,
      created_at: self.created_at,
      updated_at: self.updated_at,
    }
  }
}
