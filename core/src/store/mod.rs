// cart_core/src/store/mod.rs

//! Keyed cart persistence.
//!
//! A repository maps a user id to at most one [`CartRecord`]. `save` writes the
//! whole record (all lines) and overwrites whatever was stored before; there is
//! no version check, so two concurrent read-modify-write cycles for the same
//! user resolve as last-writer-wins.

pub mod memory;

pub use memory::InMemoryCartRepository;

use async_trait::async_trait;

use crate::error::CartResult;
use crate::model::{CartRecord, UserId};

#[async_trait]
pub trait CartRepository: Send + Sync {
  async fn find_by_user(&self, user_id: &UserId) -> CartResult<Option<CartRecord>>;

  /// Inserts or replaces the record keyed by `cart.user_id`.
  async fn save(&self, cart: &CartRecord) -> CartResult<()>;
}
