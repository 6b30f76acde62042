// cart_core/src/store/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::CartRepository;
use crate::error::CartResult;
use crate::model::{CartRecord, UserId};

/// Process-local store. Used when no database is configured and in tests.
///
/// Lock guards are never held across an `.await`.
#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
  carts: RwLock<HashMap<UserId, CartRecord>>,
}

impl InMemoryCartRepository {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.carts.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.carts.read().is_empty()
  }
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
  async fn find_by_user(&self, user_id: &UserId) -> CartResult<Option<CartRecord>> {
    Ok(self.carts.read().get(user_id).cloned())
  }

  async fn save(&self, cart: &CartRecord) -> CartResult<()> {
    self.carts.write().insert(cart.user_id.clone(), cart.clone());
    Ok(())
  }
}
