// cart_core/src/service.rs

//! Cart mutations and reads.
//!
//! Every operation follows the same steps: load the user's record, apply the
//! change in memory, save the full line list, then enrich the result. Loading
//! and saving are separate repository calls (see [`crate::store`] for the
//! consequences under concurrent writes).

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::catalog::ProductCatalog;
use crate::enrich::{enrich_lines, DEFAULT_LOOKUP_TIMEOUT};
use crate::error::{CartError, CartResult};
use crate::model::{CartRecord, CartView, Quantity, UserId};
use crate::store::CartRepository;

/// Whether an add created the user's cart or changed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
  Created,
  Updated,
}

#[derive(Clone)]
pub struct CartService {
  repository: Arc<dyn CartRepository>,
  catalog: Arc<dyn ProductCatalog>,
  lookup_timeout: Duration,
}

impl CartService {
  pub fn new(repository: Arc<dyn CartRepository>, catalog: Arc<dyn ProductCatalog>) -> Self {
    Self {
      repository,
      catalog,
      lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
    }
  }

  pub fn with_lookup_timeout(mut self, lookup_timeout: Duration) -> Self {
    self.lookup_timeout = lookup_timeout;
    self
  }

  /// A user without a stored cart gets an empty view; nothing is created.
  #[instrument(name = "cart::get", skip(self), fields(user_id = %user_id))]
  pub async fn get_cart(&self, user_id: &UserId) -> CartResult<CartView> {
    match self.repository.find_by_user(user_id).await? {
      Some(cart) => Ok(self.view(&cart).await),
      None => Ok(CartView::empty(user_id.clone())),
    }
  }

  #[instrument(name = "cart::add_item", skip(self), fields(user_id = %user_id, quantity = quantity.get()))]
  pub async fn add_item(
    &self,
    user_id: &UserId,
    product_id: &str,
    quantity: Quantity,
  ) -> CartResult<(CartView, AddOutcome)> {
    let product_id = product_id.trim();
    if product_id.is_empty() {
      return Err(CartError::validation("productId is required and must be a non-empty string."));
    }

    let (mut cart, outcome) = match self.repository.find_by_user(user_id).await? {
      Some(cart) => (cart, AddOutcome::Updated),
      None => (CartRecord::new(user_id.clone()), AddOutcome::Created),
    };

    let change = cart.add_line(product_id, quantity)?;
    self.repository.save(&cart).await?;

    info!(cart_id = %cart.id, ?outcome, ?change, "Item added to cart.");
    Ok((self.view(&cart).await, outcome))
  }

  #[instrument(name = "cart::update_item", skip(self), fields(user_id = %user_id, quantity = quantity.get()))]
  pub async fn update_item(&self, user_id: &UserId, item_id: &str, quantity: Quantity) -> CartResult<CartView> {
    let mut cart = self.require_cart(user_id).await?;
    cart.set_quantity(item_id, quantity)?;
    self.repository.save(&cart).await?;

    info!(cart_id = %cart.id, "Cart item quantity replaced.");
    Ok(self.view(&cart).await)
  }

  /// Removing a line that is not in the cart leaves the cart as it is.
  #[instrument(name = "cart::remove_item", skip(self), fields(user_id = %user_id))]
  pub async fn remove_item(&self, user_id: &UserId, item_id: &str) -> CartResult<CartView> {
    let mut cart = self.require_cart(user_id).await?;
    if cart.remove_line(item_id) {
      self.repository.save(&cart).await?;
      info!(cart_id = %cart.id, "Item removed from cart.");
    } else {
      info!(cart_id = %cart.id, "Item not in cart; nothing removed.");
    }
    Ok(self.view(&cart).await)
  }

  /// Empties the cart but keeps the record. Clearing a missing cart is not an error.
  #[instrument(name = "cart::clear", skip(self), fields(user_id = %user_id))]
  pub async fn clear_cart(&self, user_id: &UserId) -> CartResult<CartView> {
    match self.repository.find_by_user(user_id).await? {
      Some(mut cart) => {
        cart.clear();
        self.repository.save(&cart).await?;
        info!(cart_id = %cart.id, "Cart cleared.");
        Ok(CartView::from_record(&cart, Vec::new()))
      }
      None => Ok(CartView::empty(user_id.clone())),
    }
  }

  async fn require_cart(&self, user_id: &UserId) -> CartResult<CartRecord> {
    self.repository.find_by_user(user_id).await?.ok_or_else(|| {
      warn!(user_id = %user_id, "No cart stored for user.");
      CartError::not_found(format!("Cart for user {} not found.", user_id))
    })
  }

  async fn view(&self, cart: &CartRecord) -> CartView {
    let items = enrich_lines(self.catalog.as_ref(), &cart.items, self.lookup_timeout).await;
    CartView::from_record(cart, items)
  }
}
