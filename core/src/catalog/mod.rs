// cart_core/src/catalog/mod.rs

//! The product lookup collaborator.
//!
//! Implementations talk to the product service (see the HTTP client in the
//! `cart_service` binary). Callers must treat every implementation as slow
//! and unreliable; [`crate::enrich`] is the only consumer and recovers from
//! every [`LookupError`].

pub mod details;

pub use details::ProductDetails;

use async_trait::async_trait;

use crate::error::LookupError;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
  /// Fetches display data for one product.
  async fn fetch_product(&self, product_id: &str) -> Result<ProductDetails, LookupError>;
}
