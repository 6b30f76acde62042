// cart_core/src/lib.rs

//! Cart domain for the marketplace cart service.
//!
//! A user's cart is stored as an ordered list of `(productId, quantity)`
//! lines. Reads and mutations return a denormalized view in which each line
//! is joined with live data from the product service:
//!  - Lookups run concurrently, one per line, each under its own timeout.
//!  - A failed lookup degrades that single line to a placeholder; the view
//!    is always produced.
//!  - Output order matches the stored line order.
//!
//! The crate has no web framework dependency. Persistence and the product
//! service are reached through the [`CartRepository`] and [`ProductCatalog`]
//! traits.

pub mod catalog;
pub mod enrich;
pub mod error;
pub mod model;
pub mod service;
pub mod store;
pub mod validation;

// --- Re-exports for the Public API ---

pub use crate::catalog::{ProductCatalog, ProductDetails};
pub use crate::enrich::{enrich_lines, DEFAULT_LOOKUP_TIMEOUT};
pub use crate::error::{CartError, CartResult, LookupError};
pub use crate::model::{
  CartLine, CartRecord, CartView, EnrichedCartLine, LineChange, Quantity, UserId, PLACEHOLDER_IMAGE,
  UNAVAILABLE_PRODUCT_NAME, UNKNOWN_PRODUCT_NAME,
};
pub use crate::service::{AddOutcome, CartService};
pub use crate::store::{CartRepository, InMemoryCartRepository};
