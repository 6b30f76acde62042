// cart_core/src/model/mod.rs

//! Stored cart records and the enriched views built from them.

pub mod cart;
pub mod view;

pub use cart::{CartLine, CartRecord, LineChange, Quantity, UserId};
pub use view::{
  CartView, EnrichedCartLine, PLACEHOLDER_IMAGE, UNAVAILABLE_PRODUCT_NAME, UNKNOWN_PRODUCT_NAME,
};
