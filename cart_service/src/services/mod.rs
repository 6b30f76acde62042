// cart_service/src/services/mod.rs

//! Clients for services owned by other teams.

pub mod product_catalog;

pub use product_catalog::HttpProductCatalog;
