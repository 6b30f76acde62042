// cart_service/src/models/mod.rs

//! Contains data structures representing database rows.

pub mod cart_row;

pub use cart_row::CartRow;
