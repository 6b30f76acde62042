// cart_service/src/web/handlers/mod.rs

// Declare handler modules
pub mod cart_handlers;
