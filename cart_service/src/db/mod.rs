// cart_service/src/db/mod.rs

pub mod postgres;

pub use postgres::PgCartRepository;
