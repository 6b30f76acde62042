// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use async_trait::async_trait;
use cart_core::{CartService, InMemoryCartRepository, LookupError, ProductCatalog, ProductDetails, Quantity, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::Level;

// --- Stub product service ---

#[derive(Clone, Debug)]
pub enum StubResponse {
  Found(ProductDetails),
  Fail(LookupError),
  /// Answers after the delay.
  Slow(Duration, Box<StubResponse>),
  /// Never answers.
  Hang,
}

/// Canned catalog; unknown ids answer with a 404 status error.
#[derive(Default)]
pub struct StubCatalog {
  responses: HashMap<String, StubResponse>,
  calls: AtomicUsize,
}

impl StubCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, product_id: &str, response: StubResponse) -> Self {
    self.responses.insert(product_id.to_string(), response);
    self
  }

  pub fn found(self, product_id: &str, details: ProductDetails) -> Self {
    self.with(product_id, StubResponse::Found(details))
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl ProductCatalog for StubCatalog {
  async fn fetch_product(&self, product_id: &str) -> Result<ProductDetails, LookupError> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    let mut response = self.responses.get(product_id).cloned().unwrap_or(StubResponse::Fail(LookupError::Status(404)));
    loop {
      match response {
        StubResponse::Found(details) => return Ok(details),
        StubResponse::Fail(e) => return Err(e),
        StubResponse::Slow(delay, next) => {
          tokio::time::sleep(delay).await;
          response = *next;
        }
        StubResponse::Hang => std::future::pending::<()>().await,
      }
    }
  }
}

// --- Fixtures ---

pub fn user(id: &str) -> UserId {
  UserId::parse(Some(id)).unwrap()
}

pub fn qty(n: u32) -> Quantity {
  Quantity::new(n).unwrap()
}

pub fn details(name: &str, price: f64, stock: u64) -> ProductDetails {
  ProductDetails {
    name: Some(name.to_string()),
    price: Some(price),
    stock: Some(stock),
    ..ProductDetails::default()
  }
}

/// Service over a fresh in-memory store. The repository is returned so tests
/// can inspect what was persisted.
pub fn service_with(catalog: StubCatalog) -> (CartService, Arc<InMemoryCartRepository>, Arc<StubCatalog>) {
  let repository = Arc::new(InMemoryCartRepository::new());
  let catalog = Arc::new(catalog);
  let service = CartService::new(repository.clone(), catalog.clone()).with_lookup_timeout(Duration::from_millis(500));
  (service, repository, catalog)
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
