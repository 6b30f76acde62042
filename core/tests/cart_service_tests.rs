// tests/cart_service_tests.rs
mod common;

use async_trait::async_trait;
use cart_core::{
  AddOutcome, CartError, CartRecord, CartRepository, CartResult, CartService, InMemoryCartRepository, LookupError,
  Quantity, UserId, UNAVAILABLE_PRODUCT_NAME,
};
use common::*;
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory store that counts writes.
#[derive(Default)]
struct CountingRepository {
  inner: InMemoryCartRepository,
  saves: AtomicUsize,
}

impl CountingRepository {
  fn saves(&self) -> usize {
    self.saves.load(Ordering::SeqCst)
  }
}

#[async_trait]
impl CartRepository for CountingRepository {
  async fn find_by_user(&self, user_id: &UserId) -> CartResult<Option<CartRecord>> {
    self.inner.find_by_user(user_id).await
  }

  async fn save(&self, cart: &CartRecord) -> CartResult<()> {
    self.saves.fetch_add(1, Ordering::SeqCst);
    self.inner.save(cart).await
  }
}

fn counting_service(catalog: StubCatalog) -> (CartService, Arc<CountingRepository>) {
  let repository = Arc::new(CountingRepository::default());
  let service = CartService::new(repository.clone(), Arc::new(catalog));
  (service, repository)
}

fn widget_catalog() -> StubCatalog {
  StubCatalog::new()
    .found("p1", details("Widget", 9.99, 5))
    .found("p2", details("Gadget", 20.0, 1))
}

#[tokio::test]
#[serial]
async fn test_get_without_cart_returns_empty_view_and_creates_nothing() {
  setup_tracing();
  let (service, repository, _) = service_with(widget_catalog());

  let view = service.get_cart(&user("u1")).await.unwrap();

  assert_eq!(view.id, None);
  assert_eq!(view.user_id.as_str(), "u1");
  assert!(view.items.is_empty());
  assert!(repository.is_empty());
}

#[tokio::test]
#[serial]
async fn test_first_add_creates_cart_then_updates() {
  setup_tracing();
  let (service, repository, _) = service_with(widget_catalog());
  let u1 = user("u1");

  let (view, outcome) = service.add_item(&u1, "p1", qty(2)).await.unwrap();
  assert_eq!(outcome, AddOutcome::Created);
  assert!(view.id.is_some());
  assert_eq!(view.items.len(), 1);
  assert_eq!(view.items[0].name, "Widget");
  assert_eq!(view.items[0].quantity, 2);

  let (second, outcome) = service.add_item(&u1, "p2", qty(1)).await.unwrap();
  assert_eq!(outcome, AddOutcome::Updated);
  assert_eq!(second.id, view.id);
  assert_eq!(second.items.len(), 2);
  assert_eq!(second.items[1].product_id, "p2");
  assert_eq!(repository.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_adding_same_product_twice_merges_quantities() {
  setup_tracing();
  let (service, repository, _) = service_with(widget_catalog());
  let u1 = user("u1");

  service.add_item(&u1, "p1", qty(2)).await.unwrap();
  let (view, _) = service.add_item(&u1, "p1", qty(3)).await.unwrap();

  assert_eq!(view.items.len(), 1);
  assert_eq!(view.items[0].quantity, 5);

  let stored = repository.find_by_user(&u1).await.unwrap().unwrap();
  assert_eq!(stored.items.len(), 1);
  assert_eq!(stored.items[0].quantity.get(), 5);
}

#[tokio::test]
#[serial]
async fn test_add_trims_product_id_and_rejects_blank() {
  setup_tracing();
  let (service, repository) = counting_service(widget_catalog());
  let u1 = user("u1");

  let err = service.add_item(&u1, "   ", qty(1)).await.unwrap_err();
  assert!(matches!(err, CartError::Validation(_)));
  assert_eq!(repository.saves(), 0);

  let (view, _) = service.add_item(&u1, " p1 ", qty(1)).await.unwrap();
  assert_eq!(view.items[0].product_id, "p1");
}

#[tokio::test]
#[serial]
async fn test_add_overflow_is_rejected_and_cart_unchanged() {
  setup_tracing();
  let (service, repository) = counting_service(widget_catalog());
  let u1 = user("u1");

  service.add_item(&u1, "p1", Quantity::new(u32::MAX).unwrap()).await.unwrap();
  let err = service.add_item(&u1, "p1", qty(1)).await.unwrap_err();

  assert!(matches!(err, CartError::Validation(_)));
  assert_eq!(repository.saves(), 1);
  let stored = repository.find_by_user(&u1).await.unwrap().unwrap();
  assert_eq!(stored.items[0].quantity.get(), u32::MAX);
}

#[tokio::test]
#[serial]
async fn test_update_replaces_quantity_by_line_or_product_id() {
  setup_tracing();
  let (service, _, _) = service_with(widget_catalog());
  let u1 = user("u1");

  let (view, _) = service.add_item(&u1, "p1", qty(2)).await.unwrap();
  let line_id = view.items[0].id.clone();

  let by_line = service.update_item(&u1, &line_id, qty(7)).await.unwrap();
  assert_eq!(by_line.items[0].quantity, 7);

  let by_product = service.update_item(&u1, "p1", qty(1)).await.unwrap();
  assert_eq!(by_product.items[0].quantity, 1);
  assert_eq!(by_product.items[0].id, line_id);
}

#[tokio::test]
#[serial]
async fn test_update_missing_cart_or_line_is_not_found() {
  setup_tracing();
  let (service, repository) = counting_service(widget_catalog());
  let u1 = user("u1");

  let err = service.update_item(&u1, "p1", qty(1)).await.unwrap_err();
  assert!(matches!(err, CartError::NotFound(_)));

  service.add_item(&u1, "p1", qty(1)).await.unwrap();
  let err = service.update_item(&u1, "nope", qty(3)).await.unwrap_err();
  assert!(matches!(err, CartError::NotFound(_)));
  assert_eq!(repository.saves(), 1);
}

#[tokio::test]
#[serial]
async fn test_remove_line_and_missing_line_is_a_no_op() {
  setup_tracing();
  let (service, repository) = counting_service(widget_catalog());
  let u1 = user("u1");

  service.add_item(&u1, "p1", qty(1)).await.unwrap();
  service.add_item(&u1, "p2", qty(1)).await.unwrap();
  assert_eq!(repository.saves(), 2);

  let unchanged = service.remove_item(&u1, "missing").await.unwrap();
  assert_eq!(unchanged.items.len(), 2);
  assert_eq!(repository.saves(), 2);

  let view = service.remove_item(&u1, "p1").await.unwrap();
  assert_eq!(view.items.len(), 1);
  assert_eq!(view.items[0].product_id, "p2");
  assert_eq!(repository.saves(), 3);
}

#[tokio::test]
#[serial]
async fn test_remove_from_missing_cart_is_not_found() {
  setup_tracing();
  let (service, _, _) = service_with(widget_catalog());

  let err = service.remove_item(&user("nobody"), "p1").await.unwrap_err();
  assert!(matches!(err, CartError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn test_clear_keeps_record_and_empties_lines() {
  setup_tracing();
  let (service, repository, catalog) = service_with(widget_catalog());
  let u1 = user("u1");

  let (added, _) = service.add_item(&u1, "p1", qty(1)).await.unwrap();
  let calls_before = catalog.calls();

  let cleared = service.clear_cart(&u1).await.unwrap();
  assert_eq!(cleared.id, added.id);
  assert!(cleared.items.is_empty());
  assert_eq!(catalog.calls(), calls_before);

  let stored = repository.find_by_user(&u1).await.unwrap().unwrap();
  assert!(stored.items.is_empty());
}

#[tokio::test]
#[serial]
async fn test_clear_missing_cart_returns_empty_view_without_write() {
  setup_tracing();
  let (service, repository) = counting_service(widget_catalog());

  let view = service.clear_cart(&user("u9")).await.unwrap();

  assert_eq!(view.id, None);
  assert!(view.items.is_empty());
  assert_eq!(repository.saves(), 0);
}

#[tokio::test]
#[serial]
async fn test_carts_are_isolated_per_user() {
  setup_tracing();
  let (service, repository, _) = service_with(widget_catalog());

  service.add_item(&user("u1"), "p1", qty(1)).await.unwrap();
  service.add_item(&user("u2"), "p2", qty(4)).await.unwrap();

  let u1 = service.get_cart(&user("u1")).await.unwrap();
  let u2 = service.get_cart(&user("u2")).await.unwrap();
  assert_eq!(u1.items[0].product_id, "p1");
  assert_eq!(u2.items[0].product_id, "p2");
  assert_ne!(u1.id, u2.id);
  assert_eq!(repository.len(), 2);
}

#[tokio::test]
#[serial]
async fn test_mutation_succeeds_when_product_service_is_down() {
  setup_tracing();
  let catalog = StubCatalog::new().with("p1", StubResponse::Fail(LookupError::Transport("refused".into())));
  let (service, repository, _) = service_with(catalog);
  let u1 = user("u1");

  let (view, outcome) = service.add_item(&u1, "p1", qty(2)).await.unwrap();

  assert_eq!(outcome, AddOutcome::Created);
  assert_eq!(view.items[0].name, UNAVAILABLE_PRODUCT_NAME);
  assert_eq!(view.items[0].quantity, 2);
  assert_eq!(repository.len(), 1);
}
