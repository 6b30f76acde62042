// cart_core/examples/enrich_cart.rs

use async_trait::async_trait;
use cart_core::{
  CartError, CartService, InMemoryCartRepository, LookupError, ProductCatalog, ProductDetails, Quantity, UserId,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

// 1. A catalog backed by fixed JSON documents.
//    "mug" is slow enough to hit the lookup timeout; anything else is unknown.
struct DemoCatalog;

#[async_trait]
impl ProductCatalog for DemoCatalog {
  async fn fetch_product(&self, product_id: &str) -> Result<ProductDetails, LookupError> {
    match product_id {
      "widget" => ProductDetails::from_json(&json!({ "name": "Widget", "price": 9.99, "stock": 5 })),
      "lamp" => ProductDetails::from_json(&json!({
        "data": {
          "title": "Desk Lamp",
          "pricing": { "price": "24.50" },
          "images": [{ "url": "https://cdn.example.com/lamp.jpg" }],
          "inventory": { "available": 3 }
        }
      })),
      "mug" => {
        tokio::time::sleep(Duration::from_secs(2)).await;
        ProductDetails::from_json(&json!({ "name": "Mug" }))
      }
      _ => Err(LookupError::Status(404)),
    }
  }
}

#[tokio::main]
async fn main() -> Result<(), CartError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Cart Enrichment Example ---");

  // 2. Wire the service with an in-memory store and a short lookup timeout.
  let service = CartService::new(Arc::new(InMemoryCartRepository::new()), Arc::new(DemoCatalog))
    .with_lookup_timeout(Duration::from_millis(250));
  let user = UserId::parse(Some("demo-user"))?;

  // 3. Fill the cart. Adding "widget" twice merges into one line.
  service.add_item(&user, "widget", Quantity::new(1)?).await?;
  service.add_item(&user, "widget", Quantity::new(1)?).await?;
  service.add_item(&user, "lamp", Quantity::new(1)?).await?;
  service.add_item(&user, "mug", Quantity::new(4)?).await?;
  service.add_item(&user, "discontinued", Quantity::new(1)?).await?;

  // 4. Read it back. "mug" and "discontinued" come back as placeholders.
  let view = service.get_cart(&user).await?;
  for line in &view.items {
    info!(
      product_id = %line.product_id,
      quantity = line.quantity,
      name = %line.name,
      price = line.price,
      stock = line.stock,
      image = %line.image,
      "Cart line"
    );
  }

  match serde_json::to_string_pretty(&view) {
    Ok(body) => println!("{}", body),
    Err(e) => return Err(CartError::from(anyhow::Error::from(e))),
  }

  info!("--- Example Finished ---");
  Ok(())
}
