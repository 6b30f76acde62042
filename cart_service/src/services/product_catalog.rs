// cart_service/src/services/product_catalog.rs

use async_trait::async_trait;
use cart_core::{LookupError, ProductCatalog, ProductDetails};
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::errors::{AppError, Result};

/// Product service client: `GET {base}/api/products/{productId}`.
///
/// Only the connect phase is bounded here. The per-lookup deadline is applied
/// by the enrichment step around each call.
#[derive(Debug, Clone)]
pub struct HttpProductCatalog {
  client: Client,
  base_url: Url,
}

impl HttpProductCatalog {
  pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self> {
    let base_url =
      Url::parse(base_url).map_err(|e| AppError::Config(format!("Invalid PRODUCT_SERVICE_URL '{}': {}", base_url, e)))?;
    if base_url.cannot_be_a_base() {
      return Err(AppError::Config(format!("PRODUCT_SERVICE_URL '{}' cannot be used as a base URL", base_url)));
    }

    let client = Client::builder()
      .connect_timeout(connect_timeout)
      .build()
      .map_err(|e| AppError::Internal(format!("Failed to build product service client: {}", e)))?;

    Ok(Self { client, base_url })
  }

  /// The product id becomes a single, percent-encoded path segment.
  fn product_url(&self, product_id: &str) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
      segments.pop_if_empty().extend(["api", "products", product_id]);
    }
    url
  }
}

#[async_trait]
impl ProductCatalog for HttpProductCatalog {
  #[instrument(name = "catalog::fetch_product", skip(self))]
  async fn fetch_product(&self, product_id: &str) -> std::result::Result<ProductDetails, LookupError> {
    let url = self.product_url(product_id);
    let response = self
      .client
      .get(url)
      .send()
      .await
      .map_err(|e| LookupError::Transport(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
      return Err(LookupError::Status(status.as_u16()));
    }

    let body: Value = response.json().await.map_err(|e| LookupError::Malformed(e.to_string()))?;
    debug!("Product payload received.");
    ProductDetails::from_json(&body)
  }
}
