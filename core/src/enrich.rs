// cart_core/src/enrich.rs

//! Best-effort join of stored cart lines with live product data.
//!
//! One lookup per line is issued concurrently and all of them are awaited
//! (no short-circuit). Each lookup is bounded by its own timeout. A failed
//! lookup becomes a placeholder line; nothing here returns an error.
//! Output position `i` always corresponds to input line `i`.

use futures_util::future::join_all;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::catalog::ProductCatalog;
use crate::error::LookupError;
use crate::model::{CartLine, EnrichedCartLine};

pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_millis(3000);

#[instrument(name = "enrich::cart_lines", skip(catalog, lines), fields(line_count = lines.len()))]
pub async fn enrich_lines(
  catalog: &dyn ProductCatalog,
  lines: &[CartLine],
  lookup_timeout: Duration,
) -> Vec<EnrichedCartLine> {
  let lookups = lines.iter().map(|line| enrich_line(catalog, line, lookup_timeout));
  let enriched = join_all(lookups).await;

  let degraded = enriched.iter().filter(|(_, ok)| !*ok).count();
  if degraded > 0 {
    warn!(degraded, total = lines.len(), "Cart enriched with placeholder lines.");
  } else {
    debug!(total = lines.len(), "Cart enriched.");
  }

  enriched.into_iter().map(|(line, _)| line).collect()
}

/// Returns the enriched line and whether the lookup succeeded.
async fn enrich_line(
  catalog: &dyn ProductCatalog,
  line: &CartLine,
  lookup_timeout: Duration,
) -> (EnrichedCartLine, bool) {
  let outcome = match tokio::time::timeout(lookup_timeout, catalog.fetch_product(&line.product_id)).await {
    Ok(result) => result,
    Err(_) => Err(LookupError::Timeout(lookup_timeout.as_millis())),
  };

  match outcome {
    Ok(details) => (EnrichedCartLine::from_details(line, details), true),
    Err(e) => {
      warn!(product_id = %line.product_id, error = %e, "Product lookup failed; using placeholder.");
      (EnrichedCartLine::placeholder(line), false)
    }
  }
}
