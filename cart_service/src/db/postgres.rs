// cart_service/src/db/postgres.rs

use anyhow::Context;
use async_trait::async_trait;
use cart_core::{CartRecord, CartRepository, CartResult, UserId};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::models::CartRow;

const CREATE_CARTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS carts (
  user_id    TEXT PRIMARY KEY,
  id         UUID NOT NULL,
  items      JSONB NOT NULL DEFAULT '[]'::jsonb,
  created_at TIMESTAMPTZ NOT NULL,
  updated_at TIMESTAMPTZ NOT NULL
)
"#;

/// Postgres-backed cart store: one row per user, lines kept as JSONB.
#[derive(Clone)]
pub struct PgCartRepository {
  pool: PgPool,
}

impl PgCartRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Creates the `carts` table if it does not exist yet.
  pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_CARTS_TABLE).execute(&self.pool).await?;
    debug!("carts table ready");
    Ok(())
  }
}

#[async_trait]
impl CartRepository for PgCartRepository {
  #[instrument(name = "db::find_cart", skip(self), fields(user_id = %user_id))]
  async fn find_by_user(&self, user_id: &UserId) -> CartResult<Option<CartRecord>> {
    let row: Option<CartRow> =
      sqlx::query_as("SELECT id, items, created_at, updated_at FROM carts WHERE user_id = $1")
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("loading cart for user {}", user_id))?;

    Ok(row.map(|row| row.into_record(user_id)))
  }

  #[instrument(name = "db::save_cart", skip(self, cart), fields(user_id = %cart.user_id, lines = cart.items.len()))]
  async fn save(&self, cart: &CartRecord) -> CartResult<()> {
    let id = Uuid::parse_str(&cart.id).with_context(|| format!("cart id {} is not a UUID", cart.id))?;

    sqlx::query(
      r#"
      INSERT INTO carts (user_id, id, items, created_at, updated_at)
      VALUES ($1, $2, $3, $4, $5)
      ON CONFLICT (user_id) DO UPDATE
      SET items = EXCLUDED.items, updated_at = EXCLUDED.updated_at
      "#,
    )
    .bind(cart.user_id.as_str())
    .bind(id)
    .bind(Json(&cart.items))
    .bind(cart.created_at)
    .bind(cart.updated_at)
    .execute(&self.pool)
    .await
    .with_context(|| format!("saving cart {}", cart.id))?;

    Ok(())
  }
}
