// cart_core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Caller-facing failures of the cart operations.
///
/// Product lookup failures are not represented here: they never leave
/// [`crate::enrich`] (see [`LookupError`]).
#[derive(Debug, Error)]
pub enum CartError {
  #[error("User authentication required")]
  AuthenticationRequired,

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Not found: {0}")]
  NotFound(String),

  #[error("Unexpected cart failure. Source: {source}")]
  Unexpected {
    #[source]
    source: AnyhowError,
  },
}

impl CartError {
  pub fn validation(message: impl Into<String>) -> Self {
    CartError::Validation(message.into())
  }

  pub fn not_found(message: impl Into<String>) -> Self {
    CartError::NotFound(message.into())
  }
}

// Store and infrastructure errors arrive as anyhow errors.
impl From<AnyhowError> for CartError {
  fn from(err: AnyhowError) -> Self {
    // Re-wrapping a CartError would turn a 404/400 into a 500.
    match err.downcast::<CartError>() {
      Ok(cart_err) => cart_err,
      Err(source) => CartError::Unexpected { source },
    }
  }
}

/// Why a single product lookup failed. Always recovered locally by enrichment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
  #[error("Product service unreachable: {0}")]
  Transport(String),

  #[error("Product service answered with status {0}")]
  Status(u16),

  #[error("Product lookup timed out after {0} ms")]
  Timeout(u128),

  #[error("Malformed product payload: {0}")]
  Malformed(String),
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
