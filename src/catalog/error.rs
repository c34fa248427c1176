use thiserror::Error;

/// Errors that can occur during catalog operations.
///
/// All variants are local, recoverable conditions: the UI layer displays
/// them and continues, except [`CatalogError::ActorCommunicationError`],
/// which means the catalog service itself is gone.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(u32),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Invalid price range: min {min} exceeds max {max}")]
    InvalidPriceRange { min: f64, max: f64 },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
