use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::catalog::{CatalogError, CatalogRequest, StockAlert};
use crate::domain::{Product, ProductCreate};

/// Client for the catalog actor. Thin cloneable wrapper around the message
/// channel with macro-generated methods.
#[derive(Clone)]
pub struct CatalogClient {
    sender: mpsc::Sender<CatalogRequest>,
}

impl CatalogClient {
    pub fn new(sender: mpsc::Sender<CatalogRequest>) -> Self {
        Self { sender }
    }

    /// Manual method: shutdown has no response channel.
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        debug!("Sending shutdown request");
        self.sender
            .send(CatalogRequest::Shutdown)
            .await
            .map_err(|e| CatalogError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(CatalogClient => fn add_product(product: ProductCreate) -> u32 as CatalogRequest::AddProduct, Error = CatalogError);
client_method!(CatalogClient => fn get_product(id: u32) -> Option<Product> as CatalogRequest::GetProduct, Error = CatalogError);
client_method!(CatalogClient => fn search(query: String) -> Vec<Product> as CatalogRequest::Search, Error = CatalogError);
client_method!(CatalogClient => fn filter_by_price(min: f64, max: f64) -> Vec<Product> as CatalogRequest::FilterByPrice, Error = CatalogError);
client_method!(CatalogClient => fn grouped_by_category() -> Vec<(String, Vec<Product>)> as CatalogRequest::GroupedByCategory, Error = CatalogError);
client_method!(CatalogClient => fn check_low_stock(threshold: u32) -> Vec<StockAlert> as CatalogRequest::CheckLowStock, Error = CatalogError);
client_method!(CatalogClient => fn reserve_stock(id: u32, quantity: u32) -> () as CatalogRequest::ReserveStock, Error = CatalogError);

impl CatalogClient {
    /// Replenishes stock and returns the new level.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn restock(&self, id: u32, quantity: u32) -> Result<u32, CatalogError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CatalogRequest::Restock {
                id,
                quantity,
                respond_to,
            })
            .await
            .map_err(|_| CatalogError::ActorCommunicationError("Actor closed".to_string()))?;

        response
            .await
            .map_err(|_| CatalogError::ActorCommunicationError("Actor dropped".to_string()))?
    }
}

// Test-only method for internal state inspection.
#[cfg(test)]
client_method!(CatalogClient => fn product_count() -> usize as CatalogRequest::GetProductCount, Error = CatalogError);
