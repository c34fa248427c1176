//! # Mock Framework
//!
//! Utilities for testing client-side orchestration in isolation.
//!
//! Instead of spinning up a full `CatalogService`, tests get a
//! [`CatalogClient`] whose channel they control: requests arrive on the
//! returned receiver, and the `expect_*` helpers assert which request came
//! and hand back its response channel, so the test can simulate the
//! actor's behavior deterministically.

use tokio::sync::mpsc;

use crate::catalog::{CatalogError, CatalogRequest, ServiceResponse};
use crate::clients::CatalogClient;
use crate::domain::Product;

pub fn create_mock_catalog(
    buffer_size: usize,
) -> (CatalogClient, mpsc::Receiver<CatalogRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CatalogClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetProduct request.
pub async fn expect_get_product(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(u32, ServiceResponse<Option<Product>, CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::GetProduct { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a ReserveStock request.
pub async fn expect_reserve_stock(
    receiver: &mut mpsc::Receiver<CatalogRequest>,
) -> Option<(u32, u32, ServiceResponse<(), CatalogError>)> {
    match receiver.recv().await {
        Some(CatalogRequest::ReserveStock {
            id,
            quantity,
            respond_to,
        }) => Some((id, quantity, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_client_round_trip() {
        let (client, mut receiver) = create_mock_catalog(10);

        let get_task = tokio::spawn(async move { client.get_product(7).await });

        let (id, responder) = expect_get_product(&mut receiver)
            .await
            .expect("Expected GetProduct request");
        assert_eq!(id, 7);
        responder.send(Ok(None)).unwrap();

        let result = get_task.await.unwrap();
        assert!(matches!(result, Ok(None)));
    }
}
