use std::fmt;

use tokio::sync::oneshot;

use super::error::CatalogError;
use crate::domain::{Product, ProductCreate};

/// Generic type aliases for service communication.
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Raised for every product found at or below the low-stock threshold.
/// Scans are level-triggered: the same product alerts again on every scan
/// until it is restocked above the threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct StockAlert {
    pub product_id: u32,
    pub name: String,
    pub remaining: u32,
}

impl fmt::Display for StockAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Running low: {} ({} left)", self.name, self.remaining)
    }
}

/// Typed messages for the catalog actor. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum CatalogRequest {
    AddProduct {
        product: ProductCreate,
        respond_to: ServiceResponse<u32, CatalogError>,
    },
    GetProduct {
        id: u32,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    },
    Search {
        query: String,
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    FilterByPrice {
        min: f64,
        max: f64,
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    },
    GroupedByCategory {
        respond_to: ServiceResponse<Vec<(String, Vec<Product>)>, CatalogError>,
    },
    CheckLowStock {
        threshold: u32,
        respond_to: ServiceResponse<Vec<StockAlert>, CatalogError>,
    },
    ReserveStock {
        id: u32,
        quantity: u32,
        respond_to: ServiceResponse<(), CatalogError>,
    },
    Restock {
        id: u32,
        quantity: u32,
        respond_to: ServiceResponse<u32, CatalogError>,
    },
    Shutdown,
    #[cfg(test)]
    GetProductCount {
        respond_to: ServiceResponse<usize, CatalogError>,
    },
}
