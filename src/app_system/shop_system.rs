use tracing::{error, info, instrument};

use crate::catalog::{CatalogError, CatalogService, StockAlert};
use crate::clients::CatalogClient;
use crate::domain::{CartChange, Customer, Product, ProductCreate};

/// Products at or below this quantity trigger a stock alert.
pub const LOW_STOCK_THRESHOLD: u32 = 3;

/// The composition root: starts the catalog actor, wires it to the rest of
/// the program, and exposes the stable API surface the UI layer calls.
/// `main` builds exactly one of these and threads it through the call
/// graph: no process-wide globals.
pub struct ShopSystem {
    catalog: CatalogClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for ShopSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ShopSystem {
    #[instrument(name = "shop_system")]
    pub fn new() -> Self {
        info!("Starting shop system");

        let (catalog_service, catalog) = CatalogService::new(100);
        let handle = tokio::spawn(catalog_service.run());

        info!("Shop system started");

        Self {
            catalog,
            handles: vec![handle],
        }
    }

    /// Test seam: a system whose catalog channel is controlled by the test.
    #[cfg(test)]
    pub(crate) fn with_catalog(catalog: CatalogClient) -> Self {
        Self {
            catalog,
            handles: Vec::new(),
        }
    }

    /// Loads the seed products, then performs the one startup low-stock
    /// scan and returns its alerts for the caller to display.
    #[instrument(skip(self, products))]
    pub async fn initialize(
        &self,
        products: Vec<ProductCreate>,
    ) -> Result<Vec<StockAlert>, CatalogError> {
        for product in products {
            self.catalog.add_product(product).await?;
        }

        info!("Catalog seeded, scanning stock levels");
        self.catalog.check_low_stock(LOW_STOCK_THRESHOLD).await
    }

    // Thin delegation to the catalog: the stable surface the UI depends on.

    pub async fn search(&self, query: String) -> Result<Vec<Product>, CatalogError> {
        self.catalog.search(query).await
    }

    pub async fn filter_by_price(&self, min: f64, max: f64) -> Result<Vec<Product>, CatalogError> {
        self.catalog.filter_by_price(min, max).await
    }

    pub async fn find_product(&self, id: u32) -> Result<Option<Product>, CatalogError> {
        self.catalog.get_product(id).await
    }

    pub async fn catalog_by_category(&self) -> Result<Vec<(String, Vec<Product>)>, CatalogError> {
        self.catalog.grouped_by_category().await
    }

    pub async fn check_low_stock(&self) -> Result<Vec<StockAlert>, CatalogError> {
        self.catalog.check_low_stock(LOW_STOCK_THRESHOLD).await
    }

    /// The full add-to-cart operation: look the product up, reserve its
    /// stock (propagating `NotFound` / `InsufficientStock` unchanged, cart
    /// untouched on failure), then snapshot it into the customer's cart at
    /// the price captured now.
    #[instrument(
        fields(customer = %customer.name, product_id = %product_id, quantity = %quantity),
        skip(self, customer)
    )]
    pub async fn add_to_cart(
        &self,
        customer: &mut Customer,
        product_id: u32,
        quantity: u32,
    ) -> Result<CartChange, CatalogError> {
        let product = self
            .catalog
            .get_product(product_id)
            .await?
            .ok_or(CatalogError::NotFound(product_id))?;

        self.catalog.reserve_stock(product_id, quantity).await?;

        info!(product_name = %product.name, "Stock reserved for cart");
        Ok(customer.cart_mut().add_reserved(&product, quantity))
    }

    /// Gracefully stop the catalog actor and wait for its task.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down shop system");

        let _ = self.catalog.shutdown().await;

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Service shutdown error");
                return Err(format!("Service shutdown error: {:?}", e));
            }
        }

        info!("Shop system shutdown complete");
        Ok(())
    }
}
