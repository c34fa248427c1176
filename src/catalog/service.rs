use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};

use super::error::CatalogError;
use super::messages::{CatalogRequest, ServiceResponse, StockAlert};
use crate::clients::CatalogClient;
use crate::domain::{Product, ProductCreate};

/// The catalog actor. Owns the product store and serializes every stock
/// mutation and query through its message channel, so `reserve` has no
/// read-check-then-write race and the non-negative stock invariant is
/// enforced in exactly one place.
///
/// The store is a `Vec` because insertion order is semantically visible:
/// search results come back in catalog insertion order and category groups
/// in first-seen order.
pub struct CatalogService {
    receiver: mpsc::Receiver<CatalogRequest>,
    products: Vec<Product>,
    next_id: u32,
}

impl CatalogService {
    pub fn new(buffer_size: usize) -> (Self, CatalogClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            products: Vec::new(),
            next_id: 1,
        };
        let client = CatalogClient::new(sender);
        (service, client)
    }

    #[instrument(name = "catalog_service", skip(self))]
    pub async fn run(mut self) {
        info!("CatalogService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CatalogRequest::AddProduct { product, respond_to } => {
                    self.handle_add_product(product, respond_to);
                }
                CatalogRequest::GetProduct { id, respond_to } => {
                    self.handle_get_product(id, respond_to);
                }
                CatalogRequest::Search { query, respond_to } => {
                    self.handle_search(query, respond_to);
                }
                CatalogRequest::FilterByPrice { min, max, respond_to } => {
                    self.handle_filter_by_price(min, max, respond_to);
                }
                CatalogRequest::GroupedByCategory { respond_to } => {
                    self.handle_grouped_by_category(respond_to);
                }
                CatalogRequest::CheckLowStock { threshold, respond_to } => {
                    self.handle_check_low_stock(threshold, respond_to);
                }
                CatalogRequest::ReserveStock { id, quantity, respond_to } => {
                    self.handle_reserve_stock(id, quantity, respond_to);
                }
                CatalogRequest::Restock { id, quantity, respond_to } => {
                    self.handle_restock(id, quantity, respond_to);
                }
                CatalogRequest::Shutdown => {
                    info!("CatalogService shutting down");
                    break;
                }
                #[cfg(test)]
                CatalogRequest::GetProductCount { respond_to } => {
                    let _ = respond_to.send(Ok(self.products.len()));
                }
            }
        }

        info!("CatalogService stopped");
    }

    #[instrument(fields(product_name = %product.name), skip(self, product, respond_to))]
    fn handle_add_product(
        &mut self,
        product: ProductCreate,
        respond_to: ServiceResponse<u32, CatalogError>,
    ) {
        debug!("Processing add_product request");

        let id = self.next_id;
        self.next_id += 1;
        self.products.push(Product {
            id,
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            category: product.category,
        });

        info!(product_id = id, "Product added");
        let _ = respond_to.send(Ok(id));
    }

    #[instrument(fields(product_id = %id), skip(self, respond_to))]
    fn handle_get_product(
        &self,
        id: u32,
        respond_to: ServiceResponse<Option<Product>, CatalogError>,
    ) {
        debug!("Processing get_product request");

        let product = self.products.iter().find(|p| p.id == id).cloned();

        match &product {
            Some(product) => debug!(product_name = %product.name, "Product found"),
            None => debug!("Product not found"),
        }

        let _ = respond_to.send(Ok(product));
    }

    /// Case-insensitive substring match on the name; no match is not an
    /// error. Results keep catalog insertion order.
    #[instrument(fields(query = %query), skip(self, respond_to))]
    fn handle_search(&self, query: String, respond_to: ServiceResponse<Vec<Product>, CatalogError>) {
        debug!("Processing search request");

        let needle = query.to_lowercase();
        let matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        info!(match_count = matches.len(), "Search completed");
        let _ = respond_to.send(Ok(matches));
    }

    /// Inclusive bounds, ascending by price, ties broken by id.
    #[instrument(fields(min = %min, max = %max), skip(self, respond_to))]
    fn handle_filter_by_price(
        &self,
        min: f64,
        max: f64,
        respond_to: ServiceResponse<Vec<Product>, CatalogError>,
    ) {
        debug!("Processing filter_by_price request");

        if min > max {
            error!("Invalid price range");
            let _ = respond_to.send(Err(CatalogError::InvalidPriceRange { min, max }));
            return;
        }

        let mut matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.price >= min && p.price <= max)
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.price.total_cmp(&b.price).then(a.id.cmp(&b.id)));

        info!(match_count = matches.len(), "Filter completed");
        let _ = respond_to.send(Ok(matches));
    }

    /// Category key order = first-seen order; kept for display grouping
    /// only, no semantic effect on anything else.
    #[instrument(skip(self, respond_to))]
    fn handle_grouped_by_category(
        &self,
        respond_to: ServiceResponse<Vec<(String, Vec<Product>)>, CatalogError>,
    ) {
        debug!("Processing grouped_by_category request");

        let mut groups: Vec<(String, Vec<Product>)> = Vec::new();
        for product in &self.products {
            match groups.iter_mut().find(|(category, _)| category == &product.category) {
                Some((_, items)) => items.push(product.clone()),
                None => groups.push((product.category.clone(), vec![product.clone()])),
            }
        }

        let _ = respond_to.send(Ok(groups));
    }

    /// Emits one alert per qualifying product on every scan: there is no
    /// "already alerted" flag, so alerts repeat until the stock recovers.
    #[instrument(fields(threshold = %threshold), skip(self, respond_to))]
    fn handle_check_low_stock(
        &self,
        threshold: u32,
        respond_to: ServiceResponse<Vec<StockAlert>, CatalogError>,
    ) {
        debug!("Processing check_low_stock request");

        let alerts: Vec<StockAlert> = self
            .products
            .iter()
            .filter(|p| p.quantity <= threshold)
            .map(|p| StockAlert {
                product_id: p.id,
                name: p.name.clone(),
                remaining: p.quantity,
            })
            .collect();

        for alert in &alerts {
            warn!(
                product_id = alert.product_id,
                remaining = alert.remaining,
                "Low stock"
            );
        }

        let _ = respond_to.send(Ok(alerts));
    }

    /// The only decrement path for stock. Checks before subtracting, so a
    /// failed reservation leaves the quantity untouched.
    #[instrument(fields(product_id = %id, quantity = %quantity), skip(self, respond_to))]
    fn handle_reserve_stock(
        &mut self,
        id: u32,
        quantity: u32,
        respond_to: ServiceResponse<(), CatalogError>,
    ) {
        debug!("Processing reserve_stock request");

        let result = match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                if quantity == 0 || quantity > product.quantity {
                    error!(
                        available = product.quantity,
                        requested = quantity,
                        "Insufficient stock"
                    );
                    Err(CatalogError::InsufficientStock {
                        requested: quantity,
                        available: product.quantity,
                    })
                } else {
                    product.quantity -= quantity;
                    info!(remaining_stock = product.quantity, "Stock reserved");
                    Ok(())
                }
            }
            None => {
                error!("Product not found");
                Err(CatalogError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }

    #[instrument(fields(product_id = %id, quantity = %quantity), skip(self, respond_to))]
    fn handle_restock(
        &mut self,
        id: u32,
        quantity: u32,
        respond_to: ServiceResponse<u32, CatalogError>,
    ) {
        debug!("Processing restock request");

        let result = match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.add_quantity(quantity);
                info!(stock_level = product.quantity, "Stock replenished");
                Ok(product.quantity)
            }
            None => {
                error!("Product not found");
                Err(CatalogError::NotFound(id))
            }
        };

        let _ = respond_to.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spawn_catalog() -> CatalogClient {
        let (service, client) = CatalogService::new(10);
        tokio::spawn(service.run());
        client
    }

    async fn seed(client: &CatalogClient, items: &[(&str, f64, u32, &str)]) {
        for (name, price, quantity, category) in items {
            client
                .add_product(ProductCreate::new(*name, *price, *quantity, *category))
                .await
                .expect("add_product");
        }
    }

    #[tokio::test]
    async fn add_assigns_dense_ids_from_one() {
        let client = spawn_catalog();
        let first = client
            .add_product(ProductCreate::new("A", 1.0, 1, "X"))
            .await
            .expect("add");
        let second = client
            .add_product(ProductCreate::new("B", 2.0, 1, "X"))
            .await
            .expect("add");

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(client.product_count().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn get_product_absent_is_not_an_error() {
        let client = spawn_catalog();
        assert!(client.get_product(42).await.expect("get").is_none());
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_keeps_insertion_order() {
        let client = spawn_catalog();
        seed(
            &client,
            &[
                ("iPhone 15 Pro", 45999.0, 10, "Smartphones"),
                ("MacBook Pro M3", 74999.0, 4, "Laptops"),
                ("iPhone SE", 19999.0, 5, "Smartphones"),
            ],
        )
        .await;

        let results = client.search("iphone".to_string()).await.expect("search");
        let names: Vec<&str> = results.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["iPhone 15 Pro", "iPhone SE"]);

        let none = client.search("pixel".to_string()).await.expect("search");
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn filter_is_inclusive_and_sorted_by_price_then_id() {
        let client = spawn_catalog();
        seed(
            &client,
            &[
                ("A", 300.0, 1, "X"),
                ("B", 100.0, 1, "X"),
                ("C", 100.0, 1, "X"),
                ("D", 400.0, 1, "X"),
            ],
        )
        .await;

        let results = client.filter_by_price(100.0, 300.0).await.expect("filter");
        let ids: Vec<u32> = results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn filter_rejects_inverted_range() {
        let client = spawn_catalog();
        let err = client.filter_by_price(200.0, 100.0).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidPriceRange {
                min: 200.0,
                max: 100.0
            }
        );
    }

    #[tokio::test]
    async fn categories_group_in_first_seen_order() {
        let client = spawn_catalog();
        seed(
            &client,
            &[
                ("A", 1.0, 1, "Consoles"),
                ("B", 2.0, 1, "Laptops"),
                ("C", 3.0, 1, "Consoles"),
            ],
        )
        .await;

        let groups = client.grouped_by_category().await.expect("grouped");
        let categories: Vec<&str> = groups.iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(categories, vec!["Consoles", "Laptops"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[tokio::test]
    async fn reserve_decrements_and_restock_recovers() {
        let client = spawn_catalog();
        seed(&client, &[("A", 10.0, 5, "X")]).await;

        client.reserve_stock(1, 3).await.expect("reserve");
        let product = client.get_product(1).await.expect("get").expect("present");
        assert_eq!(product.quantity, 2);

        let level = client.restock(1, 4).await.expect("restock");
        assert_eq!(level, 6);
    }

    #[tokio::test]
    async fn reserve_failures_leave_stock_unchanged() {
        let client = spawn_catalog();
        seed(&client, &[("A", 10.0, 5, "X")]).await;

        let err = client.reserve_stock(1, 8).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                requested: 8,
                available: 5
            }
        );

        let err = client.reserve_stock(1, 0).await.unwrap_err();
        assert_eq!(
            err,
            CatalogError::InsufficientStock {
                requested: 0,
                available: 5
            }
        );

        assert_eq!(client.reserve_stock(9, 1).await.unwrap_err(), CatalogError::NotFound(9));

        let product = client.get_product(1).await.expect("get").expect("present");
        assert_eq!(product.quantity, 5);
    }
}
