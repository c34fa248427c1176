use std::fmt;

use thiserror::Error;

use super::order::Order;
use super::product::Product;

/// Errors raised by cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart is empty")]
    Empty,
}

/// A cart entry: a value snapshot of a product at the moment its stock was
/// reserved, carrying the reserved quantity (not the catalog's remainder).
/// Independent of the catalog product after the copy: later catalog price
/// changes do not reach it.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub product_id: u32,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub quantity: u32,
}

impl LineItem {
    fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            quantity,
        }
    }

    fn add_quantity(&mut self, amount: u32) {
        self.quantity += amount;
    }

    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A change notification returned by cart operations. The caller decides
/// whether and how to display it.
#[derive(Debug, Clone, PartialEq)]
pub enum CartChange {
    ItemAdded { name: String, quantity: u32 },
    Cleared,
}

impl fmt::Display for CartChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartChange::ItemAdded { name, quantity } => {
                write!(f, "Added: {} x{}", name, quantity)
            }
            CartChange::Cleared => write!(f, "Cart cleared"),
        }
    }
}

/// Per-customer staging area holding quantities already reserved from the
/// catalog. Lines keep first-add order, one per distinct product id.
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges an already-reserved quantity into the cart: accumulates into
    /// the existing line for this product id, or appends a fresh snapshot
    /// line. The price captured by the first reservation stays.
    ///
    /// Stock must have been reserved in the catalog before calling this;
    /// see `ShopSystem::add_to_cart` for the full operation.
    pub(crate) fn add_reserved(&mut self, product: &Product, quantity: u32) -> CartChange {
        match self
            .lines
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            Some(line) => line.add_quantity(quantity),
            None => self.lines.push(LineItem::from_product(product, quantity)),
        }

        CartChange::ItemAdded {
            name: product.name.clone(),
            quantity,
        }
    }

    /// Empties all lines. Does NOT restock the catalog: reservations are
    /// one-way, so quantity cleared here stays consumed.
    pub fn clear(&mut self) -> CartChange {
        self.lines.clear();
        CartChange::Cleared
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Recomputed on demand, never cached.
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Builds an order from a deep copy of the current lines. Does not
    /// clear the cart: the caller commits by clearing, which keeps the
    /// operation inspectable before the commit.
    pub fn checkout(&self, order_id: u32) -> Result<Order, CartError> {
        if self.lines.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(Order::new(order_id, self.lines.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(id: u32, price: f64) -> Product {
        Product {
            id,
            name: format!("Widget {}", id),
            price,
            quantity: 10,
            category: "Widgets".to_string(),
        }
    }

    #[test]
    fn same_product_accumulates_into_one_line() {
        let mut cart = Cart::new();
        let product = widget(1, 100.0);

        cart.add_reserved(&product, 2);
        let change = cart.add_reserved(&product, 3);

        assert_eq!(
            change,
            CartChange::ItemAdded {
                name: "Widget 1".to_string(),
                quantity: 3,
            }
        );
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[0].category, "Widgets");
        assert_eq!(cart.total_price(), 500.0);
    }

    #[test]
    fn merged_line_keeps_first_reservation_price() {
        let mut cart = Cart::new();
        let mut product = widget(1, 100.0);

        cart.add_reserved(&product, 1);
        product.price = 250.0;
        cart.add_reserved(&product, 1);

        assert_eq!(cart.lines()[0].price, 100.0);
        assert_eq!(cart.total_price(), 200.0);
    }

    #[test]
    fn lines_keep_first_add_order() {
        let mut cart = Cart::new();
        cart.add_reserved(&widget(2, 50.0), 1);
        cart.add_reserved(&widget(1, 100.0), 1);
        cart.add_reserved(&widget(2, 50.0), 1);

        let ids: Vec<u32> = cart.lines().iter().map(|line| line.product_id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn checkout_snapshots_without_clearing() {
        let mut cart = Cart::new();
        cart.add_reserved(&widget(1, 100.0), 3);

        let order = cart.checkout(1).expect("cart has lines");
        assert_eq!(order.id(), 1);
        assert_eq!(order.total(), 300.0);
        assert_eq!(order.lines().len(), 1);

        // The cart is untouched until the caller commits by clearing.
        assert!(!cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn checkout_on_empty_cart_fails() {
        let cart = Cart::new();
        assert_eq!(cart.checkout(1).unwrap_err(), CartError::Empty);
    }

    #[test]
    fn clear_reports_the_change() {
        let mut cart = Cart::new();
        cart.add_reserved(&widget(1, 100.0), 1);
        assert_eq!(cart.clear(), CartChange::Cleared);
        assert_eq!(cart.total_price(), 0.0);
    }
}
