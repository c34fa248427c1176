use super::cart::{Cart, CartError};
use super::order::Order;

/// The shopping customer: profile fields, one cart, and an ordered history
/// of placed orders.
#[derive(Debug)]
pub struct Customer {
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    cart: Cart,
    orders: Vec<Order>,
}

impl Customer {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            phone: String::new(),
            address: String::new(),
            email: String::new(),
            cart: Cart::new(),
            orders: Vec::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Insertion order = creation order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Converts the current cart into the next order: checks out with a
    /// dense 1-based id, appends to the history, then clears the cart.
    /// This is the only path that creates an [`Order`]. Fails with
    /// [`CartError::Empty`] on an empty cart, leaving everything unchanged.
    pub fn place_order(&mut self) -> Result<Order, CartError> {
        let next_id = self.orders.len() as u32 + 1;
        let order = self.cart.checkout(next_id)?;
        self.orders.push(order.clone());
        self.cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::Product;

    fn customer_with_cart_line(quantity: u32) -> Customer {
        let mut customer = Customer::new(1, "Alice");
        let product = Product {
            id: 1,
            name: "Widget".to_string(),
            price: 100.0,
            quantity: 10,
            category: "Widgets".to_string(),
        };
        customer.cart_mut().add_reserved(&product, quantity);
        customer
    }

    #[test]
    fn place_order_appends_history_and_clears_cart() {
        let mut customer = customer_with_cart_line(3);

        let order = customer.place_order().expect("cart has lines");
        assert_eq!(order.id(), 1);
        assert_eq!(order.total(), 300.0);
        assert!(customer.cart().is_empty());
        assert_eq!(customer.orders().len(), 1);
    }

    #[test]
    fn order_ids_are_a_dense_sequence() {
        let mut customer = customer_with_cart_line(1);
        customer.place_order().expect("first order");

        let product = Product {
            id: 2,
            name: "Gadget".to_string(),
            price: 50.0,
            quantity: 10,
            category: "Gadgets".to_string(),
        };
        customer.cart_mut().add_reserved(&product, 2);
        let second = customer.place_order().expect("second order");

        assert_eq!(second.id(), 2);
        let ids: Vec<u32> = customer.orders().iter().map(Order::id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn place_order_with_empty_cart_fails_and_changes_nothing() {
        let mut customer = Customer::new(1, "Alice");
        assert_eq!(customer.place_order().unwrap_err(), CartError::Empty);
        assert!(customer.orders().is_empty());
    }
}
