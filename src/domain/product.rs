use std::fmt;

/// A sellable product in the catalog.
///
/// Identity is by `id` alone: use [`Product::same_identity`] to compare
/// two products. There is deliberately no `PartialEq` impl: field-wise
/// equality would contradict identity-based equality.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
}

impl Product {
    /// True when `other` refers to the same catalog entry, regardless of
    /// any other field.
    #[allow(dead_code)]
    pub fn same_identity(&self, other: &Product) -> bool {
        self.id == other.id
    }

    /// Increments the stock level. Quantities are unsigned, so the
    /// non-negative invariant cannot be violated here; the only decrement
    /// path is the catalog's reserve handler.
    pub fn add_quantity(&mut self, amount: u32) {
        self.quantity += amount;
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({} pcs)", self.name, self.price, self.quantity)
    }
}

/// Payload for adding a new product; the catalog assigns the id.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub name: String,
    pub price: f64,
    pub quantity: u32,
    pub category: String,
}

impl ProductCreate {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
            category: category.into(),
        }
    }
}
