use std::fmt;

use chrono::{DateTime, Local};

use super::cart::LineItem;

/// An immutable record of a completed checkout.
///
/// Owns a deep copy of the cart lines it was built from; the total is
/// computed once at construction and never changes. All fields are private
/// so the record cannot be mutated after the fact.
#[derive(Debug, Clone)]
pub struct Order {
    id: u32,
    created_at: DateTime<Local>,
    lines: Vec<LineItem>,
    total: f64,
}

impl Order {
    pub(crate) fn new(id: u32, lines: Vec<LineItem>) -> Self {
        let total = lines.iter().map(LineItem::line_total).sum();
        Self {
            id,
            created_at: Local::now(),
            lines,
            total,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Order #{} from {} - {}",
            self.id,
            self.created_at.format("%d.%m.%Y"),
            self.total
        )
    }
}
