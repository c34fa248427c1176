use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use crate::domain::{Customer, LineItem};

pub const DEFAULT_LOG_PATH: &str = "marketplace_data.txt";

const BLOCK_SEPARATOR: &str =
    "------------------------------------------------------";

/// Append-only plain-text log of completed orders.
///
/// The file is truncated once per process run, on the first write; every
/// later write appends one block and never rewrites prior ones. Write-only
/// from the core's perspective: nothing here re-parses the file.
pub struct OrderLog {
    path: PathBuf,
    truncated: bool,
}

impl OrderLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            truncated: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one block describing the customer's most recent order.
    /// A customer with no orders writes nothing.
    #[instrument(fields(customer = %customer.name), skip(self, customer))]
    pub fn append_last_order(&mut self, customer: &Customer) -> io::Result<()> {
        let Some(order) = customer.orders().last() else {
            debug!("No orders to save");
            return Ok(());
        };

        if !self.truncated {
            fs::write(&self.path, "")?;
            self.truncated = true;
        }

        let mut block = String::new();

        block.push_str("#OrderedGoods\n");
        for (name, quantity) in aggregate_by_name(order.lines()) {
            block.push_str(&format!("{}|{}\n", name, quantity));
        }

        block.push_str("#Orders\n");
        let date = order.created_at().format("%Y-%m-%d %H:%M");
        for item in order.lines() {
            block.push_str(&format!(
                "{}|{}|{}|{}|{}|{}\n",
                order.id(),
                date,
                customer.name,
                item.name,
                item.quantity,
                item.line_total()
            ));
        }

        block.push_str(BLOCK_SEPARATOR);
        block.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(block.as_bytes())?;

        info!(order_id = order.id(), path = %self.path.display(), "Order saved");
        Ok(())
    }
}

/// Sums quantities per distinct product name, first-appearance order.
fn aggregate_by_name(lines: &[LineItem]) -> Vec<(String, u32)> {
    let mut totals: Vec<(String, u32)> = Vec::new();
    for line in lines {
        match totals.iter_mut().find(|(name, _)| name == &line.name) {
            Some((_, quantity)) => *quantity += line.quantity,
            None => totals.push((line.name.clone(), line.quantity)),
        }
    }
    totals
}
