mod app_system;
mod catalog;
mod clients;
mod domain;
mod seed;
mod ui;

#[cfg(test)]
mod mock_framework;

use tracing::{info, Instrument};

use crate::app_system::{setup_tracing, OrderLog, ShopSystem, DEFAULT_LOG_PATH};
use crate::domain::Customer;

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting marketplace");

    let system = ShopSystem::new();

    let span = tracing::info_span!("catalog_seeding");
    let alerts = async {
        info!("Loading seed catalog");
        system
            .initialize(seed::initial_products())
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;

    ui::print_alerts(&alerts);

    // Explicit construction instead of process-wide singletons: one
    // customer, one order log, threaded through the call graph.
    let mut customer = Customer::new(1, "Guest");
    let mut order_log = OrderLog::new(DEFAULT_LOG_PATH);

    ui::run(&system, &mut customer, &mut order_log)
        .await
        .map_err(|e| e.to_string())?;

    system.shutdown().await?;

    info!("Marketplace session ended");
    Ok(())
}
