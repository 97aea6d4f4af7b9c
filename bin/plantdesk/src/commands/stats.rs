//! Dashboard overview counts.

use anyhow::Result;

use plantdesk_cache::EntityCache;
use plantdesk_core::{MachineStatus, OrderStatus};

/// Load all four collections and print the overview the dashboard
/// landing page shows.
pub async fn run(cache: &EntityCache) -> Result<()> {
    let (workers, machines, stock_items, orders) = tokio::try_join!(
        cache.workers().ensure_loaded(),
        cache.machines().ensure_loaded(),
        cache.stock_items().ensure_loaded(),
        cache.orders().ensure_loaded(),
    )?;

    let operational = machines
        .iter()
        .filter(|m| m.status == MachineStatus::Operational)
        .count();
    let under_maintenance = machines
        .iter()
        .filter(|m| m.status == MachineStatus::UnderMaintenance)
        .count();
    let pending = orders
        .iter()
        .filter(|o| o.status == OrderStatus::Pending)
        .count();
    let in_progress = orders
        .iter()
        .filter(|o| o.status == OrderStatus::InProgress)
        .count();

    println!("Workers:      {}", workers.len());
    println!(
        "Machines:     {} ({} operational, {} under maintenance)",
        machines.len(),
        operational,
        under_maintenance
    );
    println!("Stock items:  {}", stock_items.len());
    println!(
        "Orders:       {} ({} pending, {} in progress)",
        orders.len(),
        pending,
        in_progress
    );

    Ok(())
}
