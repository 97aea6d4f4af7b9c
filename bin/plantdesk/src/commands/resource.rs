//! Resource CRUD commands over the entity cache.
//!
//! `plantdesk get workers`, `plantdesk create machine --data '{...}'`, etc.
//! Payloads are validated before any request is issued; the cache is
//! only written once the server confirms.

use anyhow::{Context as _, Result};

use plantdesk_cache::EntityCache;
use plantdesk_core::{
    EntityId, EntityRef, Machine, MachinePayload, OrderPayload, OrderStatus, StockItem,
    StockItemPayload, WorkerPayload,
};

/// Entity kind addressed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Workers,
    Machines,
    StockItems,
    Orders,
}

impl Resource {
    /// Map singular/plural command-line names, including the wire
    /// aliases (`employees`, `products`).
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "worker" | "workers" | "employee" | "employees" => Ok(Self::Workers),
            "machine" | "machines" => Ok(Self::Machines),
            "stock-item" | "stock-items" | "stock" | "product" | "products" => {
                Ok(Self::StockItems)
            }
            "order" | "orders" | "manufacturing-order" | "manufacturing-orders" => {
                Ok(Self::Orders)
            }
            _ => anyhow::bail!("Unknown resource type: {}", s),
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render an embedded machine, tolerating the id-only state.
fn machine_cell(r: &EntityRef<Machine>) -> String {
    match r.entity() {
        Some(m) => m.name.clone(),
        None => format!("#{}", r.id()),
    }
}

fn product_cell(r: &EntityRef<StockItem>) -> String {
    match r.entity() {
        Some(p) => p.name.clone(),
        None => format!("#{}", r.id()),
    }
}

/// List a resource collection.
pub async fn get(cache: &EntityCache, resource: &str, output_json: bool) -> Result<()> {
    match Resource::parse(resource)? {
        Resource::Workers => {
            let items = cache.workers().ensure_loaded().await?;
            if output_json {
                return print_json(&*items);
            }
            println!("{:<6} {:<24} {:<22} MACHINE", "ID", "NAME", "POSITION");
            for w in items.iter() {
                println!(
                    "{:<6} {:<24} {:<22} {}",
                    w.id,
                    w.name,
                    w.position.label(),
                    machine_cell(&w.employee_machine)
                );
            }
        }
        Resource::Machines => {
            let items = cache.machines().ensure_loaded().await?;
            if output_json {
                return print_json(&*items);
            }
            println!("{:<6} {:<24} {:<20} LAST MAINTENANCE", "ID", "NAME", "STATUS");
            for m in items.iter() {
                println!(
                    "{:<6} {:<24} {:<20} {}",
                    m.id,
                    m.name,
                    m.status.label(),
                    m.last_maintenance_date
                );
            }
        }
        Resource::StockItems => {
            let items = cache.stock_items().ensure_loaded().await?;
            if output_json {
                return print_json(&*items);
            }
            println!("{:<6} {:<24} {:<10} {:>8}  SUPPLIER", "ID", "NAME", "TYPE", "STOCK");
            for s in items.iter() {
                println!(
                    "{:<6} {:<24} {:<10} {:>8}  {}",
                    s.id,
                    s.name,
                    s.item_type.label(),
                    s.stock,
                    s.supplier
                );
            }
        }
        Resource::Orders => {
            let items = cache.orders().ensure_loaded().await?;
            if output_json {
                return print_json(&*items);
            }
            println!(
                "{:<6} {:<24} {:<12} {:>8}  {:<20} MACHINE",
                "ID", "PROJECT", "STATUS", "QTY", "PRODUCT"
            );
            for o in items.iter() {
                println!(
                    "{:<6} {:<24} {:<12} {:>8}  {:<20} {}",
                    o.id,
                    o.project,
                    o.status.label(),
                    o.quantity,
                    product_cell(&o.product),
                    machine_cell(&o.machine)
                );
            }
        }
    }
    Ok(())
}

/// Create a record from a JSON payload.
pub async fn create(cache: &EntityCache, resource: &str, json_body: &str) -> Result<()> {
    match Resource::parse(resource)? {
        Resource::Workers => {
            let payload: WorkerPayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            let created = cache.create_worker(&payload).await?;
            println!("worker {} created.", created.id);
            print_json(&created)
        }
        Resource::Machines => {
            let payload: MachinePayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            let created = cache.create_machine(&payload).await?;
            println!("machine {} created.", created.id);
            print_json(&created)
        }
        Resource::StockItems => {
            let payload: StockItemPayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            let created = cache.create_stock_item(&payload).await?;
            println!("stock item {} created.", created.id);
            print_json(&created)
        }
        Resource::Orders => {
            let payload: OrderPayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            let created = cache.create_order(&payload).await?;
            println!("order {} created.", created.id);
            print_json(&created)
        }
    }
}

/// Update a record from a JSON payload.
pub async fn update(
    cache: &EntityCache,
    resource: &str,
    id: EntityId,
    json_body: &str,
) -> Result<()> {
    match Resource::parse(resource)? {
        Resource::Workers => {
            let payload: WorkerPayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            match cache.update_worker(id, &payload).await? {
                Some(w) => {
                    println!("worker {} updated.", id);
                    print_json(&w)
                }
                None => {
                    println!("worker {} updated on the server; not in the local cache.", id);
                    Ok(())
                }
            }
        }
        Resource::Machines => {
            let payload: MachinePayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            match cache.update_machine(id, &payload).await? {
                Some(m) => {
                    println!("machine {} updated.", id);
                    print_json(&m)
                }
                None => {
                    println!("machine {} updated on the server; not in the local cache.", id);
                    Ok(())
                }
            }
        }
        Resource::StockItems => {
            let payload: StockItemPayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            match cache.update_stock_item(id, &payload).await? {
                Some(s) => {
                    println!("stock item {} updated.", id);
                    print_json(&s)
                }
                None => {
                    println!(
                        "stock item {} updated on the server; not in the local cache.",
                        id
                    );
                    Ok(())
                }
            }
        }
        Resource::Orders => {
            let payload: OrderPayload =
                serde_json::from_str(json_body).context("Invalid JSON payload")?;
            payload.validate()?;
            match cache.update_order(id, &payload).await? {
                Some(o) => {
                    println!("order {} updated.", id);
                    print_json(&o)
                }
                None => {
                    println!("order {} updated on the server; not in the local cache.", id);
                    Ok(())
                }
            }
        }
    }
}

/// Delete a record by id.
pub async fn delete(cache: &EntityCache, resource: &str, id: EntityId) -> Result<()> {
    match Resource::parse(resource)? {
        Resource::Workers => {
            cache.delete_worker(id).await?;
            println!("worker {} deleted.", id);
        }
        Resource::Machines => {
            cache.delete_machine(id).await?;
            println!("machine {} deleted.", id);
        }
        Resource::StockItems => {
            cache.delete_stock_item(id).await?;
            println!("stock item {} deleted.", id);
        }
        Resource::Orders => {
            cache.delete_order(id).await?;
            println!("order {} deleted.", id);
        }
    }
    Ok(())
}

/// Set a production order's status through the status-only endpoint.
pub async fn set_status(cache: &EntityCache, id: EntityId, status: &str) -> Result<()> {
    let status: OrderStatus = status.parse()?;
    match cache.update_order_status(id, status).await? {
        Some(o) => println!("order {} is now {}.", id, o.status.label()),
        None => println!("order {} updated on the server; not in the local cache.", id),
    }
    Ok(())
}
