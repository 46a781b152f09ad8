//! Rendering helpers: the stock table, product details, screen clearing and
//! the interruptible pause between screens.

use crate::core::{InventoryManager, ProductInfo};
use std::time::Duration;
use tracing::{info, warn};

/// ANSI "erase display" followed by "cursor home".
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Shown in place of a count when a product has no stock.
const OUT_OF_STOCK: &str = "OUT OF STOCK";

/// Extra room after the longest name in the table.
const NAME_PADDING: usize = 10;

/// Renders every product as a bordered two-column table.
///
/// Returns `None` when the inventory is empty.
#[must_use]
pub fn stock_table(inventory: &InventoryManager) -> Option<String> {
    if inventory.is_empty() {
        return None;
    }

    let quantities: Vec<String> = inventory
        .list_all()
        .map(|product| {
            if product.is_out_of_stock() {
                OUT_OF_STOCK.to_string()
            } else {
                product.quantity().to_string()
            }
        })
        .collect();

    let name_width = inventory.longest_display_name() + NAME_PADDING;
    let qty_width = quantities
        .iter()
        .map(String::len)
        .max()
        .unwrap_or_default()
        .max(OUT_OF_STOCK.len());
    let border = format!(
        "|{}|{}|",
        "-".repeat(name_width + 1),
        "-".repeat(qty_width + 2)
    );

    let mut lines = vec![border.clone()];
    for (product, quantity) in inventory.list_all().zip(quantities) {
        lines.push(format!(
            "| {:<name_width$}| {:<qty_width$} |",
            product.display_name(),
            quantity
        ));
    }
    lines.push(border);
    Some(lines.join("\n"))
}

/// Renders a product snapshot as `Field: value` lines.
#[must_use]
pub fn product_details(info: &ProductInfo) -> String {
    let out_of_stock = if info.out_of_stock { "yes" } else { "no" };
    format!(
        "Product details:\nId: {}\nName: {}\nQuantity: {}\nOut of stock: {}\nAdded: {}\nLast counted: {}",
        info.id,
        info.name,
        info.quantity,
        out_of_stock,
        info.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        info.updated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

/// Waits for `duration`, or until the operator presses Ctrl-C.
///
/// An interrupt only cuts the pause short; it never ends the program.
pub async fn pause(duration: Duration) {
    if duration.is_zero() {
        return;
    }

    tokio::select! {
        () = tokio::time::sleep(duration) => {}
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Pause interrupted by operator"),
            Err(e) => {
                warn!("Could not listen for Ctrl-C: {}", e);
                tokio::time::sleep(duration).await;
            }
        },
    }
}
