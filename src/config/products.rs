//! Initial stock from the `[[products]]` tables of the configuration file.
//!
//! Seeding only fills the in-memory inventory at startup; nothing is ever
//! written back to the file.

use crate::{
    core::InventoryManager,
    errors::{Error, Result},
};
use serde::Deserialize;
use tracing::info;

/// Configuration for a single product to stock at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductSeed {
    /// Name of the product
    pub name: String,
    /// Initial stock count, zero when omitted
    #[serde(default)]
    pub quantity: i64,
}

/// Adds every configured product to `manager`, in file order.
///
/// # Errors
/// Returns `Error::Config` naming the offending entry if a seed has an empty
/// name or a negative quantity. Products seeded before it stay in place.
pub fn seed_inventory(manager: &mut InventoryManager, seeds: &[ProductSeed]) -> Result<()> {
    for (position, seed) in seeds.iter().enumerate() {
        manager
            .add_product(&seed.name, Some(seed.quantity))
            .map_err(|e| Error::Config {
                message: format!("products[{position}] ('{}'): {e}", seed.name),
            })?;
    }
    info!("Seeded {} products from configuration.", seeds.len());
    Ok(())
}
