//! Core business logic - the product entity and the inventory that owns it.
//!
//! Nothing in here touches the terminal; the console layer drives these types
//! and renders what they return.

/// Inventory collection, lookup and disambiguation
pub mod inventory;
/// Product entity and name matching
pub mod product;

pub use inventory::{Candidates, InventoryManager, Lookup};
pub use product::{Product, ProductId, ProductInfo};
