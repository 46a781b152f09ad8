//! Inventory manager - owns the product collection and every operation on it.
//!
//! Products are keyed by [`ProductId`] and remembered in insertion order, which is
//! the order used for listings and for the candidate list of an ambiguous lookup.
//! Every mutation validates first, so a failed call never leaves the collection
//! half-changed.

use crate::{
    core::product::{Product, ProductId},
    errors::{Error, Result},
};
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

/// Result of a successful name lookup.
#[derive(Debug)]
pub enum Lookup<'a> {
    /// Exactly one product matched.
    Found(&'a Product),
    /// Several products matched; the caller has to pick one.
    Ambiguous(Candidates<'a>),
}

/// Ordered list of products that matched the same query.
#[derive(Debug)]
pub struct Candidates<'a> {
    products: Vec<&'a Product>,
}

impl<'a> Candidates<'a> {
    /// Number of candidates offered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Never true for candidates produced by a lookup.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Candidates in the order they should be shown.
    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.products.iter().copied()
    }

    /// Picks the candidate at a zero-based `index`.
    ///
    /// # Errors
    /// Returns `Error::OutOfRangeSelection` if `index` is not below [`Self::len`].
    pub fn select(&self, index: usize) -> Result<&'a Product> {
        self.products
            .get(index)
            .copied()
            .ok_or(Error::OutOfRangeSelection {
                index,
                count: self.products.len(),
            })
    }
}

/// In-memory product collection.
#[derive(Debug, Default)]
pub struct InventoryManager {
    products: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl InventoryManager {
    /// Creates an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of products held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// `true` when no products are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Looks a product up by identifier.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Adds a new product and returns it.
    ///
    /// Names do not have to be unique; products sharing a name are told apart
    /// later through [`Self::find_by_name`]. A missing quantity means zero.
    ///
    /// # Errors
    /// Returns `Error::InvalidName` or `Error::InvalidQuantity` from product
    /// validation; nothing is stored in that case.
    #[instrument(skip(self))]
    pub fn add_product(&mut self, name: &str, quantity: Option<i64>) -> Result<&Product> {
        let product = Product::new(name, quantity.unwrap_or(0))?;
        let id = product.id();
        info!(product_id = %id, name = %product.display_name(), quantity = product.quantity(), "Product added");

        self.order.push(id);
        Ok(&*self.products.entry(id).or_insert(product))
    }

    /// Removes a product and hands it back.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` if no product has this identifier; the
    /// collection is unchanged.
    #[instrument(skip(self))]
    pub fn remove_product(&mut self, id: ProductId) -> Result<Product> {
        let Some(product) = self.products.remove(&id) else {
            warn!(product_id = %id, "Attempt to remove unknown product");
            return Err(not_found(id));
        };
        self.order.retain(|existing| *existing != id);
        info!(product_id = %id, name = %product.display_name(), "Product removed");
        Ok(product)
    }

    /// Sets a product's stock count.
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` for an unknown identifier, or
    /// `Error::InvalidQuantity` for a negative count (the product keeps its old
    /// count).
    #[instrument(skip(self))]
    pub fn recount(&mut self, id: ProductId, new_quantity: i64) -> Result<&Product> {
        let product = self.products.get_mut(&id).ok_or_else(|| not_found(id))?;
        let previous = product.quantity();
        product.set_quantity(new_quantity)?;
        info!(product_id = %id, previous, current = product.quantity(), "Product recounted");
        Ok(&*product)
    }

    /// Every product matching `query`, in insertion order.
    ///
    /// See [`Product::matches`] for the matching rule.
    #[must_use]
    pub fn matching(&self, query: &str) -> Vec<&Product> {
        self.list_all().filter(|p| p.matches(query)).collect()
    }

    /// Resolves a name query to a product.
    ///
    /// One match is returned directly. Several matches come back as
    /// [`Lookup::Ambiguous`] so the caller can ask the operator which one was
    /// meant and resolve it with [`Candidates::select`].
    ///
    /// # Errors
    /// Returns `Error::ProductNotFound` when nothing matches.
    #[instrument(skip(self))]
    pub fn find_by_name(&self, query: &str) -> Result<Lookup<'_>> {
        let mut products = self.matching(query);
        debug!(matches = products.len(), "Name lookup finished");

        match products.len() {
            0 => Err(Error::ProductNotFound {
                name: query.trim().to_string(),
            }),
            1 => Ok(Lookup::Found(products.remove(0))),
            _ => Ok(Lookup::Ambiguous(Candidates { products })),
        }
    }

    /// All products in the order they were added.
    pub fn list_all(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|id| self.products.get(id))
    }

    /// Character width of the longest display name, or 0 when empty.
    #[must_use]
    pub fn longest_display_name(&self) -> usize {
        self.list_all()
            .map(|p| p.display_name().chars().count())
            .max()
            .unwrap_or(0)
    }
}

fn not_found(id: ProductId) -> Error {
    Error::ProductNotFound {
        name: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::manager_with;

    fn unwrap_ambiguous<'a>(lookup: Lookup<'a>) -> Candidates<'a> {
        match lookup {
            Lookup::Ambiguous(candidates) => candidates,
            Lookup::Found(p) => panic!("expected several matches, got {}", p.display_name()),
        }
    }

    #[test]
    fn test_add_product() -> Result<()> {
        let mut manager = InventoryManager::new();

        let id = manager.add_product("widget", Some(3))?.id();
        let product = manager.get(id).unwrap();
        assert_eq!(product.display_name(), "Widget");
        assert_eq!(product.quantity(), 3);

        // Quantity defaults to zero
        let id = manager.add_product("gadget", None)?.id();
        assert!(manager.get(id).unwrap().is_out_of_stock());

        // Duplicate names are allowed
        manager.add_product("widget", Some(1))?;
        assert_eq!(manager.len(), 3);
        Ok(())
    }

    #[test]
    fn test_add_product_validation() {
        let mut manager = InventoryManager::new();

        let err = manager.add_product("widget", Some(-2)).unwrap_err();
        assert!(matches!(err, Error::InvalidQuantity { quantity: -2 }));

        let err = manager.add_product("  ", Some(2)).unwrap_err();
        assert!(matches!(err, Error::InvalidName));

        assert!(manager.is_empty());
    }

    #[test]
    fn test_remove_product() -> Result<()> {
        let mut manager = manager_with(&[("apple", 5), ("pear", 2)]);
        let apple = manager.matching("apple")[0].id();

        let removed = manager.remove_product(apple)?;
        assert_eq!(removed.display_name(), "Apple");
        assert_eq!(manager.len(), 1);
        assert!(manager.get(apple).is_none());
        Ok(())
    }

    #[test]
    fn test_remove_unknown_product_leaves_collection_alone() {
        let mut manager = manager_with(&[("apple", 5)]);

        let err = manager.remove_product(ProductId::new()).unwrap_err();
        assert!(matches!(err, Error::ProductNotFound { name: _ }));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_recount() -> Result<()> {
        let mut manager = InventoryManager::new();
        let id = manager.add_product("widget", Some(3))?.id();

        assert_eq!(manager.recount(id, 10)?.quantity(), 10);

        // Recounting to the same value is a no-op
        assert_eq!(manager.recount(id, 10)?.quantity(), 10);

        let err = manager.recount(id, -1).unwrap_err();
        assert!(matches!(err, Error::InvalidQuantity { quantity: -1 }));
        assert_eq!(manager.get(id).unwrap().quantity(), 10);

        let err = manager.recount(ProductId::new(), 1).unwrap_err();
        assert!(matches!(err, Error::ProductNotFound { name: _ }));
        Ok(())
    }

    #[test]
    fn test_find_by_name_single_match() -> Result<()> {
        let manager = manager_with(&[("apple", 5), ("banana", 2)]);

        let Lookup::Found(product) = manager.find_by_name("BANANA")? else {
            panic!("expected a single match");
        };
        assert_eq!(product.display_name(), "Banana");
        Ok(())
    }

    #[test]
    fn test_find_by_name_ambiguous_lists_candidates_in_order() -> Result<()> {
        let manager = manager_with(&[("Apple", 5), ("Pear", 1), ("Apple Pie", 2)]);

        let candidates = unwrap_ambiguous(manager.find_by_name("apple")?);
        let names: Vec<String> = candidates.iter().map(Product::display_name).collect();
        assert_eq!(names, ["Apple", "Apple Pie"]);

        assert_eq!(candidates.select(1)?.display_name(), "Apple Pie");
        Ok(())
    }

    #[test]
    fn test_find_by_name_out_of_range_selection() -> Result<()> {
        let manager = manager_with(&[("Apple", 5), ("Apple Pie", 2)]);

        let candidates = unwrap_ambiguous(manager.find_by_name("apple")?);
        let err = candidates.select(2).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfRangeSelection { index: 2, count: 2 }
        ));
        Ok(())
    }

    #[test]
    fn test_find_by_name_short_query_needs_exact_name() {
        let manager = manager_with(&[("Apple", 5), ("Apple Pie", 2)]);

        let err = manager.find_by_name("pie").unwrap_err();
        assert!(matches!(err, Error::ProductNotFound { ref name } if name == "pie"));
    }

    #[test]
    fn test_find_by_name_nothing_matches() {
        let manager = InventoryManager::new();
        assert!(matches!(
            manager.find_by_name("anything"),
            Err(Error::ProductNotFound { name: _ })
        ));
    }

    #[test]
    fn test_list_all_keeps_insertion_order_after_removal() -> Result<()> {
        let mut manager = InventoryManager::new();
        manager.add_product("zucchini", Some(1))?;
        let middle = manager.add_product("apple", Some(1))?.id();
        manager.add_product("mango", Some(1))?;

        manager.remove_product(middle)?;
        let names: Vec<String> = manager.list_all().map(Product::display_name).collect();
        assert_eq!(names, ["Zucchini", "Mango"]);
        Ok(())
    }

    #[test]
    fn test_longest_display_name() {
        assert_eq!(InventoryManager::new().longest_display_name(), 0);

        let manager = manager_with(&[("tea", 1), ("green tea", 1)]);
        assert_eq!(manager.longest_display_name(), 9);
    }

    #[test]
    fn test_managers_are_independent() -> Result<()> {
        let mut first = InventoryManager::new();
        let second = InventoryManager::new();

        first.add_product("widget", Some(1))?;
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        Ok(())
    }
}
