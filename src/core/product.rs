//! Product entity - a named stock line with a non-negative count.
//!
//! A product's name is stored once, in normalized form (trimmed and lower-cased),
//! and never changes. The quantity can only move through [`Product::set_quantity`],
//! which validates before touching any state. The name-matching rule used by the
//! inventory lookup lives here as well.

use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Queries of this many characters or fewer only match a whole name.
const MIN_PARTIAL_QUERY_LEN: usize = 3;

/// Opaque product identifier, freshly generated for every product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Point-in-time view of a product, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductInfo {
    /// Product identifier
    pub id: ProductId,
    /// Title-cased display name
    pub name: String,
    /// Units currently in stock
    pub quantity: u64,
    /// `true` when `quantity` is zero
    pub out_of_stock: bool,
    /// When the product was added
    pub created_at: DateTime<Utc>,
    /// When the quantity was last set
    pub updated_at: DateTime<Utc>,
}

/// A single inventory line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    quantity: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with a fresh identifier.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The name is empty or whitespace-only (`Error::InvalidName`)
    /// - `initial_quantity` is negative (`Error::InvalidQuantity`)
    pub fn new(name: &str, initial_quantity: i64) -> Result<Self> {
        let name = normalize(name);
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        let quantity = validate_quantity(initial_quantity)?;
        let now = Utc::now();

        Ok(Self {
            id: ProductId::new(),
            name,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Creates a product with nothing in stock.
    ///
    /// # Errors
    /// Returns `Error::InvalidName` if the name is empty or whitespace-only.
    pub fn with_name(name: &str) -> Result<Self> {
        Self::new(name, 0)
    }

    /// The product's identifier.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    /// Units currently in stock.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }

    /// When the product was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the quantity was last set.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replaces the stock count.
    ///
    /// Setting the current value again is allowed and only refreshes `updated_at`.
    ///
    /// # Errors
    /// Returns `Error::InvalidQuantity` if `new_quantity` is negative; the product
    /// is left untouched in that case.
    pub fn set_quantity(&mut self, new_quantity: i64) -> Result<()> {
        self.quantity = validate_quantity(new_quantity)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// `true` when nothing is left in stock.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// The name with the first letter of every word capitalized.
    ///
    /// Any character that is not a letter starts a new word, so `"12-pack soda"`
    /// becomes `"12-Pack Soda"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        title_case(&self.name)
    }

    /// Decides whether `query` refers to this product.
    ///
    /// Both sides are trimmed and lower-cased. The query must be a substring of
    /// the name, and queries of three characters or fewer must also equal the
    /// whole name: `"cat"` finds `"Cat"` but not `"Category"`, while `"categ"`
    /// finds `"Category"`.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = normalize(query);
        self.name.contains(&query)
            && (query.chars().count() > MIN_PARTIAL_QUERY_LEN || self.name == query)
    }

    /// Snapshot of the product for display.
    #[must_use]
    pub fn describe(&self) -> ProductInfo {
        ProductInfo {
            id: self.id,
            name: self.display_name(),
            quantity: self.quantity,
            out_of_stock: self.is_out_of_stock(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validate_quantity(quantity: i64) -> Result<u64> {
    u64::try_from(quantity).map_err(|_| Error::InvalidQuantity { quantity })
}

/// Upper-cases the first letter of each run of letters and lower-cases the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
