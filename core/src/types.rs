//! Domain DTOs for the storefront API and the cart itself.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! `Cart` never mutates in place. Every change goes through a `with_*` /
//! `without` helper that returns a new cart, so the store can validate and
//! persist the candidate before it replaces the committed one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Identifier of a product in the catalog.
pub type ProductId = u64;

/// Catalog record for a product, as served by `GET /products/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductData {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
}

impl ProductData {
    /// Turn a catalog record into a cart line holding `amount` units.
    pub fn into_line(self, amount: u32) -> Product {
        Product {
            id: self.id,
            title: self.title,
            price: self.price,
            image: self.image,
            amount,
        }
    }
}

/// A line in the cart: the catalog record plus the quantity held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub image: String,
    pub amount: u32,
}

impl Product {
    /// Line subtotal (price × amount).
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.amount)
    }
}

/// Units available upstream for a product, as served by `GET /stock/{id}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub amount: i64,
}

/// Request payload for setting the quantity of a cart line.
///
/// `amount` is signed so that out-of-range requests (zero or negative) reach
/// the store and are rejected there instead of failing to construct.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

/// Ordered cart lines, unique by product id.
///
/// Serializes as a bare JSON array, which is the persisted blob format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart(Vec<Product>);

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Product] {
        &self.0
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.0.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Copy of this cart with `product` appended at the end.
    pub fn with_appended(&self, product: Product) -> Self {
        let mut lines = self.0.clone();
        lines.push(product);
        Self(lines)
    }

    /// Copy of this cart with the amount of line `id` replaced.
    /// Lines other than `id` are left untouched.
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        Self(
            self.0
                .iter()
                .map(|p| {
                    if p.id == id {
                        Product { amount, ..p.clone() }
                    } else {
                        p.clone()
                    }
                })
                .collect(),
        )
    }

    /// Copy of this cart without line `id`, remaining lines in order.
    pub fn without(&self, id: ProductId) -> Self {
        Self(self.0.iter().filter(|p| p.id != id).cloned().collect())
    }

    /// Quantity held per product id.
    pub fn amounts(&self) -> HashMap<ProductId, u32> {
        self.0.iter().map(|p| (p.id, p.amount)).collect()
    }

    /// Line subtotal for `id`, if present.
    pub fn subtotal(&self, id: ProductId) -> Option<f64> {
        self.get(id).map(Product::subtotal)
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(Product::subtotal).sum()
    }

    /// Check the shape invariants: every amount is at least 1 and ids are
    /// unique. Returns the first offending id.
    pub fn validate(&self) -> Result<(), ProductId> {
        let mut seen = Vec::with_capacity(self.0.len());
        for line in &self.0 {
            if line.amount < 1 || seen.contains(&line.id) {
                return Err(line.id);
            }
            seen.push(line.id);
        }
        Ok(())
    }
}

impl From<Vec<Product>> for Cart {
    fn from(lines: Vec<Product>) -> Self {
        Self(lines)
    }
}
