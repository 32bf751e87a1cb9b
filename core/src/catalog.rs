//! The store's view of the product/stock service.

use crate::error::ApiError;
use crate::types::{ProductData, ProductId, Stock};

/// Stock and product lookups the cart validates against.
///
/// [`HttpCatalog`](crate::HttpCatalog) is the network-backed implementation;
/// tests substitute in-memory ones.
#[allow(async_fn_in_trait)]
pub trait Catalog {
    /// Units currently available upstream for `id`.
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError>;

    /// Catalog record for `id`, without a cart amount.
    async fn product(&self, id: ProductId) -> Result<ProductData, ApiError>;
}
