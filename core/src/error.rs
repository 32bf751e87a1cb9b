//! Error types for the catalog client, storage backends, and the cart store.
//!
//! # Design
//! `NotFound` gets a dedicated `ApiError` variant because callers frequently
//! distinguish "the resource does not exist" from "the server returned an
//! unexpected status." All other non-2xx responses land in `HttpError` with
//! the raw status code and body for debugging.
//!
//! `CartError` is what the store reports for a rejected mutation. Each kind
//! maps onto exactly one user-facing message through [`CartError::notice`].

use thiserror::Error;

use crate::types::ProductId;

/// Shown when the requested quantity exceeds upstream stock.
pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
/// Shown when adding a product fails for any other reason.
pub const ADD_FAILED: &str = "Erro na adição do produto";
/// Shown when removing a product fails.
pub const REMOVE_FAILED: &str = "Erro na remoção do produto";
/// Shown when setting a product quantity fails for any other reason.
pub const UPDATE_FAILED: &str = "Erro na alteração de quantidade do produto";

/// Errors returned by `ShopClient` parse methods and `Transport`s.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the requested product or stock does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request never produced a response (connection refused, reset...).
    #[error("transport failed: {0}")]
    Transport(String),
}

/// Errors returned by `KeyValueStore` implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not hold a key/value object.
    #[error("storage is corrupt: {0}")]
    Corrupt(String),
}

/// The mutation a `CartError` came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl Operation {
    /// Generic failure message for this operation.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => ADD_FAILED,
            Operation::Remove => REMOVE_FAILED,
            Operation::Update => UPDATE_FAILED,
        }
    }
}

/// Why a cart mutation was rejected. The cart is unchanged in every case.
#[derive(Debug, Error)]
pub enum CartError {
    #[error("product {product_id}: requested {requested}, only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    #[error("product {0} is not in the cart")]
    NotFound(ProductId),

    #[error("product {product_id}: invalid amount {amount}")]
    InvalidAmount { product_id: ProductId, amount: i64 },

    #[error("catalog request failed: {0}")]
    Upstream(#[from] ApiError),

    #[error("could not persist cart: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// The message shown to the user when `op` fails with this error.
    pub fn notice(&self, op: Operation) -> &'static str {
        match self {
            CartError::OutOfStock { .. } => OUT_OF_STOCK,
            _ => op.failure_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_stock_notice_ignores_operation() {
        let err = CartError::OutOfStock {
            product_id: 1,
            requested: 3,
            available: 2,
        };
        assert_eq!(err.notice(Operation::Add), OUT_OF_STOCK);
        assert_eq!(err.notice(Operation::Update), OUT_OF_STOCK);
    }

    #[test]
    fn other_errors_use_operation_message() {
        assert_eq!(CartError::NotFound(1).notice(Operation::Remove), REMOVE_FAILED);
        assert_eq!(
            CartError::InvalidAmount { product_id: 1, amount: 0 }.notice(Operation::Update),
            UPDATE_FAILED
        );
        assert_eq!(
            CartError::from(ApiError::NotFound).notice(Operation::Add),
            ADD_FAILED
        );
    }

    #[test]
    fn http_error_display_includes_status() {
        let err = ApiError::HttpError {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }
}
