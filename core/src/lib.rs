//! Client-side shopping-cart core for the RocketShoes storefront.
//!
//! # Overview
//! [`CartStore`] holds the cart line items, validates every mutation against
//! the stock service, and mirrors the cart into durable key/value storage.
//! The UI reads snapshots or subscribes to changes; it never mutates the cart
//! directly.
//!
//! # Design
//! - Host-does-IO: [`ShopClient`] builds `HttpRequest` values and parses
//!   `HttpResponse` values; a host [`Transport`] executes them. The core
//!   never opens a socket.
//! - Collaborators sit behind small traits ([`Catalog`], [`KeyValueStore`],
//!   [`Notifier`]) injected once per session.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod storage;
pub mod store;
pub mod types;

pub use catalog::Catalog;
pub use client::{HttpCatalog, ShopClient};
pub use config::CartConfig;
pub use error::{ApiError, CartError, Operation, StorageError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use notify::{LogNotifier, Notifier};
pub use storage::{FileStorage, KeyValueStore, MemoryStorage};
pub use store::CartStore;
pub use types::{Cart, Product, ProductData, ProductId, Stock, UpdateProductAmount};
