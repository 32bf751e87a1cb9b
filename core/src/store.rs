//! The cart store: owns the cart, validates mutations, keeps storage in sync.
//!
//! # Design
//! - Collaborators are injected once per session: a [`Catalog`] for stock
//!   and product lookups, a [`KeyValueStore`] for the persisted mirror, and a
//!   [`Notifier`] for user-facing errors.
//! - Mutations are serialized through an async FIFO lock. An operation holds
//!   its turn across the catalog round-trip, so two rapid adds never act on
//!   the same snapshot.
//! - A mutation builds a candidate cart, writes it to storage, and only then
//!   publishes it. Any failure leaves both storage and the published cart at
//!   their previous values and emits exactly one notification.
//! - Committed carts are published through a `watch` channel; `cart()` reads
//!   the latest snapshot and `subscribe()` hands out a receiver for re-renders.

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::client::{HttpCatalog, ShopClient};
use crate::config::CartConfig;
use crate::error::{CartError, Operation, StorageError};
use crate::http::Transport;
use crate::notify::Notifier;
use crate::storage::{FileStorage, KeyValueStore};
use crate::types::{Cart, ProductId, Stock, UpdateProductAmount};

pub struct CartStore<C, S, N> {
    catalog: C,
    storage: S,
    notifier: N,
    key: String,
    state: watch::Sender<Cart>,
    turn: Mutex<()>,
}

impl<C, S, N> CartStore<C, S, N>
where
    C: Catalog,
    S: KeyValueStore,
    N: Notifier,
{
    /// Build a store, restoring the cart persisted under `key`.
    ///
    /// A missing, unreadable, or malformed blob yields an empty cart. The
    /// stored value is left as is until the next successful mutation.
    pub fn load(catalog: C, storage: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = restore(&storage, &key);
        debug!(key = %key, lines = cart.len(), "cart restored");
        let (state, _) = watch::channel(cart);
        Self {
            catalog,
            storage,
            notifier,
            key,
            state,
            turn: Mutex::new(()),
        }
    }

    /// Snapshot of the committed cart.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that observes every committed cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// Add one unit of `product_id`, appending a new line if needed.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _turn = self.turn.lock().await;
        debug!(product_id, "add_product");
        let outcome = self.plan_add(product_id).await;
        self.settle(Operation::Add, product_id, outcome)
    }

    /// Drop the line for `product_id`.
    ///
    /// Performs no catalog lookup; it only waits for its turn behind any
    /// in-flight mutation.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _turn = self.turn.lock().await;
        debug!(product_id, "remove_product");
        let cart = self.cart();
        let outcome = if cart.contains(product_id) {
            Ok(cart.without(product_id))
        } else {
            Err(CartError::NotFound(product_id))
        };
        self.settle(Operation::Remove, product_id, outcome)
    }

    /// Set the quantity of an existing line to exactly `amount`.
    ///
    /// An amount below 1 is rejected, never treated as a removal.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) -> Result<(), CartError> {
        let _turn = self.turn.lock().await;
        let UpdateProductAmount { product_id, amount } = update;
        debug!(product_id, amount, "update_product_amount");
        let outcome = self.plan_update(product_id, amount).await;
        self.settle(Operation::Update, product_id, outcome)
    }

    async fn plan_add(&self, product_id: ProductId) -> Result<Cart, CartError> {
        let stock = self.catalog.stock(product_id).await?;
        let cart = self.cart();
        match cart.get(product_id) {
            None => {
                ensure_available(product_id, 1, &stock)?;
                let data = self.catalog.product(product_id).await?;
                Ok(cart.with_appended(data.into_line(1)))
            }
            Some(line) => {
                let requested = i64::from(line.amount) + 1;
                ensure_available(product_id, requested, &stock)?;
                let next = line.amount.checked_add(1).ok_or(CartError::OutOfStock {
                    product_id,
                    requested,
                    available: stock.amount,
                })?;
                Ok(cart.with_amount(product_id, next))
            }
        }
    }

    async fn plan_update(&self, product_id: ProductId, amount: i64) -> Result<Cart, CartError> {
        if !self.cart().contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }
        if amount < 1 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }
        let stock = self.catalog.stock(product_id).await?;
        ensure_available(product_id, amount, &stock)?;
        let amount =
            u32::try_from(amount).map_err(|_| CartError::InvalidAmount { product_id, amount })?;
        Ok(self.cart().with_amount(product_id, amount))
    }

    /// Commit a planned cart or report why it was rejected.
    fn settle(
        &self,
        op: Operation,
        product_id: ProductId,
        outcome: Result<Cart, CartError>,
    ) -> Result<(), CartError> {
        match outcome.and_then(|next| self.commit(next)) {
            Ok(()) => Ok(()),
            Err(err) => {
                warn!(?op, product_id, error = %err, "cart mutation rejected");
                self.notifier.error(err.notice(op));
                Err(err)
            }
        }
    }

    fn commit(&self, next: Cart) -> Result<(), CartError> {
        let blob = serde_json::to_string(&next).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        self.storage.set(&self.key, &blob)?;
        debug!(lines = next.len(), "cart committed");
        self.state.send_replace(next);
        Ok(())
    }
}

impl<T, N> CartStore<HttpCatalog<T>, FileStorage, N>
where
    T: Transport,
    N: Notifier,
{
    /// Store wired from `config`: the HTTP catalog at `api_base_url` and a
    /// `FileStorage` at `storage_path`, keyed by `storage_key`.
    pub fn open(config: &CartConfig, transport: T, notifier: N) -> Self {
        let catalog = HttpCatalog::new(ShopClient::new(&config.api_base_url), transport);
        let storage = FileStorage::new(&config.storage_path);
        Self::load(catalog, storage, notifier, config.storage_key.as_str())
    }
}

fn ensure_available(product_id: ProductId, requested: i64, stock: &Stock) -> Result<(), CartError> {
    if stock.amount < requested {
        return Err(CartError::OutOfStock {
            product_id,
            requested,
            available: stock.amount,
        });
    }
    Ok(())
}

fn restore<S: KeyValueStore>(storage: &S, key: &str) -> Cart {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(err) => {
            warn!(key, error = %err, "persisted cart unreadable, starting empty");
            return Cart::new();
        }
    };
    let cart: Cart = match serde_json::from_str(&raw) {
        Ok(cart) => cart,
        Err(err) => {
            warn!(key, error = %err, "persisted cart malformed, starting empty");
            return Cart::new();
        }
    };
    if let Err(product_id) = cart.validate() {
        warn!(key, product_id, "persisted cart has an invalid line, starting empty");
        return Cart::new();
    }
    cart
}
