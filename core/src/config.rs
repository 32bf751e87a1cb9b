//! Session configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Storage key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "cart-storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Base URL of the catalog API (`/products`, `/stock`).
    pub api_base_url: String,
    pub storage_key: String,
    /// File used by `FileStorage`.
    pub storage_path: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
        }
    }
}

impl CartConfig {
    /// Read `CART_API_URL`, `CART_STORAGE_KEY` and `CART_STORAGE_PATH`,
    /// falling back to the defaults for any that are unset or empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            api_base_url: var("CART_API_URL").unwrap_or(defaults.api_base_url),
            storage_key: var("CART_STORAGE_KEY").unwrap_or(defaults.storage_key),
            storage_path: var("CART_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
        }
    }
}
