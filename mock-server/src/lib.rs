use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: u64,
    pub title: String,
    pub price: f64,
    pub image: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stock {
    pub id: u64,
    pub amount: i64,
}

/// Products and their available stock, keyed by product id.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    products: BTreeMap<u64, Product>,
    stock: BTreeMap<u64, i64>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product with `amount` units in stock.
    pub fn with_product(mut self, product: Product, amount: i64) -> Self {
        self.stock.insert(product.id, amount);
        self.products.insert(product.id, product);
        self
    }

    /// The storefront's shoe catalog.
    pub fn fixture() -> Self {
        const CDN: &str = "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux";
        [
            (1, "Tênis de Caminhada Leve Confortável", 179.9, "tenis1.jpg", 3),
            (2, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, "tenis2.jpg", 5),
            (3, "Tênis Adidas Duramo Lite 2.0", 219.9, "tenis3.jpg", 2),
            (4, "Tênis de Caminhada Leve Confortável", 179.9, "tenis1.jpg", 1),
            (5, "Tênis VR Caminhada Confortável Detalhes Couro Masculino", 139.9, "tenis2.jpg", 5),
            (6, "Tênis Adidas Duramo Lite 2.0", 219.9, "tenis3.jpg", 10),
        ]
        .into_iter()
        .fold(Self::new(), |inventory, (id, title, price, image, amount)| {
            inventory.with_product(
                Product {
                    id,
                    title: title.to_string(),
                    price,
                    image: format!("{CDN}/{image}"),
                },
                amount,
            )
        })
    }
}

pub type Db = Arc<RwLock<Inventory>>;

pub fn app() -> Router {
    app_with(Inventory::fixture())
}

pub fn app_with(inventory: Inventory) -> Router {
    let db: Db = Arc::new(RwLock::new(inventory));
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/stock", get(list_stock))
        .route("/stock/{id}", get(get_stock))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Inventory::fixture()).await
}

pub async fn run_with(listener: TcpListener, inventory: Inventory) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(inventory)).await
}

async fn list_products(State(db): State<Db>) -> Json<Vec<Product>> {
    let inventory = db.read().await;
    Json(inventory.products.values().cloned().collect())
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let inventory = db.read().await;
    inventory.products.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn list_stock(State(db): State<Db>) -> Json<Vec<Stock>> {
    let inventory = db.read().await;
    Json(
        inventory
            .stock
            .iter()
            .map(|(&id, &amount)| Stock { id, amount })
            .collect(),
    )
}

async fn get_stock(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Stock>, StatusCode> {
    let inventory = db.read().await;
    inventory
        .stock
        .get(&id)
        .map(|&amount| Json(Stock { id, amount }))
        .ok_or(StatusCode::NOT_FOUND)
}
