use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Inventory, Product, Stock};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- products ---

#[tokio::test]
async fn list_products_returns_fixture() {
    let resp = app().oneshot(get("/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert_eq!(products.len(), 6);
    assert_eq!(products[0].id, 1);
}

#[tokio::test]
async fn list_products_empty_inventory() {
    let resp = app_with(Inventory::new()).oneshot(get("/products")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let products: Vec<Product> = body_json(resp).await;
    assert!(products.is_empty());
}

#[tokio::test]
async fn get_product_returns_record() {
    let resp = app().oneshot(get("/products/3")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let product: Product = body_json(resp).await;
    assert_eq!(product.title, "Tênis Adidas Duramo Lite 2.0");
    assert_eq!(product.price, 219.9);
}

#[tokio::test]
async fn get_product_not_found() {
    let resp = app().oneshot(get("/products/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

#[tokio::test]
async fn get_product_bad_id_returns_400() {
    let resp = app().oneshot(get("/products/not-a-number")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- stock ---

#[tokio::test]
async fn get_stock_returns_amount() {
    let resp = app().oneshot(get("/stock/1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let stock: Stock = body_json(resp).await;
    assert_eq!(stock, Stock { id: 1, amount: 3 });
}

#[tokio::test]
async fn get_stock_not_found() {
    let resp = app().oneshot(get("/stock/999")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stock_listing_matches_custom_inventory() {
    let inventory = Inventory::new().with_product(
        Product {
            id: 42,
            title: "Sold out".to_string(),
            price: 10.0,
            image: "img".to_string(),
        },
        0,
    );

    let resp = app_with(inventory).oneshot(get("/stock")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let stock: Vec<Stock> = body_json(resp).await;
    assert_eq!(stock, vec![Stock { id: 42, amount: 0 }]);
}

// --- one router, several requests ---

#[tokio::test]
async fn product_and_stock_agree_on_ids() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/products"))
        .await
        .unwrap();
    let products: Vec<Product> = body_json(resp).await;

    for product in products {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(get(&format!("/stock/{}", product.id)))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "stock for {}", product.id);
        let stock: Stock = body_json(resp).await;
        assert_eq!(stock.id, product.id);
    }
}
