//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `ShopClient` holds only a `base_url` and carries no mutable state between
//! calls. Each lookup is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! [`HttpCatalog`] glues the two halves to a host `Transport`.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{ProductData, ProductId, Stock};

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct ShopClient {
    base_url: String,
}

impl ShopClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_get_stock(&self, id: ProductId) -> HttpRequest {
        self.get(format!("{}/stock/{id}", self.base_url))
    }

    pub fn build_get_product(&self, id: ProductId) -> HttpRequest {
        self.get(format!("{}/products/{id}", self.base_url))
    }

    pub fn build_list_products(&self) -> HttpRequest {
        self.get(format!("{}/products", self.base_url))
    }

    pub fn parse_get_stock(&self, response: HttpResponse) -> Result<Stock, ApiError> {
        parse_json(response)
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<ProductData, ApiError> {
        parse_json(response)
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<ProductData>, ApiError> {
        parse_json(response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response, 200)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// `Catalog` backed by the HTTP API: `ShopClient` builds and parses, the
/// transport does the round-trip.
#[derive(Debug, Clone)]
pub struct HttpCatalog<T> {
    client: ShopClient,
    transport: T,
}

impl<T: Transport> HttpCatalog<T> {
    pub fn new(client: ShopClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ShopClient {
        &self.client
    }

    /// Full catalog listing, for hosts rendering a product grid.
    pub async fn list_products(&self) -> Result<Vec<ProductData>, ApiError> {
        let response = self.transport.execute(self.client.build_list_products()).await?;
        self.client.parse_list_products(response)
    }
}

impl<T: Transport> Catalog for HttpCatalog<T> {
    async fn stock(&self, id: ProductId) -> Result<Stock, ApiError> {
        let request = self.client.build_get_stock(id);
        debug!(product_id = id, path = %request.path, "fetching stock");
        let response = self.transport.execute(request).await?;
        self.client.parse_get_stock(response)
    }

    async fn product(&self, id: ProductId) -> Result<ProductData, ApiError> {
        let request = self.client.build_get_product(id);
        debug!(product_id = id, path = %request.path, "fetching product");
        let response = self.transport.execute(request).await?;
        self.client.parse_get_product(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ShopClient {
        ShopClient::new("http://localhost:3333")
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_get_stock_produces_correct_request() {
        let req = client().build_get_stock(5);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3333/stock/5");
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn build_get_product_produces_correct_request() {
        let req = client().build_get_product(12);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3333/products/12");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ShopClient::new("http://localhost:3333/");
        let req = client.build_list_products();
        assert_eq!(req.path, "http://localhost:3333/products");
    }

    #[test]
    fn parse_get_stock_success() {
        let stock = client().parse_get_stock(ok(r#"{"id":5,"amount":3}"#)).unwrap();
        assert_eq!(stock, Stock { product_id: 5, amount: 3 });
    }

    #[test]
    fn parse_get_product_success() {
        let product = client()
            .parse_get_product(ok(
                r#"{"id":1,"title":"Tênis de Caminhada","price":179.9,"image":"https://img.example/1.jpg"}"#,
            ))
            .unwrap();
        assert_eq!(product.title, "Tênis de Caminhada");
        assert_eq!(product.price, 179.9);
    }

    #[test]
    fn parse_list_products_success() {
        let products = client()
            .parse_list_products(ok(
                r#"[{"id":1,"title":"A","price":1.0,"image":"a"},{"id":2,"title":"B","price":2.0,"image":"b"}]"#,
            ))
            .unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].id, 2);
    }

    #[test]
    fn parse_get_stock_not_found() {
        let response = HttpResponse {
            status: 404,
            body: String::new(),
        };
        let err = client().parse_get_stock(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_get_product_wrong_status() {
        let response = HttpResponse {
            status: 500,
            body: "internal error".to_string(),
        };
        let err = client().parse_get_product(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_get_stock_bad_json() {
        let err = client().parse_get_stock(ok("not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
