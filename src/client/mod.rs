//! Typed HTTP client for the products API.
//!
//! Each method issues exactly one request. There is no retry, caching or
//! request deduplication; failures are returned to the caller unchanged.

use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod view;

/// Errors returned by [`ProductClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server responded with {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl ClientError {
    /// HTTP status of a rejected request, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
        }
    }
}

/// A product as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    #[serde(default)]
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body of an update request; only the supplied fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Column to order a listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "createdAt")]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query string of a list request. Unset fields use the server defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// Body of a list response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub total: usize,
}

/// Thin async wrapper over the `/products` resource.
#[derive(Debug, Clone)]
pub struct ProductClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ProductClient {
    /// Create a client for the server at `base_url` (e.g. `http://localhost:3000`).
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            endpoint: format!("{}/products", base_url.trim_end_matches('/')),
        }
    }

    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductList, ClientError> {
        let response = self.http.get(&self.endpoint).query(query).send().await?;
        parse(response).await
    }

    pub async fn get_product(&self, id: i32) -> Result<Product, ClientError> {
        let response = self.http.get(self.item_url(id)).send().await?;
        parse(response).await
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, ClientError> {
        let response = self.http.post(&self.endpoint).json(input).send().await?;
        parse(response).await
    }

    pub async fn update_product(
        &self,
        id: i32,
        patch: &ProductPatch,
    ) -> Result<Product, ClientError> {
        let response = self.http.put(self.item_url(id)).json(patch).send().await?;
        parse(response).await
    }

    /// Delete a product, returning it as it was before deletion.
    pub async fn delete_product(&self, id: i32) -> Result<Product, ClientError> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        parse(response).await
    }

    fn item_url(&self, id: i32) -> String {
        format!("{}/{id}", self.endpoint)
    }
}

async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    log::debug!("Products API answered {status}: {body}");
    Err(ClientError::Status { status, body })
}
