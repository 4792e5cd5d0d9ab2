use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductPage};
use crate::forms::FieldViolation;

/// JSON representation of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Product> for ProductDto {
    fn from(value: Product) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
            price: value.price.get(),
            category: value.category.into_inner(),
            stock: value.stock.get(),
            image_url: value.image_url.map(|url| url.into_inner()),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Body of `GET /products`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListDto {
    pub products: Vec<ProductDto>,
    pub total: usize,
}

impl From<ProductPage> for ProductListDto {
    fn from(value: ProductPage) -> Self {
        Self {
            products: value.products.into_iter().map(ProductDto::from).collect(),
            total: value.total,
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    pub status_code: u16,
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<FieldViolation>,
}
