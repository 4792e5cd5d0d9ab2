use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductId, ProductName, ProductPrice, ProductStock,
};

/// A catalog product as stored by the persistence gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub stock: ProductStock,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Information required to create a new [`Product`].
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub stock: ProductStock,
    pub image_url: Option<ImageUrl>,
    pub created_at: NaiveDateTime,
}

/// Partial update of a [`Product`]. `None` leaves the stored value untouched.
#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Clone)]
pub struct ProductUpdate {
    pub name: Option<ProductName>,
    pub description: Option<ProductDescription>,
    pub price: Option<ProductPrice>,
    pub category: Option<CategoryName>,
    pub stock: Option<ProductStock>,
    pub image_url: Option<ImageUrl>,
}

impl ProductUpdate {
    /// Whether the update carries no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
    }

    /// Merge the supplied fields onto `product`.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image_url) = &self.image_url {
            product.image_url = Some(image_url.clone());
        }
    }
}

/// Column a product listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "price")]
    Price,
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
}

/// Direction of a product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// One page of products plus the number of rows matching the filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: usize,
}
