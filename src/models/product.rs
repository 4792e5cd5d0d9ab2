use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{
    NewProduct as DomainNewProduct, Product as DomainProduct, ProductUpdate,
};
use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductName, ProductPrice, ProductStock,
    TypeConstraintError,
};

/// Diesel model representing the `products` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Product {
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

/// Insertable form of [`Product`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub stock: i32,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Partial update; `None` columns are left out of the `SET` clause.
/// `updated_at` is set by the repository.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

impl TryFrom<Product> for DomainProduct {
    type Error = TypeConstraintError;

    fn try_from(product: Product) -> Result<Self, Self::Error> {
        Ok(Self {
            id: product.id.try_into()?,
            name: ProductName::new(product.name)?,
            description: ProductDescription::new(product.description)?,
            price: ProductPrice::new(product.price)?,
            category: CategoryName::new(product.category)?,
            stock: ProductStock::new(product.stock)?,
            image_url: product.image_url.map(ImageUrl::new).transpose()?,
            created_at: product.created_at,
            updated_at: product.updated_at,
        })
    }
}

impl From<DomainNewProduct> for NewProduct {
    fn from(product: DomainNewProduct) -> Self {
        Self {
            name: product.name.into_inner(),
            description: product.description.into_inner(),
            price: product.price.get(),
            category: product.category.into_inner(),
            stock: product.stock.get(),
            image_url: product.image_url.map(ImageUrl::into_inner),
            created_at: product.created_at,
            updated_at: product.created_at,
        }
    }
}

impl From<ProductUpdate> for ProductChangeset {
    fn from(update: ProductUpdate) -> Self {
        Self {
            name: update.name.map(ProductName::into_inner),
            description: update.description.map(ProductDescription::into_inner),
            price: update.price.map(ProductPrice::get),
            category: update.category.map(CategoryName::into_inner),
            stock: update.stock.map(ProductStock::get),
            image_url: update.image_url.map(ImageUrl::into_inner),
        }
    }
}
