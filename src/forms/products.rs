use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::product::{NewProduct, ProductUpdate, SortField, SortOrder};
use crate::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductName, ProductPrice, ProductStock,
};
use crate::forms::{FieldViolation, check, collect_violations};
use crate::repository::DEFAULT_ITEMS_PER_PAGE;
use crate::services::products::ListProductsParams;

/// Body of `POST /products`.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a `required` violation instead of a decoding failure.
#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductForm {
    #[validate(
        required(code = "required", message = "name should not be empty"),
        length(min = 1, code = "required", message = "name should not be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(code = "required", message = "description should not be empty"),
        length(min = 1, code = "required", message = "description should not be empty")
    )]
    pub description: Option<String>,
    #[validate(
        required(code = "required", message = "price should not be empty"),
        range(min = 1.0, code = "min", message = "price must not be less than 1")
    )]
    pub price: Option<f64>,
    #[validate(
        required(code = "required", message = "category should not be empty"),
        length(min = 1, code = "required", message = "category should not be empty")
    )]
    pub category: Option<String>,
    #[validate(
        required(code = "required", message = "stock should not be empty"),
        range(min = 0, code = "min", message = "stock must not be less than 0")
    )]
    pub stock: Option<i32>,
    #[validate(url(code = "url", message = "imageUrl must be a URL address"))]
    pub image_url: Option<String>,
}

/// Validated data for creating a product.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateProductPayload {
    pub name: ProductName,
    pub description: ProductDescription,
    pub price: ProductPrice,
    pub category: CategoryName,
    pub stock: ProductStock,
    pub image_url: Option<ImageUrl>,
}

impl CreateProductPayload {
    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            stock: self.stock,
            image_url: self.image_url,
            created_at: Utc::now().naive_utc(),
        }
    }
}

/// Body of `PUT /products/{id}`. Absent (or `null`) fields are left unchanged.
#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductForm {
    #[validate(length(min = 1, code = "required", message = "name should not be empty"))]
    pub name: Option<String>,
    #[validate(length(
        min = 1,
        code = "required",
        message = "description should not be empty"
    ))]
    pub description: Option<String>,
    #[validate(range(min = 1.0, code = "min", message = "price must not be less than 1"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, code = "required", message = "category should not be empty"))]
    pub category: Option<String>,
    #[validate(range(min = 0, code = "min", message = "stock must not be less than 0"))]
    pub stock: Option<i32>,
    #[validate(url(code = "url", message = "imageUrl must be a URL address"))]
    pub image_url: Option<String>,
}

/// Query string of `GET /products`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsForm {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    #[validate(range(min = 1, code = "min", message = "page must not be less than 1"))]
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProductFormError {
    #[error("product form validation failed: {}", join_messages(.0))]
    Validation(Vec<FieldViolation>),
}

fn join_messages(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl TryFrom<CreateProductForm> for CreateProductPayload {
    type Error = ProductFormError;

    fn try_from(value: CreateProductForm) -> Result<Self, Self::Error> {
        if let Err(errors) = value.validate() {
            return Err(ProductFormError::Validation(collect_violations(&errors)));
        }

        let mut violations = Vec::new();
        let name = check(&mut violations, ProductName::new(value.name.unwrap_or_default()));
        let description = check(
            &mut violations,
            ProductDescription::new(value.description.unwrap_or_default()),
        );
        let price = check(&mut violations, ProductPrice::new(value.price.unwrap_or_default()));
        let category = check(
            &mut violations,
            CategoryName::new(value.category.unwrap_or_default()),
        );
        let stock = check(&mut violations, ProductStock::new(value.stock.unwrap_or_default()));
        let image_url = match value.image_url {
            Some(url) => check(&mut violations, ImageUrl::new(url)).map(Some),
            None => Some(None),
        };

        match (name, description, price, category, stock, image_url) {
            (
                Some(name),
                Some(description),
                Some(price),
                Some(category),
                Some(stock),
                Some(image_url),
            ) if violations.is_empty() => Ok(Self {
                name,
                description,
                price,
                category,
                stock,
                image_url,
            }),
            _ => Err(ProductFormError::Validation(violations)),
        }
    }
}

impl TryFrom<UpdateProductForm> for ProductUpdate {
    type Error = ProductFormError;

    fn try_from(value: UpdateProductForm) -> Result<Self, Self::Error> {
        if let Err(errors) = value.validate() {
            return Err(ProductFormError::Validation(collect_violations(&errors)));
        }

        let mut violations = Vec::new();
        let update = ProductUpdate {
            name: value
                .name
                .and_then(|v| check(&mut violations, ProductName::new(v))),
            description: value
                .description
                .and_then(|v| check(&mut violations, ProductDescription::new(v))),
            price: value
                .price
                .and_then(|v| check(&mut violations, ProductPrice::new(v))),
            category: value
                .category
                .and_then(|v| check(&mut violations, CategoryName::new(v))),
            stock: value
                .stock
                .and_then(|v| check(&mut violations, ProductStock::new(v))),
            image_url: value
                .image_url
                .and_then(|v| check(&mut violations, ImageUrl::new(v))),
        };

        if violations.is_empty() {
            Ok(update)
        } else {
            Err(ProductFormError::Validation(violations))
        }
    }
}

impl TryFrom<ListProductsForm> for ListProductsParams {
    type Error = ProductFormError;

    fn try_from(value: ListProductsForm) -> Result<Self, Self::Error> {
        if let Err(errors) = value.validate() {
            return Err(ProductFormError::Validation(collect_violations(&errors)));
        }

        let page = value.page.unwrap_or(1);
        let limit = value.limit.unwrap_or(DEFAULT_ITEMS_PER_PAGE);

        Ok(Self {
            search: value.search,
            category: value.category,
            min_price: value.min_price,
            max_price: value.max_price,
            sort_by: value.sort_by,
            sort_order: value.sort_order,
            skip: Some((page - 1).saturating_mul(limit)),
            take: Some(limit),
        })
    }
}
