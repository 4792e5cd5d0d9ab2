use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductPage, ProductUpdate, SortField, SortOrder};
use crate::domain::types::ProductId;
use crate::forms::products::{CreateProductForm, CreateProductPayload, UpdateProductForm};
use crate::repository::{
    DEFAULT_ITEMS_PER_PAGE, ProductFilter, ProductListQuery, ProductReader, ProductWriter,
};

use super::{ServiceError, ServiceResult};

/// Sparse listing parameters; anything left `None` takes its default
/// (`createdAt`, `desc`, skip 0, take 10, no filter).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListProductsParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

impl From<ListProductsParams> for ProductListQuery {
    fn from(params: ListProductsParams) -> Self {
        Self {
            filter: ProductFilter {
                search: params.search,
                category: params.category,
                min_price: params.min_price,
                max_price: params.max_price,
            },
            sort_by: params.sort_by.unwrap_or_default(),
            sort_order: params.sort_order.unwrap_or_default(),
            skip: params.skip.unwrap_or(0),
            take: params.take.unwrap_or(DEFAULT_ITEMS_PER_PAGE),
        }
    }
}

fn not_found(id: impl std::fmt::Display) -> ServiceError {
    log::debug!("Product {id} does not exist");
    ServiceError::NotFound(format!("Product with ID {id} not found"))
}

/// Query service for the product catalog.
///
/// Holds its persistence gateway explicitly; the HTTP layer holds the service
/// the same way. Every input is validated before the gateway is touched, and
/// gateway failures are logged and reported as [`ServiceError::Internal`].
pub struct ProductService<R> {
    repo: R,
}

impl<R> ProductService<R>
where
    R: ProductReader + ProductWriter,
{
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    #[cfg(test)]
    pub(crate) fn repository(&self) -> &R {
        &self.repo
    }

    /// One page of products matching the parameters plus the total number of
    /// matches, read from a single snapshot.
    pub fn list(&self, params: ListProductsParams) -> ServiceResult<ProductPage> {
        match self.repo.list_products(params.into()) {
            Ok((total, products)) => Ok(ProductPage { products, total }),
            Err(e) => {
                log::error!("Failed to list products: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Fetch a single product.
    pub fn get(&self, id: i32) -> ServiceResult<Product> {
        let product_id = ProductId::new(id).map_err(|_| not_found(id))?;

        match self.repo.get_product_by_id(product_id) {
            Ok(Some(product)) => Ok(product),
            Ok(None) => Err(not_found(id)),
            Err(e) => {
                log::error!("Failed to get product: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Validate and persist a new product.
    pub fn create(&self, form: CreateProductForm) -> ServiceResult<Product> {
        let payload = CreateProductPayload::try_from(form)?;

        match self.repo.create_product(&payload.into_new_product()) {
            Ok(product) => {
                log::info!("Created product {}", product.id);
                Ok(product)
            }
            Err(e) => {
                log::error!("Failed to create product: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Merge the supplied fields onto an existing product.
    ///
    /// Supplied fields are held to the same rules as on creation. An empty
    /// update returns the stored record without writing.
    pub fn update(&self, id: i32, form: UpdateProductForm) -> ServiceResult<Product> {
        let update = ProductUpdate::try_from(form)?;
        let existing = self.get(id)?;

        if update.is_empty() {
            return Ok(existing);
        }

        match self.repo.update_product(existing.id, &update) {
            Ok(Some(product)) => {
                log::info!("Updated product {}", product.id);
                Ok(product)
            }
            Ok(None) => Err(not_found(id)),
            Err(e) => {
                log::error!("Failed to update product: {e}");
                Err(ServiceError::Internal)
            }
        }
    }

    /// Delete a product and return it as it was before deletion.
    pub fn remove(&self, id: i32) -> ServiceResult<Product> {
        let existing = self.get(id)?;

        match self.repo.delete_product(existing.id) {
            Ok(Some(product)) => {
                log::info!("Deleted product {}", product.id);
                Ok(product)
            }
            Ok(None) => Err(not_found(id)),
            Err(e) => {
                log::error!("Failed to delete product: {e}");
                Err(ServiceError::Internal)
            }
        }
    }
}
