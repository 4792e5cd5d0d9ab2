use crate::db::{DbConnection, DbPool};
use crate::domain::product::{NewProduct, Product, ProductUpdate, SortField, SortOrder};
use crate::domain::types::ProductId;

pub mod errors;
pub mod product;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// A single condition of a product listing. Clauses are combined with AND.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Case-insensitive substring match on the product name.
    NameContains(String),
    /// Exact match on the category label.
    CategoryEquals(String),
    /// Inclusive lower price bound.
    PriceAtLeast(f64),
    /// Inclusive upper price bound.
    PriceAtMost(f64),
}

impl FilterClause {
    /// Evaluate the clause against an in-memory product.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::NameContains(term) => product
                .name
                .to_lowercase()
                .contains(&term.to_lowercase()),
            Self::CategoryEquals(category) => product.category.as_str() == category.as_str(),
            Self::PriceAtLeast(min) => product.price.get() >= *min,
            Self::PriceAtMost(max) => product.price.get() <= *max,
        }
    }
}

/// Optional filters of a product listing.
///
/// Empty `search`/`category` strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductFilter {
    /// The clauses that make up this filter; empty means "match everything".
    pub fn clauses(&self) -> Vec<FilterClause> {
        let mut clauses = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            clauses.push(FilterClause::NameContains(search.to_string()));
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            clauses.push(FilterClause::CategoryEquals(category.to_string()));
        }
        if let Some(min) = self.min_price {
            clauses.push(FilterClause::PriceAtLeast(min));
        }
        if let Some(max) = self.max_price {
            clauses.push(FilterClause::PriceAtMost(max));
        }
        clauses
    }

    /// Whether `product` satisfies every clause of this filter.
    pub fn matches(&self, product: &Product) -> bool {
        self.clauses().iter().all(|clause| clause.matches(product))
    }
}

/// Query parameters used when listing or searching products.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductListQuery {
    /// Filter applied to both the page and the total count.
    pub filter: ProductFilter,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
    /// Number of matching rows to skip.
    pub skip: usize,
    /// Maximum number of rows to return.
    pub take: usize,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self {
            filter: ProductFilter::default(),
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
            skip: 0,
            take: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

impl ProductListQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.filter.search = Some(search.into());
        self
    }
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.filter.category = Some(category.into());
        self
    }
    pub fn min_price(mut self, min_price: f64) -> Self {
        self.filter.min_price = Some(min_price);
        self
    }
    pub fn max_price(mut self, max_price: f64) -> Self {
        self.filter.max_price = Some(max_price);
        self
    }
    pub fn sort(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }
    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }
    pub fn take(mut self, take: usize) -> Self {
        self.take = take;
        self
    }
    /// Translate a 1-based page number into `skip`/`take`.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.skip = (page.max(1) - 1).saturating_mul(per_page);
        self.take = per_page;
        self
    }
}

/// Read-only operations for product entities.
pub trait ProductReader {
    /// List one page of products matching the query together with the total
    /// number of matches. Both figures come from the same snapshot.
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    /// Retrieve a product by its identifier.
    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}

/// Write operations for product entities.
pub trait ProductWriter {
    /// Persist a new product and return it with its assigned id.
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product>;
    /// Apply a partial update. Returns `None` when the id does not exist.
    fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> RepositoryResult<Option<Product>>;
    /// Delete a product, returning the row as it was before deletion.
    fn delete_product(&self, id: ProductId) -> RepositoryResult<Option<Product>>;
}
