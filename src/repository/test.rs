use std::cmp::Ordering;
use std::sync::Mutex;

use chrono::Utc;

use crate::domain::product::{NewProduct, Product, ProductUpdate, SortField, SortOrder};
use crate::domain::types::ProductId;
use crate::repository::{ProductListQuery, ProductReader, ProductWriter, RepositoryResult};

#[derive(Default)]
struct State {
    products: Vec<Product>,
    next_id: i32,
}

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id.get()).max().unwrap_or(0);
        Self {
            state: Mutex::new(State { products, next_id }),
        }
    }

    /// Snapshot of every stored product in insertion order.
    pub fn all(&self) -> Vec<Product> {
        self.state.lock().unwrap().products.clone()
    }

    fn compare(a: &Product, b: &Product, sort_by: SortField) -> Ordering {
        let primary = match sort_by {
            SortField::Price => a.price.get().total_cmp(&b.price.get()),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

impl ProductReader for TestRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Product> = state
            .products
            .iter()
            .filter(|p| query.filter.matches(p))
            .cloned()
            .collect();
        let total = items.len();

        items.sort_by(|a, b| {
            let ordering = Self::compare(a, b, query.sort_by);
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let items = items
            .into_iter()
            .skip(query.skip)
            .take(query.take)
            .collect();
        Ok((total, items))
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state.products.iter().find(|p| p.id == id).cloned())
    }
}

impl ProductWriter for TestRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Product {
            id: ProductId::new(state.next_id)?,
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            category: product.category.clone(),
            stock: product.stock,
            image_url: product.image_url.clone(),
            created_at: product.created_at,
            updated_at: product.created_at,
        };
        state.products.push(created.clone());
        Ok(created)
    }

    fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> RepositoryResult<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        update.apply_to(product);
        product.updated_at = Utc::now().naive_utc();
        Ok(Some(product.clone()))
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        let mut state = self.state.lock().unwrap();
        let position = state.products.iter().position(|p| p.id == id);
        Ok(position.map(|index| state.products.remove(index)))
    }
}
