use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::unicode_lower;
use crate::domain::product::{NewProduct, Product, ProductUpdate, SortField, SortOrder};
use crate::domain::types::ProductId;
use crate::models::product::{
    NewProduct as DbNewProduct, Product as DbProduct, ProductChangeset,
};
use crate::repository::{
    DieselRepository, FilterClause, ProductListQuery, ProductReader, ProductWriter,
    RepositoryError, RepositoryResult,
};

/// Build a `LIKE` pattern matching `term` anywhere, with wildcards escaped.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

impl ProductReader for DieselRepository {
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let clauses = query.filter.clauses();

        let query_builder = || {
            let mut items = products::table.into_boxed::<Sqlite>();

            for clause in &clauses {
                items = match clause {
                    FilterClause::NameContains(term) => items.filter(
                        unicode_lower(products::name)
                            .like(contains_pattern(&term.to_lowercase()))
                            .escape('\\'),
                    ),
                    FilterClause::CategoryEquals(category) => {
                        items.filter(products::category.eq(category.clone()))
                    }
                    FilterClause::PriceAtLeast(min) => items.filter(products::price.ge(*min)),
                    FilterClause::PriceAtMost(max) => items.filter(products::price.le(*max)),
                };
            }

            items
        };

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let total = query_builder().count().get_result::<i64>(conn)? as usize;

            let items = match (query.sort_by, query.sort_order) {
                (SortField::Price, SortOrder::Asc) => {
                    query_builder().order((products::price.asc(), products::id.asc()))
                }
                (SortField::Price, SortOrder::Desc) => {
                    query_builder().order((products::price.desc(), products::id.desc()))
                }
                (SortField::CreatedAt, SortOrder::Asc) => {
                    query_builder().order((products::created_at.asc(), products::id.asc()))
                }
                (SortField::CreatedAt, SortOrder::Desc) => {
                    query_builder().order((products::created_at.desc(), products::id.desc()))
                }
            };

            let items = items
                .offset(i64::try_from(query.skip).unwrap_or(i64::MAX))
                .limit(i64::try_from(query.take).unwrap_or(i64::MAX))
                .load::<DbProduct>(conn)?
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<Product>, _>>()?;

            Ok((total, items))
        })
    }

    fn get_product_by_id(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let product = products::table
            .find(id.get())
            .select(DbProduct::as_select())
            .first::<DbProduct>(&mut conn)
            .optional()?;

        let product = product.map(TryInto::try_into).transpose()?;
        Ok(product)
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, product: &NewProduct) -> RepositoryResult<Product> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let db_product: DbNewProduct = product.clone().into();

        let created = diesel::insert_into(products::table)
            .values(&db_product)
            .returning(DbProduct::as_returning())
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let changeset = ProductChangeset::from(update.clone());

        let updated = diesel::update(products::table.find(id.get()))
            .set((&changeset, products::updated_at.eq(diesel::dsl::now)))
            .returning(DbProduct::as_returning())
            .get_result::<DbProduct>(&mut conn)
            .optional()?;

        let updated = updated.map(TryInto::try_into).transpose()?;
        Ok(updated)
    }

    fn delete_product(&self, id: ProductId) -> RepositoryResult<Option<Product>> {
        use crate::schema::products;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.find(id.get()))
            .returning(DbProduct::as_returning())
            .get_result::<DbProduct>(&mut conn)
            .optional()?;

        let deleted = deleted.map(TryInto::try_into).transpose()?;
        Ok(deleted)
    }
}
