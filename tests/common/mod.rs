//! Helpers for integration tests.
#![allow(dead_code)]

use chrono::{DateTime, NaiveDateTime};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use product_catalog::db::{DbPool, establish_connection_pool};
use product_catalog::domain::product::NewProduct;
use product_catalog::domain::types::{
    CategoryName, ImageUrl, ProductDescription, ProductName, ProductPrice, ProductStock,
};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn timestamp(secs: i64) -> NaiveDateTime {
    DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
}

pub fn new_product(name: &str, price: f64, stock: i32, category: &str, created: i64) -> NewProduct {
    NewProduct {
        name: ProductName::new(name).unwrap(),
        description: ProductDescription::new(format!("{name} description")).unwrap(),
        price: ProductPrice::new(price).unwrap(),
        category: CategoryName::new(category).unwrap(),
        stock: ProductStock::new(stock).unwrap(),
        image_url: Some(ImageUrl::new("https://example.com/image.png").unwrap()),
        created_at: timestamp(created),
    }
}
