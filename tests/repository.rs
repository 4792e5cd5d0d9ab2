use product_catalog::domain::product::{ProductUpdate, SortField, SortOrder};
use product_catalog::domain::types::{ProductId, ProductPrice};
use product_catalog::repository::{
    DieselRepository, ProductListQuery, ProductReader, ProductWriter,
};

mod common;

fn seeded() -> (common::TestDb, DieselRepository) {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());
    repo.create_product(&common::new_product("HP Pavilion 14", 500.0, 3, "laptop", 100))
        .expect("should create first product");
    repo.create_product(&common::new_product("Dell XPS", 800.0, 0, "laptop", 200))
        .expect("should create second product");
    repo.create_product(&common::new_product("Magic Mouse", 79.0, 12, "accessory", 300))
        .expect("should create third product");
    (test_db, repo)
}

fn names(items: &[product_catalog::domain::product::Product]) -> Vec<&str> {
    items.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn create_assigns_id_and_round_trips() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let input = common::new_product("Lenovo Yoga", 1.0, 0, "laptop", 42);
    let created = repo.create_product(&input).expect("should create product");

    assert!(created.id.get() > 0);
    assert_eq!(created.name, input.name);
    assert_eq!(created.price, input.price);
    assert_eq!(created.stock, input.stock);
    assert_eq!(created.image_url, input.image_url);
    assert_eq!(created.created_at, input.created_at);

    let fetched = repo
        .get_product_by_id(created.id)
        .expect("lookup should succeed")
        .expect("product should exist");
    assert_eq!(fetched, created);
}

#[test]
fn search_is_case_insensitive() {
    let (_db, repo) = seeded();
    let (total, items) = repo
        .list_products(ProductListQuery::default().search("hp"))
        .expect("should list products");
    assert_eq!(total, 1);
    assert_eq!(names(&items), vec!["HP Pavilion 14"]);
}

#[test]
fn search_treats_wildcards_literally() {
    let (_db, repo) = seeded();
    let (total, items) = repo
        .list_products(ProductListQuery::default().search("%"))
        .expect("should list products");
    assert_eq!(total, 0);
    assert!(items.is_empty());
}

#[test]
fn category_sorted_by_price_ascending() {
    let (_db, repo) = seeded();
    let (total, items) = repo
        .list_products(
            ProductListQuery::default()
                .category("laptop")
                .sort(SortField::Price, SortOrder::Asc),
        )
        .expect("should list products");
    assert_eq!(total, 2);
    assert_eq!(names(&items), vec!["HP Pavilion 14", "Dell XPS"]);
}

#[test]
fn default_order_is_newest_first() {
    let (_db, repo) = seeded();
    let (_, items) = repo
        .list_products(ProductListQuery::default())
        .expect("should list products");
    assert_eq!(names(&items), vec!["Magic Mouse", "Dell XPS", "HP Pavilion 14"]);
}

#[test]
fn price_range_is_inclusive_and_combines_with_category() {
    let (_db, repo) = seeded();
    let (total, items) = repo
        .list_products(
            ProductListQuery::default()
                .min_price(79.0)
                .max_price(500.0)
                .sort(SortField::Price, SortOrder::Asc),
        )
        .expect("should list products");
    assert_eq!(total, 2);
    assert_eq!(names(&items), vec!["Magic Mouse", "HP Pavilion 14"]);

    let (total, _) = repo
        .list_products(
            ProductListQuery::default()
                .category("laptop")
                .min_price(79.0)
                .max_price(500.0),
        )
        .expect("should list products");
    assert_eq!(total, 1);
}

#[test]
fn total_is_independent_of_paging() {
    let (_db, repo) = seeded();

    let (total, items) = repo
        .list_products(ProductListQuery::default().take(0))
        .expect("should list products");
    assert_eq!(total, 3);
    assert!(items.is_empty());

    let (total, items) = repo
        .list_products(ProductListQuery::default().skip(50))
        .expect("should list products");
    assert_eq!(total, 3);
    assert!(items.is_empty());

    let (total, items) = repo
        .list_products(
            ProductListQuery::default()
                .sort(SortField::Price, SortOrder::Desc)
                .paginate(2, 2),
        )
        .expect("should list products");
    assert_eq!(total, 3);
    assert_eq!(names(&items), vec!["Magic Mouse"]);
}

#[test]
fn update_changes_only_supplied_fields() {
    let (_db, repo) = seeded();
    let (_, items) = repo
        .list_products(ProductListQuery::default().search("dell"))
        .expect("should list products");
    let dell = items.into_iter().next().expect("dell should exist");

    let update = ProductUpdate {
        price: Some(ProductPrice::new(750.0).unwrap()),
        ..ProductUpdate::default()
    };
    let updated = repo
        .update_product(dell.id, &update)
        .expect("update should succeed")
        .expect("product should exist");

    assert_eq!(updated.price, 750.0);
    assert_eq!(updated.name, dell.name);
    assert_eq!(updated.stock, dell.stock);
    assert_eq!(updated.created_at, dell.created_at);
}

#[test]
fn update_and_delete_of_missing_id_return_none() {
    let (_db, repo) = seeded();
    let missing = ProductId::new(999).unwrap();

    let update = ProductUpdate {
        price: Some(ProductPrice::new(10.0).unwrap()),
        ..ProductUpdate::default()
    };
    assert!(repo.update_product(missing, &update).unwrap().is_none());
    assert!(repo.delete_product(missing).unwrap().is_none());

    let (total, _) = repo.list_products(ProductListQuery::default()).unwrap();
    assert_eq!(total, 3);
}

#[test]
fn delete_returns_removed_row() {
    let (_db, repo) = seeded();
    let (_, items) = repo
        .list_products(ProductListQuery::default().search("mouse"))
        .expect("should list products");
    let mouse = items.into_iter().next().expect("mouse should exist");

    let deleted = repo
        .delete_product(mouse.id)
        .expect("delete should succeed")
        .expect("row should be returned");
    assert_eq!(deleted, mouse);
    assert!(repo.get_product_by_id(mouse.id).unwrap().is_none());
}

#[test]
fn paging_far_past_the_end_is_empty() {
    let (_db, repo) = seeded();

    let (total, items) = repo
        .list_products(ProductListQuery::default().skip(1 << 63))
        .expect("should list products");
    assert_eq!(total, 3);
    assert!(items.is_empty());

    let (total, items) = repo
        .list_products(ProductListQuery::default().paginate(usize::MAX, 2))
        .expect("should list products");
    assert_eq!(total, 3);
    assert!(items.is_empty());

    let (total, items) = repo
        .list_products(ProductListQuery::default().take(usize::MAX))
        .expect("should list products");
    assert_eq!(total, 3);
    assert_eq!(items.len(), 3);
}

#[test]
fn search_folds_non_ascii_case() {
    let (_db, repo) = seeded();
    repo.create_product(&common::new_product("Écran Dell", 250.0, 4, "monitor", 400))
        .expect("should create product");

    let (total, items) = repo
        .list_products(ProductListQuery::default().search("écran"))
        .expect("should list products");
    assert_eq!(total, 1);
    assert_eq!(names(&items), vec!["Écran Dell"]);

    let (total, _) = repo
        .list_products(ProductListQuery::default().search("ÉCRAN"))
        .expect("should list products");
    assert_eq!(total, 1);
}
