use actix_web::{App, HttpServer, web};
use reqwest::StatusCode;

use product_catalog::client::{
    ClientError, ProductClient, ProductInput, ProductPatch, ProductQuery, SortField, SortOrder,
};
use product_catalog::repository::DieselRepository;
use product_catalog::routes::{self, CatalogService};

mod common;

/// Start the catalog on an ephemeral port and return a client pointed at it.
fn start_server(db: &common::TestDb) -> (ProductClient, actix_web::dev::ServerHandle) {
    let service = web::Data::new(CatalogService::new(DieselRepository::new(db.pool())));
    let server = HttpServer::new(move || {
        App::new()
            .app_data(service.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("should bind to an ephemeral port");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (ProductClient::new(&format!("http://{addr}")), handle)
}

fn input(name: &str, price: f64, stock: i32) -> ProductInput {
    ProductInput {
        name: name.into(),
        description: format!("{name} description"),
        price,
        category: "laptop".into(),
        stock,
        image_url: Some("https://example.com/image.png".into()),
    }
}

#[actix_web::test]
async fn client_covers_the_crud_cycle() {
    let db = common::TestDb::new();
    let (client, handle) = start_server(&db);

    let hp = client
        .create_product(&input("HP Pavilion 14", 500.0, 3))
        .await
        .expect("create should succeed");
    client
        .create_product(&input("Dell XPS", 800.0, 0))
        .await
        .expect("create should succeed");

    let list = client
        .list_products(&ProductQuery::default())
        .await
        .expect("list should succeed");
    assert_eq!(list.total, 2);

    let list = client
        .list_products(&ProductQuery {
            category: Some("laptop".into()),
            sort_by: Some(SortField::Price),
            sort_order: Some(SortOrder::Asc),
            ..ProductQuery::default()
        })
        .await
        .expect("list should succeed");
    let names: Vec<&str> = list.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["HP Pavilion 14", "Dell XPS"]);

    let fetched = client.get_product(hp.id).await.expect("get should succeed");
    assert_eq!(fetched, hp);

    let updated = client
        .update_product(
            hp.id,
            &ProductPatch {
                stock: Some(7),
                ..ProductPatch::default()
            },
        )
        .await
        .expect("update should succeed");
    assert_eq!(updated.stock, 7);
    assert_eq!(updated.price, 500.0);

    let deleted = client
        .delete_product(hp.id)
        .await
        .expect("delete should succeed");
    assert_eq!(deleted, updated);

    let err = client.get_product(hp.id).await.unwrap_err();
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

    handle.stop(true).await;
}

#[actix_web::test]
async fn client_surfaces_validation_failures() {
    let db = common::TestDb::new();
    let (client, handle) = start_server(&db);

    let err = client
        .create_product(&input("Free thing", 0.0, 1))
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body.contains("price must not be less than 1"));
        }
        other => panic!("unexpected error: {other}"),
    }

    handle.stop(true).await;
}

#[actix_web::test]
async fn client_reports_transport_failures() {
    let client = ProductClient::new("http://127.0.0.1:9");
    let err = client.get_product(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
