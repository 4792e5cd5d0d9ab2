use actix_web::{HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::products::{ProductDto, ProductListDto};
use crate::forms::products::{CreateProductForm, ListProductsForm, UpdateProductForm};
use crate::routes::{CatalogService, error_response};
use crate::services::products::ListProductsParams;
use crate::services::{ServiceError, ServiceResult};

/// Run a service call on the blocking thread pool; Diesel is synchronous.
async fn run<T, F>(service: web::Data<CatalogService>, call: F) -> ServiceResult<T>
where
    F: FnOnce(&CatalogService) -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || call(service.get_ref()))
        .await
        .unwrap_or_else(|e| {
            log::error!("Blocking product task failed: {e}");
            Err(ServiceError::Internal)
        })
}

#[get("/products")]
pub async fn list_products(
    params: web::Query<ListProductsForm>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let params = match ListProductsParams::try_from(params.into_inner()) {
        Ok(params) => params,
        Err(err) => return error_response(err.into()),
    };

    match run(service, move |service| service.list(params)).await {
        Ok(page) => HttpResponse::Ok().json(ProductListDto::from(page)),
        Err(err) => error_response(err),
    }
}

#[post("/products")]
pub async fn create_product(
    form: web::Json<CreateProductForm>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let form = form.into_inner();
    match run(service, move |service| service.create(form)).await {
        Ok(product) => HttpResponse::Created().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}

#[get("/products/{id}")]
pub async fn get_product(
    id: web::Path<i32>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let id = id.into_inner();
    match run(service, move |service| service.get(id)).await {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}

#[put("/products/{id}")]
pub async fn update_product(
    id: web::Path<i32>,
    form: web::Json<UpdateProductForm>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let id = id.into_inner();
    let form = form.into_inner();
    match run(service, move |service| service.update(id, form)).await {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}

#[delete("/products/{id}")]
pub async fn delete_product(
    id: web::Path<i32>,
    service: web::Data<CatalogService>,
) -> impl Responder {
    let id = id.into_inner();
    match run(service, move |service| service.remove(id)).await {
        Ok(product) => HttpResponse::Ok().json(ProductDto::from(product)),
        Err(err) => error_response(err),
    }
}
