use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse, web};

use crate::dto::products::ErrorDto;
use crate::forms::FieldViolation;
use crate::repository::DieselRepository;
use crate::services::ServiceError;
use crate::services::products::ProductService;

pub mod products;

/// The query service as shared with the HTTP handlers.
pub type CatalogService = ProductService<DieselRepository>;

/// Register the product routes and the extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, req| bad_request(err, req)),
    )
    .app_data(web::QueryConfig::default().error_handler(|err, req| bad_request(err, req)))
    .app_data(web::PathConfig::default().error_handler(|err, req| bad_request(err, req)))
    .service(products::list_products)
    .service(products::create_product)
    .service(products::get_product)
    .service(products::update_product)
    .service(products::delete_product);
}

/// Cross-origin policy admitting the browser client served from `origin`.
pub fn cors(origin: &str) -> Cors {
    Cors::default()
        .allowed_origin(origin)
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
        .max_age(3600)
}

fn bad_request<E>(err: E, req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    log::debug!("Rejected malformed request to {}: {err}", req.path());
    let response = json_error(StatusCode::BAD_REQUEST, err.to_string(), Vec::new());
    InternalError::from_response(err, response).into()
}

pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
    violations: Vec<FieldViolation>,
) -> HttpResponse {
    HttpResponse::build(status).json(ErrorDto {
        status_code: status.as_u16(),
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message: message.into(),
        violations,
    })
}

/// Map a service failure onto its HTTP status and JSON body.
pub fn error_response(err: ServiceError) -> HttpResponse {
    match err {
        ServiceError::Validation(violations) => {
            let message = violations
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            json_error(StatusCode::BAD_REQUEST, message, violations)
        }
        ServiceError::NotFound(message) => json_error(StatusCode::NOT_FOUND, message, Vec::new()),
        ServiceError::Internal => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            Vec::new(),
        ),
    }
}
