// server/src/web/routes.rs

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::web::handlers::{cart_handlers, category_handlers, order_handlers, product_handlers};

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Extractor failures are client errors; answer them with the same body shape as store validation.
fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(path = %req.path(), error = %err, "Rejected JSON body");
  AppError::validation(format!("Invalid request body: {}", err)).into()
}

fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(path = %req.path(), error = %err, "Rejected path parameter");
  AppError::validation(format!("Invalid path parameter: {}", err)).into()
}

fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
  tracing::debug!(path = %req.path(), error = %err, "Rejected query string");
  AppError::validation(format!("Invalid query string: {}", err)).into()
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .app_data(web::PathConfig::default().error_handler(path_error_handler))
    .app_data(web::QueryConfig::default().error_handler(query_error_handler));

  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/categories")
          .route("", web::get().to(category_handlers::list_categories_handler))
          .route("/{slug}", web::get().to(category_handlers::get_category_handler)),
      )
      // Fixed segments first; `/{slug}` would swallow them otherwise.
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("/featured", web::get().to(product_handlers::featured_products_handler))
          .route("/new", web::get().to(product_handlers::new_products_handler))
          .route("/clearance", web::get().to(product_handlers::clearance_products_handler))
          .route("/search", web::get().to(product_handlers::search_products_handler))
          .route(
            "/category/{category_id}",
            web::get().to(product_handlers::products_by_category_handler),
          )
          .route("/{slug}", web::get().to(product_handlers::get_product_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/clear/{cart_id}", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/{cart_id}/summary", web::get().to(cart_handlers::cart_summary_handler))
          .route("/{cart_id}/checkout", web::post().to(cart_handlers::checkout_handler))
          .route("/{cart_id}", web::get().to(cart_handlers::get_cart_handler))
          .route("/{id}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/{id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      )
      .service(
        web::scope("/orders")
          .route("", web::post().to(order_handlers::create_order_handler))
          .route("", web::get().to(order_handlers::list_orders_handler))
          .route("/{id}", web::get().to(order_handlers::get_order_handler))
          .route("/{id}/status", web::patch().to(order_handlers::update_order_status_handler)),
      ),
  );
}
