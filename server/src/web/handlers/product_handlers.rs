// server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use storefront::catalog::{self, NEW_ARRIVALS_LIMIT};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct SearchQuery {
  pub q: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct NewProductsQuery {
  pub limit: Option<i64>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::list_products(&app_state.db_pool).await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::featured_products", skip(app_state))]
pub async fn featured_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::featured_products(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::new_products", skip(app_state))]
pub async fn new_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<NewProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let limit = query.limit.unwrap_or(NEW_ARRIVALS_LIMIT);
  if limit <= 0 {
    return Err(AppError::invalid_field("limit", "must be a positive integer"));
  }
  let products = catalog::new_products(&app_state.db_pool, limit).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::clearance_products", skip(app_state))]
pub async fn clearance_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog::clearance_products(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::search_products", skip(app_state))]
pub async fn search_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
  let term = query.q.as_deref().map(str::trim).unwrap_or_default();
  if term.is_empty() {
    warn!("Search request without a query term.");
    return Err(AppError::invalid_field("q", "search query is required"));
  }
  let products = catalog::search_products(&app_state.db_pool, term).await?;
  info!("Search for '{}' returned {} products.", term, products.len());
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::products_by_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn products_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let category_id = path.into_inner();
  let products = catalog::list_products_by_category(&app_state.db_pool, category_id).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(slug = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let slug = path.into_inner();
  let product = catalog::get_product_by_slug(&app_state.db_pool, &slug).await?;
  Ok(HttpResponse::Ok().json(product))
}
