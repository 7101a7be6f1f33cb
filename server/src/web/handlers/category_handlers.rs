// server/src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::{info, instrument};

use storefront::catalog;

use crate::errors::AppError;
use crate::state::AppState;

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = catalog::list_categories(&app_state.db_pool).await?;
  info!("Returning {} categories.", categories.len());
  Ok(HttpResponse::Ok().json(categories))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(slug = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let slug = path.into_inner();
  let category = catalog::get_category_by_slug(&app_state.db_pool, &slug).await?;
  Ok(HttpResponse::Ok().json(category))
}
