// server/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use storefront::{cart, orders, CustomerDetails};

use crate::errors::AppError;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequestPayload {
  pub cart_id: String,
  pub product_id: i64,
  pub quantity: i32,
}

#[derive(Deserialize, Debug)]
pub struct UpdateQuantityPayload {
  pub quantity: i32,
}

// --- Handler Implementations ---

#[instrument(name = "handler::get_cart", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let cart_id = path.into_inner();
  let lines = cart::get_cart_items(&app_state.db_pool, &cart_id).await?;
  Ok(HttpResponse::Ok().json(lines))
}

#[instrument(name = "handler::cart_summary", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn cart_summary_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let cart_id = path.into_inner();
  let summary = cart::cart_summary(&app_state.db_pool, &cart_id, app_state.config.tax_rate).await?;
  Ok(HttpResponse::Ok().json(summary))
}

#[instrument(
  name = "handler::add_to_cart",
  skip(app_state, req_payload),
  fields(cart_id = %req_payload.cart_id, product_id = %req_payload.product_id, quantity = %req_payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<AddToCartRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  let item = cart::add_item(&app_state.db_pool, &payload.cart_id, payload.product_id, payload.quantity).await?;
  info!(
    "Add to cart successful. Item ID: {}, Product ID: {}, New Quantity: {}",
    item.id, item.product_id, item.quantity
  );
  Ok(HttpResponse::Created().json(item))
}

#[instrument(name = "handler::update_cart_item", skip(app_state, path, req_payload), fields(cart_item_id = %path.as_ref()))]
pub async fn update_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateQuantityPayload>,
) -> Result<HttpResponse, AppError> {
  let cart_item_id = path.into_inner();
  let item = cart::update_quantity(&app_state.db_pool, cart_item_id, req_payload.quantity).await?;
  Ok(HttpResponse::Ok().json(item))
}

#[instrument(name = "handler::remove_cart_item", skip(app_state, path), fields(cart_item_id = %path.as_ref()))]
pub async fn remove_cart_item_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  cart::remove_item(&app_state.db_pool, path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::clear_cart", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  cart::clear_cart(&app_state.db_pool, &path.into_inner()).await?;
  Ok(HttpResponse::NoContent().finish())
}

/// Places an order for everything in the cart and empties it.
#[instrument(name = "handler::checkout", skip(app_state, path, req_payload), fields(cart_id = %path.as_ref()))]
pub async fn checkout_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_payload: web::Json<CustomerDetails>,
) -> Result<HttpResponse, AppError> {
  let cart_id = path.into_inner();
  let placed = orders::checkout(&app_state.db_pool, &cart_id, &req_payload, app_state.config.tax_rate).await?;
  info!(
    "Checkout for cart '{}' created order {} with {} item(s).",
    cart_id,
    placed.order.id,
    placed.items.len()
  );
  Ok(HttpResponse::Created().json(placed))
}
