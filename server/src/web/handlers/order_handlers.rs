// server/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use storefront::{orders, NewOrderItem, OrderDraft, OrderStatus};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct CreateOrderPayload {
  pub order: OrderDraft,
  #[serde(default)]
  pub items: Vec<NewOrderItem>,
}

#[derive(Deserialize, Debug)]
pub struct UpdateStatusPayload {
  pub status: OrderStatus,
}

#[instrument(
  name = "handler::create_order",
  skip(app_state, req_payload),
  fields(item_count = req_payload.items.len())
)]
pub async fn create_order_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<CreateOrderPayload>,
) -> Result<HttpResponse, AppError> {
  let CreateOrderPayload { order, items } = req_payload.into_inner();
  let created = orders::create_order(&app_state.db_pool, &order, &items).await?;
  info!("Order {} created.", created.id);
  Ok(HttpResponse::Created().json(created))
}

#[instrument(name = "handler::list_orders", skip(app_state))]
pub async fn list_orders_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let all_orders = orders::list_orders(&app_state.db_pool).await?;
  Ok(HttpResponse::Ok().json(all_orders))
}

#[instrument(name = "handler::get_order", skip(app_state, path), fields(order_id = %path.as_ref()))]
pub async fn get_order_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
  let order = orders::get_order(&app_state.db_pool, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(
  name = "handler::update_order_status",
  skip(app_state, path, req_payload),
  fields(order_id = %path.as_ref(), status = %req_payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<i64>,
  req_payload: web::Json<UpdateStatusPayload>,
) -> Result<HttpResponse, AppError> {
  let order_id = path.into_inner();
  let order = orders::update_status(&app_state.db_pool, order_id, req_payload.status).await?;
  info!("Order {} is now {}.", order.id, order.status);
  Ok(HttpResponse::Ok().json(order))
}
