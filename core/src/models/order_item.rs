// core/src/models/order_item.rs

use serde::Serialize;
use sqlx::FromRow;

use super::product::Product;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
  pub id: i64,
  pub order_id: i64,
  pub product_id: i64,
  pub quantity: i32,
  /// Unit price charged when the order was placed. Later catalog price changes do not touch it.
  pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItemLine {
  #[serde(flatten)]
  pub item: OrderItem,
  pub product: Product,
}
