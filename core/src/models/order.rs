// core/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use std::fmt;

use super::order_item::OrderItemLine;

/// Stored as lowercase text in `orders.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, SqlxType)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum OrderStatus {
  #[default]
  Pending,
  Processing,
  Shipped,
  Delivered,
  Cancelled,
}

impl OrderStatus {
  pub const ALL: [OrderStatus; 5] = [
    OrderStatus::Pending,
    OrderStatus::Processing,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
    OrderStatus::Cancelled,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Processing => "processing",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
  }

  /// The canonical forward step, or `None` once the order is finished.
  pub fn next(self) -> Option<OrderStatus> {
    match self {
      OrderStatus::Pending => Some(OrderStatus::Processing),
      OrderStatus::Processing => Some(OrderStatus::Shipped),
      OrderStatus::Shipped => Some(OrderStatus::Delivered),
      OrderStatus::Delivered | OrderStatus::Cancelled => None,
    }
  }

  /// Forward one step, or cancel from any non-terminal state.
  pub fn can_transition_to(self, target: OrderStatus) -> bool {
    if self.is_terminal() {
      return false;
    }
    target == OrderStatus::Cancelled || self.next() == Some(target)
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
  pub id: i64,
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: String,
  pub total_amount: f64,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

/// An order with its line items, each joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderWithItems {
  #[serde(flatten)]
  pub order: Order,
  pub items: Vec<OrderItemLine>,
}
