// core/src/orders.rs

//! Order store.
//!
//! Orders are written together with their items in one transaction. Each item
//! stores the unit price it was sold at; nothing here ever re-reads a live
//! product price for an existing order.

use std::collections::HashMap;

use chrono::Utc;
use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::{debug, error, info, instrument, warn};

use crate::cart::{delete_cart_rows, load_cart_lines};
use crate::catalog::{product_exists, select_products};
use crate::db::{begin_write, DbPool};
use crate::error::{FieldError, StoreError, StoreResult};
use crate::models::{CartSummary, Order, OrderItem, OrderItemLine, OrderStatus, OrderWithItems, Product};

const ORDER_COLUMNS: &str = "id, customer_name, customer_email, customer_phone, total_amount, status, created_at";

/// Customer and totals for a new order, as submitted by the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: String,
  pub total_amount: f64,
  /// Accepted only as `pending`; orders reach later states through status updates.
  #[serde(default)]
  pub status: Option<OrderStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrderItem {
  pub product_id: i64,
  pub quantity: i32,
  /// Unit price to record for this line.
  pub price: f64,
}

/// Contact details collected at checkout. The total is computed from the cart.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
  pub customer_name: String,
  pub customer_email: String,
  pub customer_phone: String,
}

impl CustomerDetails {
  fn field_errors(&self) -> Vec<FieldError> {
    let mut details = Vec::new();
    if self.customer_name.trim().is_empty() {
      details.push(FieldError::new("customerName", "must not be blank"));
    }
    if !is_plausible_email(&self.customer_email) {
      details.push(FieldError::new("customerEmail", "must be a valid email address"));
    }
    if self.customer_phone.trim().is_empty() {
      details.push(FieldError::new("customerPhone", "must not be blank"));
    }
    details
  }

  pub fn validate(&self) -> StoreResult<()> {
    StoreError::check_fields("Invalid customer details", self.field_errors())
  }
}

impl OrderDraft {
  pub fn customer(&self) -> CustomerDetails {
    CustomerDetails {
      customer_name: self.customer_name.clone(),
      customer_email: self.customer_email.clone(),
      customer_phone: self.customer_phone.clone(),
    }
  }

  /// Checks the draft and every item, collecting all field errors at once.
  pub fn validate(&self, items: &[NewOrderItem]) -> StoreResult<()> {
    let mut details = self.customer().field_errors();
    if !self.total_amount.is_finite() || self.total_amount < 0.0 {
      details.push(FieldError::new("totalAmount", "must be a non-negative amount"));
    }
    if let Some(status) = self.status.filter(|status| *status != OrderStatus::Pending) {
      details.push(FieldError::new(
        "status",
        format!("new orders start as '{}', not '{}'", OrderStatus::Pending, status),
      ));
    }
    for (index, item) in items.iter().enumerate() {
      if item.quantity <= 0 {
        details.push(FieldError::new(
          format!("items[{}].quantity", index),
          "must be a positive integer",
        ));
      }
      if !item.price.is_finite() || item.price < 0.0 {
        details.push(FieldError::new(
          format!("items[{}].price", index),
          "must be a non-negative amount",
        ));
      }
    }
    StoreError::check_fields("Invalid order data", details)
  }
}

// One `@`, something on both sides. Deliverability is not our concern.
fn is_plausible_email(email: &str) -> bool {
  let email = email.trim();
  match email.split_once('@') {
    Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
    None => false,
  }
}

/// Creates an order and all of its items atomically.
///
/// The item prices are taken as given. An empty item list is rejected before
/// anything else is looked at, and nothing is written unless every item refers
/// to an existing product.
#[instrument(skip(pool, draft, items), fields(customer_email = %draft.customer_email, item_count = items.len()))]
pub async fn create_order(pool: &DbPool, draft: &OrderDraft, items: &[NewOrderItem]) -> StoreResult<Order> {
  if items.is_empty() {
    warn!("Order rejected: no items.");
    return Err(StoreError::EmptyOrder);
  }
  draft.validate(items)?;

  let mut tx = begin_write(pool).await?;

  for item in items {
    if !product_exists(&mut tx, item.product_id).await? {
      warn!("Order rejected: product {} does not exist.", item.product_id);
      return Err(StoreError::InvalidReference(format!(
        "Product with ID {} does not exist",
        item.product_id
      )));
    }
  }

  let order = insert_order(&mut tx, &draft.customer(), draft.total_amount, OrderStatus::Pending).await?;
  for item in items {
    insert_order_item(&mut tx, order.id, item).await?;
  }

  tx.commit().await?;

  info!(
    "Order {} created with {} item(s), total {:.2}, status '{}'.",
    order.id,
    items.len(),
    order.total_amount,
    order.status
  );
  Ok(order)
}

#[instrument(skip(pool))]
pub async fn get_order(pool: &DbPool, order_id: i64) -> StoreResult<OrderWithItems> {
  let mut conn = pool.acquire().await?;
  let order = fetch_order(&mut conn, order_id)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("Order with ID {} not found", order_id)))?;
  let items = load_order_lines(&mut conn, order.id).await?;
  Ok(OrderWithItems { order, items })
}

/// Every order with its items, newest first.
#[instrument(skip(pool))]
pub async fn list_orders(pool: &DbPool) -> StoreResult<Vec<OrderWithItems>> {
  let mut conn = pool.acquire().await?;
  let orders: Vec<Order> = sqlx::query_as(&format!(
    "SELECT {} FROM orders ORDER BY created_at DESC, id DESC",
    ORDER_COLUMNS
  ))
  .fetch_all(&mut *conn)
  .await?;
  if orders.is_empty() {
    return Ok(Vec::new());
  }

  let items: Vec<OrderItem> =
    sqlx::query_as("SELECT id, order_id, product_id, quantity, price FROM order_items ORDER BY order_id, id")
      .fetch_all(&mut *conn)
      .await?;
  let products: Vec<Product> =
    sqlx::query_as(select_products!("WHERE id IN (SELECT product_id FROM order_items)"))
      .fetch_all(&mut *conn)
      .await?;
  let products_by_id: HashMap<i64, Product> = products.into_iter().map(|p| (p.id, p)).collect();

  let mut lines_by_order: HashMap<i64, Vec<OrderItemLine>> = HashMap::with_capacity(orders.len());
  for item in items {
    let line = join_product(item, &products_by_id)?;
    lines_by_order.entry(line.item.order_id).or_default().push(line);
  }

  let result: Vec<OrderWithItems> = orders
    .into_iter()
    .map(|order| {
      let items = lines_by_order.remove(&order.id).unwrap_or_default();
      OrderWithItems { order, items }
    })
    .collect();
  debug!("Fetched {} orders.", result.len());
  Ok(result)
}

/// Moves an order to `new_status`.
///
/// Only forward steps along `pending → processing → shipped → delivered` are
/// accepted, plus `cancelled` from any state that is not already final.
#[instrument(skip(pool))]
pub async fn update_status(pool: &DbPool, order_id: i64, new_status: OrderStatus) -> StoreResult<Order> {
  let mut tx = begin_write(pool).await?;

  let current = fetch_order(&mut tx, order_id).await?.ok_or_else(|| {
    warn!("Status update for missing order {}.", order_id);
    StoreError::NotFound(format!("Order with ID {} not found", order_id))
  })?;

  if !current.status.can_transition_to(new_status) {
    warn!(
      "Rejected status change for order {}: {} -> {}.",
      order_id, current.status, new_status
    );
    return Err(StoreError::InvalidStatusTransition {
      from: current.status,
      to: new_status,
    });
  }

  let order: Order = sqlx::query_as(&format!(
    "UPDATE orders SET status = ? WHERE id = ? RETURNING {}",
    ORDER_COLUMNS
  ))
  .bind(new_status)
  .bind(order_id)
  .fetch_one(&mut *tx)
  .await?;

  tx.commit().await?;

  info!("Order {} status: {} -> {}.", order_id, current.status, order.status);
  Ok(order)
}

/// Turns the cart into an order and empties the cart, all in one transaction.
///
/// Each line is charged at the product's current effective price (discount
/// first). The order total is the cart's final total including tax at `tax_rate`.
#[instrument(skip(pool, customer), fields(customer_email = %customer.customer_email))]
pub async fn checkout(
  pool: &DbPool,
  cart_id: &str,
  customer: &CustomerDetails,
  tax_rate: f64,
) -> StoreResult<OrderWithItems> {
  customer.validate()?;

  let mut tx = begin_write(pool).await?;

  let lines = load_cart_lines(&mut tx, cart_id).await?;
  if lines.is_empty() {
    warn!("Checkout rejected: cart '{}' is empty.", cart_id);
    return Err(StoreError::EmptyOrder);
  }

  let summary = CartSummary::from_lines(cart_id, &lines, tax_rate);
  let order = insert_order(&mut tx, customer, summary.final_total, OrderStatus::Pending).await?;

  let mut items = Vec::with_capacity(lines.len());
  for line in lines {
    let new_item = NewOrderItem {
      product_id: line.item.product_id,
      quantity: line.item.quantity,
      price: line.product.unit_price(),
    };
    let item = insert_order_item(&mut tx, order.id, &new_item).await?;
    items.push(OrderItemLine {
      item,
      product: line.product,
    });
  }

  let cleared = delete_cart_rows(&mut tx, cart_id).await?;
  tx.commit().await?;

  info!(
    "Checked out cart '{}' into order {} ({} line(s), {} cart row(s) cleared, total {:.2}).",
    cart_id,
    order.id,
    items.len(),
    cleared,
    order.total_amount
  );
  Ok(OrderWithItems { order, items })
}

async fn fetch_order(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<Option<Order>> {
  let order = sqlx::query_as(&format!("SELECT {} FROM orders WHERE id = ?", ORDER_COLUMNS))
    .bind(order_id)
    .fetch_optional(&mut *conn)
    .await?;
  Ok(order)
}

async fn insert_order(
  conn: &mut SqliteConnection,
  customer: &CustomerDetails,
  total_amount: f64,
  status: OrderStatus,
) -> StoreResult<Order> {
  let order = sqlx::query_as(&format!(
    "INSERT INTO orders (customer_name, customer_email, customer_phone, total_amount, status, created_at) \
     VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
    ORDER_COLUMNS
  ))
  .bind(customer.customer_name.trim())
  .bind(customer.customer_email.trim())
  .bind(customer.customer_phone.trim())
  .bind(total_amount)
  .bind(status)
  .bind(Utc::now())
  .fetch_one(&mut *conn)
  .await?;
  Ok(order)
}

async fn insert_order_item(conn: &mut SqliteConnection, order_id: i64, item: &NewOrderItem) -> StoreResult<OrderItem> {
  let order_item = sqlx::query_as(
    "INSERT INTO order_items (order_id, product_id, quantity, price) VALUES (?, ?, ?, ?) \
     RETURNING id, order_id, product_id, quantity, price",
  )
  .bind(order_id)
  .bind(item.product_id)
  .bind(item.quantity)
  .bind(item.price)
  .fetch_one(&mut *conn)
  .await?;
  Ok(order_item)
}

async fn load_order_lines(conn: &mut SqliteConnection, order_id: i64) -> StoreResult<Vec<OrderItemLine>> {
  let items: Vec<OrderItem> = sqlx::query_as(
    "SELECT id, order_id, product_id, quantity, price FROM order_items WHERE order_id = ? ORDER BY id",
  )
  .bind(order_id)
  .fetch_all(&mut *conn)
  .await?;
  if items.is_empty() {
    return Ok(Vec::new());
  }

  let products: Vec<Product> = sqlx::query_as(select_products!(
    "WHERE id IN (SELECT product_id FROM order_items WHERE order_id = ?)"
  ))
  .bind(order_id)
  .fetch_all(&mut *conn)
  .await?;
  let products_by_id: HashMap<i64, Product> = products.into_iter().map(|p| (p.id, p)).collect();

  items.into_iter().map(|item| join_product(item, &products_by_id)).collect()
}

// A product can appear on several lines, and on several orders.
fn join_product(item: OrderItem, products_by_id: &HashMap<i64, Product>) -> StoreResult<OrderItemLine> {
  match products_by_id.get(&item.product_id) {
    Some(product) => Ok(OrderItemLine {
      product: product.clone(),
      item,
    }),
    None => {
      error!("Order {} references missing product {}.", item.order_id, item.product_id);
      Err(StoreError::NotFound(format!(
        "Product {} referenced by order {} not found",
        item.product_id, item.order_id
      )))
    }
  }
}
