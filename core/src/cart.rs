// core/src/cart.rs

//! Cart store: per-session line items.
//!
//! A cart is just the set of `cart_items` rows sharing a `cart_id`. An unknown
//! cart id is an empty cart, never an error.

use std::collections::HashMap;

use sqlx::SqliteConnection;
use tracing::{debug, info, instrument, warn};

use crate::catalog::select_products;
use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};
use crate::models::{CartItem, CartLine, CartSummary, Product};

/// Longest cart id accepted from a client.
pub const MAX_CART_ID_LEN: usize = 128;

/// The cart's items joined with their products, in the order they were first added.
#[instrument(skip(pool))]
pub async fn get_cart_items(pool: &DbPool, cart_id: &str) -> StoreResult<Vec<CartLine>> {
  let mut conn = pool.acquire().await?;
  load_cart_lines(&mut conn, cart_id).await
}

/// Derived totals for the cart at `tax_rate`.
#[instrument(skip(pool))]
pub async fn cart_summary(pool: &DbPool, cart_id: &str, tax_rate: f64) -> StoreResult<CartSummary> {
  let lines = get_cart_items(pool, cart_id).await?;
  Ok(CartSummary::from_lines(cart_id, &lines, tax_rate))
}

/// Adds `quantity` of a product to the cart.
///
/// If the product is already in the cart the quantities are merged into the
/// existing row; a cart never holds two rows for the same product. The merge is a
/// single autocommit upsert against the `(cart_id, product_id)` unique constraint,
/// so concurrent adds queue on the write lock and every one of them is counted.
/// A merge that would push the quantity past `i32::MAX` is rejected and leaves the
/// row unchanged.
#[instrument(skip(pool))]
pub async fn add_item(pool: &DbPool, cart_id: &str, product_id: i64, quantity: i32) -> StoreResult<CartItem> {
  validate_cart_id(cart_id)?;
  validate_quantity(quantity)?;

  let merged: Option<CartItem> = sqlx::query_as(
    "INSERT INTO cart_items (cart_id, product_id, quantity) VALUES (?, ?, ?) \
     ON CONFLICT (cart_id, product_id) DO UPDATE SET quantity = cart_items.quantity + excluded.quantity \
     WHERE cart_items.quantity + excluded.quantity <= ? \
     RETURNING id, cart_id, product_id, quantity",
  )
  .bind(cart_id)
  .bind(product_id)
  .bind(quantity)
  .bind(i64::from(i32::MAX))
  .fetch_optional(pool)
  .await
  .map_err(|err| {
    if is_foreign_key_violation(&err) {
      warn!("Add to cart rejected: product {} does not exist.", product_id);
      StoreError::InvalidReference(format!("Product with ID {} does not exist", product_id))
    } else {
      StoreError::Database(err)
    }
  })?;

  let item = merged.ok_or_else(|| {
    warn!(
      "Add to cart rejected: product {} in cart '{}' would exceed the largest quantity.",
      product_id, cart_id
    );
    StoreError::invalid_field("quantity", format!("cart quantity cannot exceed {}", i32::MAX))
  })?;

  info!(
    "Cart item {} (product {}) in cart '{}' now has quantity {}.",
    item.id, item.product_id, item.cart_id, item.quantity
  );
  Ok(item)
}

/// Overwrites a cart item's quantity. Zero or negative quantities are rejected, not treated as removal.
#[instrument(skip(pool))]
pub async fn update_quantity(pool: &DbPool, cart_item_id: i64, quantity: i32) -> StoreResult<CartItem> {
  validate_quantity(quantity)?;

  let item: CartItem = sqlx::query_as(
    "UPDATE cart_items SET quantity = ? WHERE id = ? RETURNING id, cart_id, product_id, quantity",
  )
  .bind(quantity)
  .bind(cart_item_id)
  .fetch_optional(pool)
  .await?
  .ok_or_else(|| {
    warn!("Cart item {} not found for quantity update.", cart_item_id);
    StoreError::NotFound(format!("Cart item with ID {} not found", cart_item_id))
  })?;

  info!("Cart item {} quantity set to {}.", item.id, item.quantity);
  Ok(item)
}

/// Deletes one cart item. Deleting an id that does not exist is not an error.
#[instrument(skip(pool))]
pub async fn remove_item(pool: &DbPool, cart_item_id: i64) -> StoreResult<()> {
  let result = sqlx::query("DELETE FROM cart_items WHERE id = ?")
    .bind(cart_item_id)
    .execute(pool)
    .await?;
  debug!(
    "Remove cart item {}: {} row(s) affected.",
    cart_item_id,
    result.rows_affected()
  );
  Ok(())
}

/// Empties the cart. Idempotent.
#[instrument(skip(pool))]
pub async fn clear_cart(pool: &DbPool, cart_id: &str) -> StoreResult<()> {
  let mut conn = pool.acquire().await?;
  let removed = delete_cart_rows(&mut conn, cart_id).await?;
  info!("Cleared cart '{}': {} item(s) removed.", cart_id, removed);
  Ok(())
}

pub(crate) async fn delete_cart_rows(conn: &mut SqliteConnection, cart_id: &str) -> StoreResult<u64> {
  let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = ?")
    .bind(cart_id)
    .execute(&mut *conn)
    .await?;
  Ok(result.rows_affected())
}

pub(crate) async fn load_cart_lines(conn: &mut SqliteConnection, cart_id: &str) -> StoreResult<Vec<CartLine>> {
  let items: Vec<CartItem> =
    sqlx::query_as("SELECT id, cart_id, product_id, quantity FROM cart_items WHERE cart_id = ? ORDER BY id")
      .bind(cart_id)
      .fetch_all(&mut *conn)
      .await?;
  if items.is_empty() {
    return Ok(Vec::new());
  }

  let products: Vec<Product> = sqlx::query_as(select_products!(
    "WHERE id IN (SELECT product_id FROM cart_items WHERE cart_id = ?)"
  ))
  .bind(cart_id)
  .fetch_all(&mut *conn)
  .await?;
  let mut products_by_id: HashMap<i64, Product> = products.into_iter().map(|p| (p.id, p)).collect();

  let mut lines = Vec::with_capacity(items.len());
  for item in items {
    // Foreign keys keep this populated; a miss means the row vanished mid-read.
    let product = products_by_id.remove(&item.product_id).ok_or_else(|| {
      StoreError::NotFound(format!(
        "Product {} referenced by cart item {} not found",
        item.product_id, item.id
      ))
    })?;
    lines.push(CartLine { item, product });
  }
  debug!("Loaded {} line(s) for cart '{}'.", lines.len(), cart_id);
  Ok(lines)
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
  err.as_database_error().is_some_and(|db_err| db_err.is_foreign_key_violation())
}

fn validate_cart_id(cart_id: &str) -> StoreResult<()> {
  if cart_id.trim().is_empty() {
    return Err(StoreError::invalid_field("cartId", "must not be blank"));
  }
  if cart_id.len() > MAX_CART_ID_LEN {
    return Err(StoreError::invalid_field(
      "cartId",
      format!("must be at most {} characters", MAX_CART_ID_LEN),
    ));
  }
  Ok(())
}

fn validate_quantity(quantity: i32) -> StoreResult<()> {
  if quantity <= 0 {
    warn!("Invalid quantity ({}) provided. Must be positive.", quantity);
    return Err(StoreError::invalid_field("quantity", "must be a positive integer"));
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quantity_must_be_positive() {
    assert!(validate_quantity(1).is_ok());
    assert!(validate_quantity(0).is_err());
    assert!(validate_quantity(-4).is_err());
  }

  #[test]
  fn cart_id_must_be_present_and_bounded() {
    assert!(validate_cart_id("cart-abc123").is_ok());
    assert!(validate_cart_id("   ").is_err());
    assert!(validate_cart_id(&"x".repeat(MAX_CART_ID_LEN + 1)).is_err());
  }
}
