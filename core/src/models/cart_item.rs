// core/src/models/cart_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::product::Product;
use crate::money::{from_cents, line_total_cents, tax_cents};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
  pub id: i64,
  pub cart_id: String, // opaque, client-held session id
  pub product_id: i64,
  pub quantity: i32,
}

/// A cart item joined with its product, as the cart view shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartLine {
  #[serde(flatten)]
  pub item: CartItem,
  pub product: Product,
}

impl CartLine {
  pub fn line_total_cents(&self) -> i64 {
    line_total_cents(self.product.unit_price(), self.item.quantity)
  }
}

/// Totals derived from a cart's current lines. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
  pub cart_id: String,
  pub item_count: i64,
  pub cart_total: f64,
  pub tax_rate: f64,
  pub tax_amount: f64,
  pub final_total: f64,
}

impl CartSummary {
  pub fn from_lines(cart_id: &str, lines: &[CartLine], tax_rate: f64) -> Self {
    let item_count = lines.iter().map(|line| i64::from(line.item.quantity)).sum();
    let subtotal_cents: i64 = lines.iter().map(CartLine::line_total_cents).sum();
    let tax = tax_cents(subtotal_cents, tax_rate);
    Self {
      cart_id: cart_id.to_string(),
      item_count,
      cart_total: from_cents(subtotal_cents),
      tax_rate,
      tax_amount: from_cents(tax),
      final_total: from_cents(subtotal_cents + tax),
    }
  }
}
