// core/src/models/product.rs

use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::error::{FieldError, StoreError, StoreResult};

/// Quantities at or below this (and above zero) are reported as `Low Stock`.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockLevel {
  #[serde(rename = "In Stock")]
  InStock,
  #[serde(rename = "Low Stock")]
  LowStock,
  #[serde(rename = "Out of Stock")]
  OutOfStock,
}

impl StockLevel {
  /// Stock level is always derived from the quantity on hand; it is never stored.
  pub fn from_quantity(stock_quantity: i64) -> Self {
    if stock_quantity <= 0 {
      StockLevel::OutOfStock
    } else if stock_quantity <= LOW_STOCK_THRESHOLD {
      StockLevel::LowStock
    } else {
      StockLevel::InStock
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub slug: String,
  pub description: String,
  pub image_url: String,
  pub price: f64,
  pub discount_price: Option<f64>,
  pub category_id: i64,
  pub stock_quantity: i64,
  pub in_stock: bool,
  pub stock_level: StockLevel,
  pub is_new: bool,
}

impl Product {
  /// The price a customer pays per unit right now: the discount price when there is one.
  pub fn unit_price(&self) -> f64 {
    self.discount_price.unwrap_or(self.price)
  }
}

// `in_stock` and `stock_level` are not columns; both come from `stock_quantity`.
impl<'r> FromRow<'r, SqliteRow> for Product {
  fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
    let stock_quantity: i64 = row.try_get("stock_quantity")?;
    Ok(Self {
      id: row.try_get("id")?,
      name: row.try_get("name")?,
      slug: row.try_get("slug")?,
      description: row.try_get("description")?,
      image_url: row.try_get("image_url")?,
      price: row.try_get("price")?,
      discount_price: row.try_get("discount_price")?,
      category_id: row.try_get("category_id")?,
      stock_quantity,
      in_stock: stock_quantity > 0,
      stock_level: StockLevel::from_quantity(stock_quantity),
      is_new: row.try_get("is_new")?,
    })
  }
}

/// Insert shape for a product (seed data, tests, catalog maintenance).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
  pub name: String,
  pub slug: String,
  pub description: String,
  pub image_url: String,
  pub price: f64,
  pub discount_price: Option<f64>,
  pub category_id: i64,
  pub stock_quantity: i64,
  pub is_new: bool,
}

impl NewProduct {
  pub fn validate(&self) -> StoreResult<()> {
    let mut details = Vec::new();
    if self.name.trim().is_empty() {
      details.push(FieldError::new("name", "must not be blank"));
    }
    if self.slug.trim().is_empty() {
      details.push(FieldError::new("slug", "must not be blank"));
    }
    if let Err(e) = validate_prices(self.price, self.discount_price) {
      details.push(e);
    }
    if self.stock_quantity < 0 {
      details.push(FieldError::new("stockQuantity", "must not be negative"));
    }
    StoreError::check_fields("Invalid product data", details)
  }
}

/// `price` must be a finite non-negative amount and a discount, when present,
/// must be strictly below it.
pub(crate) fn validate_prices(price: f64, discount_price: Option<f64>) -> Result<(), FieldError> {
  if !price.is_finite() || price < 0.0 {
    return Err(FieldError::new("price", "must be a non-negative amount"));
  }
  match discount_price {
    Some(discount) if !discount.is_finite() || discount < 0.0 => {
      Err(FieldError::new("discountPrice", "must be a non-negative amount"))
    }
    Some(discount) if discount >= price => Err(FieldError::new("discountPrice", "must be lower than price")),
    _ => Ok(()),
  }
}
