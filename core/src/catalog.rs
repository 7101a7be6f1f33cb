// core/src/catalog.rs

//! Catalog store: categories and products.
//!
//! Browsing operations are pure reads. The write operations exist for seeding and
//! catalog maintenance; they are not part of the shopper-facing API.

use sqlx::SqliteConnection;
use tracing::{debug, info, instrument, warn};

use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};
use crate::models::product::validate_prices;
use crate::models::{Category, NewCategory, NewProduct, Product};

/// How many discounted, in-stock products the featured shelf shows.
pub const FEATURED_LIMIT: i64 = 8;
/// Default size of the new-arrivals list.
pub const NEW_ARRIVALS_LIMIT: i64 = 8;

/// `SELECT <product columns> FROM products <tail>` as a `&'static str`.
macro_rules! select_products {
  ($tail:literal) => {
    concat!(
      "SELECT id, name, slug, description, image_url, price, discount_price, category_id, stock_quantity, is_new ",
      "FROM products ",
      $tail
    )
  };
}
pub(crate) use select_products;

// --- Categories ---

#[instrument(skip(pool))]
pub async fn list_categories(pool: &DbPool) -> StoreResult<Vec<Category>> {
  let categories: Vec<Category> = sqlx::query_as("SELECT id, name, slug, image_url FROM categories ORDER BY id")
    .fetch_all(pool)
    .await?;
  debug!("Fetched {} categories.", categories.len());
  Ok(categories)
}

#[instrument(skip(pool))]
pub async fn get_category_by_slug(pool: &DbPool, slug: &str) -> StoreResult<Category> {
  sqlx::query_as("SELECT id, name, slug, image_url FROM categories WHERE slug = ?")
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
      warn!("Category with slug '{}' not found.", slug);
      StoreError::NotFound(format!("Category '{}' not found", slug))
    })
}

#[instrument(skip(pool, new_category), fields(slug = %new_category.slug))]
pub async fn create_category(pool: &DbPool, new_category: &NewCategory) -> StoreResult<Category> {
  let mut conn = pool.acquire().await?;
  insert_category(&mut conn, new_category).await
}

pub(crate) async fn insert_category(conn: &mut SqliteConnection, new_category: &NewCategory) -> StoreResult<Category> {
  if new_category.slug.trim().is_empty() {
    return Err(StoreError::invalid_field("slug", "must not be blank"));
  }
  let category: Category =
    sqlx::query_as("INSERT INTO categories (name, slug, image_url) VALUES (?, ?, ?) RETURNING id, name, slug, image_url")
      .bind(&new_category.name)
      .bind(&new_category.slug)
      .bind(&new_category.image_url)
      .fetch_one(&mut *conn)
      .await
      .map_err(|e| unique_slug_violation(e, &new_category.slug))?;
  info!("Created category '{}' (ID: {}).", category.slug, category.id);
  Ok(category)
}

// --- Products ---

#[instrument(skip(pool))]
pub async fn list_products(pool: &DbPool) -> StoreResult<Vec<Product>> {
  let products: Vec<Product> = sqlx::query_as(select_products!("ORDER BY id")).fetch_all(pool).await?;
  debug!("Fetched {} products.", products.len());
  Ok(products)
}

/// Products in a category. An unknown category id is an empty list, not an error.
#[instrument(skip(pool))]
pub async fn list_products_by_category(pool: &DbPool, category_id: i64) -> StoreResult<Vec<Product>> {
  let products: Vec<Product> = sqlx::query_as(select_products!("WHERE category_id = ? ORDER BY id"))
    .bind(category_id)
    .fetch_all(pool)
    .await?;
  debug!("Fetched {} products for category {}.", products.len(), category_id);
  Ok(products)
}

#[instrument(skip(pool))]
pub async fn get_product(pool: &DbPool, product_id: i64) -> StoreResult<Product> {
  sqlx::query_as(select_products!("WHERE id = ?"))
    .bind(product_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::NotFound(format!("Product with ID {} not found", product_id)))
}

#[instrument(skip(pool))]
pub async fn get_product_by_slug(pool: &DbPool, slug: &str) -> StoreResult<Product> {
  sqlx::query_as(select_products!("WHERE slug = ?"))
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| {
      warn!("Product with slug '{}' not found.", slug);
      StoreError::NotFound(format!("Product '{}' not found", slug))
    })
}

/// Case-insensitive substring match over name and description.
///
/// Case folding is Unicode-aware on both sides, so "éclair" finds "Éclair Tray".
/// The query is matched literally; `%` and `_` have no special meaning.
#[instrument(skip(pool))]
pub async fn search_products(pool: &DbPool, query: &str) -> StoreResult<Vec<Product>> {
  let needle = query.to_lowercase();
  let products: Vec<Product> = sqlx::query_as(select_products!("ORDER BY id")).fetch_all(pool).await?;
  let matched: Vec<Product> = products
    .into_iter()
    .filter(|product| contains_folded(&product.name, &needle) || contains_folded(&product.description, &needle))
    .collect();
  debug!("Search for '{}' matched {} products.", query, matched.len());
  Ok(matched)
}

/// The first [`FEATURED_LIMIT`] products that are in stock and discounted, in catalog order.
#[instrument(skip(pool))]
pub async fn featured_products(pool: &DbPool) -> StoreResult<Vec<Product>> {
  let products = sqlx::query_as(select_products!(
    "WHERE stock_quantity > 0 AND discount_price IS NOT NULL ORDER BY id LIMIT ?"
  ))
  .bind(FEATURED_LIMIT)
  .fetch_all(pool)
  .await?;
  Ok(products)
}

#[instrument(skip(pool))]
pub async fn new_products(pool: &DbPool, limit: i64) -> StoreResult<Vec<Product>> {
  let products = sqlx::query_as(select_products!("WHERE is_new = 1 ORDER BY id LIMIT ?"))
    .bind(limit)
    .fetch_all(pool)
    .await?;
  Ok(products)
}

/// Every discounted product, in stock or not.
#[instrument(skip(pool))]
pub async fn clearance_products(pool: &DbPool) -> StoreResult<Vec<Product>> {
  let products = sqlx::query_as(select_products!("WHERE discount_price IS NOT NULL ORDER BY id"))
    .fetch_all(pool)
    .await?;
  Ok(products)
}

#[instrument(skip(pool, new_product), fields(slug = %new_product.slug))]
pub async fn create_product(pool: &DbPool, new_product: &NewProduct) -> StoreResult<Product> {
  let mut conn = pool.acquire().await?;
  insert_product(&mut conn, new_product).await
}

pub(crate) async fn insert_product(conn: &mut SqliteConnection, new_product: &NewProduct) -> StoreResult<Product> {
  new_product.validate()?;

  let category_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories WHERE id = ?")
    .bind(new_product.category_id)
    .fetch_one(&mut *conn)
    .await?;
  if category_exists == 0 {
    return Err(StoreError::InvalidReference(format!(
      "Category with ID {} does not exist",
      new_product.category_id
    )));
  }

  let product: Product = sqlx::query_as(
    "INSERT INTO products (name, slug, description, image_url, price, discount_price, category_id, stock_quantity, is_new) \
     VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
     RETURNING id, name, slug, description, image_url, price, discount_price, category_id, stock_quantity, is_new",
  )
  .bind(&new_product.name)
  .bind(&new_product.slug)
  .bind(&new_product.description)
  .bind(&new_product.image_url)
  .bind(new_product.price)
  .bind(new_product.discount_price)
  .bind(new_product.category_id)
  .bind(new_product.stock_quantity)
  .bind(new_product.is_new)
  .fetch_one(&mut *conn)
  .await
  .map_err(|e| unique_slug_violation(e, &new_product.slug))?;

  debug!("Created product '{}' (ID: {}).", product.slug, product.id);
  Ok(product)
}

/// Changes a product's list and discount price. Existing order items keep the price they were sold at.
#[instrument(skip(pool))]
pub async fn update_product_price(
  pool: &DbPool,
  product_id: i64,
  price: f64,
  discount_price: Option<f64>,
) -> StoreResult<Product> {
  validate_prices(price, discount_price).map_err(|e| StoreError::Validation {
    message: "Invalid product price".to_string(),
    details: vec![e],
  })?;

  let product: Product = sqlx::query_as(
    "UPDATE products SET price = ?, discount_price = ? WHERE id = ? \
     RETURNING id, name, slug, description, image_url, price, discount_price, category_id, stock_quantity, is_new",
  )
  .bind(price)
  .bind(discount_price)
  .bind(product_id)
  .fetch_optional(pool)
  .await?
  .ok_or_else(|| StoreError::NotFound(format!("Product with ID {} not found", product_id)))?;

  info!(
    "Updated price for product {}: price = {}, discount_price = {:?}",
    product_id, price, discount_price
  );
  Ok(product)
}

/// Sets the quantity on hand; `inStock` and `stockLevel` follow from it.
#[instrument(skip(pool))]
pub async fn update_stock(pool: &DbPool, product_id: i64, stock_quantity: i64) -> StoreResult<Product> {
  if stock_quantity < 0 {
    return Err(StoreError::invalid_field("stockQuantity", "must not be negative"));
  }
  let product: Product = sqlx::query_as(
    "UPDATE products SET stock_quantity = ? WHERE id = ? \
     RETURNING id, name, slug, description, image_url, price, discount_price, category_id, stock_quantity, is_new",
  )
  .bind(stock_quantity)
  .bind(product_id)
  .fetch_optional(pool)
  .await?
  .ok_or_else(|| StoreError::NotFound(format!("Product with ID {} not found", product_id)))?;

  info!("Stock for product {} set to {}.", product_id, stock_quantity);
  Ok(product)
}

pub(crate) async fn product_exists(conn: &mut SqliteConnection, product_id: i64) -> StoreResult<bool> {
  let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE id = ?")
    .bind(product_id)
    .fetch_one(&mut *conn)
    .await?;
  Ok(count > 0)
}

// `needle` must already be lowercased.
fn contains_folded(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(needle)
}

fn unique_slug_violation(err: sqlx::Error, slug: &str) -> StoreError {
  let is_unique_violation = err.as_database_error().is_some_and(|db_err| db_err.is_unique_violation());
  if is_unique_violation {
    StoreError::invalid_field("slug", format!("'{}' is already taken", slug))
  } else {
    StoreError::Database(err)
  }
}
