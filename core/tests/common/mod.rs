// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every helper

use storefront::db::{connect, connect_in_memory};
use storefront::seed::seed_catalog;
use storefront::{
  catalog, Category, DbPool, NewCategory, NewOrderItem, NewProduct, OrderDraft, Product, StoreError,
};
use tempfile::TempDir;
use tracing::Level;

// --- Database fixtures ---

/// A fresh in-memory store with the schema applied and nothing else.
pub async fn empty_store() -> DbPool {
  setup_tracing();
  connect_in_memory().await.expect("in-memory database")
}

/// A fresh in-memory store holding the sample catalog.
pub async fn seeded_store() -> DbPool {
  let pool = empty_store().await;
  assert!(seed_catalog(&pool).await.expect("seed catalog"));
  pool
}

/// A seeded store in a database file, pooled over `max_connections` connections.
///
/// The in-memory stores above share one connection, so only this one lets
/// operations actually race each other. Keep the `TempDir` alive as long as the pool.
pub async fn seeded_file_store(max_connections: u32) -> (TempDir, DbPool) {
  setup_tracing();
  let dir = TempDir::new().expect("Failed to create temp dir");
  let url = format!("sqlite://{}", dir.path().join("storefront.db").display());
  let pool = connect(&url, max_connections).await.expect("file database");
  assert!(seed_catalog(&pool).await.expect("seed catalog"));
  (dir, pool)
}

pub async fn create_category(pool: &DbPool, slug: &str) -> Category {
  catalog::create_category(
    pool,
    &NewCategory {
      name: slug.to_uppercase(),
      slug: slug.to_string(),
      image_url: format!("https://example.com/{}.jpg", slug),
    },
  )
  .await
  .expect("create category")
}

pub fn new_product(category_id: i64, slug: &str, price: f64, discount_price: Option<f64>) -> NewProduct {
  NewProduct {
    name: slug.replace('-', " "),
    slug: slug.to_string(),
    description: format!("A test product called {}", slug),
    image_url: format!("https://example.com/{}.jpg", slug),
    price,
    discount_price,
    category_id,
    stock_quantity: 20,
    is_new: false,
  }
}

pub async fn create_product(pool: &DbPool, category_id: i64, slug: &str, price: f64) -> Product {
  catalog::create_product(pool, &new_product(category_id, slug, price, None))
    .await
    .expect("create product")
}

pub fn draft(total_amount: f64) -> OrderDraft {
  OrderDraft {
    customer_name: "Grace Hopper".to_string(),
    customer_email: "grace@example.com".to_string(),
    customer_phone: "555-0199".to_string(),
    total_amount,
    status: None,
  }
}

pub fn order_item(product_id: i64, quantity: i32, price: f64) -> NewOrderItem {
  NewOrderItem {
    product_id,
    quantity,
    price,
  }
}

pub async fn count_rows(pool: &DbPool, table: &str) -> i64 {
  sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
    .fetch_one(pool)
    .await
    .expect("count rows")
}

pub fn assert_validation_on(err: StoreError, field: &str) {
  match err {
    StoreError::Validation { details, .. } => {
      assert!(
        details.iter().any(|d| d.field == field),
        "expected a validation error on '{}', got {:?}",
        field,
        details
      );
    }
    other => panic!("Expected Validation on '{}', got {:?}", field, other),
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer()
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
