// core/src/lib.rs

//! Storefront: the catalog, cart and order stores behind a small online shop.
//!
//! The crate owns the consistency rules between the three stores:
//!  - Cart lines are unique per `(cart_id, product_id)`; adding a product that is
//!    already in the cart merges quantities in a single upsert.
//!  - Orders are written together with their items in one transaction, and each
//!    item keeps the unit price it was charged at, independent of later catalog edits.
//!  - Order status only moves forward (`pending → processing → shipped → delivered`),
//!    with `cancelled` reachable from any non-terminal state.
//!
//! Everything here talks to SQLite through an [`sqlx`] pool ([`DbPool`]). The HTTP
//! surface lives in the `storefront_server` crate.

pub mod cart;
pub mod catalog;
pub mod db;
pub mod error;
pub mod models;
pub mod money;
pub mod orders;
pub mod seed;

// --- Re-exports for the Public API ---

pub use crate::db::DbPool;
pub use crate::error::{FieldError, StoreError, StoreResult};

pub use crate::models::{
  CartItem, CartLine, CartSummary, Category, NewCategory, NewProduct, Order, OrderItem, OrderItemLine, OrderStatus,
  OrderWithItems, Product, StockLevel,
};
pub use crate::orders::{CustomerDetails, NewOrderItem, OrderDraft};
