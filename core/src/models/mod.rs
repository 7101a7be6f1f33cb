// core/src/models/mod.rs

//! Data structures representing database rows and the joined shapes the API returns.

pub mod cart_item;
pub mod category;
pub mod order;
pub mod order_item;
pub mod product;

pub use cart_item::{CartItem, CartLine, CartSummary};
pub use category::{Category, NewCategory};
pub use order::{Order, OrderStatus, OrderWithItems};
pub use order_item::{OrderItem, OrderItemLine};
pub use product::{NewProduct, Product, StockLevel, LOW_STOCK_THRESHOLD};
