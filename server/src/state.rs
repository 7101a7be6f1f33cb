// server/src/state.rs
use crate::config::AppConfig;
use std::sync::Arc;
use storefront::DbPool;

#[derive(Clone)]
pub struct AppState {
  pub db_pool: DbPool,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  pub fn new(db_pool: DbPool, config: AppConfig) -> Self {
    Self {
      db_pool,
      config: Arc::new(config),
    }
  }
}
