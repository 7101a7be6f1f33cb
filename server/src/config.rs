// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub database_max_connections: u32,

  /// Applied to cart summaries and checkout totals.
  pub tax_rate: f64,

  // Load the sample catalog into an empty database on startup
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|var_name| env::var(var_name).ok())
  }

  /// Builds the config from any variable source. Unset variables take their defaults.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str, default: &str| lookup(var_name).unwrap_or_else(|| default.to_string());

    let server_host = get_env("SERVER_HOST", "127.0.0.1");
    let server_port = get_env("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL", "sqlite://storefront.db?mode=rwc");
    let database_max_connections = get_env("DATABASE_MAX_CONNECTIONS", "5")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
    if database_max_connections == 0 {
      return Err(AppError::Config("DATABASE_MAX_CONNECTIONS must be at least 1".to_string()));
    }

    let tax_rate = get_env("TAX_RATE", "0.08")
      .parse::<f64>()
      .map_err(|e| AppError::Config(format!("Invalid TAX_RATE: {}", e)))?;
    if !(0.0..1.0).contains(&tax_rate) {
      return Err(AppError::Config(format!(
        "TAX_RATE must be in [0, 1), got {}",
        tax_rate
      )));
    }

    let seed_db = get_env("SEED_DB", "true")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");
    tracing::debug!(
      server_host = %server_host,
      server_port,
      database_max_connections,
      tax_rate,
      seed_db,
      "Loaded config details"
    );

    Ok(Self {
      server_host,
      server_port,
      database_url,
      database_max_connections,
      tax_rate,
      seed_db,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    AppConfig::from_lookup(|name| vars.get(name).cloned())
  }

  #[test]
  fn defaults_apply_when_unset() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.bind_address(), "127.0.0.1:8080");
    assert_eq!(config.database_url, "sqlite://storefront.db?mode=rwc");
    assert_eq!(config.database_max_connections, 5);
    assert_eq!(config.tax_rate, 0.08);
    assert!(config.seed_db);
  }

  #[test]
  fn overrides_are_parsed() {
    let config = config_from(&[
      ("SERVER_PORT", "9090"),
      ("TAX_RATE", "0"),
      ("SEED_DB", "false"),
      ("DATABASE_URL", "sqlite::memory:"),
    ])
    .unwrap();
    assert_eq!(config.server_port, 9090);
    assert_eq!(config.tax_rate, 0.0);
    assert!(!config.seed_db);
    assert_eq!(config.database_url, "sqlite::memory:");
  }

  #[test]
  fn invalid_values_are_config_errors() {
    for vars in [
      [("SERVER_PORT", "eighty")],
      [("TAX_RATE", "1.5")],
      [("TAX_RATE", "-0.1")],
      [("SEED_DB", "maybe")],
      [("DATABASE_MAX_CONNECTIONS", "0")],
    ] {
      let err = config_from(&vars).unwrap_err();
      assert!(matches!(err, AppError::Config(_)), "{:?} gave {:?}", vars, err);
    }
  }
}
