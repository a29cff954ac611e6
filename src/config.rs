// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  // Requests whose Host header matches this name are served under /admin.
  pub admin_hostname: String,

  // Session cookie hardening: `secure` only makes sense behind TLS.
  pub cookie_secure: bool,
  pub session_ttl_days: i64,

  // Optional: for seeding the catalog and a bootstrap admin on startup.
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;

    let admin_hostname = get_env("ADMIN_HOSTNAME").unwrap_or_else(|_| "admin.localhost".to_string());

    let cookie_secure = get_env("COOKIE_SECURE")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid COOKIE_SECURE value: {}", e)))?;

    let session_ttl_days = get_env("SESSION_TTL_DAYS")
      .unwrap_or_else(|_| "7".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_DAYS: {}", e)))?;
    if session_ttl_days <= 0 {
      return Err(AppError::Config("SESSION_TTL_DAYS must be positive.".to_string()));
    }

    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      admin_hostname,
      cookie_secure,
      session_ttl_days,
      seed_db,
    })
  }
}
