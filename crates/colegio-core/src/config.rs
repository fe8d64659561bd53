//! Configuration module
//!
//! Environment-based configuration for the admin core: database, local
//! storage layout, upload limits and the fallback system actor.

use std::env;

use crate::constants::SYSTEM_USER_ID;

const DEFAULT_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_IMAGE_SIZE_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_MAX_PDF_SIZE_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    /// Root directory of the public storage disk.
    pub storage_path: String,
    /// Base URL files on the public disk are served from.
    pub storage_base_url: String,
    pub max_image_size_bytes: usize,
    pub max_pdf_size_bytes: usize,
    /// Actor id stamped into `updated_by` when no authenticated actor exists.
    pub system_user_id: i64,
    pub environment: String,
}

impl Config {
    /// Load configuration from the environment. A `.env` file is honored
    /// when present.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Config {
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", DEFAULT_CONNECTION_TIMEOUT_SECS)?,
            storage_path: env::var("STORAGE_PATH").unwrap_or_else(|_| "storage/public".to_string()),
            storage_base_url: env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/storage".to_string()),
            max_image_size_bytes: env_parse("MAX_IMAGE_SIZE_BYTES", DEFAULT_MAX_IMAGE_SIZE_BYTES)?,
            max_pdf_size_bytes: env_parse("MAX_PDF_SIZE_BYTES", DEFAULT_MAX_PDF_SIZE_BYTES)?,
            system_user_id: env_parse("SYSTEM_USER_ID", SYSTEM_USER_ID)?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, String> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_parse_default_and_invalid() {
        std::env::remove_var("COLEGIO_TEST_UNSET");
        assert_eq!(env_parse("COLEGIO_TEST_UNSET", 7u32).unwrap(), 7);

        std::env::set_var("COLEGIO_TEST_BAD", "not-a-number");
        assert!(env_parse::<u32>("COLEGIO_TEST_BAD", 7).is_err());
        std::env::remove_var("COLEGIO_TEST_BAD");
    }
}
