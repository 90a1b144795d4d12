//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use folio_core::domain::{DEFAULT_MAX_IMAGE_BYTES, PageRequest};
#[cfg(feature = "postgres")]
use folio_infra::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    #[cfg(feature = "postgres")]
    pub database: Option<DatabaseConfig>,
    /// Directory for uploaded images. In-memory storage when unset.
    pub asset_dir: Option<PathBuf>,
    pub max_image_bytes: usize,
    pub posts_per_page: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            #[cfg(feature = "postgres")]
            database: None,
            asset_dir: None,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            posts_per_page: PageRequest::DEFAULT_PER_PAGE,
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.parse().ok())
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        #[cfg(feature = "postgres")]
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: parsed("DB_MAX_CONNECTIONS").unwrap_or(100),
            min_connections: parsed("DB_MIN_CONNECTIONS").unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            #[cfg(feature = "postgres")]
            database,
            asset_dir: env::var_os("ASSET_DIR").map(PathBuf::from),
            max_image_bytes: parsed("MAX_IMAGE_BYTES").unwrap_or(defaults.max_image_bytes),
            posts_per_page: parsed("POSTS_PER_PAGE").unwrap_or(defaults.posts_per_page),
        }
    }

    /// Largest JSON body accepted: a base64-encoded image plus the other fields.
    pub fn json_limit(&self) -> usize {
        self.max_image_bytes
            .div_ceil(3)
            .saturating_mul(4)
            .saturating_add(64 * 1024)
    }
}
