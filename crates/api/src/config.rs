use std::path::PathBuf;

use falls_core::upload::MAX_UPLOAD_BYTES;
use falls_store::StorageConfig;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5011`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Root of the public static assets; images live under `images/`.
    pub static_root: PathBuf,
    /// Directory holding `content.json` and `attractions.json`.
    pub data_dir: PathBuf,
    /// Maximum accepted image size in bytes (default: 16 MiB).
    pub max_upload_bytes: u64,
    /// Admin username used when no credentials file overrides it.
    pub admin_username: String,
    /// Admin password used when no credentials file overrides it.
    pub admin_password: String,
    /// Optional JSON file where a changed admin password is persisted.
    pub credentials_path: Option<PathBuf>,
    /// Session token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Whether the session cookie carries the `Secure` attribute.
    pub secure_cookie: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                  |
    /// |-------------------------|--------------------------|
    /// | `HOST`                  | `0.0.0.0`                |
    /// | `PORT`                  | `5011`                   |
    /// | `CORS_ORIGINS`          | `http://localhost:5011`  |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                     |
    /// | `STATIC_ROOT`           | `static`                 |
    /// | `DATA_DIR`              | `data`                   |
    /// | `MAX_UPLOAD_BYTES`      | `16777216`               |
    /// | `ADMIN_USERNAME`        | `admin`                  |
    /// | `ADMIN_PASSWORD`        | `admin`                  |
    /// | `CREDENTIALS_PATH`      | unset                    |
    /// | `SESSION_COOKIE_SECURE` | `false`                  |
    ///
    /// Session settings are documented on [`JwtConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5011".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5011".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let static_root = std::env::var("STATIC_ROOT")
            .unwrap_or_else(|_| "static".into())
            .into();

        let data_dir = std::env::var("DATA_DIR")
            .unwrap_or_else(|_| "data".into())
            .into();

        let max_upload_bytes: u64 = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid u64");

        let admin_username = std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".into());
        let admin_password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin".into());

        let credentials_path = std::env::var("CREDENTIALS_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let secure_cookie = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            static_root,
            data_dir,
            max_upload_bytes,
            admin_username,
            admin_password,
            credentials_path,
            jwt,
            secure_cookie,
        }
    }

    /// On-disk layout for [`falls_store::Storage::open`].
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig {
            static_root: self.static_root.clone(),
            data_dir: self.data_dir.clone(),
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}
