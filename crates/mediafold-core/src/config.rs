//! Configuration module
//!
//! Settings are read once from the process environment (a `.env` file is
//! honored) and passed explicitly to every component that needs them.

use std::env;
use std::path::PathBuf;

use crate::storage_types::CorruptManifestPolicy;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_PUBLIC_DIR: &str = "public";
const MAX_UPLOAD_SIZE_MB: usize = 500;

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    /// Root directory holding one subfolder per `(className, personName)` pair
    pub uploads_dir: PathBuf,
    /// Directory with the static landing, upload and detail pages
    pub public_dir: PathBuf,
    pub max_upload_size_bytes: usize,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// Serialize manifest appends per folder and write through a temp file
    pub manifest_locking: bool,
    pub corrupt_manifest_policy: CorruptManifestPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a valid port number: {}", e))?,
            None => DEFAULT_PORT,
        };

        let max_upload_size_mb = lookup("MAX_UPLOAD_SIZE_MB")
            .map(|v| {
                v.trim().parse::<usize>().map_err(|e| {
                    anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be a whole number: {}", e)
                })
            })
            .transpose()?
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let manifest_locking = lookup("MANIFEST_LOCKING")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let corrupt_manifest_policy = lookup("MANIFEST_ON_CORRUPT")
            .map(|v| v.parse::<CorruptManifestPolicy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Config {
            server_port,
            uploads_dir: PathBuf::from(
                lookup("UPLOADS_DIR").unwrap_or_else(|| DEFAULT_UPLOADS_DIR.to_string()),
            ),
            public_dir: PathBuf::from(
                lookup("PUBLIC_DIR").unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()),
            ),
            max_upload_size_bytes: max_upload_size_mb.saturating_mul(1024 * 1024),
            cors_origins,
            environment,
            manifest_locking,
            corrupt_manifest_policy,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be greater than 0"));
        }

        if self.uploads_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("UPLOADS_DIR must not be empty"));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}
