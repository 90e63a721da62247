//! Configuration module
//!
//! The relay reads its whole configuration from the environment once at
//! startup. The resulting [`Config`] is immutable and shared by reference
//! with every request handler.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8080;
const SCRATCH_DIR: &str = "/tmp";
const DEFAULT_REGION: &str = "ap-south-1";
const IMAGE_MAX_FILE_SIZE_BYTES: usize = 10 * 1000 * 1000;
const FILE_MAX_FILE_SIZE_BYTES: usize = 20 * 1000 * 1000;
const DEFAULT_RESIZE_WIDTH: u32 = 400;

/// How error responses pick their HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorStatusMode {
    /// Every failure is answered with 422 Unprocessable Entity.
    #[default]
    Compat,
    /// Each error reports its own status (4xx for client faults, 5xx otherwise).
    Semantic,
}

impl FromStr for ErrorStatusMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compat" => Ok(ErrorStatusMode::Compat),
            "semantic" => Ok(ErrorStatusMode::Semantic),
            _ => Err(anyhow::anyhow!("Invalid error status mode: {}", s)),
        }
    }
}

impl Display for ErrorStatusMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ErrorStatusMode::Compat => write!(f, "compat"),
            ErrorStatusMode::Semantic => write!(f, "semantic"),
        }
    }
}

/// Size ceilings and resize defaults for the two upload pipelines
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadLimits {
    pub image_max_file_size: usize,
    pub file_max_file_size: usize,
    pub default_resize_width: u32,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            image_max_file_size: IMAGE_MAX_FILE_SIZE_BYTES,
            file_max_file_size: FILE_MAX_FILE_SIZE_BYTES,
            default_resize_width: DEFAULT_RESIZE_WIDTH,
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub scratch_dir: String,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub limits: UploadLimits,
    pub error_status_mode: ErrorStatusMode,
}

impl Config {
    /// Load configuration from the process environment (and `.env` when present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|s| !s.trim().is_empty());
        let first = |keys: &[&str]| keys.iter().find_map(|k| var(k));

        let storage_backend = match var("STORAGE_BACKEND") {
            Some(s) => s.parse()?,
            None => StorageBackend::S3,
        };
        let error_status_mode = match var("ERROR_STATUS_MODE") {
            Some(s) => s.parse()?,
            None => ErrorStatusMode::default(),
        };

        let config = Config {
            server_port: var("SERVER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(SERVER_PORT),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            scratch_dir: var("SCRATCH_DIR").unwrap_or_else(|| SCRATCH_DIR.to_string()),
            storage_backend,
            s3_bucket: first(&["AWS_BUCKET_NAME", "S3_BUCKET"]),
            s3_region: first(&["AWS_REGION", "S3_REGION"])
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            s3_endpoint: var("S3_ENDPOINT"),
            aws_access_key_id: var("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: first(&["AWS_ACCESS_KEY_SECRET", "AWS_SECRET_ACCESS_KEY"]),
            local_storage_path: var("LOCAL_STORAGE_PATH"),
            local_storage_base_url: var("LOCAL_STORAGE_BASE_URL"),
            limits: UploadLimits {
                image_max_file_size: var("IMAGE_MAX_FILE_SIZE_BYTES")
                    .map(|s| s.parse())
                    .transpose()
                    .map_err(|e| anyhow::anyhow!("IMAGE_MAX_FILE_SIZE_BYTES: {}", e))?
                    .unwrap_or(IMAGE_MAX_FILE_SIZE_BYTES),
                file_max_file_size: var("FILE_MAX_FILE_SIZE_BYTES")
                    .map(|s| s.parse())
                    .transpose()
                    .map_err(|e| anyhow::anyhow!("FILE_MAX_FILE_SIZE_BYTES: {}", e))?
                    .unwrap_or(FILE_MAX_FILE_SIZE_BYTES),
                default_resize_width: var("DEFAULT_RESIZE_WIDTH")
                    .map(|s| s.parse())
                    .transpose()
                    .map_err(|e| anyhow::anyhow!("DEFAULT_RESIZE_WIDTH: {}", e))?
                    .unwrap_or(DEFAULT_RESIZE_WIDTH),
            },
            error_status_mode,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject structurally impossible values.
    ///
    /// Storage credentials are deliberately not required here: a relay with
    /// no bucket still starts and reports the problem on each upload.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("SERVER_PORT cannot be 0"));
        }

        if self.limits.image_max_file_size == 0 {
            return Err(anyhow::anyhow!("IMAGE_MAX_FILE_SIZE_BYTES cannot be 0"));
        }

        if self.limits.file_max_file_size == 0 {
            return Err(anyhow::anyhow!("FILE_MAX_FILE_SIZE_BYTES cannot be 0"));
        }

        if self.limits.default_resize_width == 0 {
            return Err(anyhow::anyhow!("DEFAULT_RESIZE_WIDTH cannot be 0"));
        }

        if self.scratch_dir.is_empty() {
            return Err(anyhow::anyhow!("SCRATCH_DIR cannot be empty"));
        }

        Ok(())
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    /// Names of storage settings that are missing for the selected backend.
    pub fn missing_storage_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    missing.push("AWS_BUCKET_NAME");
                }
                if self.aws_access_key_id.is_none() {
                    missing.push("AWS_ACCESS_KEY_ID");
                }
                if self.aws_secret_access_key.is_none() {
                    missing.push("AWS_ACCESS_KEY_SECRET");
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    missing.push("LOCAL_STORAGE_PATH");
                }
                if self.local_storage_base_url.is_none() {
                    missing.push("LOCAL_STORAGE_BASE_URL");
                }
            }
        }
        missing
    }
}
