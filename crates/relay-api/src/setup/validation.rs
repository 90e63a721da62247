//! Configuration validation
//!
//! Validates configuration at startup. Only values that make the relay
//! unusable are fatal; anything else is reported as a warning.

use anyhow::Result;
use relay_core::{Config, StorageBackend};
use std::path::Path;

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if !Path::new(&config.scratch_dir).is_dir() {
        tracing::warn!(
            scratch_dir = %config.scratch_dir,
            "SCRATCH_DIR does not exist or is not a directory - uploads will fail"
        );
    }

    if config.limits.image_max_file_size > config.limits.file_max_file_size {
        tracing::warn!(
            image_max_bytes = config.limits.image_max_file_size,
            file_max_bytes = config.limits.file_max_file_size,
            "Image ceiling is larger than the generic file ceiling"
        );
    }

    if config.is_production() && config.storage_backend == StorageBackend::Local {
        tracing::warn!("Local storage backend selected in production");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_width_is_fatal() {
        let mut config = Config::from_lookup(|_| None).unwrap();
        config.limits.default_resize_width = 0;
        assert!(validate_config(&config).is_err());
    }
}
