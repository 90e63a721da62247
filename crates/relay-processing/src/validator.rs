use crate::extension::{file_extension, raw_suffix, ImageExtension};

/// Intake validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file type: {extension} (allowed: {})", ImageExtension::ACCEPTED.join(", "))]
    InvalidFileType { extension: String },
}

/// Which filenames a pipeline accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionPolicy {
    /// png, jpg and jpeg only; jpeg is rewritten to jpg
    Images,
    /// Anything; the suffix is only sanitized
    Any,
}

/// Intake validator for one upload pipeline
///
/// Both checks are pure so the intake can run the extension check before a
/// single byte is staged and the size check on every received chunk.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    max_file_size: usize,
    policy: ExtensionPolicy,
}

impl UploadValidator {
    pub fn new(max_file_size: usize, policy: ExtensionPolicy) -> Self {
        Self {
            max_file_size,
            policy,
        }
    }

    /// Validator for the image pipeline
    pub fn images(max_file_size: usize) -> Self {
        Self::new(max_file_size, ExtensionPolicy::Images)
    }

    /// Validator for the generic file pipeline
    pub fn any_file(max_file_size: usize) -> Self {
        Self::new(max_file_size, ExtensionPolicy::Any)
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Validate file size; exactly `max_file_size` bytes is accepted
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Normalized extension for `filename` under this validator's policy
    pub fn extension_for(&self, filename: &str) -> Result<String, ValidationError> {
        match self.policy {
            ExtensionPolicy::Images => {
                let suffix = raw_suffix(filename).unwrap_or_default();
                ImageExtension::from_suffix(&suffix)
                    .map(|ext| ext.as_str().to_string())
                    .ok_or(ValidationError::InvalidFileType { extension: suffix })
            }
            ExtensionPolicy::Any => Ok(file_extension(filename)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_extensions_normalize() {
        let validator = UploadValidator::images(10);
        assert_eq!(validator.extension_for("a.png").unwrap(), "png");
        assert_eq!(validator.extension_for("a.JPG").unwrap(), "jpg");
        assert_eq!(validator.extension_for("a.jpeg").unwrap(), "jpg");
    }

    #[test]
    fn test_image_extensions_reject_others() {
        let validator = UploadValidator::images(10);
        for name in ["anim.gif", "doc.pdf", "noext", "image.png.exe"] {
            assert!(
                matches!(
                    validator.extension_for(name),
                    Err(ValidationError::InvalidFileType { .. })
                ),
                "{} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_invalid_type_lists_accepted_extensions() {
        let err = UploadValidator::images(10)
            .extension_for("anim.gif")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid file type: gif (allowed: png, jpg, jpeg)"
        );
    }

    #[test]
    fn test_any_policy_accepts_everything() {
        let validator = UploadValidator::any_file(10);
        assert_eq!(validator.extension_for("movie.MKV").unwrap(), "mkv");
        assert_eq!(validator.extension_for("Makefile").unwrap(), "bin");
    }

    #[test]
    fn test_size_boundary() {
        let validator = UploadValidator::images(10_000_000);
        assert!(validator.validate_file_size(10_000_000).is_ok());
        assert!(matches!(
            validator.validate_file_size(10_000_001),
            Err(ValidationError::FileTooLarge {
                size: 10_000_001,
                max: 10_000_000
            })
        ));
    }

    #[test]
    fn test_empty_file_is_within_limits() {
        assert!(UploadValidator::any_file(1).validate_file_size(0).is_ok());
    }
}
