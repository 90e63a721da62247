//! Normalized file extensions.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Extension used when a filename carries no usable suffix.
pub const FALLBACK_EXTENSION: &str = "bin";

const MAX_EXTENSION_LEN: usize = 16;

/// Image types accepted by the image pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExtension {
    Png,
    Jpg,
}

impl ImageExtension {
    /// Every accepted spelling, in the order reported to clients
    pub const ACCEPTED: [&'static str; 3] = ["png", "jpg", "jpeg"];

    /// Map a lower-cased suffix to an accepted image type; `jpeg` collapses to `jpg`.
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "png" => Some(ImageExtension::Png),
            "jpg" | "jpeg" => Some(ImageExtension::Jpg),
            _ => None,
        }
    }

    /// Normalized extension used in generated names
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageExtension::Png => "png",
            ImageExtension::Jpg => "jpg",
        }
    }
}

impl Display for ImageExtension {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Lower-cased text after the last `.` of `filename`, if any.
pub fn raw_suffix(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, suffix)| suffix.to_lowercase())
}

/// Extension for an arbitrary upload.
///
/// The suffix is lower-cased and reduced to ASCII alphanumerics so it can be
/// embedded in scratch paths and storage keys as-is.
pub fn file_extension(filename: &str) -> String {
    let cleaned: String = raw_suffix(filename)
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(MAX_EXTENSION_LEN)
        .collect();

    if cleaned.is_empty() {
        FALLBACK_EXTENSION.to_string()
    } else {
        cleaned
    }
}
