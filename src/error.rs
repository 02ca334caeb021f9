//! Error types for the preview

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the fallible constructors of the preview.
///
/// None of these ever reach the per-frame path: every caller inside the
/// crate maps them onto a visual fallback and logs a warning instead.
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to load texture '{}': {source}", .path.display())]
    TextureLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to decode texture '{name}': {source}")]
    TextureDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
    #[error("Unknown garment type '{0}'")]
    UnknownGarment(String),
}

pub type PreviewResult<T> = Result<T, PreviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PreviewError::InvalidColor("#zz".to_string());
        assert_eq!(err.to_string(), "Invalid color '#zz'");

        let err = PreviewError::UnknownGarment("hoodie".to_string());
        assert_eq!(err.to_string(), "Unknown garment type 'hoodie'");
    }
}
