use image::RgbImage;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ImageWriteError {
    #[error("unsupported output format for {0} (expected .png, .ppm or .pnm)")]
    UnsupportedFormat(PathBuf),
    #[error("failed to encode {path}: {message}")]
    Encode { path: PathBuf, message: String },
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Persists a finished RGB image.
pub trait ImageWriter {
    /// Rejects paths the writer could not encode to, before any work is done.
    fn check(&self, path: &Path) -> Result<(), ImageWriteError>;

    fn write(&self, image: &RgbImage, path: &Path) -> Result<(), ImageWriteError>;
}
