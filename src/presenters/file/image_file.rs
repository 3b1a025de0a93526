use crate::controllers::batch::ports::image_writer::{ImageWriteError, ImageWriter};
use image::codecs::png::PngEncoder;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageEncoder, ImageError, RgbImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    /// Binary PPM (P6).
    Ppm,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self, ImageWriteError> {
        let extension = path
            .extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("ppm" | "pnm") => Ok(Self::Ppm),
            _ => Err(ImageWriteError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Writes lossless RGB files. The image is encoded next to the target and
/// renamed into place, so the target is either the old file or the full new one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageFileWriter;

impl ImageFileWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ImageWriter for ImageFileWriter {
    fn check(&self, path: &Path) -> Result<(), ImageWriteError> {
        OutputFormat::from_path(path).map(|_| ())
    }

    fn write(&self, image: &RgbImage, path: &Path) -> Result<(), ImageWriteError> {
        let format = OutputFormat::from_path(path)?;

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
        }

        let partial = partial_path(path);
        debug!(partial = %partial.display(), ?format, "encoding image");

        let result = encode_to(&partial, image, format)
            .and_then(|()| fs::rename(&partial, path).map_err(|source| io_error(path, source)));

        if result.is_err() {
            let _ = fs::remove_file(&partial);
        }

        result
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    path.with_file_name(format!(".{name}.partial"))
}

fn encode_to(path: &Path, image: &RgbImage, format: OutputFormat) -> Result<(), ImageWriteError> {
    let file = File::create(path).map_err(|source| io_error(path, source))?;
    let mut writer = BufWriter::new(file);
    let (width, height) = image.dimensions();

    let encoded = match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut writer).write_image(image.as_raw(), width, height, ColorType::Rgb8)
        }
        OutputFormat::Ppm => PnmEncoder::new(&mut writer)
            .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Binary))
            .write_image(image.as_raw(), width, height, ColorType::Rgb8),
    };

    encoded.map_err(|error| match error {
        ImageError::IoError(source) => io_error(path, source),
        other => ImageWriteError::Encode {
            path: path.to_path_buf(),
            message: other.to_string(),
        },
    })?;

    let file = writer
        .into_inner()
        .map_err(|error| io_error(path, error.into_error()))?;
    file.sync_all().map_err(|source| io_error(path, source))?;

    Ok(())
}

fn io_error(path: &Path, source: std::io::Error) -> ImageWriteError {
    ImageWriteError::Io {
        path: path.to_path_buf(),
        source,
    }
}
