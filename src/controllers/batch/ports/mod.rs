pub mod image_writer;

pub use image_writer::{ImageWriteError, ImageWriter};
