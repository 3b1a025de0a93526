//! Batch generation of a single large image.

pub mod config;
pub mod controller;
pub mod ports;

pub use config::{BatchConfig, RenderMode};
pub use controller::{BatchError, BatchErrorKind, BatchRenderController, BatchReport};
pub use ports::{ImageWriteError, ImageWriter};
