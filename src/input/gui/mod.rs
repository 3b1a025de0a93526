//! Windowed viewer: winit for the window and input, pixels for the surface,
//! egui for the debug panel.

mod app;
pub mod config;
mod keymap;
mod overlay;

pub use app::{ViewerError, run_viewer};
pub use config::ViewerConfig;
