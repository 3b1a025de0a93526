//! Port definitions for the interactive controller.

pub mod display;

pub use display::{DisplayError, DisplayPort};
