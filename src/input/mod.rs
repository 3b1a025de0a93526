//! Input adapters for the fractal viewer.
//!
//! Window events are translated into `InputEvent`s for the interactive session.

#[cfg(feature = "gui")]
pub mod gui;
