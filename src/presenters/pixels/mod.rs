pub mod presenter;

pub use presenter::{PixelsDisplay, PixelsDisplayError};
