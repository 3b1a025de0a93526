pub mod gpu;
pub mod pixel_format;
