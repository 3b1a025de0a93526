pub mod camera;
pub mod coord;
pub mod rendered_image;
pub mod resolution;
pub mod tile;
