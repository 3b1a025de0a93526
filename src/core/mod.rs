pub mod actions;
pub mod data;
pub mod navigation;
pub mod util;
