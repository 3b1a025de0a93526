pub mod compose_tiles;
pub mod plan_tiles;
pub mod ports;
