pub mod render_surface;
