pub mod pixel_to_fractal_coords;
