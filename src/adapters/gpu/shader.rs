use crate::adapters::gpu::context::GpuError;
use std::fs;
use std::path::Path;

/// Uniform block, vertex stage and `VertexOutput`, shared by every fragment stage.
const PRELUDE: &str = include_str!("shaders/prelude.wgsl");
const MANDELBROT: &str = include_str!("shaders/mandelbrot.wgsl");

/// A WGSL fragment stage defining `fs_main(in: VertexOutput) -> @location(0) vec4<f32>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentShader {
    label: String,
    source: String,
}

impl FragmentShader {
    #[must_use]
    pub fn mandelbrot() -> Self {
        Self {
            label: "mandelbrot".to_string(),
            source: MANDELBROT.to_string(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, GpuError> {
        let source = fs::read_to_string(path).map_err(|source| GpuError::ShaderFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            label: path.display().to_string(),
            source,
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The complete module handed to the device.
    #[must_use]
    pub fn module_source(&self) -> String {
        format!("{PRELUDE}\n{}", self.source)
    }
}

impl Default for FragmentShader {
    fn default() -> Self {
        Self::mandelbrot()
    }
}
