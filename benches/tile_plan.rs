use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fractal_tiler::core::data::rendered_image::{RenderedImage, RowOrder};
use fractal_tiler::{
    CameraState, RenderSurface, Resolution, SurfaceError, TileGrid, TileMapping, compose_tiles,
};

/// Returns a flat grey tile so only planning and stitching are measured.
struct FlatSurface;

impl RenderSurface for FlatSurface {
    fn max_dimension(&self) -> u32 {
        u32::MAX
    }

    fn render(
        &mut self,
        _camera: &CameraState,
        resolution: Resolution,
    ) -> Result<RenderedImage, SurfaceError> {
        let data = vec![128; resolution.pixel_count() as usize * 3];
        Ok(RenderedImage::from_rgb(resolution, RowOrder::BottomUp, data)?)
    }
}

fn plan_benchmark(c: &mut Criterion) {
    let camera = CameraState::default();
    let output = Resolution::square(8000).unwrap();

    let mut group = c.benchmark_group("plan");
    for tile_bound in [2000, 500, 100] {
        let grid = TileGrid::new(output, tile_bound).unwrap();
        group.throughput(Throughput::Elements(grid.tile_count()));
        group.bench_function(BenchmarkId::new("8000x8000", tile_bound), |b| {
            b.iter(|| {
                for planned in grid.plan(black_box(&camera), TileMapping::SourceCompatible) {
                    black_box(planned.unwrap());
                }
            });
        });
    }
    group.finish();
}

fn compose_benchmark(c: &mut Criterion) {
    let camera = CameraState::default();
    let output = Resolution::new(2048, 1536).unwrap();

    let mut group = c.benchmark_group("compose");
    group.throughput(Throughput::Elements(output.pixel_count()));
    for tile_bound in [1024, 256] {
        let grid = TileGrid::new(output, tile_bound).unwrap();
        group.bench_function(BenchmarkId::new("2048x1536", tile_bound), |b| {
            b.iter(|| {
                let image = compose_tiles(
                    &mut FlatSurface,
                    &camera,
                    &grid,
                    TileMapping::SourceCompatible,
                    |_| {},
                )
                .unwrap();
                black_box(image);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, plan_benchmark, compose_benchmark);
criterion_main!(benches);
