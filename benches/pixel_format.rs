use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use fractal_tiler::adapters::pixel_format::{padded_rgba_row_len, strip_padded_rgba};

const ROW_ALIGNMENT: u32 = 256;

fn strip_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("strip_padded_rgba");
    for (width, height) in [(1000, 600), (2000, 2000), (4001, 4001)] {
        let padded_row_len = padded_rgba_row_len(width, ROW_ALIGNMENT);
        let src = vec![7u8; padded_row_len * height as usize];

        group.throughput(Throughput::Bytes(src.len() as u64));
        group.bench_function(BenchmarkId::from_parameter(format!("{width}x{height}")), |b| {
            b.iter(|| black_box(strip_padded_rgba(black_box(&src), width, height, padded_row_len)));
        });
    }
    group.finish();
}

criterion_group!(benches, strip_benchmark);
criterion_main!(benches);
