use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rastrum::depth::depth_sort;
use rastrum::math::vec3::Vec3;
use rastrum::math::vec5::Vec5;
use rastrum::render::{FrameBuffer, Rasterizer, ScanlineRasterizer, ScreenTriangle, TextureMapper};
use rastrum::{Engine, Mesh, RenderConfig, RenderMode, Texture};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;
const STRIDE: usize = BUFFER_WIDTH as usize * 4;

fn create_buffer() -> Vec<u8> {
    vec![0u8; STRIDE * BUFFER_HEIGHT as usize]
}

fn triangle(points: [(f32, f32, f32); 3]) -> ScreenTriangle {
    let uv = [(0.0, 0.0), (1.0, 0.0), (0.5, 1.0)];
    ScreenTriangle::new(
        [0, 1, 2].map(|i| {
            let (x, y, z) = points[i];
            Vec5::new(x, y, z, uv[i].0, uv[i].1)
        }),
        0xFFFF0000,
    )
}

fn small_triangle() -> ScreenTriangle {
    triangle([(100.0, 100.0, 5.0), (120.0, 100.0, 6.0), (110.0, 120.0, 7.0)])
}

fn medium_triangle() -> ScreenTriangle {
    triangle([(100.0, 100.0, 5.0), (300.0, 100.0, 6.0), (200.0, 300.0, 7.0)])
}

fn large_triangle() -> ScreenTriangle {
    triangle([(50.0, 50.0, 5.0), (750.0, 100.0, 9.0), (400.0, 550.0, 7.0)])
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    let texture = Texture::checkerboard(64, 64, 0xFFFFFFFF, 0xFF000000);
    let scanline = ScanlineRasterizer::new();
    let mapper = TextureMapper::new(&texture);

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("flat", name), &triangle, |b, tri| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT, STRIDE).unwrap();
                scanline.fill_triangle(black_box(tri), &mut fb).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("textured", name), &triangle, |b, tri| {
            let mut buffer = create_buffer();
            b.iter(|| {
                let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT, STRIDE).unwrap();
                mapper.fill_triangle(black_box(tri), &mut fb).unwrap();
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    let texture = Texture::checkerboard(64, 64, 0xFFFFFFFF, 0xFF000000);
    let scanline = ScanlineRasterizer::new();
    let mapper = TextureMapper::new(&texture);

    // Generate a grid of small triangles
    let triangles: Vec<ScreenTriangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y, 5.0), (x + 35.0, y, 6.0), (x + 17.5, y + 25.0, 7.0)])
            })
        })
        .collect();

    group.bench_function("flat_400_triangles", |b| {
        let mut buffer = create_buffer();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT, STRIDE).unwrap();
            for tri in &triangles {
                scanline.fill_triangle(black_box(tri), &mut fb).unwrap();
            }
        });
    });

    group.bench_function("textured_400_triangles", |b| {
        let mut buffer = create_buffer();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT, STRIDE).unwrap();
            for tri in &triangles {
                mapper.fill_triangle(black_box(tri), &mut fb).unwrap();
            }
        });
    });

    group.finish();
}

fn benchmark_depth_sort(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<f32> = (0..10_000).map(|_| rng.gen_range(-100.0..100.0)).collect();

    c.bench_function("depth_sort_10k", |b| {
        b.iter(|| {
            let mut items = keys.clone();
            depth_sort(black_box(&mut items), |&k| k);
        });
    });
}

fn benchmark_cube_frame(c: &mut Criterion) {
    let texture = Texture::checkerboard(64, 64, 0xFFFFFFFF, 0xFF000000);
    let mut engine = Engine::new(RenderConfig::default());
    engine.set_render_mode(RenderMode::Textured);
    let mut mesh = Mesh::cube();

    c.bench_function("cube_frame", |b| {
        let mut buffer = create_buffer();
        b.iter(|| {
            let mut fb = FrameBuffer::new(&mut buffer, BUFFER_WIDTH, BUFFER_HEIGHT, STRIDE).unwrap();
            engine.render_frame(&mut mesh, &texture, Vec3::new(0.01, 0.01, 0.01), &mut fb)
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_triangle,
    benchmark_many_triangles,
    benchmark_depth_sort,
    benchmark_cube_frame
);
criterion_main!(benches);
