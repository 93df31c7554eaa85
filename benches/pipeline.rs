//! Benchmarks for the pxtile generators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pxtile::types::{Colour, PixelBuffer};
use pxtile::{
    batch_resize_tilemap, dither_blend, extract_palette, generate_autotile47_set, palette_swap,
    resize_tile, Direction, DitherMatrix, Palette, ResizeMethod,
};

/// A checkered tile with a handful of shades so the kernels have edges to work on.
fn sample_tile(size: usize) -> PixelBuffer {
    PixelBuffer::from_fn(size, size, |x, y| {
        let shade = ((x * 7 + y * 13) % 5) as u8;
        if (x / 2 + y / 2) % 2 == 0 {
            Colour::rgb(60 + shade * 10, 140, 50)
        } else {
            Colour::rgb(40, 90 + shade * 8, 180)
        }
    })
    .unwrap()
}

// -- Upscaling benchmarks --

fn bench_upscaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("upscaling");
    let tile = sample_tile(16);

    for method in [ResizeMethod::Nearest, ResizeMethod::Scale2x, ResizeMethod::Scale3x] {
        group.bench_with_input(BenchmarkId::new("resize_16_to_64", method), &method, |b, &m| {
            b.iter(|| resize_tile(black_box(&tile), 64, m).unwrap())
        });
    }

    let sheet = sample_tile(128);
    group.bench_function("batch_resize_8x8_sheet", |b| {
        b.iter(|| batch_resize_tilemap(black_box(&sheet), 16, 32, 0, ResizeMethod::Scale2x).unwrap())
    });

    group.finish();
}

// -- Dithering benchmarks --

fn bench_dithering(c: &mut Criterion) {
    let mut group = c.benchmark_group("dithering");
    let a = sample_tile(32);
    let b_tile = PixelBuffer::filled(32, 32, Colour::rgb(216, 192, 128)).unwrap();

    for direction in [Direction::Left, Direction::Diagonal, Direction::Radial] {
        group.bench_with_input(BenchmarkId::new("blend_32", direction), &direction, |b, &d| {
            b.iter(|| dither_blend(black_box(&a), black_box(&b_tile), d, DitherMatrix::Bayer4).unwrap())
        });
    }

    group.finish();
}

// -- Palette benchmarks --

fn bench_palette(c: &mut Criterion) {
    let mut group = c.benchmark_group("palette");
    let tile = sample_tile(64);
    let source = extract_palette(&tile, 16, 50);
    let target: Palette = source
        .iter()
        .map(|[r, g, b]| Colour::rgb(r, g, b).shift_hsv(120.0, 0.0, 0.0).to_rgb())
        .collect();

    group.bench_function("extract_64", |b| {
        b.iter(|| extract_palette(black_box(&tile), 16, 50))
    });

    group.bench_function("swap_64", |b| {
        b.iter(|| palette_swap(black_box(&tile), &source, &target, 24).unwrap())
    });

    group.finish();
}

// -- Autotile benchmarks --

fn bench_autotile(c: &mut Criterion) {
    let center = sample_tile(16);
    let background = PixelBuffer::filled(16, 16, Colour::rgb(40, 88, 184)).unwrap();

    c.bench_function("autotile47_set_16", |b| {
        b.iter(|| generate_autotile47_set(black_box(&center), &background, DitherMatrix::Bayer4).unwrap())
    });
}

criterion_group!(benches, bench_upscaling, bench_dithering, bench_palette, bench_autotile);
criterion_main!(benches);
