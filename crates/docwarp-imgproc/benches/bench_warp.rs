use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use docwarp_geometry::{canonical_rectangle, homography_4pt2d, Point2};
use docwarp_image::Image;
use docwarp_imgproc::{interpolation::InterpolationMode, warp::warp_perspective};

fn bench_warp_perspective(c: &mut Criterion) {
    let mut group = c.benchmark_group("WarpPerspective");

    for (width, height) in [(320, 480), (640, 480), (1280, 960)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let data = (0..width * height).map(|i| (i % 256) as u8).collect();
        let image = Image::<u8, 1>::new(image_size, data).unwrap();

        // output page
        let output = Image::<u8, 1>::from_size_val([320, 480].into(), 0).unwrap();

        let (w, h) = (*width as f64, *height as f64);
        let corners = [
            Point2::new(0.08 * w, 0.1 * h),
            Point2::new(0.85 * w, 0.12 * h),
            Point2::new(0.93 * w, 0.9 * h),
            Point2::new(0.06 * w, 0.88 * h),
        ];
        let m = homography_4pt2d(&corners, &canonical_rectangle(320.0, 480.0)).unwrap();

        for mode in [InterpolationMode::Nearest, InterpolationMode::Bilinear] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", mode), &parameter_string),
                &(&image, &output, m),
                |b, i| {
                    let (src, mut dst, m) = (i.0.clone(), i.1.clone(), i.2);
                    b.iter(|| {
                        warp_perspective(
                            black_box(&src),
                            black_box(&mut dst),
                            black_box(&m),
                            black_box(mode),
                        )
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_warp_perspective);
criterion_main!(benches);
