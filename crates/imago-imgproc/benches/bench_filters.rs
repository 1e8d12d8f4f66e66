use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use imago_image::Image;
use imago_imgproc::filter::{
    correlate2d_with_strategy, kernels, separable_filter_with_strategy, BorderMode,
};
use imago_imgproc::parallel::ExecutionStrategy;

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian Blur");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for kernel_size in [3, 5, 9].iter() {
            group.throughput(criterion::Throughput::Elements(
                (*width * *height * *kernel_size) as u64,
            ));

            let parameter_string = format!("{}x{}x{}", width, height, kernel_size);

            let image_data = vec![0f32; width * height * 3];
            let image_size = [*width, *height].into();

            let image_f32 = Image::<_, 3>::new(image_size, image_data).unwrap();
            let output_f32 = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();

            let kernel_1d = kernels::gaussian_kernel_1d(*kernel_size, 1.5);
            let kernel_2d = kernels::gaussian_kernel_2d(*kernel_size, 1.5).unwrap();

            group.bench_with_input(
                BenchmarkId::new("correlate2d_serial", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(correlate2d_with_strategy(
                            src,
                            &mut dst,
                            &kernel_2d,
                            BorderMode::Reflect,
                            ExecutionStrategy::Serial,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("correlate2d_parallel", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(correlate2d_with_strategy(
                            src,
                            &mut dst,
                            &kernel_2d,
                            BorderMode::Reflect,
                            ExecutionStrategy::Parallel,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("separable_serial", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(separable_filter_with_strategy(
                            src,
                            &mut dst,
                            &kernel_1d,
                            &kernel_1d,
                            BorderMode::Reflect,
                            ExecutionStrategy::Serial,
                        ))
                    })
                },
            );

            group.bench_with_input(
                BenchmarkId::new("separable_parallel", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| {
                        black_box(separable_filter_with_strategy(
                            src,
                            &mut dst,
                            &kernel_1d,
                            &kernel_1d,
                            BorderMode::Reflect,
                            ExecutionStrategy::Parallel,
                        ))
                    })
                },
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
