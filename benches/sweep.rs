use criterion::{black_box, criterion_group, criterion_main, Criterion as Bench};
use image::Rgb;
use pixelsort::{sort_buffer, Criterion, Scratch, SelectionRange, SortOptions};

fn gradient(width: u32, height: u32) -> Vec<Rgb<u8>> {
    (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                Rgb([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8])
            })
        })
        .collect()
}

fn bench_sweep(c: &mut Bench) {
    let (width, height) = (512, 384);
    let input = gradient(width, height);
    let mut output = input.clone();
    let mut scratch = Scratch::new().unwrap();

    for &angle in [0.0, 90.0, 33.0].iter() {
        let options = SortOptions {
            criterion: Criterion::Lightness,
            selection: SelectionRange::from_percent(20.0, 80.0),
            angle,
            reverse: false,
        };
        c.bench_function(&format!("sort_buffer 512x384 at {}", angle), |b| {
            b.iter(|| {
                sort_buffer(
                    black_box(&input),
                    &mut output,
                    width,
                    height,
                    &options,
                    None,
                    &mut scratch,
                )
                .unwrap()
            })
        });
    }
}

criterion_group!(benches, bench_sweep);
criterion_main!(benches);
