#![allow(dead_code)]

use image::{Rgb, Rgba};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Gray pixels with the given channel values.
pub fn gray_row(values: &[u8]) -> Vec<Rgb<u8>> {
    values.iter().map(|&v| Rgb([v, v, v])).collect()
}

/// Pixels whose color encodes their own index, so every pixel is unique.
///
/// The red channel holds `value_of(index)`, the value the pixel sorts by under
/// `Criterion::Red`.
pub fn tagged(width: u32, height: u32, mut value_of: impl FnMut(usize) -> u8) -> Vec<Rgba<u8>> {
    (0..(width * height) as usize)
        .map(|i| {
            assert!(i < 1 << 16, "too many pixels to tag");
            Rgba([value_of(i), (i >> 8) as u8, i as u8, 255])
        })
        .collect()
}

/// Index a tagged pixel was created at.
pub fn tag_of(pixel: &Rgba<u8>) -> usize {
    (usize::from(pixel.0[1]) << 8) | usize::from(pixel.0[2])
}

/// Random RGB noise from a fixed seed.
pub fn noise(width: u32, height: u32, seed: u64) -> Vec<Rgb<u8>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|_| Rgb([rng.gen(), rng.gen(), rng.gen()]))
        .collect()
}
