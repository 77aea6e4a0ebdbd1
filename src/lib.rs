use image::{ImageBuffer, Pixel};

pub mod band;
pub mod error;
pub mod line;
pub mod mask;
pub mod rect;
pub mod sorting;
pub mod sweep;

pub use self::band::SelectionRange;
pub use self::error::SortError;
pub use self::mask::Mask;
pub use self::sorting::{Criterion, PRECISION};
pub use self::sweep::{sort, sort_buffer, Scratch, SortOptions, SweepStats};

/// Sorts the pixels of `image` along lines at `options.angle`, returning the
/// sorted copy.
pub fn sort_image<P>(
    image: &ImageBuffer<P, Vec<u8>>,
    options: &SortOptions,
    mask: Option<&Mask>,
) -> Result<ImageBuffer<P, Vec<u8>>, SortError>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    let (width, height) = image.dimensions();
    // allocate buffers outside of the sweep to prevent per line reallocations
    let input: Vec<P> = image.pixels().copied().collect();
    let mut output = input.clone();
    let mut scratch = Scratch::new()?;
    sort_buffer(&input, &mut output, width, height, options, mask, &mut scratch)?;

    let mut sorted = image.clone();
    for (dst, src) in sorted.pixels_mut().zip(output) {
        *dst = src;
    }
    Ok(sorted)
}
