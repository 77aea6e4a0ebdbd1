//! Sweeping parallel lines across the whole image.

use std::ops::Range;

use image::Pixel;
use log::debug;

use crate::band::{sort_band, BandScanner, CountTable, LineBuffers, SelectionRange};
use crate::error::SortError;
use crate::line::{Axis, Point};
use crate::mask::Mask;
use crate::rect::LineTemplate;
use crate::sorting::Criterion;

/// What to sort by, which pixels, and along which direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SortOptions {
    pub criterion: Criterion,
    pub selection: SelectionRange,
    /// Degrees counter-clockwise from the positive x axis, y growing with the
    /// row index of the buffer.
    pub angle: f64,
    /// Sort bands in descending order.
    pub reverse: bool,
}

impl Default for SortOptions {
    fn default() -> Self {
        SortOptions {
            criterion: Criterion::default(),
            selection: SelectionRange::FULL,
            angle: 0.0,
            reverse: false,
        }
    }
}

/// Buffers reused across lines and across calls.
#[derive(Clone, Debug)]
pub struct Scratch {
    line: LineBuffers,
    counts: CountTable,
}

impl Scratch {
    pub fn new() -> Result<Self, SortError> {
        Ok(Scratch {
            line: LineBuffers::default(),
            counts: CountTable::new()?,
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub lines: usize,
    pub bands: usize,
    pub sorted_pixels: usize,
}

/// Placement of the template for every line of a sweep.
///
/// Lines are translated along the template's minor axis. The template holds
/// exactly one point per major coordinate, so a pixel `p` lies on the line
/// with minor origin `p.minor - t.minor` where `t` is the unique template
/// point with `origin.major + t.major == p.major`. Every pixel therefore
/// belongs to exactly one line of `range`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SweepPlan {
    pub minor_axis: Axis,
    pub major_origin: i32,
    pub range: Range<i32>,
}

impl SweepPlan {
    pub fn new(template: &LineTemplate, width: u32, height: u32) -> Self {
        let major_axis = template.major_axis();
        let minor_axis = major_axis.other();
        let extent = |axis| match axis {
            Axis::X => width as i32,
            Axis::Y => height as i32,
        };

        let major_delta = template.delta().along(major_axis);
        debug_assert!(major_delta.abs() >= extent(major_axis) - 1);
        let major_origin = if major_delta >= 0 {
            0
        } else {
            extent(major_axis) - 1
        };

        let (low, high) = template.minor_span();
        SweepPlan {
            minor_axis,
            major_origin,
            range: -high..extent(minor_axis) - low,
        }
    }

    pub fn origin(&self, l: i32) -> Point {
        let mut origin = Point::ORIGIN;
        *origin.along_mut(self.minor_axis) = l;
        *origin.along_mut(self.minor_axis.other()) = self.major_origin;
        origin
    }

    pub fn origins(&self) -> impl Iterator<Item = Point> + '_ {
        self.range.clone().map(move |l| self.origin(l))
    }
}

/// Sorts `input` into `output`, both row-major `width` x `height` buffers.
///
/// Every pixel of `output` is written exactly once. Nothing is written if an
/// error is returned.
pub fn sort_buffer<P>(
    input: &[P],
    output: &mut [P],
    width: u32,
    height: u32,
    options: &SortOptions,
    mask: Option<&Mask>,
    scratch: &mut Scratch,
) -> Result<SweepStats, SortError>
where
    P: Pixel<Subpixel = u8>,
{
    let expected = width as usize * height as usize;
    for actual in [input.len(), output.len()].iter().copied() {
        if actual != expected {
            return Err(SortError::BufferSize { expected, actual });
        }
    }
    if let Some(mask) = mask {
        if mask.dimensions() != (width, height) {
            return Err(SortError::MaskSize {
                expected: (width, height),
                actual: mask.dimensions(),
            });
        }
    }

    let template = LineTemplate::for_rect(options.angle, width, height)?;
    let mut stats = SweepStats::default();
    if expected == 0 {
        return Ok(stats);
    }
    scratch.line.reserve(template.len())?;

    let plan = SweepPlan::new(&template, width, height);
    debug!(
        "sort_buffer {}x{} criterion={} selection={:?} plan={:?}",
        width, height, options.criterion, options.selection, plan
    );

    let scanner = BandScanner::new(input, width, height, options.criterion, options.selection)
        .with_mask(mask);
    let Scratch { line, counts } = scratch;
    for origin in plan.origins() {
        scanner.scan(template.points(), origin, output, line);
        for band in line.bands.iter().cloned() {
            stats.sorted_pixels += band.len();
            sort_band(
                input,
                output,
                &line.pixel_indices[band.clone()],
                &line.values[band],
                counts,
                options.reverse,
            );
        }
        stats.lines += 1;
        stats.bands += line.bands.len();
    }

    debug!("sort_buffer done: {:?}", stats);
    Ok(stats)
}

/// Convenience wrapper of [`sort_buffer`] allocating the output and scratch.
pub fn sort<P>(
    input: &[P],
    width: u32,
    height: u32,
    options: &SortOptions,
    mask: Option<&Mask>,
) -> Result<Vec<P>, SortError>
where
    P: Pixel<Subpixel = u8>,
{
    let mut output = input.to_vec();
    let mut scratch = Scratch::new()?;
    sort_buffer(input, &mut output, width, height, options, mask, &mut scratch)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn visits(angle: f64, width: u32, height: u32) -> Vec<u32> {
        let template = LineTemplate::for_rect(angle, width, height).unwrap();
        let plan = SweepPlan::new(&template, width, height);
        let mut visits = vec![0; (width * height) as usize];
        for origin in plan.origins() {
            for point in template.points() {
                let p = point.translate(origin);
                if 0 <= p.x && p.x < width as i32 && 0 <= p.y && p.y < height as i32 {
                    visits[(p.y * width as i32 + p.x) as usize] += 1;
                }
            }
        }
        visits
    }

    #[test]
    fn every_pixel_lies_on_exactly_one_line() {
        let sizes = [(1, 1), (1, 7), (7, 1), (5, 5), (16, 9), (9, 16), (3, 40), (40, 3)];
        for &(width, height) in sizes.iter() {
            for step in 0..=144 {
                let angle = f64::from(step) * 2.5;
                let visits = visits(angle, width, height);
                assert!(
                    visits.iter().all(|&n| n == 1),
                    "angle {} size {}x{}: {:?}",
                    angle,
                    width,
                    height,
                    visits
                );
            }
        }
    }

    #[test]
    fn plan_for_axis_aligned_angles() {
        let template = LineTemplate::for_rect(0.0, 4, 3).unwrap();
        let plan = SweepPlan::new(&template, 4, 3);
        assert_eq!(plan.minor_axis, Axis::Y);
        assert_eq!(plan.major_origin, 0);
        assert_eq!(plan.range, 0..3);

        let template = LineTemplate::for_rect(180.0, 4, 3).unwrap();
        let plan = SweepPlan::new(&template, 4, 3);
        assert_eq!(plan.major_origin, 3);
        assert_eq!(plan.origin(2), Point::new(3, 2));

        let template = LineTemplate::for_rect(270.0, 4, 3).unwrap();
        let plan = SweepPlan::new(&template, 4, 3);
        assert_eq!(plan.minor_axis, Axis::X);
        assert_eq!(plan.major_origin, 2);
        assert_eq!(plan.range, 0..4);
    }

    #[test]
    fn rejects_mismatched_buffers() {
        let input = vec![Rgb([0u8, 0, 0]); 6];
        let mut output = vec![Rgb([0u8, 0, 0]); 5];
        let mut scratch = Scratch::new().unwrap();
        let options = SortOptions::default();
        let err = sort_buffer(&input, &mut output, 3, 2, &options, None, &mut scratch).unwrap_err();
        assert!(matches!(err, SortError::BufferSize { expected: 6, actual: 5 }));

        let mask = Mask::new(2, 3);
        let mut output = vec![Rgb([0u8, 0, 0]); 6];
        let err = sort_buffer(&input, &mut output, 3, 2, &options, Some(&mask), &mut scratch)
            .unwrap_err();
        assert!(matches!(err, SortError::MaskSize { .. }));
    }

    #[test]
    fn rejects_non_finite_angles() {
        let input = vec![Rgb([0u8, 0, 0]); 4];
        let options = SortOptions {
            angle: f64::NAN,
            ..SortOptions::default()
        };
        let result = sort(&input, 2, 2, &options, None);
        assert!(matches!(result, Err(SortError::InvalidAngle(_))));
    }

    #[test]
    fn empty_image_is_fine() {
        let input: Vec<Rgb<u8>> = Vec::new();
        assert!(sort(&input, 0, 5, &SortOptions::default(), None).unwrap().is_empty());
    }

    #[test]
    fn stats_count_lines_and_bands() {
        let values = [10u8, 200, 10, 5, 7, 7];
        let input: Vec<Rgb<u8>> = values.iter().map(|&v| Rgb([v, v, v])).collect();
        let mut output = input.clone();
        let mut scratch = Scratch::new().unwrap();
        let options = SortOptions {
            selection: SelectionRange::new(6, 255),
            ..SortOptions::default()
        };
        let stats = sort_buffer(&input, &mut output, 3, 2, &options, None, &mut scratch).unwrap();
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.bands, 2);
        assert_eq!(stats.sorted_pixels, 5);
    }
}
