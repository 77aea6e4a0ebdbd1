//! Band detection along one line and the counting sort of a band.

use std::ops::Range;

use image::Pixel;
use log::trace;

use crate::error::SortError;
use crate::line::Point;
use crate::mask::Mask;
use crate::sorting::{Criterion, PRECISION};

const ALPHABET: usize = PRECISION as usize + 1;

/// Inclusive range of selection values that are sorted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub min: u8,
    pub max: u8,
}

impl SelectionRange {
    pub const FULL: SelectionRange = SelectionRange {
        min: 0,
        max: PRECISION,
    };

    pub fn new(min: u8, max: u8) -> Self {
        SelectionRange { min, max }
    }

    /// Builds a range from percentages of `PRECISION`, truncating. An empty
    /// range (`min > max`) selects nothing.
    pub fn from_percent(min: f64, max: f64) -> Self {
        let scale = |percent: f64| {
            (percent.max(0.0).min(100.0) / 100.0 * f64::from(PRECISION)) as u8
        };
        SelectionRange::new(scale(min), scale(max))
    }

    #[inline]
    pub fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for SelectionRange {
    fn default() -> Self {
        SelectionRange::FULL
    }
}

/// Per line scratch, indexed by template position.
#[derive(Clone, Debug, Default)]
pub struct LineBuffers {
    pub pixel_indices: Vec<usize>,
    pub values: Vec<u8>,
    pub bands: Vec<Range<usize>>,
}

impl LineBuffers {
    pub fn reserve(&mut self, template_len: usize) -> Result<(), SortError> {
        let extra = template_len.saturating_sub(self.pixel_indices.len());
        self.pixel_indices.try_reserve(extra)?;
        let extra = template_len.saturating_sub(self.values.len());
        self.values.try_reserve(extra)?;
        // bands are separated by at least one pixel
        let extra = (template_len / 2 + 1).saturating_sub(self.bands.len());
        self.bands.try_reserve(extra)?;
        Ok(())
    }

    fn reset(&mut self, template_len: usize) {
        self.pixel_indices.clear();
        self.pixel_indices.resize(template_len, 0);
        self.values.clear();
        self.values.resize(template_len, 0);
        self.bands.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Seeking,
    InBand { start: usize },
    OutOfBand,
}

/// Classifies the pixels of one line and delimits its bands.
pub struct BandScanner<'a, P> {
    input: &'a [P],
    width: i32,
    height: i32,
    criterion: Criterion,
    selection: SelectionRange,
    mask: Option<&'a Mask>,
}

impl<'a, P> BandScanner<'a, P>
where
    P: Pixel<Subpixel = u8>,
{
    pub fn new(
        input: &'a [P],
        width: u32,
        height: u32,
        criterion: Criterion,
        selection: SelectionRange,
    ) -> Self {
        BandScanner {
            input,
            width: width as i32,
            height: height as i32,
            criterion,
            selection,
            mask: None,
        }
    }

    pub fn with_mask(mut self, mask: Option<&'a Mask>) -> Self {
        self.mask = mask;
        self
    }

    #[inline]
    fn index_of(&self, point: Point) -> Option<usize> {
        if 0 <= point.x && point.x < self.width && 0 <= point.y && point.y < self.height {
            Some(point.y as usize * self.width as usize + point.x as usize)
        } else {
            None
        }
    }

    #[inline]
    fn select(&self, index: usize) -> Option<u8> {
        if let Some(mask) = self.mask {
            if !mask.allows(index) {
                return None;
            }
        }
        let value = self.criterion.value_of(self.input[index].to_rgb().0);
        if self.selection.contains(value) {
            Some(value)
        } else {
            None
        }
    }

    /// Walks `template` translated by `offset`.
    ///
    /// Unselected pixels are copied to `output` straight away. Selected
    /// pixels are recorded in `line` together with the bands they form; the
    /// caller sorts every band in `line.bands`.
    pub fn scan(
        &self,
        template: &[Point],
        offset: Point,
        output: &mut [P],
        line: &mut LineBuffers,
    ) {
        line.reset(template.len());
        let mut state = ScanState::Seeking;

        for (position, point) in template.iter().enumerate() {
            let index = match self.index_of(point.translate(offset)) {
                Some(index) => index,
                None => {
                    if let ScanState::InBand { start } = state {
                        line.bands.push(start..position);
                        state = ScanState::OutOfBand;
                    }
                    continue;
                }
            };
            line.pixel_indices[position] = index;

            match (self.select(index), state) {
                (Some(value), ScanState::InBand { .. }) => line.values[position] = value,
                (Some(value), _) => {
                    line.values[position] = value;
                    state = ScanState::InBand { start: position };
                }
                (None, ScanState::InBand { start }) => {
                    line.bands.push(start..position);
                    output[index] = self.input[index];
                    state = ScanState::OutOfBand;
                }
                (None, _) => {
                    output[index] = self.input[index];
                    state = ScanState::OutOfBand;
                }
            }
        }

        if let ScanState::InBand { start } = state {
            line.bands.push(start..template.len());
        }
        trace!("scan offset={:?} bands={:?}", offset, line.bands);
    }
}

/// Counting table of a band sort, one slot per selection value.
#[derive(Clone, Debug)]
pub struct CountTable(Vec<usize>);

impl CountTable {
    pub fn new() -> Result<Self, SortError> {
        let mut counts = Vec::new();
        counts.try_reserve_exact(ALPHABET)?;
        counts.resize(ALPHABET, 0);
        Ok(CountTable(counts))
    }
}

/// Stable counting sort of one band.
///
/// `indices[i]` is the pixel index of the `i`th band member and `values[i]`
/// its selection value. The pixels are read from `input` and written back to
/// the same set of indices in `output`, ordered by value. Ties keep their
/// order along the line.
pub fn sort_band<P: Copy>(
    input: &[P],
    output: &mut [P],
    indices: &[usize],
    values: &[u8],
    counts: &mut CountTable,
    reverse: bool,
) {
    debug_assert_eq!(indices.len(), values.len());
    let key = |value: u8| {
        if reverse {
            usize::from(PRECISION - value)
        } else {
            usize::from(value)
        }
    };
    let counts = &mut counts.0;

    for count in counts.iter_mut() {
        *count = 0;
    }
    for &value in values {
        counts[key(value)] += 1;
    }

    // counts[k] becomes the first slot of key k
    let mut next = 0;
    for count in counts.iter_mut() {
        let n = *count;
        *count = next;
        next += n;
    }

    for (&index, &value) in indices.iter().zip(values) {
        let slot = &mut counts[key(value)];
        output[indices[*slot]] = input[index];
        *slot += 1;
    }
}
