//! Criteria reducing a color to the scalar pixels are sorted by.
//!
//! Every function takes the red, green and blue channels in `[0, 1]` and
//! returns a value in `[0, 1]`.

use std::fmt;
use std::str;

use log::warn;

/// Quantization ceiling of selection values.
pub const PRECISION: u8 = u8::MAX;

#[inline]
fn max_rgb(r: f64, g: f64, b: f64) -> f64 {
    r.max(g).max(b)
}

#[inline]
fn min_rgb(r: f64, g: f64, b: f64) -> f64 {
    r.min(g).min(b)
}

#[inline]
pub fn red(r: f64, _g: f64, _b: f64) -> f64 {
    r
}

#[inline]
pub fn green(_r: f64, g: f64, _b: f64) -> f64 {
    g
}

#[inline]
pub fn blue(_r: f64, _g: f64, b: f64) -> f64 {
    b
}

#[inline]
pub fn average(r: f64, g: f64, b: f64) -> f64 {
    (r + g + b) / 3.0
}

#[inline]
pub fn minimum(r: f64, g: f64, b: f64) -> f64 {
    min_rgb(r, g, b)
}

/// Also the HSV value.
#[inline]
pub fn maximum(r: f64, g: f64, b: f64) -> f64 {
    max_rgb(r, g, b)
}

#[inline]
pub fn chroma(r: f64, g: f64, b: f64) -> f64 {
    max_rgb(r, g, b) - min_rgb(r, g, b)
}

#[inline]
pub fn lightness(r: f64, g: f64, b: f64) -> f64 {
    (max_rgb(r, g, b) + min_rgb(r, g, b)) / 2.0
}

/// Rec. 709 luma.
#[inline]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// Hue in degrees divided by 360. Gray has hue 0.
pub fn hue(r: f64, g: f64, b: f64) -> f64 {
    let max = max_rgb(r, g, b);
    let chroma = max - min_rgb(r, g, b);
    if chroma == 0.0 {
        return 0.0;
    }
    let sector = if max == r {
        ((g - b) / chroma).rem_euclid(6.0)
    } else if max == g {
        (b - r) / chroma + 2.0
    } else {
        (r - g) / chroma + 4.0
    };
    sector * 60.0 / 360.0
}

/// HSV saturation.
pub fn saturation(r: f64, g: f64, b: f64) -> f64 {
    let value = max_rgb(r, g, b);
    if value == 0.0 {
        0.0
    } else {
        chroma(r, g, b) / value
    }
}

/// HSL saturation.
pub fn saturation_hsl(r: f64, g: f64, b: f64) -> f64 {
    let value = max_rgb(r, g, b);
    let lightness = lightness(r, g, b);
    if lightness == 0.0 || lightness == 1.0 {
        0.0
    } else {
        (value - lightness) / lightness.min(1.0 - lightness)
    }
}

/// Scales a criterion result to `[0, PRECISION]`, rounding to nearest.
///
/// Results outside `[0, 1]` are logged and clamped.
pub fn quantize(value: f64) -> u8 {
    let scaled = (value * f64::from(PRECISION)).round();
    if !(0.0..=f64::from(PRECISION)).contains(&scaled) {
        warn!("criterion value {} outside of [0, 1], clamping", value);
        // NaN saturates to 0
        return scaled.max(0.0).min(f64::from(PRECISION)) as u8;
    }
    scaled as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Criterion {
    Red,
    Green,
    Blue,
    Average,
    Minimum,
    Maximum,
    Value,
    Chroma,
    Hue,
    Saturation,
    SaturationHsl,
    Lightness,
    Luma,
}

impl Criterion {
    pub const ALL: [Criterion; 13] = [
        Criterion::Red,
        Criterion::Green,
        Criterion::Blue,
        Criterion::Average,
        Criterion::Minimum,
        Criterion::Maximum,
        Criterion::Value,
        Criterion::Chroma,
        Criterion::Hue,
        Criterion::Saturation,
        Criterion::SaturationHsl,
        Criterion::Lightness,
        Criterion::Luma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Criterion::Red => "red",
            Criterion::Green => "green",
            Criterion::Blue => "blue",
            Criterion::Average => "average",
            Criterion::Minimum => "minimum",
            Criterion::Maximum => "maximum",
            Criterion::Value => "value",
            Criterion::Chroma => "chroma",
            Criterion::Hue => "hue",
            Criterion::Saturation => "saturation",
            Criterion::SaturationHsl => "saturation-hsl",
            Criterion::Lightness => "lightness",
            Criterion::Luma => "luma",
        }
    }

    pub fn function(self) -> fn(f64, f64, f64) -> f64 {
        match self {
            Criterion::Red => red,
            Criterion::Green => green,
            Criterion::Blue => blue,
            Criterion::Average => average,
            Criterion::Minimum => minimum,
            Criterion::Maximum | Criterion::Value => maximum,
            Criterion::Chroma => chroma,
            Criterion::Hue => hue,
            Criterion::Saturation => saturation,
            Criterion::SaturationHsl => saturation_hsl,
            Criterion::Lightness => lightness,
            Criterion::Luma => luma,
        }
    }

    #[inline]
    pub fn evaluate(self, r: f64, g: f64, b: f64) -> f64 {
        (self.function())(r, g, b)
    }

    /// Selection value of an 8 bit RGB color.
    #[inline]
    pub fn value_of(self, rgb: [u8; 3]) -> u8 {
        let [r, g, b] = rgb;
        quantize(self.evaluate(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        ))
    }
}

impl Default for Criterion {
    fn default() -> Self {
        Criterion::Lightness
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl str::FromStr for Criterion {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Criterion::ALL
            .iter()
            .copied()
            .find(|criterion| criterion.name() == s)
            .ok_or_else(|| format!("unknown sorting criterion `{}`", s))
    }
}
