//! The template line used to sweep a rectangle at an angle.

use std::f64::consts::PI;

use log::{debug, warn};

use crate::error::SortError;
use crate::line::{Axis, LineCursor, Point, Stepper};

// Slack for the side tests of `point_on_rect`, absorbs sin/cos rounding on
// rays that leave through a corner.
const EDGE_EPSILON: f64 = 1e-6;

/// An axis aligned rectangle in continuous coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn centered(half_width: f64, half_height: f64) -> Self {
        Rect {
            min_x: -half_width,
            max_x: half_width,
            min_y: -half_height,
            max_y: half_height,
        }
    }

    pub fn mid(&self) -> (f64, f64) {
        ((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0)
    }
}

#[inline]
fn within(value: f64, low: f64, high: f64) -> bool {
    low - EDGE_EPSILON <= value && value <= high + EDGE_EPSILON
}

/// Intersects the segment from `(x, y)` to the middle of `rect` with the
/// border of `rect`.
///
/// Sides are tried left, right, top, bottom, each only when `(x, y)` lies on
/// the outer side of the midpoint for that axis. A point sitting on the
/// midpoint yields the origin.
pub fn point_on_rect(x: f64, y: f64, rect: &Rect) -> (f64, f64) {
    let (mid_x, mid_y) = rect.mid();
    let m = (mid_y - y) / (mid_x - x);

    if x <= mid_x {
        let min_x_y = m * (rect.min_x - x) + y;
        if within(min_x_y, rect.min_y, rect.max_y) {
            return (rect.min_x, min_x_y.max(rect.min_y).min(rect.max_y));
        }
    }
    if x >= mid_x {
        let max_x_y = m * (rect.max_x - x) + y;
        if within(max_x_y, rect.min_y, rect.max_y) {
            return (rect.max_x, max_x_y.max(rect.min_y).min(rect.max_y));
        }
    }
    if y <= mid_y {
        let min_y_x = (rect.min_y - y) / m + x;
        if within(min_y_x, rect.min_x, rect.max_x) {
            return (min_y_x.max(rect.min_x).min(rect.max_x), rect.min_y);
        }
    }
    if y >= mid_y {
        let max_y_x = (rect.max_y - y) / m + x;
        if within(max_y_x, rect.min_x, rect.max_x) {
            return (max_y_x.max(rect.min_x).min(rect.max_x), rect.max_y);
        }
    }

    if x != mid_x || y != mid_y {
        warn!(
            "point_on_rect: no side of {:?} hit from ({}, {}), using origin",
            rect, x, y
        );
    }
    (0.0, 0.0)
}

/// Normalizes an angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> Result<f64, SortError> {
    if !angle.is_finite() {
        return Err(SortError::InvalidAngle(angle));
    }
    let angle = angle.rem_euclid(360.0);
    // rem_euclid may round up to the modulus for tiny negative inputs
    Ok(if angle >= 360.0 { 0.0 } else { angle })
}

/// Offsets of one line crossing a `width` x `height` image at an angle,
/// relative to the line's origin.
///
/// The same template is translated for every parallel line of a sweep.
#[derive(Clone, Debug)]
pub struct LineTemplate {
    points: Vec<Point>,
    delta: Point,
    stepper: Stepper,
}

impl LineTemplate {
    /// Builds the template for `angle` degrees, measured counter-clockwise
    /// from the positive x axis with y growing along the rows of the buffer.
    ///
    /// The line runs from the origin to the border of the square with half
    /// extent `max(width, height)`, so its major axis always spans the image.
    pub fn for_rect(angle: f64, width: u32, height: u32) -> Result<Self, SortError> {
        let angle = normalize_angle(angle)?;
        let (w, h) = (f64::from(width), f64::from(height));
        let length = w * w + h * h;
        let radians = angle * (PI / 180.0);
        let ray = (length * radians.cos(), length * radians.sin());

        let max_d = w.max(h);
        let (end_x, end_y) = point_on_rect(ray.0, ray.1, &Rect::centered(max_d, max_d));
        let end = Point::new(end_x.round() as i32, end_y.round() as i32);

        let template = LineTemplate::from_endpoint(end)?;
        debug!(
            "LineTemplate::for_rect angle={} size={}x{} delta={:?} stepper={:?} len={}",
            angle,
            width,
            height,
            template.delta,
            template.stepper,
            template.points.len()
        );
        Ok(template)
    }

    /// Builds the template from the origin to `end`, both inclusive.
    pub fn from_endpoint(end: Point) -> Result<Self, SortError> {
        let cursor = LineCursor::new(Point::ORIGIN, end);
        let stepper = cursor.stepper();
        let mut points = Vec::new();
        points.try_reserve_exact(cursor.len())?;
        points.extend(cursor);
        Ok(LineTemplate {
            points,
            delta: end,
            stepper,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn delta(&self) -> Point {
        self.delta
    }

    pub fn stepper(&self) -> Stepper {
        self.stepper
    }

    /// The axis the line advances on every point.
    pub fn major_axis(&self) -> Axis {
        self.stepper.octant().map_or(Axis::X, |octant| octant.major())
    }

    /// Smallest and largest offset along the minor axis.
    pub fn minor_span(&self) -> (i32, i32) {
        let minor = self.major_axis().other();
        self.points
            .iter()
            .map(|point| point.along(minor))
            .fold((0, 0), |(low, high), v| (low.min(v), high.max(v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Octant;

    #[test]
    fn ray_hits_each_side() {
        let rect = Rect::centered(4.0, 4.0);
        assert_eq!(point_on_rect(100.0, 0.0, &rect), (4.0, 0.0));
        assert_eq!(point_on_rect(-100.0, 0.0, &rect), (-4.0, 0.0));
        assert_eq!(point_on_rect(0.0, 100.0, &rect), (0.0, 4.0));
        assert_eq!(point_on_rect(0.0, -100.0, &rect), (0.0, -4.0));
        assert_eq!(point_on_rect(100.0, 50.0, &rect), (4.0, 2.0));
        assert_eq!(point_on_rect(-50.0, -100.0, &rect), (-2.0, -4.0));
    }

    #[test]
    fn ray_from_midpoint_yields_origin() {
        let rect = Rect::centered(3.0, 5.0);
        assert_eq!(point_on_rect(0.0, 0.0, &rect), (0.0, 0.0));
    }

    #[test]
    fn angle_normalization() {
        assert_eq!(normalize_angle(360.0).unwrap(), 0.0);
        assert_eq!(normalize_angle(-90.0).unwrap(), 270.0);
        assert_eq!(normalize_angle(725.0).unwrap(), 5.0);
        assert!(normalize_angle(f64::NAN).is_err());
        assert!(normalize_angle(f64::INFINITY).is_err());
    }

    #[test]
    fn axis_aligned_templates() {
        let cases = [
            (0.0, Point::new(6, 0)),
            (90.0, Point::new(0, 6)),
            (180.0, Point::new(-6, 0)),
            (270.0, Point::new(0, -6)),
            (360.0, Point::new(6, 0)),
        ];
        for &(angle, delta) in cases.iter() {
            let template = LineTemplate::for_rect(angle, 6, 3).unwrap();
            assert_eq!(template.delta(), delta, "angle {}", angle);
            assert_eq!(template.len(), 7);
            assert_eq!(template.minor_span(), (0, 0));
        }
    }

    #[test]
    fn diagonal_templates_reach_the_corner() {
        let template = LineTemplate::for_rect(45.0, 5, 5).unwrap();
        assert_eq!(template.delta(), Point::new(5, 5));
        assert_eq!(template.stepper(), Stepper::Octant(Octant::Octant1));
        let template = LineTemplate::for_rect(225.0, 5, 5).unwrap();
        assert_eq!(template.delta(), Point::new(-5, -5));
    }

    #[test]
    fn template_spans_the_longer_side() {
        for &(width, height) in [(2, 100), (100, 2), (17, 9), (1, 1)].iter() {
            for step in 0..72 {
                let angle = f64::from(step) * 5.0;
                let template = LineTemplate::for_rect(angle, width, height).unwrap();
                let major = template.major_axis();
                assert_eq!(
                    template.delta().along(major).abs() as u32,
                    width.max(height),
                    "angle {} size {}x{}",
                    angle,
                    width,
                    height
                );
                assert_eq!(template.points()[0], Point::ORIGIN);
                assert_eq!(*template.points().last().unwrap(), template.delta());
            }
        }
    }

    #[test]
    fn empty_image_gives_single_point_template() {
        let template = LineTemplate::for_rect(30.0, 0, 0).unwrap();
        assert_eq!(template.points(), &[Point::ORIGIN]);
        assert_eq!(template.stepper(), Stepper::Invalid);
    }
}
