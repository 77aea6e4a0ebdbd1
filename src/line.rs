//! Integer line stepping.
//!
//! Octants are numbered counter-clockwise starting at the positive x axis:
//!
//! ```text
//!  \  |  /
//!   \2|1/
//!   3\|/0
//!  ---*---
//!   4/|\7
//!   /5|6\
//!  /  |  \
//! ```
//!
//! Every octant advances its major axis by one on each step and its minor
//! axis by at most one, so a line from `a` to `b` visits exactly one point per
//! major coordinate.

/// An integer grid point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }

    #[inline]
    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    #[inline]
    pub fn along_mut(&mut self, axis: Axis) -> &mut i32 {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    #[inline]
    pub fn translate(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Octant {
    Octant0,
    Octant1,
    Octant2,
    Octant3,
    Octant4,
    Octant5,
    Octant6,
    Octant7,
}

impl Octant {
    pub const ALL: [Octant; 8] = [
        Octant::Octant0,
        Octant::Octant1,
        Octant::Octant2,
        Octant::Octant3,
        Octant::Octant4,
        Octant::Octant5,
        Octant::Octant6,
        Octant::Octant7,
    ];

    /// Classifies a line delta, `None` for the degenerate zero delta.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Octant> {
        let (adx, ady) = (dx.abs(), dy.abs());
        let octant = if dx > 0 && dy >= 0 {
            if adx > ady {
                Octant::Octant0
            } else {
                Octant::Octant1
            }
        } else if dx <= 0 && dy > 0 {
            if adx < ady {
                Octant::Octant2
            } else {
                Octant::Octant3
            }
        } else if dx < 0 && dy <= 0 {
            if adx >= ady {
                Octant::Octant4
            } else {
                Octant::Octant5
            }
        } else if dx >= 0 && dy < 0 {
            if adx < ady {
                Octant::Octant6
            } else {
                Octant::Octant7
            }
        } else {
            return None;
        };
        Some(octant)
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// The axis advanced on every step.
    pub fn major(self) -> Axis {
        match self {
            Octant::Octant0 | Octant::Octant3 | Octant::Octant4 | Octant::Octant7 => Axis::X,
            Octant::Octant1 | Octant::Octant2 | Octant::Octant5 | Octant::Octant6 => Axis::Y,
        }
    }

    pub fn major_sign(self) -> i32 {
        match self {
            Octant::Octant0 | Octant::Octant1 | Octant::Octant2 | Octant::Octant7 => 1,
            Octant::Octant3 | Octant::Octant4 | Octant::Octant5 | Octant::Octant6 => -1,
        }
    }

    pub fn minor_sign(self) -> i32 {
        match self {
            Octant::Octant0 | Octant::Octant1 | Octant::Octant3 | Octant::Octant6 => 1,
            Octant::Octant2 | Octant::Octant4 | Octant::Octant5 | Octant::Octant7 => -1,
        }
    }

    /// `1` if the minor axis moves while the decision variable is positive,
    /// `-1` if it moves while it is negative.
    pub fn polarity(self) -> i32 {
        match self {
            Octant::Octant0 | Octant::Octant1 | Octant::Octant3 | Octant::Octant6 => 1,
            Octant::Octant2 | Octant::Octant4 | Octant::Octant5 | Octant::Octant7 => -1,
        }
    }

    fn seed(self, delta: Point) -> i32 {
        let major = delta.along(self.major()).abs();
        let minor = delta.along(self.major().other()).abs();
        self.polarity() * (2 * minor - major)
    }

    /// Advances `state` by one point. Returns whether the major axis has not
    /// yet passed the end of the line.
    pub fn step(self, state: &mut LineState) -> bool {
        let major_axis = self.major();
        let minor_axis = major_axis.other();
        let major = state.delta.along(major_axis).abs();
        let minor = state.delta.along(minor_axis).abs();
        let polarity = self.polarity();

        if polarity * state.decision > 0 {
            *state.current.along_mut(minor_axis) += self.minor_sign();
            state.decision -= polarity * 2 * major;
        }
        *state.current.along_mut(major_axis) += self.major_sign();
        state.decision += polarity * 2 * minor;

        let current = state.current.along(major_axis);
        let end = state.end.along(major_axis);
        if self.major_sign() > 0 {
            current <= end
        } else {
            current >= end
        }
    }
}

/// A single step function for a line, chosen once per line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stepper {
    Octant(Octant),
    /// Zero-length line, reports completion on the first step.
    Invalid,
}

impl Stepper {
    #[inline]
    pub fn step(self, state: &mut LineState) -> bool {
        match self {
            Stepper::Octant(octant) => octant.step(state),
            Stepper::Invalid => false,
        }
    }

    pub fn octant(self) -> Option<Octant> {
        match self {
            Stepper::Octant(octant) => Some(octant),
            Stepper::Invalid => None,
        }
    }
}

pub fn select_stepper(dx: i32, dy: i32) -> Stepper {
    match Octant::from_delta(dx, dy) {
        Some(octant) => Stepper::Octant(octant),
        None => {
            log::debug!("select_stepper: degenerate delta ({}, {})", dx, dy);
            Stepper::Invalid
        }
    }
}

/// Bresenham state of one line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineState {
    pub current: Point,
    pub start: Point,
    pub end: Point,
    pub delta: Point,
    pub decision: i32,
}

impl LineState {
    pub fn new(start: Point, end: Point) -> Self {
        let mut state = LineState::default();
        state.init(start, end);
        state
    }

    /// Resets the state to the beginning of the line from `start` to `end`.
    ///
    /// The decision variable is seeded in the frame of the line's octant. In
    /// octant 0 this is the textbook `2 * dy - dx`.
    pub fn init(&mut self, start: Point, end: Point) {
        self.start = start;
        self.end = end;
        self.current = start;
        self.delta = Point::new(end.x - start.x, end.y - start.y);
        self.decision = match Octant::from_delta(self.delta.x, self.delta.y) {
            Some(octant) => octant.seed(self.delta),
            None => 2 * self.delta.y - self.delta.x,
        };
    }
}

/// Walks every point of a line, both endpoints included.
#[derive(Clone, Debug)]
pub struct LineCursor {
    state: LineState,
    stepper: Stepper,
    finished: bool,
}

impl LineCursor {
    pub fn new(start: Point, end: Point) -> Self {
        let state = LineState::new(start, end);
        LineCursor {
            stepper: select_stepper(state.delta.x, state.delta.y),
            state,
            finished: false,
        }
    }

    pub fn init(&mut self, start: Point, end: Point) {
        self.state.init(start, end);
        self.stepper = select_stepper(self.state.delta.x, self.state.delta.y);
        self.finished = false;
    }

    pub fn state(&self) -> &LineState {
        &self.state
    }

    pub fn stepper(&self) -> Stepper {
        self.stepper
    }
}

impl Iterator for LineCursor {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.finished {
            return None;
        }
        let point = self.state.current;
        self.finished = !self.stepper.step(&mut self.state);
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.finished {
            0
        } else {
            let major = self.stepper.octant().map_or(Axis::X, Octant::major);
            (self.state.end.along(major) - self.state.current.along(major)).abs() as usize + 1
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineCursor {}
