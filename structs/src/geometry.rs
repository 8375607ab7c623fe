//! Flat-plane geometry used by the planner and the drone.
//!
//! Bearings are in degrees, measured anticlockwise from east (increasing
//! longitude), so 90 is north. The drone may only fly along multiples of
//! [`HEADING_INCREMENT`].

use crate::Point;

pub const HEADING_INCREMENT: i32 = 10;

/// Bearing from `from` to `to` in `[0, 360)`.
pub fn bearing(from: Point, to: Point) -> f64 {
    let angle = (to.lat - from.lat).atan2(to.lng - from.lng).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Round a bearing to the nearest legal heading, halves rounding up.
pub fn quantize(bearing: f64) -> i32 {
    let increments = (bearing / HEADING_INCREMENT as f64 + 0.5).floor() as i32;
    (increments * HEADING_INCREMENT).rem_euclid(360)
}

/// The point reached by flying `length` from `from` along `direction`.
/// The direction is quantized first.
pub fn step(from: Point, direction: f64, length: f64) -> Point {
    step_heading(from, quantize(direction), length)
}

/// Like [`step`] for an already quantized heading.
pub fn step_heading(from: Point, heading: i32, length: f64) -> Point {
    let rad = (heading as f64).to_radians();
    Point {
        lng: from.lng + length * rad.cos(),
        lat: from.lat + length * rad.sin(),
    }
}

/// Parametric segment test. Parallel and collinear segments never intersect;
/// touching at an end point does.
pub fn segments_intersect(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let denom = (b2.lat - b1.lat) * (a2.lng - a1.lng) - (b2.lng - b1.lng) * (a2.lat - a1.lat);
    if denom == 0.0 {
        return false;
    }
    let ua = ((b2.lng - b1.lng) * (a1.lat - b1.lat) - (b2.lat - b1.lat) * (a1.lng - b1.lng)) / denom;
    let ub = ((a2.lng - a1.lng) * (a1.lat - b1.lat) - (a2.lat - a1.lat) * (a1.lng - b1.lng)) / denom;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// Direction to sweep the heading in when the preferred one is illegal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Clockwise,
    Anticlockwise,
}

impl Turn {
    pub fn degrees(self) -> i32 {
        match self {
            Turn::Clockwise => -HEADING_INCREMENT,
            Turn::Anticlockwise => HEADING_INCREMENT,
        }
    }

    pub fn flip(self) -> Turn {
        match self {
            Turn::Clockwise => Turn::Anticlockwise,
            Turn::Anticlockwise => Turn::Clockwise,
        }
    }

    /// Rotate a raw bearing by one increment, staying in `[0, 360)`.
    pub fn rotate(self, bearing: f64) -> f64 {
        (bearing + self.degrees() as f64).rem_euclid(360.0)
    }

    /// Rotate a quantized heading by `n` increments.
    pub fn rotate_heading(self, heading: i32, n: i32) -> i32 {
        (heading + n * self.degrees()).rem_euclid(360)
    }
}
