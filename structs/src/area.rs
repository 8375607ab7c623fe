use serde::{Deserialize, Serialize};

use crate::{geometry::Turn, Point};

/// The axis-aligned rectangle the drone must stay strictly inside.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Default for Area {
    fn default() -> Self {
        // George Square, Edinburgh
        Area {
            north: 55.946233,
            south: 55.942617,
            east: -3.184319,
            west: -3.192473,
        }
    }
}

impl Area {
    pub fn contains(&self, p: Point) -> bool {
        self.south < p.lat && p.lat < self.north && self.west < p.lng && p.lng < self.east
    }

    /// Which way to sweep a heading that took the drone to `p`, or `None` if
    /// `p` is inside the area. Turns towards the end of the violated edge the
    /// bearing already leans to.
    pub fn turn_away(&self, p: Point, bearing: f64) -> Option<Turn> {
        if self.contains(p) {
            return None;
        }
        let turn = if p.lat >= self.north {
            if bearing < 90.0 {
                Turn::Clockwise
            } else {
                Turn::Anticlockwise
            }
        } else if p.lat <= self.south {
            if bearing >= 270.0 {
                Turn::Anticlockwise
            } else {
                Turn::Clockwise
            }
        } else if p.lng >= self.east {
            if bearing < 180.0 {
                Turn::Anticlockwise
            } else {
                Turn::Clockwise
            }
        } else if bearing < 180.0 {
            Turn::Clockwise
        } else {
            Turn::Anticlockwise
        };
        Some(turn)
    }

    pub fn centre(&self) -> Point {
        Point::new((self.east + self.west) / 2.0, (self.north + self.south) / 2.0)
    }

    /// North-west, north-east, south-west and south-east corners.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.west, self.north),
            Point::new(self.east, self.north),
            Point::new(self.west, self.south),
            Point::new(self.east, self.south),
        ]
    }
}
