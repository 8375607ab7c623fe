use std::fmt;

use serde::{Deserialize, Serialize};

pub mod area;
pub mod flight;
pub mod geojson;
pub mod geometry;
pub mod obstacle;
pub mod params;
pub mod sensor;

pub use area::Area;
pub use flight::{Move, SensorMarker};
pub use obstacle::Obstacle;
pub use params::DroneParams;
pub use sensor::{Classification, Reading, Sensor, SensorRecord};

/// A position on the survey map. The area is small enough that longitude and
/// latitude are used as a flat Euclidean plane.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Default)]
pub struct Point {
    pub lng: f64,
    pub lat: f64,
}

impl Point {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    pub fn dist(&self, other: &Point) -> f64 {
        let dx = self.lng - other.lng;
        let dy = self.lat - other.lat;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn lng_lat(&self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl From<[f64; 2]> for Point {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Point { lng, lat }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lng, self.lat)
    }
}

/// Anything with a fixed map position that can be put in a tour.
pub trait Located {
    fn loc(&self) -> Point;
}

impl Located for Point {
    fn loc(&self) -> Point {
        *self
    }
}
