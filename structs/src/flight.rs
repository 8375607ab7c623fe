use serde::{Deserialize, Serialize};

use crate::{Classification, Point};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub before: Point,
    pub direction: i32,
    pub after: Point,
    /// Location code of the sensor read at the end of this step.
    pub sensor: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorMarker {
    pub location: String,
    pub loc: Point,
    /// `None` if the drone never got to read the sensor.
    pub classification: Option<Classification>,
}

impl SensorMarker {
    pub fn visited(&self) -> bool {
        self.classification.is_some()
    }
}
