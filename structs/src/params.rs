use serde::{Deserialize, Serialize};

use crate::Area;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DroneParams {
    pub area: Area,
    /// Distance covered by every move.
    pub step_length: f64,
    /// A sensor is read once the drone is this close to it.
    pub read_range: f64,
    pub move_budget: u32,
    /// Heading increments tried in one sweep before giving up on a step.
    pub max_rotations: u32,
}

impl Default for DroneParams {
    fn default() -> Self {
        DroneParams {
            area: Area::default(),
            step_length: 0.0003,
            read_range: 0.0002,
            move_budget: 150,
            max_rotations: 36,
        }
    }
}
