//! Step-by-step flight of the survey drone.
//!
//! The drone only flies in fixed-length steps along multiples of ten
//! degrees. Each step is bent away from the area boundary and from no-fly
//! zones as needed, and every step costs one move from a fixed budget.

pub mod drone;
pub mod error;

#[cfg(test)]
mod drone_tests;

pub use drone::{Drone, FlightState};
pub use error::FlightError;
