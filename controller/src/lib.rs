//! Runs a survey end to end: fetch the sensors and no-fly zones for a date,
//! plan a tour, fly it, and write out what the drone saw.

pub mod backend;
pub mod mission;
pub mod readings;

pub use backend::{FileServer, MapSource, SourceError, SurveyDate};
pub use mission::{FlightReport, Mission, Outcome};
