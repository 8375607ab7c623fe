use aqmap_planner::plan_tour;
use aqmap_sim::{Drone, FlightError};
use aqmap_structs::{DroneParams, Move, Obstacle, Point, Sensor, SensorMarker};
use log::{debug, info, warn};

use crate::backend::{load_sensors, MapSource, SourceError, SurveyDate};

/// How a survey flight ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every sensor read and the drone is back at the start.
    Completed,
    /// Every sensor read, but the drone did not make it back.
    ReturnFailed(FlightError),
    /// The flight stopped on the way to a sensor. That sensor and all the
    /// ones after it in the tour are left unvisited.
    Aborted { error: FlightError, unvisited: usize },
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }

    pub fn error(&self) -> Option<&FlightError> {
        match self {
            Outcome::Completed => None,
            Outcome::ReturnFailed(error) | Outcome::Aborted { error, .. } => Some(error),
        }
    }
}

/// Everything the flight produced. Output is written from this whatever the
/// outcome.
#[derive(Debug, Clone)]
pub struct FlightReport {
    pub start: Point,
    pub path: Vec<Point>,
    pub moves: Vec<Move>,
    pub markers: Vec<SensorMarker>,
    pub moves_used: u32,
    pub outcome: Outcome,
}

/// One survey: a start point, the sensors to read, and the no-fly zones to
/// stay clear of.
pub struct Mission {
    start: Point,
    params: DroneParams,
    sensors: Vec<Sensor>,
    obstacles: Vec<Obstacle>,
}

impl Mission {
    pub fn new(start: Point, params: DroneParams, sensors: Vec<Sensor>, obstacles: Vec<Obstacle>) -> Self {
        Mission {
            start,
            params,
            sensors,
            obstacles,
        }
    }

    pub fn load(
        source: &dyn MapSource,
        date: SurveyDate,
        start: Point,
        params: DroneParams,
    ) -> Result<Self, SourceError> {
        let sensors = load_sensors(source, date)?;
        let obstacles = source.no_fly_zones()?;
        Ok(Self::new(start, params, sensors, obstacles))
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    /// Order the sensors, fly to each in turn, then fly home.
    pub fn fly(self) -> FlightReport {
        let start = self.start;
        let tour = plan_tour(start, self.sensors);
        info!("planned a tour of {} sensors", tour.len());

        let mut drone = Drone::new(start, self.params, self.obstacles);
        let mut aborted = None;

        if !drone.params().area.contains(start) {
            aborted = Some((0, FlightError::StartOutOfBounds { start }));
        } else {
            for (idx, sensor) in tour.iter().enumerate() {
                if let Err(error) = drone.visit_sensor(sensor) {
                    aborted = Some((idx, error));
                    break;
                }
            }
        }

        let outcome = match aborted {
            Some((idx, error)) => {
                warn!(
                    "flight aborted with {} of {} sensors read: {}",
                    idx,
                    tour.len(),
                    error
                );
                for sensor in &tour[idx..] {
                    drone.mark_unvisited(sensor);
                }
                Outcome::Aborted {
                    error,
                    unvisited: tour.len() - idx,
                }
            }
            None => match drone.return_to(start) {
                Ok(()) => {
                    debug!("back at start after {} moves", drone.moves_used());
                    Outcome::Completed
                }
                Err(error) => {
                    warn!("every sensor read, but could not return: {}", error);
                    Outcome::ReturnFailed(error)
                }
            },
        };

        FlightReport {
            start,
            path: drone.path().to_vec(),
            moves: drone.flight_path().to_vec(),
            markers: drone.markers().to_vec(),
            moves_used: drone.moves_used(),
            outcome,
        }
    }
}
