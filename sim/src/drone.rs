use aqmap_structs::{
    geometry::{self, quantize, step_heading, Turn},
    obstacle::first_blocking,
    Classification, DroneParams, Move, Obstacle, Point, Sensor, SensorMarker,
};
use log::{debug, trace};

use crate::FlightError;

/// How many of the most recent positions a candidate step is compared with
/// to break out of back-and-forth oscillation.
const LOOKBACK: usize = 4;
/// Extra heading increments added when a candidate revisits a recent position.
const OSCILLATION_NUDGE: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightState {
    Flying,
    Exhausted,
}

pub struct Drone {
    params: DroneParams,
    obstacles: Vec<Obstacle>,
    loc: Point,
    moves_left: u32,
    path: Vec<Point>,
    flight_path: Vec<Move>,
    markers: Vec<SensorMarker>,
}

impl Drone {
    pub fn new(start: Point, params: DroneParams, obstacles: Vec<Obstacle>) -> Self {
        Drone {
            moves_left: params.move_budget,
            params,
            obstacles,
            loc: start,
            path: vec![start],
            flight_path: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn loc(&self) -> Point {
        self.loc
    }

    pub fn params(&self) -> &DroneParams {
        &self.params
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    pub fn moves_used(&self) -> u32 {
        self.params.move_budget - self.moves_left
    }

    pub fn state(&self) -> FlightState {
        if self.moves_left == 0 {
            FlightState::Exhausted
        } else {
            FlightState::Flying
        }
    }

    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn flight_path(&self) -> &[Move] {
        &self.flight_path
    }

    pub fn markers(&self) -> &[SensorMarker] {
        &self.markers
    }

    /// Fly towards the sensor until it is in range, then read it. The drone
    /// always makes at least one move, so every reading is tied to the move
    /// it was taken on.
    pub fn visit_sensor(&mut self, sensor: &Sensor) -> Result<Classification, FlightError> {
        if !self.params.area.contains(sensor.loc) {
            return Err(FlightError::GoalOutOfBounds { goal: sensor.loc });
        }
        loop {
            self.make_move(geometry::bearing(self.loc, sensor.loc))?;
            if self.loc.dist(&sensor.loc) <= self.params.read_range {
                break;
            }
        }

        let classification = sensor.classify();
        debug!(
            "read {} after {} moves: {:?}",
            sensor.location,
            self.moves_used(),
            classification
        );
        if let Some(last) = self.flight_path.last_mut() {
            last.sensor = Some(sensor.location.clone());
        }
        self.markers.push(SensorMarker {
            location: sensor.location.clone(),
            loc: sensor.loc,
            classification: Some(classification),
        });
        Ok(classification)
    }

    pub fn return_to(&mut self, goal: Point) -> Result<(), FlightError> {
        if !self.params.area.contains(goal) {
            return Err(FlightError::GoalOutOfBounds { goal });
        }
        while self.loc.dist(&goal) > self.params.read_range {
            self.make_move(geometry::bearing(self.loc, goal))?;
        }
        Ok(())
    }

    pub fn mark_unvisited(&mut self, sensor: &Sensor) {
        self.markers.push(SensorMarker {
            location: sensor.location.clone(),
            loc: sensor.loc,
            classification: None,
        });
    }

    /// Take one step as close to `bearing` as the area and the no-fly zones
    /// allow.
    pub fn make_move(&mut self, bearing: f64) -> Result<&Move, FlightError> {
        if self.moves_left < 1 {
            return Err(FlightError::BudgetExhausted {
                budget: self.params.move_budget,
            });
        }
        let (direction, next) = self.choose_heading(bearing)?;

        let idx = self.flight_path.len();
        self.flight_path.push(Move {
            before: self.loc,
            direction,
            after: next,
            sensor: None,
        });
        self.loc = next;
        self.path.push(next);
        self.moves_left -= 1;
        Ok(&self.flight_path[idx])
    }

    fn choose_heading(&self, bearing: f64) -> Result<(i32, Point), FlightError> {
        let area = &self.params.area;
        let mut angle = bearing;
        let mut heading = quantize(angle);
        let mut next = step_heading(self.loc, heading, self.params.step_length);

        if let Some(turn) = area.turn_away(next, angle) {
            let mut attempts = 0;
            loop {
                if attempts == self.params.max_rotations {
                    return Err(self.no_legal_heading(attempts));
                }
                attempts += 1;
                angle = turn.rotate(angle);
                (heading, next) = self.candidate(angle, turn);
                if area.contains(next) {
                    break;
                }
            }
            trace!("boundary: turned {:?} to {} after {} tries", turn, heading, attempts);
        }

        if let Some(obstacle) = first_blocking(&self.obstacles, self.loc, next) {
            let to_obstacle = geometry::bearing(self.loc, obstacle.reference());
            let relative = (angle + 360.0 - to_obstacle) % 360.0;
            let mut turn = if relative > 180.0 {
                Turn::Clockwise
            } else {
                Turn::Anticlockwise
            };
            trace!(
                "{} blocks heading {}, sweeping {:?}",
                obstacle.name.as_deref().unwrap_or("no-fly zone"),
                heading,
                turn
            );

            let mut flipped = false;
            let mut attempts = 0;
            loop {
                if attempts == self.params.max_rotations {
                    return Err(self.no_legal_heading(attempts));
                }
                attempts += 1;
                angle = turn.rotate(angle);
                (heading, next) = self.candidate(angle, turn);
                if !area.contains(next) {
                    // Swept into the boundary: reverse, at most once.
                    if !flipped {
                        turn = turn.flip();
                        flipped = true;
                        attempts = 0;
                    }
                    continue;
                }
                if first_blocking(&self.obstacles, self.loc, next).is_none() {
                    break;
                }
            }
            trace!("obstacle: settled on {} after {} tries", heading, attempts);
        }

        Ok((heading, next))
    }

    /// Quantize and project `angle`, nudging the heading further along the
    /// sweep if that would land on one of the last few positions.
    fn candidate(&self, angle: f64, turn: Turn) -> (i32, Point) {
        let mut heading = quantize(angle);
        let mut next = step_heading(self.loc, heading, self.params.step_length);
        let recent = &self.path[self.path.len().saturating_sub(LOOKBACK)..];
        for p in recent {
            if *p == next {
                heading = turn.rotate_heading(heading, OSCILLATION_NUDGE);
                next = step_heading(self.loc, heading, self.params.step_length);
            }
        }
        (heading, next)
    }

    fn no_legal_heading(&self, attempts: u32) -> FlightError {
        FlightError::NoLegalHeading {
            from: self.loc,
            attempts,
        }
    }
}
