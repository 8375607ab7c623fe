use aqmap_structs::{
    geometry::segments_intersect, Area, Classification, DroneParams, Obstacle, Point, Reading, Sensor,
    SensorRecord,
};

use crate::{Drone, FlightError, FlightState};

fn sensor(location: &str, loc: Point, reading: f64) -> Sensor {
    SensorRecord {
        location: location.to_string(),
        battery: 90.0,
        reading: Reading::Value(reading),
    }
    .locate(loc)
}

fn rectangle(west: f64, east: f64, south: f64, north: f64) -> Obstacle {
    Obstacle::new(
        Some("block".to_string()),
        vec![
            Point::new(west, south),
            Point::new(east, south),
            Point::new(east, north),
            Point::new(west, north),
        ],
    )
}

fn assert_legal_flight(drone: &Drone) {
    let area = drone.params().area;
    for m in drone.flight_path() {
        assert!(area.contains(m.after), "left the area at {}", m.after);
        for o in drone.obstacles() {
            for (a, b) in o.edges() {
                assert!(
                    !segments_intersect(m.before, m.after, a, b),
                    "move {:?} crosses a no-fly zone",
                    m
                );
            }
        }
        assert_eq!(m.direction % 10, 0);
        assert!((m.before.dist(&m.after) - drone.params().step_length).abs() < 1e-12);
    }
    assert_eq!(drone.flight_path().len() as u32, drone.moves_used());
    assert_eq!(drone.path().len(), drone.flight_path().len() + 1);
}

#[test]
fn reads_sensor_in_open_area() {
    let _ = env_logger::try_init();
    let start = Point::new(-3.1878, 55.9444);
    let s = sensor("slips.mass.baking", Point::new(-3.1868, 55.9448), 170.4);
    let mut drone = Drone::new(start, DroneParams::default(), vec![]);

    let classification = drone.visit_sensor(&s).unwrap();
    assert_eq!(classification, Classification::Band(5));
    assert!(drone.loc().dist(&s.loc) <= drone.params().read_range);
    assert_legal_flight(&drone);

    let annotated = drone.flight_path().iter().filter(|m| m.sensor.is_some()).collect::<Vec<_>>();
    assert_eq!(annotated.len(), 1);
    assert_eq!(drone.flight_path().last().unwrap().sensor.as_deref(), Some("slips.mass.baking"));
    assert_eq!(drone.markers().len(), 1);
    assert!(drone.markers()[0].visited());

    drone.return_to(start).unwrap();
    assert!(drone.loc().dist(&start) <= drone.params().read_range);
    assert_legal_flight(&drone);
    // Reading is recorded once, coming home adds no annotations.
    assert_eq!(drone.flight_path().iter().filter(|m| m.sensor.is_some()).count(), 1);
}

#[test]
fn every_move_costs_exactly_one() {
    let mut drone = Drone::new(Point::new(-3.1878, 55.9444), DroneParams::default(), vec![]);
    let mut left = drone.moves_left();
    for bearing in [0.0, 45.0, 93.0, 181.0, 275.5] {
        drone.make_move(bearing).unwrap();
        assert_eq!(drone.moves_left(), left - 1);
        left = drone.moves_left();
    }
    assert_eq!(drone.moves_used(), 5);
    assert_eq!(drone.flight_path()[2].direction, 90);
    assert_eq!(drone.flight_path()[4].direction, 280);
}

#[test]
fn slides_along_northern_edge() {
    let area = Area::default();
    let start = Point::new(-3.1878, area.north - 0.0001);

    let mut drone = Drone::new(start, DroneParams::default(), vec![]);
    let m = drone.make_move(80.0).unwrap().clone();
    assert_eq!(m.direction, 10);
    assert!(area.contains(m.after));

    let mut drone = Drone::new(start, DroneParams::default(), vec![]);
    let m = drone.make_move(100.0).unwrap().clone();
    assert_eq!(m.direction, 170);
    assert!(area.contains(m.after));
}

#[test]
fn sensor_outside_area_is_refused() {
    let area = Area::default();
    let start = Point::new(-3.1878, 55.9444);
    let outside = sensor("off.the.map", Point::new(-3.1878, area.north + 0.0001), 10.0);
    let mut drone = Drone::new(start, DroneParams::default(), vec![]);

    let err = drone.visit_sensor(&outside).unwrap_err();
    assert!(matches!(err, FlightError::GoalOutOfBounds { .. }));
    assert!(err.is_unreachable());
    assert_eq!(drone.moves_used(), 0);
    assert!(drone.markers().is_empty());
    assert_eq!(drone.loc(), start);
}

#[test]
fn flies_around_block_in_the_way() {
    let _ = env_logger::try_init();
    let start = Point::new(-3.1900, 55.9440);
    let s = sensor("behind.the.block", Point::new(-3.1870, 55.9440), 40.0);
    let block = rectangle(-3.18875, -3.18825, 55.9436, 55.9446);
    assert!(block.blocks(start, s.loc));

    let mut drone = Drone::new(start, DroneParams::default(), vec![block]);
    drone.visit_sensor(&s).unwrap();

    assert_legal_flight(&drone);
    assert!(drone.flight_path().iter().any(|m| m.direction != 0));
    assert_eq!(drone.markers()[0].classification, Some(Classification::Band(1)));
    // Straight through would have taken 10 moves.
    assert!(drone.moves_used() > 10);
}

#[test]
fn runs_out_of_moves_before_first_sensor() {
    let start = Point::new(-3.1900, 55.9440);
    // 10 steps away, only 5 allowed
    let s = sensor("too.far.away", Point::new(-3.1870, 55.9440), 40.0);
    let params = DroneParams {
        move_budget: 5,
        ..Default::default()
    };
    let mut drone = Drone::new(start, params, vec![]);

    let err = drone.visit_sensor(&s).unwrap_err();
    assert_eq!(err, FlightError::BudgetExhausted { budget: 5 });
    assert_eq!(drone.moves_left(), 0);
    assert_eq!(drone.state(), FlightState::Exhausted);
    assert!(drone.markers().is_empty());
    assert!(drone.flight_path().iter().all(|m| m.sensor.is_none()));

    // Exhaustion is permanent.
    assert!(drone.make_move(0.0).unwrap_err().is_budget_exhausted());
    assert_eq!(drone.flight_path().len(), 5);
}

#[test]
fn boxed_in_drone_gives_up() {
    let start = Point::new(-3.1878, 55.9444);
    let cage = rectangle(-3.1879, -3.1877, 55.9443, 55.9445);
    let mut drone = Drone::new(start, DroneParams::default(), vec![cage]);

    let err = drone.make_move(0.0).unwrap_err();
    assert!(matches!(err, FlightError::NoLegalHeading { attempts: 36, .. }));
    assert_eq!(drone.moves_used(), 0);
    assert_eq!(drone.state(), FlightState::Flying);
}

#[test]
fn unvisited_sensors_keep_their_place_on_the_map() {
    let mut drone = Drone::new(Point::new(-3.1878, 55.9444), DroneParams::default(), vec![]);
    let s = sensor("never.got.there", Point::new(-3.1868, 55.9448), 40.0);
    drone.mark_unvisited(&s);
    assert_eq!(drone.markers().len(), 1);
    assert!(!drone.markers()[0].visited());
    assert_eq!(drone.markers()[0].loc, s.loc);
}

#[test]
fn reverses_sweep_when_detour_hits_the_edge() {
    let _ = env_logger::try_init();
    let area = Area::default();
    let start = Point::new(-3.18895, area.north - 0.0001);
    // Hugs the northern edge, so going round to the north is impossible.
    let block = rectangle(-3.18885, -3.18860, area.north - 0.0009, area.north - 0.00005);
    assert!(block.blocks(start, Point::new(start.lng + 0.0003, start.lat)));

    let mut drone = Drone::new(start, DroneParams::default(), vec![block]);
    let m = drone.make_move(0.0).unwrap().clone();

    // Anticlockwise runs out of the area at 20, the sweep turns back and
    // settles under the block.
    assert_eq!(m.direction, 280);
    assert_legal_flight(&drone);
}

#[test]
fn edge_slide_does_not_step_back_onto_recent_position() {
    let area = Area::default();
    let start = Point::new(-3.1878, area.north - 0.00004);

    let mut drone = Drone::new(start, DroneParams::default(), vec![]);
    assert_eq!(drone.make_move(180.0).unwrap().direction, 180);
    let here = drone.loc();

    // Sliding clockwise off the edge would stop at 0, straight back to the
    // start; three more increments clockwise instead.
    let m = drone.make_move(80.0).unwrap().clone();
    assert_eq!(m.direction, 330);
    assert_ne!(m.after, start);
    assert_legal_flight(&drone);

    let mut fresh = Drone::new(here, DroneParams::default(), vec![]);
    assert_eq!(fresh.make_move(80.0).unwrap().direction, 0);
}
