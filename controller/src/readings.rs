//! The two files a survey flight leaves behind: the readings map and the
//! flight path log.

use std::io::Write;

use aqmap_structs::{
    geojson::{Feature, FeatureCollection},
    Classification, Move, SensorMarker,
};
use serde::Serialize;

use crate::{backend::SurveyDate, mission::FlightReport};

const BAND_COLORS: [&str; 8] = [
    "#00ff00", "#40ff00", "#80ff00", "#c0ff00", "#ffc000", "#ff8000", "#ff4000", "#ff0000",
];

/// Marker color and symbol for a sensor on the readings map.
pub fn marker_style(classification: Option<Classification>) -> (&'static str, &'static str) {
    match classification {
        None => ("#aaaaaa", ""),
        Some(Classification::Fault) => ("#000000", "cross"),
        Some(c @ Classification::Band(b)) => {
            let color = BAND_COLORS[usize::from(b.min(7))];
            (color, if c.is_dangerous() { "danger" } else { "lighthouse" })
        }
    }
}

fn marker_feature(marker: &SensorMarker) -> Feature {
    let (color, symbol) = marker_style(marker.classification);
    Feature::point(marker.loc)
        .with_property("location", marker.location.as_str())
        .with_property("rgb-string", color)
        .with_property("marker-color", color)
        .with_property("marker-symbol", symbol)
}

/// One marker per sensor, then the path flown.
pub fn readings(report: &FlightReport) -> FeatureCollection {
    let mut features = report.markers.iter().map(marker_feature).collect::<Vec<_>>();
    features.push(Feature::line_string(&report.path));
    FeatureCollection::new(features)
}

pub fn write_readings(out: impl Write, report: &FlightReport) -> serde_json::Result<()> {
    serde_json::to_writer(out, &readings(report))
}

#[derive(Serialize)]
struct FlightPathRow<'a> {
    seq: usize,
    before_lng: f64,
    before_lat: f64,
    direction: i32,
    after_lng: f64,
    after_lat: f64,
    location: &'a str,
}

/// One line per move, numbered from 1. The last field is the location code
/// of the sensor read on that move, or `null`.
pub fn write_flight_path(out: impl Write, moves: &[Move]) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    for (idx, m) in moves.iter().enumerate() {
        writer.serialize(FlightPathRow {
            seq: idx + 1,
            before_lng: m.before.lng,
            before_lat: m.before.lat,
            direction: m.direction,
            after_lng: m.after.lng,
            after_lat: m.after.lat,
            location: m.sensor.as_deref().unwrap_or("null"),
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn readings_filename(date: SurveyDate) -> String {
    format!("readings-{}.geojson", date)
}

pub fn flight_path_filename(date: SurveyDate) -> String {
    format!("flightpath-{}.txt", date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mission::Outcome;
    use aqmap_structs::{geojson::Geometry, Point};

    fn report() -> FlightReport {
        let start = Point::new(-3.1878, 55.9444);
        let mid = Point::new(-3.1875, 55.9444);
        let end = Point::new(-3.1872, 55.9444);
        let marker = |location: &str, classification| SensorMarker {
            location: location.to_string(),
            loc: Point::new(-3.1871, 55.9445),
            classification,
        };
        FlightReport {
            start,
            path: vec![start, mid, end],
            moves: vec![
                Move { before: start, direction: 0, after: mid, sensor: None },
                Move { before: mid, direction: 0, after: end, sensor: Some("slips.mass.baking".to_string()) },
            ],
            markers: vec![
                marker("slips.mass.baking", Some(Classification::Band(5))),
                marker("never.got.there", None),
            ],
            moves_used: 2,
            outcome: Outcome::Completed,
        }
    }

    #[test]
    fn marker_styles() {
        assert_eq!(marker_style(Some(Classification::Band(0))), ("#00ff00", "lighthouse"));
        assert_eq!(marker_style(Some(Classification::Band(3))), ("#c0ff00", "lighthouse"));
        assert_eq!(marker_style(Some(Classification::Band(4))), ("#ffc000", "danger"));
        assert_eq!(marker_style(Some(Classification::Band(7))), ("#ff0000", "danger"));
        assert_eq!(marker_style(Some(Classification::Fault)), ("#000000", "cross"));
        assert_eq!(marker_style(None), ("#aaaaaa", ""));
    }

    #[test]
    fn readings_map() {
        let fc = readings(&report());
        assert_eq!(fc.features.len(), 3);

        let read = &fc.features[0];
        assert_eq!(read.property_str("location"), Some("slips.mass.baking"));
        assert_eq!(read.property_str("marker-color"), Some("#ff8000"));
        assert_eq!(read.property_str("rgb-string"), Some("#ff8000"));
        assert_eq!(read.property_str("marker-symbol"), Some("danger"));

        assert_eq!(fc.features[1].property_str("marker-symbol"), Some(""));
        assert!(matches!(
            &fc.features[2].geometry,
            Geometry::LineString { coordinates } if coordinates.len() == 3
        ));

        let mut out = Vec::new();
        write_readings(&mut out, &report()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["geometry"]["coordinates"][0], -3.1871);
        assert_eq!(json["features"][2]["geometry"]["type"], "LineString");
    }

    #[test]
    fn flight_path_log() {
        let mut out = Vec::new();
        write_flight_path(&mut out, &report().moves).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "1,-3.1878,55.9444,0,-3.1875,55.9444,null",
                "2,-3.1875,55.9444,0,-3.1872,55.9444,slips.mass.baking",
            ]
        );
    }

    #[test]
    fn file_names() {
        let date = SurveyDate::new(5, 3, 2020).unwrap();
        assert_eq!(readings_filename(date), "readings-05-03-2020.geojson");
        assert_eq!(flight_path_filename(date), "flightpath-05-03-2020.txt");
    }
}
