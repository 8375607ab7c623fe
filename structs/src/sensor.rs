use serde::{Deserialize, Serialize};

use crate::{Located, Point};

/// Below this battery percentage a sensor's reading is not trusted.
pub const LOW_BATTERY: f64 = 10.0;
pub const MAX_READING: f64 = 256.0;
pub const BAND_WIDTH: f64 = 32.0;

/// A raw reading as served: a number, a numeric string, or one of the
/// sentinels `"null"` / `"NaN"` / JSON null.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<RawReading>")]
pub enum Reading {
    Value(f64),
    Missing,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawReading {
    Number(f64),
    Text(String),
}

impl From<Option<RawReading>> for Reading {
    fn from(raw: Option<RawReading>) -> Self {
        let value = match raw {
            Some(RawReading::Number(x)) => Some(x),
            Some(RawReading::Text(s)) => s.trim().parse::<f64>().ok(),
            None => None,
        };
        match value {
            Some(x) if x.is_finite() => Reading::Value(x),
            _ => Reading::Missing,
        }
    }
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Value(x) => Some(*x),
            Reading::Missing => None,
        }
    }
}

/// A sensor entry as listed for a survey date, before its location code has
/// been resolved to coordinates.
#[derive(Clone, Debug, Deserialize)]
pub struct SensorRecord {
    pub location: String,
    pub battery: f64,
    pub reading: Reading,
}

impl SensorRecord {
    pub fn locate(self, loc: Point) -> Sensor {
        Sensor {
            location: self.location,
            battery: self.battery,
            reading: self.reading,
            loc,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Sensor {
    pub location: String,
    pub battery: f64,
    pub reading: Reading,
    pub loc: Point,
}

impl Located for Sensor {
    fn loc(&self) -> Point {
        self.loc
    }
}

/// What a sensor read on arrival says about the air.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Reading band `0..=7`, each [`BAND_WIDTH`] wide. Bands 0 to 3 are the
    /// safe family, 4 to 7 the dangerous one.
    Band(u8),
    /// Flat battery or a reading that cannot be trusted.
    Fault,
}

impl Classification {
    pub const FAULT_ORDINAL: u8 = 8;

    pub fn ordinal(self) -> u8 {
        match self {
            Classification::Band(b) => b,
            Classification::Fault => Self::FAULT_ORDINAL,
        }
    }

    pub fn is_dangerous(self) -> bool {
        matches!(self, Classification::Band(b) if b >= 4)
    }
}

impl Sensor {
    pub fn classify(&self) -> Classification {
        if self.battery < LOW_BATTERY {
            return Classification::Fault;
        }
        match self.reading.value() {
            Some(x) if (0.0..=MAX_READING).contains(&x) => {
                // 256 itself falls in the top band.
                Classification::Band(((x / BAND_WIDTH) as u8).min(7))
            }
            _ => Classification::Fault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(battery: f64, reading: Reading) -> Sensor {
        SensorRecord {
            location: "slips.mass.baking".to_string(),
            battery,
            reading,
        }
        .locate(Point::new(-3.1878, 55.9444))
    }

    #[test]
    fn parses_served_readings() {
        let records: Vec<SensorRecord> = serde_json::from_str(
            r#"[
                {"location": "a.b.c", "battery": 52.3, "reading": "170.4"},
                {"location": "d.e.f", "battery": 9.1, "reading": "NaN"},
                {"location": "g.h.i", "battery": 80.0, "reading": "null"},
                {"location": "j.k.l", "battery": 80.0, "reading": null},
                {"location": "m.n.o", "battery": 80.0, "reading": 31.5},
                {"location": "p.q.r", "battery": 80.0, "reading": "gibberish"}
            ]"#,
        )
        .unwrap();
        let readings = records.iter().map(|r| r.reading).collect::<Vec<_>>();
        assert_eq!(
            readings,
            vec![
                Reading::Value(170.4),
                Reading::Missing,
                Reading::Missing,
                Reading::Missing,
                Reading::Value(31.5),
                Reading::Missing,
            ]
        );
    }

    #[test]
    fn bands_follow_reading() {
        let cases = [
            (0.0, 0),
            (31.9, 0),
            (32.0, 1),
            (95.0, 2),
            (127.9, 3),
            (128.0, 4),
            (170.4, 5),
            (200.0, 6),
            (255.9, 7),
            (256.0, 7),
        ];
        for (value, band) in cases {
            let c = sensor(50.0, Reading::Value(value)).classify();
            assert_eq!(c, Classification::Band(band), "reading {}", value);
            assert_eq!(c.ordinal(), band);
        }
        assert!(!sensor(50.0, Reading::Value(127.0)).classify().is_dangerous());
        assert!(sensor(50.0, Reading::Value(128.0)).classify().is_dangerous());
    }

    #[test]
    fn untrusted_readings_are_faults() {
        assert_eq!(sensor(9.9, Reading::Value(50.0)).classify(), Classification::Fault);
        assert_eq!(sensor(50.0, Reading::Value(-0.1)).classify(), Classification::Fault);
        assert_eq!(sensor(50.0, Reading::Value(256.1)).classify(), Classification::Fault);
        assert_eq!(sensor(50.0, Reading::Missing).classify(), Classification::Fault);
        assert_eq!(Classification::Fault.ordinal(), 8);
        // the battery cut-off is strict
        assert_eq!(sensor(10.0, Reading::Value(50.0)).classify(), Classification::Band(1));
    }
}
