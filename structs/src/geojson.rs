//! The small part of GeoJSON that the survey reads and writes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::Point;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureCollectionType {
    #[default]
    FeatureCollection,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureType {
    #[default]
    Feature,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    LineString { coordinates: Vec<[f64; 2]> },
    /// Outer ring first, then holes.
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: FeatureType,
    pub geometry: Geometry,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub properties: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: FeatureCollectionType,
    pub features: Vec<Feature>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<Map<String, Value>, D::Error> {
    Ok(Option::<Map<String, Value>>::deserialize(d)?.unwrap_or_default())
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Feature {
            kind: FeatureType::Feature,
            geometry,
            properties: Map::new(),
        }
    }

    pub fn point(p: Point) -> Self {
        Self::new(Geometry::Point { coordinates: p.lng_lat() })
    }

    pub fn line_string(points: &[Point]) -> Self {
        Self::new(Geometry::LineString {
            coordinates: points.iter().map(Point::lng_lat).collect(),
        })
    }

    pub fn with_property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.insert(key.to_string(), Value::String(value.into()));
        self
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureCollection {
            kind: FeatureCollectionType::FeatureCollection,
            features,
        }
    }
}
