use serde::{Deserialize, Serialize};

use crate::{geometry::segments_intersect, Point};

/// A no-fly zone. The boundary is closed implicitly, so the last vertex
/// connects back to the first.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Obstacle {
    pub name: Option<String>,
    vertices: Vec<Point>,
    reference: Point,
}

impl Obstacle {
    pub fn new(name: Option<String>, mut vertices: Vec<Point>) -> Self {
        // GeoJSON rings repeat the first vertex at the end.
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        let reference = bounding_box_midpoint(&vertices);
        Obstacle { name, vertices, reference }
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Midpoint of the bounding box. Only used to decide which way to steer
    /// around the obstacle, it is not the centroid.
    pub fn reference(&self) -> Point {
        self.reference
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let next = self.vertices.iter().cycle().skip(1);
        self.vertices.iter().zip(next).map(|(a, b)| (*a, *b))
    }

    /// Does the straight flight from `from` to `to` cross the boundary?
    pub fn blocks(&self, from: Point, to: Point) -> bool {
        self.edges().any(|(a, b)| segments_intersect(from, to, a, b))
    }
}

fn bounding_box_midpoint(vertices: &[Point]) -> Point {
    let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in vertices {
        min_lng = min_lng.min(v.lng);
        max_lng = max_lng.max(v.lng);
        min_lat = min_lat.min(v.lat);
        max_lat = max_lat.max(v.lat);
    }
    Point::new((min_lng + max_lng) / 2.0, (min_lat + max_lat) / 2.0)
}

/// First obstacle, in registry order, that blocks the flight.
pub fn first_blocking(obstacles: &[Obstacle], from: Point, to: Point) -> Option<&Obstacle> {
    obstacles.iter().find(|o| o.blocks(from, to))
}
