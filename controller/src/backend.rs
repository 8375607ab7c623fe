use std::{
    fmt,
    path::{Path, PathBuf},
};

use aqmap_structs::{
    geojson::{FeatureCollection, Geometry},
    DroneParams, Obstacle, Point, Sensor, SensorRecord,
};
use log::{debug, warn};
use serde::{de::DeserializeOwned, Deserialize};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Location codes are exactly three dot-separated words.
    #[error("'{0}' is not a word.word.word location code")]
    BadLocation(String),

    #[error("invalid survey date {0}")]
    BadDate(String),
}

impl SourceError {
    /// The server has nothing at the requested path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }

    /// The request itself was malformed, so retrying cannot help.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadLocation(_) | Self::BadDate(_))
    }
}

/// The day a set of sensor readings was collected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurveyDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl SurveyDate {
    pub fn new(day: u8, month: u8, year: u16) -> Result<Self, SourceError> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(SourceError::BadDate(format!("{:02}-{:02}-{:04}", day, month, year)));
        }
        Ok(SurveyDate { year, month, day })
    }

    /// Parse command line style fields. Single digit days and months are fine.
    pub fn parse(day: &str, month: &str, year: &str) -> Result<Self, SourceError> {
        let bad = || SourceError::BadDate(format!("{}-{}-{}", day, month, year));
        Self::new(
            day.trim().parse().map_err(|_| bad())?,
            month.trim().parse().map_err(|_| bad())?,
            year.trim().parse().map_err(|_| bad())?,
        )
    }
}

/// `DD-MM-YYYY`, as used in output file names.
impl fmt::Display for SurveyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

/// Where sensor lists, no-fly zones and location codes come from.
pub trait MapSource {
    fn sensors(&self, date: SurveyDate) -> Result<Vec<SensorRecord>, SourceError>;
    fn no_fly_zones(&self) -> Result<Vec<Obstacle>, SourceError>;
    fn locate(&self, words: &str) -> Result<Point, SourceError>;
}

/// Fetch the sensors for `date` and resolve each location code.
pub fn load_sensors(source: &dyn MapSource, date: SurveyDate) -> Result<Vec<Sensor>, SourceError> {
    let records = source.sensors(date)?;
    debug!("{} sensors listed for {}", records.len(), date);
    records
        .into_iter()
        .map(|record| {
            let loc = source.locate(&record.location)?;
            Ok(record.locate(loc))
        })
        .collect()
}

pub fn split_location(words: &str) -> Result<[&str; 3], SourceError> {
    let bad = || SourceError::BadLocation(words.to_string());
    let mut parts = words.split('.');
    let mut next = || {
        parts
            .next()
            .filter(|w| !w.is_empty() && w.chars().all(char::is_alphanumeric))
            .ok_or_else(bad)
    };
    let split = [next()?, next()?, next()?];
    if parts.next().is_some() {
        return Err(bad());
    }
    Ok(split)
}

/// Drone parameters from a JSON file. Fields left out keep their defaults.
pub fn read_params(path: &Path) -> Result<DroneParams, SourceError> {
    let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Deserialize)]
struct WordsDetails {
    coordinates: Point,
}

/// A [`MapSource`] reading a directory laid out like the survey web server:
///
/// ```text
/// maps/YYYY/MM/DD/air-quality-data.json
/// buildings/no-fly-zones.geojson
/// words/W1/W2/W3/details.json
/// ```
pub struct FileServer {
    root: PathBuf,
}

impl FileServer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileServer { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every date that has a sensor list, earliest first.
    pub fn dates(&self) -> Result<Vec<SurveyDate>, SourceError> {
        let mut dates = Vec::new();
        for (year, year_dir) in self.numbered_dirs(&self.root.join("maps"))? {
            for (month, month_dir) in self.numbered_dirs(&year_dir)? {
                for (day, day_dir) in self.numbered_dirs(&month_dir)? {
                    if !day_dir.join("air-quality-data.json").is_file() {
                        continue;
                    }
                    let (Ok(year), Ok(month), Ok(day)) =
                        (u16::try_from(year), u8::try_from(month), u8::try_from(day))
                    else {
                        continue;
                    };
                    if let Ok(date) = SurveyDate::new(day, month, year) {
                        dates.push(date);
                    }
                }
            }
        }
        dates.sort();
        Ok(dates)
    }

    fn numbered_dirs(&self, dir: &Path) -> Result<Vec<(u32, PathBuf)>, SourceError> {
        let entries = std::fs::read_dir(dir).map_err(|source| SourceError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        Ok(entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .filter_map(|e| {
                let n = e.file_name().to_str()?.parse::<u32>().ok()?;
                Some((n, e.path()))
            })
            .collect())
    }

    fn read_json<T: DeserializeOwned>(&self, relative: impl AsRef<Path>) -> Result<T, SourceError> {
        let path = self.root.join(relative);
        let text = std::fs::read_to_string(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SourceError::Parse { path, source })
    }
}

impl MapSource for FileServer {
    fn sensors(&self, date: SurveyDate) -> Result<Vec<SensorRecord>, SourceError> {
        self.read_json(format!(
            "maps/{:04}/{:02}/{:02}/air-quality-data.json",
            date.year, date.month, date.day
        ))
    }

    fn no_fly_zones(&self) -> Result<Vec<Obstacle>, SourceError> {
        let collection: FeatureCollection = self.read_json("buildings/no-fly-zones.geojson")?;
        let mut obstacles = Vec::new();
        for feature in collection.features {
            let name = feature.property_str("name").map(str::to_string);
            match feature.geometry {
                Geometry::Polygon { coordinates } if !coordinates.is_empty() => {
                    let outer = coordinates[0].iter().copied().map(Point::from).collect();
                    obstacles.push(Obstacle::new(name, outer));
                }
                other => warn!("ignoring no-fly zone {:?} with geometry {:?}", name, other),
            }
        }
        debug!("{} no-fly zones", obstacles.len());
        Ok(obstacles)
    }

    fn locate(&self, words: &str) -> Result<Point, SourceError> {
        let [w1, w2, w3] = split_location(words)?;
        let details: WordsDetails = self.read_json(format!("words/{}/{}/{}/details.json", w1, w2, w3))?;
        Ok(details.coordinates)
    }
}
