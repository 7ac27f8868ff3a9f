use std::collections::HashSet;
use std::fmt;

use crate::error::GridcastError;

/// One row of the location reference dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationRecord {
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Canonical "City, State" string shown to and typed by users.
    pub display_key: String,
}

impl LocationRecord {
    pub fn new(
        city: impl Into<String>,
        state: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let city = city.into();
        let state = state.into();
        let display_key = format!("{city}, {state}");
        Self {
            city,
            state,
            latitude,
            longitude,
            display_key,
        }
    }
}

/// In-memory lookup table built once per run from the locations dataset.
///
/// Construction deduplicates on the (city, state) pair, so at most one
/// record exists per pair and document order is otherwise preserved.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: Vec<LocationRecord>,
    keys: Vec<String>,
}

impl ReferenceTable {
    /// Builds the table, keeping the first record per (city, state) pair
    /// and dropping later duplicates.
    pub fn from_records(records: Vec<LocationRecord>) -> Self {
        let mut seen = HashSet::new();
        let mut kept: Vec<LocationRecord> = Vec::with_capacity(records.len());
        for record in records {
            if seen.insert((record.city.clone(), record.state.clone())) {
                kept.push(record);
            }
        }
        let keys = kept.iter().map(|r| r.display_key.clone()).collect();
        Self { records: kept, keys }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All display keys, in table order. This is the candidate list for
    /// fuzzy matching.
    pub fn display_keys(&self) -> &[String] {
        &self.keys
    }

    /// Exact, case-sensitive membership test for a display key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Coordinates of the single record with this display key.
    ///
    /// Distinct (city, state) pairs can still render to the same display
    /// key, so the lookup counts its matches instead of taking the first.
    pub fn coordinates_of(&self, key: &str) -> Result<(f64, f64), GridcastError> {
        let matched: Vec<&LocationRecord> = self
            .records
            .iter()
            .filter(|r| r.display_key == key)
            .collect();
        match matched.as_slice() {
            [record] => Ok((record.latitude, record.longitude)),
            other => Err(GridcastError::AmbiguousKey {
                key: key.to_owned(),
                count: other.len(),
            }),
        }
    }
}

/// NWS grid cell a forecast is published for: forecast office identifier
/// plus integer grid coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridLocation {
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
}

/// One named window of a gridpoint forecast, e.g. "Tonight". Only the
/// first period of the response is ever used.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPeriod {
    pub name: String,
    pub detailed_forecast: String,
}

impl fmt::Display for ForecastPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.name, self.detailed_forecast)
    }
}
