use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::GridcastError;
use crate::model::{LocationRecord, ReferenceTable};

/// Default source of the reference dataset: a public city/state/coordinate
/// listing of US cities.
pub const DEFAULT_LOCATIONS_URL: &str =
    "https://raw.githubusercontent.com/sjlu/cities/master/locations.json";

/// Fetches the location reference dataset and builds the lookup table.
#[derive(Debug, Clone)]
pub struct LocationsClient {
    http: Client,
    url: String,
}

impl LocationsClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Downloads and parses the dataset. Transport, status and decoding
    /// failures all report as `DataUnavailable`.
    pub async fn fetch_table(&self) -> Result<ReferenceTable, GridcastError> {
        debug!("fetching locations dataset from {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GridcastError::DataUnavailable(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            GridcastError::DataUnavailable(format!("reading response failed: {e}"))
        })?;

        if !status.is_success() {
            return Err(GridcastError::DataUnavailable(format!(
                "{} returned status {status}",
                self.url
            )));
        }

        let raw: Vec<RawRecord> = serde_json::from_str(&body)
            .map_err(|e| GridcastError::DataUnavailable(format!("invalid dataset JSON: {e}")))?;

        let table = ReferenceTable::from_records(
            raw.into_iter()
                .map(|r| LocationRecord::new(r.city, r.state, r.latitude, r.longitude))
                .collect(),
        );

        debug!("reference table holds {} locations", table.len());
        Ok(table)
    }
}

/// Wire shape of one dataset entry. The upstream document carries extra
/// fields (population, growth rank and so on) that are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    city: String,
    state: String,
    latitude: f64,
    longitude: f64,
}
