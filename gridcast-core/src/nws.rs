use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::GridcastError;
use crate::model::{ForecastPeriod, GridLocation};

/// Production National Weather Service API. Tests point the client at a
/// mock server instead.
pub const DEFAULT_API_BASE_URL: &str = "https://api.weather.gov";

/// Client for the two api.weather.gov lookups the pipeline performs:
/// coordinates to grid cell, grid cell to forecast.
#[derive(Debug, Clone)]
pub struct NwsClient {
    http: Client,
    base_url: String,
}

impl NwsClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Maps coordinates to the grid cell forecasts are published for.
    ///
    /// One GET to `/points/{lat},{lon}`. A non-success status comes back as
    /// an `Api` failure carrying the raw body for the caller's log.
    pub async fn resolve_grid(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<GridLocation, GridcastError> {
        let url = format!("{}/points/{},{}", self.base_url, latitude, longitude);
        debug!("resolving grid cell via {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GridcastError::Api {
                endpoint: "points",
                status,
                body,
            });
        }

        let parsed: PointsResponse =
            serde_json::from_str(&body).map_err(|e| GridcastError::Parse {
                endpoint: "points",
                detail: e.to_string(),
            })?;

        Ok(GridLocation {
            grid_id: parsed.properties.grid_id,
            grid_x: parsed.properties.grid_x,
            grid_y: parsed.properties.grid_y,
        })
    }

    /// Fetches the forecast for a grid cell and returns its first period.
    pub async fn fetch_forecast(
        &self,
        grid: &GridLocation,
    ) -> Result<ForecastPeriod, GridcastError> {
        let url = format!(
            "{}/gridpoints/{}/{},{}/forecast",
            self.base_url, grid.grid_id, grid.grid_x, grid.grid_y
        );
        debug!("fetching forecast via {url}");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(GridcastError::Api {
                endpoint: "forecast",
                status,
                body,
            });
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(|e| GridcastError::Parse {
                endpoint: "forecast",
                detail: e.to_string(),
            })?;

        let first = parsed
            .properties
            .periods
            .into_iter()
            .next()
            .ok_or_else(|| GridcastError::Parse {
                endpoint: "forecast",
                detail: "no forecast periods in response".to_string(),
            })?;

        Ok(ForecastPeriod {
            name: first.name,
            detailed_forecast: first.detailed_forecast,
        })
    }
}

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    #[serde(rename = "gridId")]
    grid_id: String,
    #[serde(rename = "gridX")]
    grid_x: i64,
    #[serde(rename = "gridY")]
    grid_y: i64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<PeriodBody>,
}

#[derive(Debug, Deserialize)]
struct PeriodBody {
    name: String,
    #[serde(rename = "detailedForecast")]
    detailed_forecast: String,
}
