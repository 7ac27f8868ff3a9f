//! The linear flow behind a run: load the reference data, resolve the
//! query to a known location, map its coordinates to a grid cell, fetch
//! that cell's forecast.

use tracing::debug;

use crate::config::Settings;
use crate::error::GridcastError;
use crate::locations::LocationsClient;
use crate::model::ForecastPeriod;
use crate::nws::NwsClient;
use crate::resolver::{self, Prompter};

/// Free-text question asked when no query was supplied up front.
pub const QUERY_PROMPT: &str = "What city would you like to know the weather for?";

/// Runs the pipeline to completion and returns the first forecast period.
///
/// Stages run strictly in sequence and any failure is final. The caller
/// owns printing and process exit. When `query` is `None` the prompter is
/// asked for one after the reference data has loaded.
pub async fn run(
    settings: &Settings,
    query: Option<String>,
    prompter: &dyn Prompter,
) -> Result<ForecastPeriod, GridcastError> {
    let http = settings.http_client()?;

    let locations = LocationsClient::new(http.clone(), settings.locations_url.clone());
    let table = locations.fetch_table().await?;

    let query = match query {
        Some(query) => query,
        None => prompter.input(QUERY_PROMPT)?,
    };

    let resolved = resolver::resolve_location(&query, &table, prompter, &settings.matching)?;
    let (latitude, longitude) = table.coordinates_of(&resolved)?;
    debug!("{resolved} sits at ({latitude}, {longitude})");

    let nws = NwsClient::new(http, settings.api_base_url.clone());
    let grid = nws.resolve_grid(latitude, longitude).await?;
    nws.fetch_forecast(&grid).await
}
