//! Core library for the `gridcast` CLI.
//!
//! This crate defines:
//! - The location reference table and its loader
//! - Fuzzy resolution of free-text queries to known locations
//! - The api.weather.gov client (grid lookup, forecast)
//! - The linear pipeline tying the stages together
//!
//! It is used by `gridcast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod locations;
pub mod model;
pub mod nws;
pub mod pipeline;
pub mod resolver;

pub use config::Settings;
pub use error::GridcastError;
pub use locations::LocationsClient;
pub use model::{ForecastPeriod, GridLocation, LocationRecord, ReferenceTable};
pub use nws::NwsClient;
pub use resolver::{MatchOptions, Prompter};
