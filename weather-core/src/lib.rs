//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The OpenWeather client (URL building, HTTP round trip, JSON decoding)
//! - The [`WeatherClient`] abstraction the CLI driver depends on
//! - Argument-to-location parsing and the CLI driver itself
//! - Configuration & credentials handling
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod args;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod runner;
pub mod temperature;

pub use args::parse_location;
pub use config::Config;
pub use error::WeatherError;
pub use model::Conditions;
pub use provider::{
    WeatherClient,
    openweather::{DEFAULT_BASE_URL, OpenWeatherClient, format_url, parse_json},
};
pub use runner::run_cli;
pub use temperature::{Kelvin, kelvin_to_celsius};
