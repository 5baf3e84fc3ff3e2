use crate::{error::Result, model::Conditions};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Anything that can report the current conditions of a location.
///
/// The CLI driver only depends on this, so tests can hand it a stub instead
/// of the HTTP-backed [`openweather::OpenWeatherClient`].
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    async fn current(&self, location: &str) -> Result<Conditions>;
}

#[async_trait]
impl<T: WeatherClient + ?Sized> WeatherClient for Box<T> {
    async fn current(&self, location: &str) -> Result<Conditions> {
        (**self).current(location).await
    }
}
