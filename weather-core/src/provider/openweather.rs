use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{fmt, io::Read};

use crate::{
    error::{Result, WeatherError},
    model::Conditions,
    temperature::Kelvin,
};

use super::WeatherClient;

/// Current-weather endpoint of the OpenWeather API.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// HTTP-backed client for OpenWeather's current-weather endpoint.
///
/// Every client owns its transport; nothing is shared across instances.
#[derive(Clone)]
pub struct OpenWeatherClient {
    token: String,
    base_url: String,
    http: Client,
}

impl fmt::Debug for OpenWeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenWeatherClient")
            .field("token", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenWeatherClient {
    /// Client bound to [`DEFAULT_BASE_URL`] with a fresh `reqwest::Client`.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(WeatherError::MissingToken);
        }

        Ok(Self {
            token,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: Client::new(),
        })
    }

    /// Point the client at another endpoint, e.g. a local test server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replace the transport. Deadlines and proxies are configured here.
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn format_url(&self, location: &str) -> String {
        format_url(&self.base_url, location, &self.token)
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn current(&self, location: &str) -> Result<Conditions> {
        let url = self.format_url(location);

        // The URL carries the token; keep it out of error messages.
        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(WeatherError::Http(status.to_string()));
        }

        // A current-weather document is well under a kilobyte, so the body is
        // collected before decoding. Dropping `res` on any early return
        // releases the connection.
        let body = res.bytes().await.map_err(reqwest::Error::without_url)?;
        parse_json(&body[..])
    }
}

/// `{base_url}?q={location}&appid={token}` with the location query-escaped.
///
/// The token goes out verbatim.
pub fn format_url(base_url: &str, location: &str, token: &str) -> String {
    format!("{base_url}?q={}&appid={token}", query_escape(location))
}

/// Form-style escaping: unreserved characters stay, space becomes `+`,
/// everything else is percent-encoded byte by byte.
pub fn query_escape(value: &str) -> String {
    // `encode` never emits a literal '%' that isn't an escape, so the only
    // "%20" sequences are spaces.
    urlencoding::encode(value).replace("%20", "+")
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
}

#[derive(Debug, Default, Deserialize)]
struct OwMain {
    #[serde(default)]
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    weather: Option<Vec<OwWeather>>,
    #[serde(default)]
    main: OwMain,
}

/// Decode an OpenWeather current-weather document into [`Conditions`].
///
/// Only `weather[0].main` and `main.temp` are read; unknown fields are ignored.
pub fn parse_json<R: Read>(reader: R) -> Result<Conditions> {
    let response: OwCurrentResponse = serde_json::from_reader(reader)?;

    let summary = response
        .weather
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|w| w.main)
        .filter(|main| !main.is_empty())
        .ok_or(WeatherError::MissingWeatherData)?;

    Ok(Conditions {
        summary,
        temperature_celsius: Kelvin(response.main.temp).celsius_rounded(),
    })
}
