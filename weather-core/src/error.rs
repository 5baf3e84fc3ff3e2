use thiserror::Error;

/// Everything that can go wrong between reading the arguments and printing
/// the conditions. Nothing is recovered locally; the CLI driver reports it.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("missing api token")]
    MissingToken,

    #[error("location not provided")]
    LocationNotProvided,

    /// DNS, connect, TLS or timeout failure inside the HTTP layer.
    #[error("{}", source_chain(.0))]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with something other than `200 OK`; holds the status line.
    #[error("{0}")]
    Http(String),

    #[error("{0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("invalid response: missing weather data")]
    MissingWeatherData,
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

/// `err` followed by each of its sources, joined with ": ".
///
/// reqwest keeps the useful part (refused, DNS, TLS) in the source chain.
fn source_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.ends_with(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
