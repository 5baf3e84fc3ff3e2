use crate::error::{Result, WeatherError};

/// Turn the raw argument vector (program name included) into one location.
///
/// Tokens are joined with spaces until the first one containing a comma;
/// that token closes the city name and everything after it is glued on
/// without separators as the country code, e.g.
/// `weather Kingston upon Hull, UK` becomes `Kingston upon Hull,UK`.
pub fn parse_location<S: AsRef<str>>(args: &[S]) -> Result<String> {
    if args.len() < 2 {
        return Err(WeatherError::LocationNotProvided);
    }

    let mut city_parts: Vec<&str> = Vec::new();
    let mut country_parts: Vec<&str> = Vec::new();
    let mut in_country = false;

    for arg in &args[1..] {
        let arg = arg.as_ref();
        if in_country {
            country_parts.push(arg);
            continue;
        }
        city_parts.push(arg);
        if arg.contains(',') {
            in_country = true;
        }
    }

    Ok(city_parts.join(" ") + &country_parts.concat())
}
