use std::fmt;

/// Current weather of a location: a short summary ("Drizzle", "Clear") and
/// the temperature in Celsius, rounded to two decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditions {
    pub summary: String,
    pub temperature_celsius: f64,
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.1}ºC", self.summary, self.temperature_celsius)
    }
}
