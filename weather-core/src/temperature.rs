//! Kelvin is only ever the wire format; everything past the decoder is Celsius.

const ZERO_CELSIUS_IN_KELVIN: f64 = 273.15;

/// A temperature as reported by OpenWeather (Kelvin).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Kelvin(pub f64);

impl Kelvin {
    /// Plain difference to 0ºC, no rounding.
    pub fn celsius(self) -> f64 {
        self.0 - ZERO_CELSIUS_IN_KELVIN
    }

    /// Celsius rounded to two decimals, half away from zero.
    pub fn celsius_rounded(self) -> f64 {
        (self.celsius() * 100.0).round() / 100.0
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    Kelvin(kelvin).celsius_rounded()
}
