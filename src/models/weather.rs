//! Current weather conditions and the report shown to the user

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Millibars per millimeter of mercury
pub const MB_PER_MMHG: f64 = 1.333;

/// Current conditions as returned under `current` by the weather API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temp_c: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_kph: f64,
    /// Atmospheric pressure in millibars
    pub pressure_mb: f64,
    pub condition: Condition,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Condition {
    /// Localized description, e.g. "Ясно"
    pub text: String,
}

impl CurrentConditions {
    /// Pressure in mmHg, floored rather than rounded
    #[must_use]
    pub fn pressure_mmhg(&self) -> f64 {
        (self.pressure_mb / MB_PER_MMHG).floor()
    }
}

/// Rendered answer for one city
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub current: CurrentConditions,
}

impl WeatherReport {
    #[must_use]
    pub fn new(city: impl Into<String>, current: CurrentConditions) -> Self {
        Self {
            city: city.into(),
            current,
        }
    }
}

impl Display for WeatherReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = &self.current;
        writeln!(f, "Сейчас в городе {}:", self.city)?;
        writeln!(f, "температура: {} C", current.temp_c)?;
        writeln!(f, "влажность: {} %", current.humidity)?;
        writeln!(f, "скорость ветра: {} км/ч", current.wind_kph)?;
        writeln!(f, "давление: {} мм", current.pressure_mmhg())?;
        write!(f, "{}", current.condition.text)
    }
}
