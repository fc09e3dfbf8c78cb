//! Data models for the pogoda agent
//!
//! Everything here lives for a single turn:
//! - Location: values extracted for the city
//! - Date: the requested (month, day)
//! - Weather: current conditions and the rendered report

pub mod date;
pub mod location;
pub mod weather;

pub use date::ResolvedDate;
pub use location::ResolvedLocation;
pub use weather::{Condition, CurrentConditions, WeatherReport};
