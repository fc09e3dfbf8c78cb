//! `pogoda` - ask for the weather in plain Russian
//!
//! This library extracts a city (and optionally a date) from a free-form
//! utterance, looks up current conditions and renders a short report.

pub mod agent;
pub mod config;
pub mod date_resolver;
pub mod error;
pub mod location_resolver;
pub mod logging;
pub mod models;
pub mod nlp;
pub mod weather;

// Re-export core types for public API
pub use agent::WeatherAgent;
pub use config::PogodaConfig;
pub use date_resolver::DateResolver;
pub use error::{PogodaError, ServiceFailure};
pub use location_resolver::LocationExtractor;
pub use models::{ResolvedDate, ResolvedLocation, WeatherReport};
pub use weather::{WeatherApiClient, WeatherProvider, form_response};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, PogodaError>;
