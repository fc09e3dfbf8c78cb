//! Error types and handling for the `pogoda` agent

use std::fmt;

use thiserror::Error;

/// Which side of the weather service call went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceFailure {
    /// The HTTP call itself failed: connection, timeout, undecodable body
    Request,
    /// The call succeeded but the payload lacks the expected fields
    Response,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceFailure::Request => write!(f, "Request Error"),
            ServiceFailure::Response => write!(f, "Response Error"),
        }
    }
}

/// Main error type for the `pogoda` agent
#[derive(Error, Debug)]
pub enum PogodaError {
    /// No location was recognized in the utterance
    #[error("Location Extractor Error")]
    LocationExtraction,

    /// No date was recognized in the utterance
    #[error("Dates Extractor Error")]
    DateExtraction,

    /// The weather service call failed
    #[error("{reason}")]
    ExternalService { reason: ServiceFailure },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

const RETRY_HINT: &str = "Давайте попробуем еще раз.";

impl PogodaError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn request() -> Self {
        Self::ExternalService {
            reason: ServiceFailure::Request,
        }
    }

    pub fn response() -> Self {
        Self::ExternalService {
            reason: ServiceFailure::Response,
        }
    }

    /// Whether the prompt loop should treat this as an expected, recoverable outcome
    #[must_use]
    pub fn is_dialog_error(&self) -> bool {
        matches!(
            self,
            PogodaError::LocationExtraction
                | PogodaError::DateExtraction
                | PogodaError::ExternalService { .. }
        )
    }

    /// Get the message shown to the user on the console
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PogodaError::LocationExtraction => format!("Вы не указали город...\n{RETRY_HINT}"),
            PogodaError::DateExtraction => format!("Вы не указали день...\n{RETRY_HINT}"),
            PogodaError::ExternalService { .. } => {
                format!("Упс, возникла ошибка при получении погоды :(\n{RETRY_HINT}")
            }
            other => other.to_string(),
        }
    }
}
