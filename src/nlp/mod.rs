//! Fact recognition over free-form Russian text
//!
//! Recognizers find spans of an utterance that mention a location or a date
//! and attach a typed fact to each. Callers only ever look at the first span.

use serde::{Deserialize, Serialize};

pub mod dates;
pub mod gazetteer;

pub use dates::RuleDateRecognizer;
pub use gazetteer::GazetteerLocationRecognizer;

/// A recognized substring of the input, as byte offsets, with its fact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<F> {
    pub start: usize,
    pub end: usize,
    pub fact: F,
}

impl<F> Span<F> {
    pub fn new(start: usize, end: usize, fact: F) -> Self {
        Self { start, end, fact }
    }

    /// The matched text in `source`
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }
}

/// A location mention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFact {
    /// Canonical, lower-case name in the nominative case
    pub name: String,
}

impl LocationFact {
    /// Field values in declaration order
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        vec![self.name.clone()]
    }
}

/// A date mention; any component may be missing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateFact {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// Finds location mentions in text
pub trait LocationRecognizer: Send + Sync {
    /// All location spans, ordered by position in `text`
    fn recognize(&self, text: &str) -> Vec<Span<LocationFact>>;
}

/// Finds date mentions in text
pub trait DateRecognizer: Send + Sync {
    /// All date spans, ordered by position in `text`
    fn recognize(&self, text: &str) -> Vec<Span<DateFact>>;
}
