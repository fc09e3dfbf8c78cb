//! Location Extraction Module
//!
//! Finds the city the user asked about. Span recognition is delegated to a
//! [`LocationRecognizer`]; the first span's fact values become the
//! [`ResolvedLocation`].

use tracing::debug;

use crate::models::ResolvedLocation;
use crate::nlp::{GazetteerLocationRecognizer, LocationRecognizer};
use crate::{PogodaError, Result};

/// Service for extracting a location from an utterance
pub struct LocationExtractor {
    recognizer: Box<dyn LocationRecognizer>,
}

impl Default for LocationExtractor {
    fn default() -> Self {
        Self::new(GazetteerLocationRecognizer::new())
    }
}

impl LocationExtractor {
    pub fn new(recognizer: impl LocationRecognizer + 'static) -> Self {
        Self {
            recognizer: Box::new(recognizer),
        }
    }

    /// Extract the values of the first recognized location span
    pub fn extract_location(&self, utterance: &str) -> Result<ResolvedLocation> {
        debug!("Extracting location from: {:?}", utterance);

        let spans = self.recognizer.recognize(utterance);
        let Some(span) = spans.into_iter().next() else {
            debug!("No location span recognized");
            return Err(PogodaError::LocationExtraction);
        };

        let location = ResolvedLocation::from_parts(span.fact.values())?;
        debug!("Resolved location: {:?}", location.parts());
        Ok(location)
    }
}
