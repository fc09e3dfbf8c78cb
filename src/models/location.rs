//! Location extracted from an utterance

use serde::{Deserialize, Serialize};

use crate::{PogodaError, Result};

/// Values read from the first recognized location span, in fact order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ResolvedLocation {
    parts: Vec<String>,
}

impl ResolvedLocation {
    /// Build from extracted values. An empty sequence means no location was mentioned.
    pub fn from_parts(parts: Vec<String>) -> Result<Self> {
        if parts.is_empty() {
            return Err(PogodaError::LocationExtraction);
        }
        Ok(Self { parts })
    }

    #[must_use]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// The city sent to the weather API: the first value, title-cased.
    /// Remaining values are ignored.
    #[must_use]
    pub fn city_name(&self) -> String {
        title_case(&self.parts[0])
    }
}

/// Upper-case every letter that follows a non-letter, lower-case the rest
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
