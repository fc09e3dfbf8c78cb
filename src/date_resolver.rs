//! Date Resolution Module
//!
//! Turns an utterance into the requested (month, day). A fixed table of
//! phrases is tried first, in declaration order, by substring containment;
//! the first phrase found decides. Only when no phrase is present does the
//! NLP date recognizer get a look.

use chrono::{Datelike, Days, Local, NaiveDate};
use tracing::debug;

use crate::models::ResolvedDate;
use crate::nlp::{DateRecognizer, RuleDateRecognizer};
use crate::{PogodaError, Result};

/// How a table phrase maps to a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    /// `today + n` days
    DaysFromToday(u64),
    /// `today + (base - weekday)` days, weekday counted from Monday = 0
    WeekdayOffset(u32),
    /// A pinned calendar date
    Fixed { year: i32, month: u32, day: u32 },
}

impl DateRule {
    /// Calendar day for this rule relative to `today`
    #[must_use]
    pub fn resolve(&self, today: NaiveDate) -> Option<NaiveDate> {
        match *self {
            DateRule::DaysFromToday(days) => today.checked_add_days(Days::new(days)),
            DateRule::WeekdayOffset(base) => {
                let weekday = today.weekday().num_days_from_monday();
                today.checked_add_days(Days::new(u64::from(base.saturating_sub(weekday))))
            }
            DateRule::Fixed { year, month, day } => NaiveDate::from_ymd_opt(year, month, day),
        }
    }
}

/// A phrase fragment and the rule it triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePhrase {
    pub key: &'static str,
    pub rule: DateRule,
}

// Holidays are pinned to 2020. Only (month, day) leaves the resolver, so the
// year never shows up in a result.
// "послезавтра" contains "завтра", which is declared first and wins.
pub const DATE_PHRASES: &[DatePhrase] = &[
    DatePhrase {
        key: "сегодня",
        rule: DateRule::DaysFromToday(0),
    },
    DatePhrase {
        key: "завтра",
        rule: DateRule::DaysFromToday(1),
    },
    DatePhrase {
        key: "послезавтра",
        rule: DateRule::DaysFromToday(2),
    },
    DatePhrase {
        key: "выходн",
        rule: DateRule::WeekdayOffset(6),
    },
    DatePhrase {
        key: "начал",
        rule: DateRule::WeekdayOffset(7),
    },
    DatePhrase {
        key: "день победы",
        rule: DateRule::Fixed {
            year: 2020,
            month: 5,
            day: 9,
        },
    },
    DatePhrase {
        key: "международный день космоса",
        rule: DateRule::Fixed {
            year: 2020,
            month: 5,
            day: 21,
        },
    },
    DatePhrase {
        key: "день сварщика",
        rule: DateRule::Fixed {
            year: 2020,
            month: 5,
            day: 29,
        },
    },
    DatePhrase {
        key: "всемирный день молока",
        rule: DateRule::Fixed {
            year: 2020,
            month: 6,
            day: 1,
        },
    },
];

/// Resolves the date mentioned in an utterance
pub struct DateResolver {
    phrases: Vec<DatePhrase>,
    recognizer: Box<dyn DateRecognizer>,
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new(RuleDateRecognizer::new())
    }
}

impl DateResolver {
    /// Resolver with the built-in phrase table and the given fallback recognizer
    pub fn new(recognizer: impl DateRecognizer + 'static) -> Self {
        Self {
            phrases: DATE_PHRASES.to_vec(),
            recognizer: Box::new(recognizer),
        }
    }

    #[must_use]
    pub fn phrases(&self) -> &[DatePhrase] {
        &self.phrases
    }

    /// Resolve against the local calendar date
    pub fn resolve_date(&self, utterance: &str) -> Result<ResolvedDate> {
        self.resolve_date_on(utterance, Local::now().date_naive())
    }

    /// Resolve with an explicit "today"
    pub fn resolve_date_on(&self, utterance: &str, today: NaiveDate) -> Result<ResolvedDate> {
        if let Some(phrase) = self.phrases.iter().find(|p| utterance.contains(p.key)) {
            let date = phrase
                .rule
                .resolve(today)
                .ok_or(PogodaError::DateExtraction)?;
            debug!(key = phrase.key, %date, "date resolved from phrase table");
            return Ok(date.into());
        }

        let spans = self.recognizer.recognize(utterance);
        let span = spans.first().ok_or(PogodaError::DateExtraction)?;
        match (span.fact.month, span.fact.day) {
            (Some(month), Some(day)) => {
                debug!(month, day, "date resolved by recognizer");
                Ok(ResolvedDate::new(month, day))
            }
            _ => {
                debug!(fact = ?span.fact, "recognized date lacks month or day");
                Err(PogodaError::DateExtraction)
            }
        }
    }
}
