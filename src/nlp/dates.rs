//! Rule-based date recognition
//!
//! Understands `15 мая`, `15-го мая 2024`, `15 сен.`, numeric `15.05` /
//! `15.05.2024` and a bare month (`в мае`), which yields a fact without a day.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::{DateFact, DateRecognizer, Span};

static DAY_MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})(?:-?(?:го|е|ое))?\s+(\p{L}+)\.?(?:\s+(\d{4})\b)?")
        .expect("day-month pattern is valid")
});

static NUMERIC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,2})\.(\d{1,2})(?:\.(\d{4}|\d{2}))?\b").expect("numeric date pattern is valid")
});

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+").expect("word pattern is valid"));

const MONTH_FORMS: [&[&str]; 12] = [
    &["январь", "января", "январе", "янв"],
    &["февраль", "февраля", "феврале", "фев"],
    &["март", "марта", "марте", "мар"],
    &["апрель", "апреля", "апреле", "апр"],
    &["май", "мая", "мае"],
    &["июнь", "июня", "июне", "июн"],
    &["июль", "июля", "июле", "июл"],
    &["август", "августа", "августе", "авг"],
    &["сентябрь", "сентября", "сентябре", "сен", "сент"],
    &["октябрь", "октября", "октябре", "окт"],
    &["ноябрь", "ноября", "ноябре", "ноя"],
    &["декабрь", "декабря", "декабре", "дек"],
];

/// Month number for a Russian month word or abbreviation
#[must_use]
pub fn month_from_word(word: &str) -> Option<u32> {
    MONTH_FORMS
        .iter()
        .position(|forms| forms.contains(&word))
        .and_then(|index| u32::try_from(index + 1).ok())
}

fn valid_day(day: u32) -> bool {
    (1..=31).contains(&day)
}

fn valid_month(month: u32) -> bool {
    (1..=12).contains(&month)
}

fn parse_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + year } else { year })
}

/// Date recognizer built from a handful of regular expressions
#[derive(Debug, Clone, Default)]
pub struct RuleDateRecognizer;

impl RuleDateRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn day_month(text: &str) -> impl Iterator<Item = Span<DateFact>> + '_ {
        DAY_MONTH_RE.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let day: u32 = caps[1].parse().ok()?;
            let month = month_from_word(&caps[2])?;
            if !valid_day(day) {
                return None;
            }
            let year = caps.get(3).and_then(|m| parse_year(m.as_str()));
            Some(Span::new(
                whole.start(),
                whole.end(),
                DateFact {
                    year,
                    month: Some(month),
                    day: Some(day),
                },
            ))
        })
    }

    fn numeric(text: &str) -> impl Iterator<Item = Span<DateFact>> + '_ {
        NUMERIC_RE.captures_iter(text).filter_map(|caps| {
            let whole = caps.get(0)?;
            let day: u32 = caps[1].parse().ok()?;
            let month: u32 = caps[2].parse().ok()?;
            if !valid_day(day) || !valid_month(month) {
                return None;
            }
            let year = caps.get(3).and_then(|m| parse_year(m.as_str()));
            Some(Span::new(
                whole.start(),
                whole.end(),
                DateFact {
                    year,
                    month: Some(month),
                    day: Some(day),
                },
            ))
        })
    }

    fn month_only(text: &str) -> impl Iterator<Item = Span<DateFact>> + '_ {
        WORD_RE.find_iter(text).filter_map(|word| {
            let month = month_from_word(word.as_str())?;
            Some(Span::new(
                word.start(),
                word.end(),
                DateFact {
                    month: Some(month),
                    ..DateFact::default()
                },
            ))
        })
    }
}

impl DateRecognizer for RuleDateRecognizer {
    fn recognize(&self, text: &str) -> Vec<Span<DateFact>> {
        let lowered = text.to_lowercase();
        let source = if lowered.len() == text.len() {
            lowered.as_str()
        } else {
            text
        };

        let mut spans: Vec<Span<DateFact>> = Vec::new();
        let candidates = Self::day_month(source)
            .chain(Self::numeric(source))
            .chain(Self::month_only(source));
        for candidate in candidates {
            let overlaps = spans
                .iter()
                .any(|span| candidate.start < span.end && span.start < candidate.end);
            if !overlaps {
                trace!(start = candidate.start, end = candidate.end, fact = ?candidate.fact, "date span");
                spans.push(candidate);
            }
        }
        spans.sort_by_key(|span| span.start);
        spans
    }
}
