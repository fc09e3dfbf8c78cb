//! Dictionary-based location recognition
//!
//! Each known location has a canonical name. A word in the text matches a
//! name word when it is the same word with a Russian case ending swapped in
//! (`москва` / `москве` / `москвой`). Irregular or abbreviated forms are
//! listed explicitly.

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::{LocationFact, LocationRecognizer, Span};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:-[\p{L}\p{N}]+)*").expect("word pattern is valid")
});

/// Endings stripped from a name word to get its stem
const STEM_SUFFIXES: &[&str] = &["ий", "ый", "ой", "ь", "й", "а", "я", "о", "е", "и", "ы"];

/// Endings allowed after a stem in the text
const CASE_ENDINGS: &[&str] = &[
    "", "а", "я", "у", "ю", "е", "и", "ы", "ь", "й", "о", "ой", "ей", "ом", "ем", "ью", "ий",
    "ый", "ая", "ое", "его", "ого", "ему", "ому", "им", "ым", "ах", "ях",
];

const MIN_STEM_CHARS: usize = 3;

/// Built-in locations: canonical name and irregular surface forms
const BUILTIN_LOCATIONS: &[(&str, &[&str])] = &[
    ("москва", &["мск"]),
    ("санкт-петербург", &["питер", "питере", "питера", "спб", "петербург", "петербурге"]),
    ("новосибирск", &[]),
    ("екатеринбург", &["екб"]),
    ("казань", &[]),
    ("нижний новгород", &["нижнем новгороде", "нижнего новгорода"]),
    ("великий новгород", &["великом новгороде", "великого новгорода"]),
    ("челябинск", &[]),
    ("самара", &[]),
    ("омск", &[]),
    ("ростов-на-дону", &["ростове-на-дону", "ростова-на-дону"]),
    ("уфа", &["уфе", "уфы", "уфу", "уфой"]),
    ("красноярск", &[]),
    ("воронеж", &[]),
    ("пермь", &[]),
    ("волгоград", &[]),
    ("краснодар", &[]),
    ("саратов", &[]),
    ("тюмень", &[]),
    ("тольятти", &[]),
    ("ижевск", &[]),
    ("барнаул", &[]),
    ("ульяновск", &[]),
    ("иркутск", &[]),
    ("хабаровск", &[]),
    ("ярославль", &[]),
    ("владивосток", &[]),
    ("махачкала", &[]),
    ("томск", &[]),
    ("оренбург", &[]),
    ("кемерово", &[]),
    ("рязань", &[]),
    ("астрахань", &[]),
    ("пенза", &[]),
    ("липецк", &[]),
    ("тула", &["туле", "тулы", "тулу"]),
    ("киров", &[]),
    ("калининград", &[]),
    ("курск", &[]),
    ("сочи", &[]),
    ("тверь", &[]),
    ("мурманск", &[]),
    ("архангельск", &[]),
    ("смоленск", &[]),
    ("владимир", &[]),
    ("калуга", &[]),
    ("якутск", &[]),
    ("сургут", &[]),
    ("севастополь", &[]),
    ("минск", &[]),
    ("киев", &[]),
    ("астана", &[]),
    ("алматы", &[]),
    ("ташкент", &[]),
    ("баку", &[]),
    ("тбилиси", &[]),
    ("ереван", &[]),
    ("рига", &[]),
    ("таллин", &[]),
    ("вильнюс", &[]),
    ("лондон", &[]),
    ("париж", &[]),
    ("берлин", &[]),
    ("рим", &[]),
    ("мадрид", &[]),
    ("барселона", &[]),
    ("прага", &[]),
    ("вена", &[]),
    ("варшава", &[]),
    ("хельсинки", &[]),
    ("амстердам", &[]),
    ("стамбул", &[]),
    ("дубай", &[]),
    ("пекин", &[]),
    ("токио", &[]),
    ("нью-йорк", &[]),
];

#[derive(Debug, Clone)]
enum WordPattern {
    /// Stem plus any case ending
    Inflected(String),
    /// Exact word
    Exact(String),
}

impl WordPattern {
    fn matches(&self, word: &str) -> bool {
        match self {
            WordPattern::Exact(expected) => word == expected,
            WordPattern::Inflected(stem) => word
                .strip_prefix(stem.as_str())
                .is_some_and(|ending| CASE_ENDINGS.contains(&ending)),
        }
    }
}

#[derive(Debug, Clone)]
struct GazetteerEntry {
    name: String,
    patterns: Vec<Vec<WordPattern>>,
}

impl GazetteerEntry {
    fn new(name: &str, forms: &[&str]) -> Self {
        let name = name.trim().to_lowercase();
        let mut patterns = vec![
            name.split_whitespace()
                .map(|word| WordPattern::Inflected(stem(word).to_string()))
                .collect::<Vec<_>>(),
        ];
        patterns.extend(forms.iter().map(|form| {
            form.to_lowercase()
                .split_whitespace()
                .map(|word| WordPattern::Exact(word.to_string()))
                .collect::<Vec<_>>()
        }));
        Self { name, patterns }
    }

    /// Number of words matched starting at `words[0]`, longest pattern first
    fn match_len(&self, words: &[&str]) -> Option<usize> {
        self.patterns
            .iter()
            .filter(|pattern| !pattern.is_empty() && pattern.len() <= words.len())
            .filter(|pattern| {
                pattern
                    .iter()
                    .zip(words)
                    .all(|(pattern, word)| pattern.matches(word))
            })
            .map(Vec::len)
            .max()
    }
}

/// Strip one stem suffix, keeping at least `MIN_STEM_CHARS` characters
fn stem(word: &str) -> &str {
    for suffix in STEM_SUFFIXES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.chars().count() >= MIN_STEM_CHARS {
                return stem;
            }
        }
    }
    word
}

/// Location recognizer backed by a list of known names
#[derive(Debug, Clone)]
pub struct GazetteerLocationRecognizer {
    entries: Vec<GazetteerEntry>,
}

impl Default for GazetteerLocationRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl GazetteerLocationRecognizer {
    /// Recognizer with the built-in list of cities
    #[must_use]
    pub fn new() -> Self {
        BUILTIN_LOCATIONS
            .iter()
            .fold(Self::empty(), |recognizer, (name, forms)| {
                recognizer.with_location(name, forms)
            })
    }

    /// Recognizer that knows no locations
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a location by canonical name plus irregular forms
    #[must_use]
    pub fn with_location(mut self, name: &str, forms: &[&str]) -> Self {
        self.entries.push(GazetteerEntry::new(name, forms));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LocationRecognizer for GazetteerLocationRecognizer {
    fn recognize(&self, text: &str) -> Vec<Span<LocationFact>> {
        let lowered = text.to_lowercase();
        // offsets are only valid against `text` when lower-casing kept byte lengths
        let source = if lowered.len() == text.len() {
            lowered.as_str()
        } else {
            text
        };

        let tokens: Vec<(usize, usize, &str)> = WORD_RE
            .find_iter(source)
            .map(|m| (m.start(), m.end(), m.as_str()))
            .collect();
        let words: Vec<&str> = tokens.iter().map(|(_, _, word)| *word).collect();

        let mut spans = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let best = self
                .entries
                .iter()
                .filter_map(|entry| entry.match_len(&words[i..]).map(|len| (len, entry)))
                // earlier entries win ties
                .fold(None::<(usize, &GazetteerEntry)>, |best, candidate| match best {
                    Some(current) if current.0 >= candidate.0 => Some(current),
                    _ => Some(candidate),
                });

            match best {
                Some((len, entry)) => {
                    let start = tokens[i].0;
                    let end = tokens[i + len - 1].1;
                    trace!(location = %entry.name, start, end, "location span");
                    spans.push(Span::new(
                        start,
                        end,
                        LocationFact {
                            name: entry.name.clone(),
                        },
                    ));
                    i += len;
                }
                None => i += 1,
            }
        }
        spans
    }
}
