//! Advisory checks on Editor-in-Chief output.
//!
//! The validator looks for two kinds of trouble: quoted text that no
//! specialist actually wrote, and phrases that claim a consensus the
//! specialists may not have reached. Findings are warnings only; the
//! checked text is never altered or rejected.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use similar::{Algorithm, capture_diff_slices, get_diff_ratio};
use tracing::debug;

static QUOTE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)"|“([^”]+)”"#).expect("Invalid quote regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Minimum word-level diff ratio for a quote to count as found.
    pub similarity_threshold: f32,
    /// Quotes shorter than this are not checked.
    pub min_quote_words: usize,
    /// Matched case-insensitively.
    pub forbidden_phrases: Vec<String>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            min_quote_words: 3,
            forbidden_phrases: [
                "all specialists",
                "all three specialists",
                "all my specialists",
                "every specialist",
                "the team generally caught",
                "unanimously",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagKind {
    UnverifiedQuote,
    OverstatedConsensus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationFlag {
    pub kind: FlagKind,
    pub message: String,
}

pub struct ResponseValidator {
    config: ValidatorConfig,
    phrases: Vec<String>,
}

impl ResponseValidator {
    pub fn new(config: ValidatorConfig) -> Self {
        let phrases = config
            .forbidden_phrases
            .iter()
            .map(|p| p.to_lowercase())
            .collect();
        Self { config, phrases }
    }

    /// Check `text` against the specialist outputs it claims to draw on.
    pub fn validate(&self, text: &str, sources: &[&str]) -> Vec<ValidationFlag> {
        let source_words: Vec<Vec<String>> = sources.iter().map(|s| words(s)).collect();
        let mut flags = Vec::new();
        let mut seen = HashSet::new();

        for quote in extract_quotes(text) {
            let quote_words = words(quote);
            if quote_words.len() < self.config.min_quote_words || !seen.insert(quote_words.clone())
            {
                continue;
            }

            let best = source_words
                .iter()
                .map(|source| best_ratio(&quote_words, source))
                .fold(0.0_f32, f32::max);
            debug!(quote, best, "checked quote");

            if best < self.config.similarity_threshold {
                flags.push(ValidationFlag {
                    kind: FlagKind::UnverifiedQuote,
                    message: format!(
                        "Possible unverified quote: \"{quote}\" does not appear in any specialist response (closest match {:.0}%)",
                        best * 100.0
                    ),
                });
            }
        }

        let lowered = text.to_lowercase();
        for (phrase, original) in self.phrases.iter().zip(&self.config.forbidden_phrases) {
            if !phrase.is_empty() && lowered.contains(phrase.as_str()) {
                flags.push(ValidationFlag {
                    kind: FlagKind::OverstatedConsensus,
                    message: format!(
                        "Possible overstated consensus: \"{original}\" claims agreement across specialists; check each specialist's own words"
                    ),
                });
            }
        }

        flags
    }
}

/// Warning block appended to a displayed answer. Empty when there are no flags.
pub fn warning_block(flags: &[ValidationFlag]) -> String {
    if flags.is_empty() {
        return String::new();
    }
    let mut block = String::from("\n\n---\n⚠️ VALIDATION WARNINGS:");
    for flag in flags {
        block.push_str("\n- ");
        block.push_str(&flag.message);
    }
    block
}

fn extract_quotes(text: &str) -> impl Iterator<Item = &str> {
    QUOTE_PATTERN.captures_iter(text).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim())
    })
}

fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Best diff ratio between the quote and any run of source words that is as
/// long as the quote or one word longer.
/// A swapped word must not match a shorter run, so shorter runs are skipped.
fn best_ratio(quote: &[String], source: &[String]) -> f32 {
    if quote.is_empty() || source.is_empty() {
        return 0.0;
    }
    if source.windows(quote.len()).any(|w| w == quote) {
        return 1.0;
    }

    let n = quote.len();
    let mut best = 0.0_f32;
    for len in [n, n + 1] {
        if len > source.len() {
            best = best.max(ratio(quote, source));
            continue;
        }
        for window in source.windows(len) {
            best = best.max(ratio(quote, window));
        }
    }
    best
}

fn ratio(a: &[String], b: &[String]) -> f32 {
    let ops = capture_diff_slices(Algorithm::Myers, a, b);
    get_diff_ratio(&ops, a.len(), b.len())
}
