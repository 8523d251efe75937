//! Keyword classification
//!
//! Maps free text onto one of five response categories by case-insensitive
//! substring matching. Groups are checked in a fixed priority order and
//! the first match wins.

/// Response buckets, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseCategory {
    Greeting,
    Help,
    Weather,
    Pronunciation,
    Default,
}

const GREETING_KEYWORDS: &[&str] = &["hello", "hi", "hey"];
const HELP_KEYWORDS: &[&str] = &["help", "practice"];
const WEATHER_KEYWORDS: &[&str] = &["weather", "rain", "sun"];
const PRONUNCIATION_KEYWORDS: &[&str] = &["pronunciation", "pronounce", "speak"];

/// Classify input text into a response category.
///
/// Substring match, not word match: "hi" inside "this" counts, "sun"
/// inside "sunny" counts. When keywords from several groups occur, the
/// highest-priority group wins (greeting > help > weather >
/// pronunciation). Anything else, including empty input, is `Default`.
pub fn classify(input: &str) -> ResponseCategory {
    let lower = input.to_lowercase();
    let matches = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if matches(GREETING_KEYWORDS) {
        ResponseCategory::Greeting
    } else if matches(HELP_KEYWORDS) {
        ResponseCategory::Help
    } else if matches(WEATHER_KEYWORDS) {
        ResponseCategory::Weather
    } else if matches(PRONUNCIATION_KEYWORDS) {
        ResponseCategory::Pronunciation
    } else {
        ResponseCategory::Default
    }
}
