//! Accept-Language Parsing and Locale Resolution
//!
//! Turns a raw `Accept-Language` header into ranked [`LanguagePreference`]s
//! and picks the first one the application supports.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Weight assigned when an entry carries no (valid) `q=` parameter.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A language tag and its weight from an `Accept-Language` header.
///
/// Tags are kept verbatim: no case folding and no BCP 47 validation.
/// Weights are nominally in `[0.0, 1.0]` but are not clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagePreference {
    /// Language tag as sent by the client (e.g. "en-US", "fr")
    pub language: String,
    /// Quality value
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl LanguagePreference {
    /// Create a preference with an explicit weight.
    pub fn new(language: impl Into<String>, weight: f64) -> Self {
        Self {
            language: language.into(),
            weight,
        }
    }

    /// Create a preference with the default weight of 1.0.
    pub fn with_default_weight(language: impl Into<String>) -> Self {
        Self::new(language, DEFAULT_WEIGHT)
    }
}

impl fmt::Display for LanguagePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{};q={}", self.language, self.weight)
    }
}

/// Parse an Accept-Language header into preferences.
///
/// Entries are sorted by weight, highest first. The sort is stable, so
/// entries of equal weight keep the order in which the client sent them.
/// Parsing never fails: an unparsable `q=` value counts as 1.0 and empty
/// segments are ignored.
///
/// # Example
///
/// ```
/// use lingo_i18n::parse_accept_language;
///
/// let prefs = parse_accept_language("en-US,en;q=0.9,fr;q=0.8,de;q=0.7");
/// let tags: Vec<_> = prefs.iter().map(|p| p.language.as_str()).collect();
/// assert_eq!(tags, ["en-US", "en", "fr", "de"]);
/// assert_eq!(prefs[1].weight, 0.9);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter_map(parse_entry)
        .collect();

    preferences.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));

    preferences
}

fn parse_entry(entry: &str) -> Option<LanguagePreference> {
    let mut parts = entry.split(';');
    let language = parts.next()?.trim();
    if language.is_empty() {
        return None;
    }

    // Later q= parameters overwrite earlier ones
    let mut weight = DEFAULT_WEIGHT;
    for part in parts {
        if let Some(raw) = part.trim().strip_prefix("q=") {
            weight = parse_weight(raw);
        }
    }

    Some(LanguagePreference::new(language, weight))
}

fn parse_weight(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(weight) if !weight.is_nan() => weight,
        _ => {
            tracing::debug!(raw_weight = raw, "invalid weight, using default {}", DEFAULT_WEIGHT);
            DEFAULT_WEIGHT
        }
    }
}

/// Pick the first preferred language that is supported.
///
/// `preferences` is expected in ranked order (as returned by
/// [`parse_accept_language`]). Matching is exact string membership in
/// `allowed`: `en-US` does not match `en`. Falls back to `default` when
/// nothing matches, including when there are no preferences at all.
///
/// # Example
///
/// ```
/// use lingo_i18n::{LanguagePreference, resolve_locale};
///
/// let prefs = vec![
///     LanguagePreference::new("fr", 0.9),
///     LanguagePreference::new("en", 0.5),
/// ];
/// assert_eq!(resolve_locale(&prefs, &["en", "de"], "en"), "en");
/// assert_eq!(resolve_locale(&[], &["en", "de"], "de"), "de");
/// ```
pub fn resolve_locale<'a, S: AsRef<str>>(
    preferences: &'a [LanguagePreference],
    allowed: &[S],
    default: &'a str,
) -> &'a str {
    preferences
        .iter()
        .map(|pref| pref.language.as_str())
        .find(|language| allowed.iter().any(|a| a.as_ref() == *language))
        .unwrap_or(default)
}
