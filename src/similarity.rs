//! Lexical similarity based on shared adjacent character pairs.

use std::collections::HashMap;

use crate::config::SimilaritySettings;

/// Computes the similarity of two optional strings.
///
/// Returns `0.0` when either side is missing, otherwise [`similarity`].
#[must_use]
pub fn compare_strings(first: Option<&str>, second: Option<&str>) -> f64 {
    match (first, second) {
        (Some(first), Some(second)) => similarity(first, second),
        _ => 0.0,
    }
}

/// Computes the lexical similarity of two strings, in `[0, 1]`.
///
/// Both strings are upper-cased and split on whitespace; the adjacent character pairs of
/// every word are collected. The score is twice the number of pairs the two sides have in
/// common (each pair matched at most once) divided by the total number of pairs. When
/// neither string has a pair the score is `0.0`.
///
/// ```
/// use termkit::similarity::similarity;
///
/// assert_eq!(similarity("ab", "AB"), 1.0);
/// assert_eq!(similarity("ab", "cd"), 0.0);
/// ```
#[must_use]
#[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
pub fn similarity(first: &str, second: &str) -> f64 {
    let first_pairs = word_letter_pairs(first);
    let second_pairs = word_letter_pairs(second);
    let total = first_pairs.len() + second_pairs.len();
    if total == 0 {
        return 0.0;
    }

    let mut remaining: HashMap<(char, char), usize> = HashMap::new();
    for pair in second_pairs {
        *remaining.entry(pair).or_default() += 1;
    }

    let mut shared = 0_usize;
    for pair in &first_pairs {
        if let Some(count) = remaining.get_mut(pair)
            && *count > 0
        {
            *count -= 1;
            shared += 1;
        }
    }

    (2 * shared) as f64 / total as f64
}

/// Adjacent character pairs of each whitespace-separated word, upper-cased.
fn word_letter_pairs(text: &str) -> Vec<(char, char)> {
    let upper = text.to_uppercase();
    upper
        .split(char::is_whitespace)
        .flat_map(|word| word.chars().zip(word.chars().skip(1)))
        .collect()
}

/// A candidate that passed the similarity threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    /// Position of the candidate in the input.
    pub index: usize,
    pub candidate: &'a str,
    pub score: f64,
}

/// Compares strings against a minimum similarity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StringMatcher {
    /// Minimum score, inclusive.
    threshold: f64,
}

impl StringMatcher {
    /// Creates a matcher. The threshold is clamped to `[0, 1]`.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self { threshold: threshold.clamp(0.0, 1.0) }
    }

    #[must_use]
    pub fn from_settings(settings: &SimilaritySettings) -> Self {
        Self::new(settings.threshold)
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Checks whether the two strings reach the threshold.
    #[must_use]
    pub fn is_match(&self, first: &str, second: &str) -> bool {
        similarity(first, second) >= self.threshold
    }

    /// Returns the most similar candidate reaching the threshold.
    ///
    /// On equal scores the earliest candidate wins.
    pub fn best_match<'a, I>(&self, query: &str, candidates: I) -> Option<Match<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut best: Option<Match<'a>> = None;
        for (index, candidate) in candidates.into_iter().enumerate() {
            let score = similarity(query, candidate);
            if score < self.threshold {
                continue;
            }
            if best.is_none_or(|current| score > current.score) {
                best = Some(Match { index, candidate, score });
            }
        }
        tracing::trace!(query, ?best, "Best similarity match");
        best
    }
}

impl Default for StringMatcher {
    fn default() -> Self {
        Self::from_settings(&SimilaritySettings::default())
    }
}

#[cfg(test)]
#[allow(clippy::float_arithmetic, clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::identical("ab", "ab", 1.0)]
    #[case::case_insensitive("Earth", "EARTH", 1.0)]
    #[case::disjoint("abc", "xyz", 0.0)]
    // NI IG GH HT / NA AC CH HT
    #[case::night_nacht("night", "nacht", 0.25)]
    // FR RA AN NC CE / FR RE EN NC CH
    #[case::france_french("France", "French", 0.4)]
    #[case::no_pairs_across_words("a b", "ab", 0.0)]
    #[case::no_pairs_at_all("a", "a", 0.0)]
    fn similarity_scores(#[case] first: &str, #[case] second: &str, #[case] expected: f64) {
        assert_that!(similarity(first, second), near(expected, 1e-9));
    }

    #[rstest]
    fn duplicate_pairs_match_once() {
        // AA AA / AA: a single shared pair
        assert_that!(similarity("aaa", "aa"), near(2.0 / 3.0, 1e-9));
    }

    #[rstest]
    fn multiple_words_are_paired_separately() {
        // HE EA AL LT TH CA AR RE / HE EA AL LT TH
        assert_that!(similarity("health care", "health"), near(10.0 / 13.0, 1e-9));
    }

    #[rstest]
    #[case::first_missing(None, Some("x"))]
    #[case::second_missing(Some("x"), None)]
    #[case::both_missing(None, None)]
    fn compare_strings_missing_input_is_zero(
        #[case] first: Option<&str>,
        #[case] second: Option<&str>,
    ) {
        assert_that!(compare_strings(first, second), eq(0.0));
    }

    #[rstest]
    fn compare_strings_delegates_to_similarity() {
        assert_that!(compare_strings(Some("ab"), Some("ab")), eq(1.0));
    }

    #[rstest]
    fn score_is_symmetric() {
        let a = similarity("coastal waters", "coast water");
        let b = similarity("coast water", "coastal waters");

        assert_that!(a, near(b, 1e-12));
    }

    #[rstest]
    fn best_match_picks_highest_score() {
        let matcher = StringMatcher::new(0.3);
        let candidates = ["Healed", "Sealed", "Healthy", "Heard"];

        let best = matcher.best_match("Healed", candidates).unwrap();

        assert_that!(best.index, eq(0));
        assert_that!(best.candidate, eq("Healed"));
        assert_that!(best.score, eq(1.0));
    }

    #[rstest]
    fn best_match_respects_threshold() {
        let matcher = StringMatcher::new(0.9);

        assert_that!(matcher.best_match("night", ["nacht", "knight"]), none());
    }

    #[rstest]
    fn best_match_keeps_first_on_tie() {
        let matcher = StringMatcher::new(0.0);

        let best = matcher.best_match("ab", ["ab", "AB"]).unwrap();

        assert_that!(best.index, eq(0));
    }

    #[rstest]
    fn threshold_is_clamped() {
        assert_that!(StringMatcher::new(1.5).threshold(), eq(1.0));
        assert_that!(StringMatcher::new(-0.5).threshold(), eq(0.0));
        assert_that!(StringMatcher::new(0.5).is_match("night", "nacht"), eq(false));
        assert_that!(StringMatcher::new(0.2).is_match("night", "nacht"), eq(true));
    }

    #[rstest]
    fn default_uses_default_settings() {
        let matcher = StringMatcher::default();

        assert_that!(matcher.threshold(), eq(SimilaritySettings::default().threshold));
    }
}
