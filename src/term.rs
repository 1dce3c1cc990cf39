//! Language-tagged terms and their `value@lang` notation.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};

use crate::language::Language;

/// Separator between the value and the language code in a qualified term.
pub const LANG_SEPARATOR: char = '@';

/// A string value (label, name, ...) in a given language.
///
/// The language is optional: a term without language is a different key from the
/// same string tagged with any code, including the empty code `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    /// Text of the term, possibly empty.
    #[serde(default)]
    string: String,

    /// Language code; `None` when the term is not tagged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    language: Option<String>,
}

impl Term {
    /// Creates a term with no language.
    #[must_use]
    pub fn new(string: impl Into<String>) -> Self {
        Self { string: string.into(), language: None }
    }

    #[must_use]
    pub fn with_language(string: impl Into<String>, language: impl Into<String>) -> Self {
        Self { string: string.into(), language: Some(language.into()) }
    }

    #[must_use]
    pub const fn from_parts(string: String, language: Option<String>) -> Self {
        Self { string, language }
    }

    /// Parses a qualified term string.
    ///
    /// The text is split at its last `@`: `earth@en` gives (`earth`, `en`) and a
    /// trailing `@` gives an empty language code. Text without `@` has no language.
    ///
    /// ```
    /// use termkit::Term;
    ///
    /// let term = Term::parse("label@en");
    /// assert_eq!(term.string(), "label");
    /// assert_eq!(term.language(), Some("en"));
    /// assert_eq!(Term::parse("label").language(), None);
    /// ```
    #[must_use]
    pub fn parse(qualified: &str) -> Self {
        qualified.rsplit_once(LANG_SEPARATOR).map_or_else(
            || Self::new(qualified),
            |(string, language)| Self::with_language(string, language),
        )
    }

    #[must_use]
    pub fn string(&self) -> &str {
        &self.string
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Language code as it is used for map lookups.
    #[allow(clippy::ref_option)]
    pub(crate) const fn language_key(&self) -> &Option<String> {
        &self.language
    }

    /// Looks the language code up in the [`Language`] catalog.
    #[must_use]
    pub fn language_code(&self) -> Option<Language> {
        self.language().and_then(Language::from_code)
    }

    /// Returns `string@language`, or just `string` when there is no language.
    #[must_use]
    pub fn qualified_string(&self) -> String {
        self.to_string()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.string, self.language)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.language {
            Some(language) => write!(f, "{}{LANG_SEPARATOR}{language}", self.string),
            None => f.write_str(&self.string),
        }
    }
}

impl FromStr for Term {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Term {
    fn from(qualified: &str) -> Self {
        Self::parse(qualified)
    }
}

/// Terms are ordered by language first, then by string. A term without language
/// sorts before any tagged term.
impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.language.cmp(&other.language).then_with(|| self.string.cmp(&other.string))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    #[case::with_language("earth@en", "earth", Some("en"))]
    #[case::without_language("earth", "earth", None)]
    #[case::trailing_separator("earth@", "earth", Some(""))]
    #[case::leading_separator("@fr", "", Some("fr"))]
    #[case::splits_at_last_separator("user@host@de", "user@host", Some("de"))]
    #[case::empty("", "", None)]
    fn parse_qualified_string(
        #[case] input: &str,
        #[case] string: &str,
        #[case] language: Option<&str>,
    ) {
        let term = Term::parse(input);

        assert_that!(term.string(), eq(string));
        assert_that!(term.language(), eq(language));
    }

    #[rstest]
    #[case::with_language(Term::with_language("earth", "en"), "earth@en")]
    #[case::without_language(Term::new("earth"), "earth")]
    #[case::empty_language(Term::with_language("earth", ""), "earth@")]
    fn format_qualified_string(#[case] term: Term, #[case] expected: &str) {
        assert_that!(term.qualified_string(), eq(expected));
        assert_that!(term.to_string(), eq(expected));
    }

    #[rstest]
    #[case("earth@en")]
    #[case("earth")]
    #[case("earth@")]
    fn parse_then_format_is_identity(#[case] input: &str) {
        let term: Term = input.parse().unwrap();

        assert_that!(term.to_string(), eq(input));
    }

    #[rstest]
    fn empty_language_differs_from_no_language() {
        assert_ne!(Term::new("x"), Term::with_language("x", ""));
        assert_that!(Term::new("x").cmp(&Term::with_language("x", "")), eq(Ordering::Less));
    }

    #[rstest]
    fn ordering_compares_language_then_string() {
        let mut terms = vec![
            Term::with_language("b", "fr"),
            Term::with_language("a", "fr"),
            Term::with_language("z", "en"),
            Term::new("m"),
        ];
        terms.sort();

        let rendered: Vec<String> = terms.iter().map(Term::to_string).collect();
        assert_that!(rendered, elements_are![eq("m"), eq("z@en"), eq("a@fr"), eq("b@fr")]);
    }

    #[rstest]
    fn language_code_resolves_catalog_entry() {
        assert_eq!(Term::parse("terre@fr").language_code(), Some(Language::French));
        assert_eq!(Term::parse("terre@xx").language_code(), None);
        assert_eq!(Term::parse("terre").language_code(), None);
    }

    #[rstest]
    fn serde_omits_missing_language() {
        let json = serde_json::to_string(&Term::new("earth")).unwrap();
        let tagged = serde_json::to_string(&Term::with_language("earth", "en")).unwrap();

        assert_that!(json, eq(r#"{"string":"earth"}"#));
        assert_that!(tagged, eq(r#"{"string":"earth","language":"en"}"#));

        let decoded: Term = serde_json::from_str(&tagged).unwrap();
        assert_eq!(decoded, Term::with_language("earth", "en"));
    }
}
