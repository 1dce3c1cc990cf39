//! Values keyed by language-tagged terms.

use std::collections::{
    BTreeSet,
    HashMap,
    HashSet,
};

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
};

use crate::multimap::Multimap;
use crate::term::Term;

/// Values of one term string, grouped by language (`None` = no language).
pub type LanguageValues<V> = Multimap<Option<String>, V>;

/// Maps [`Term`]s to zero or more values.
///
/// Entries are grouped by term string, then by language, so lookups can be done
/// either with a full term or with the string part alone. A term string is kept
/// only while at least one value is stored under it.
#[derive(Debug, Clone)]
pub struct TermMap<V> {
    /// Term string to its values per language.
    entries: HashMap<String, LanguageValues<V>>,
}

impl<V> Default for TermMap<V> {
    fn default() -> Self {
        Self { entries: HashMap::new() }
    }
}

impl<V> TermMap<V> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` under `term`.
    pub fn put(&mut self, term: Term, value: V) {
        let (string, language) = term.into_parts();
        self.entries.entry(string).or_default().put(language, value);
    }

    /// Makes `value` the only value associated with `term`.
    pub fn put_only(&mut self, term: Term, value: V) {
        let (string, language) = term.into_parts();
        self.entries.entry(string).or_default().put_only(language, value);
    }

    /// Appends every item of `values` under `term`. Returns `false` when `values`
    /// is empty.
    pub fn put_all<I>(&mut self, term: Term, values: I) -> bool
    where
        I: IntoIterator<Item = V>,
    {
        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return false;
        }
        let (string, language) = term.into_parts();
        self.entries.entry(string).or_default().put_all(language, values)
    }

    /// Returns the first value associated with `term`.
    #[must_use]
    pub fn get_value(&self, term: &Term) -> Option<&V> {
        self.entries.get(term.string()).and_then(|languages| languages.get(term.language_key()))
    }

    /// Returns the values associated with `term`, or an empty slice.
    #[must_use]
    pub fn get_values(&self, term: &Term) -> &[V] {
        self.entries
            .get(term.string())
            .map_or(&[], |languages| languages.get_all(term.language_key()))
    }

    /// Returns every value stored under the term string, grouped by language.
    #[must_use]
    pub fn get_string_values(&self, string: &str) -> Option<&LanguageValues<V>> {
        self.entries.get(string)
    }

    /// Removes every value of `term` and returns them (empty if there were none).
    pub fn remove_all(&mut self, term: &Term) -> Vec<V> {
        let Some(languages) = self.entries.get_mut(term.string()) else {
            return Vec::new();
        };
        let removed = languages.remove_all(term.language_key());
        if languages.is_empty() {
            self.entries.remove(term.string());
        }
        removed
    }

    /// Removes the term string in every language and returns what it held.
    pub fn remove_all_string(&mut self, string: &str) -> Option<LanguageValues<V>> {
        self.entries.remove(string)
    }

    #[must_use]
    pub fn contains_key_term(&self, term: &Term) -> bool {
        self.entries
            .get(term.string())
            .is_some_and(|languages| languages.contains_key(term.language_key()))
    }

    /// Checks whether the term string has a value in at least one language.
    #[must_use]
    pub fn contains_key_string(&self, string: &str) -> bool {
        self.entries.get(string).is_some_and(|languages| !languages.is_empty())
    }

    /// Languages under which the term string has values. The order is unspecified.
    #[must_use]
    pub fn key_term_languages(&self, string: &str) -> Vec<Option<&str>> {
        self.entries
            .get(string)
            .map(|languages| languages.keys().map(Option::as_deref).collect())
            .unwrap_or_default()
    }

    /// Every language used anywhere in the map.
    #[must_use]
    pub fn languages(&self) -> HashSet<Option<&str>> {
        self.entries
            .values()
            .flat_map(|languages| languages.keys().map(Option::as_deref))
            .collect()
    }

    /// Every term holding at least one value.
    #[must_use]
    pub fn key_terms(&self) -> BTreeSet<Term> {
        self.entries
            .iter()
            .flat_map(|(string, languages)| {
                languages
                    .keys()
                    .map(move |language| Term::from_parts(string.clone(), language.clone()))
            })
            .collect()
    }

    /// Number of distinct terms. Unlike [`TermMap::len`], a term with several
    /// values is counted once.
    #[must_use]
    pub fn num_key_terms(&self) -> usize {
        self.entries.values().map(|languages| languages.keys().len()).sum()
    }

    #[must_use]
    pub fn key_term_strings(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Total number of values across all terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(Multimap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Every (term string, language, value) triple.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>, &V)> + '_ {
        self.entries.iter().flat_map(|(string, languages)| {
            languages
                .iter()
                .map(move |(language, value)| (string.as_str(), language.as_deref(), value))
        })
    }
}

impl<V: PartialEq> TermMap<V> {
    /// Inserts the pair unless it is already present. Returns `true` if it was added.
    pub fn put_if_absent(&mut self, term: Term, value: V) -> bool {
        let (string, language) = term.into_parts();
        self.entries.entry(string).or_default().put_if_absent(language, value)
    }

    /// Removes the first occurrence of `value` under `term`.
    ///
    /// Empty languages and term strings are dropped. Returns `true` if the map
    /// changed.
    pub fn remove(&mut self, term: &Term, value: &V) -> bool {
        let Some(languages) = self.entries.get_mut(term.string()) else {
            return false;
        };
        let removed = languages.remove(term.language_key(), value);
        if languages.is_empty() {
            self.entries.remove(term.string());
        }
        removed
    }

    #[must_use]
    pub fn contains_entry(&self, term: &Term, value: &V) -> bool {
        self.entries
            .get(term.string())
            .is_some_and(|languages| languages.contains_entry(term.language_key(), value))
    }

    /// Checks whether `value` is stored under the term string in any language.
    #[must_use]
    pub fn contains_string_entry(&self, string: &str, value: &V) -> bool {
        self.entries.get(string).is_some_and(|languages| languages.contains_value(value))
    }
}

impl<T> TermMap<Option<T>> {
    /// Returns the first `Some` value associated with `term`.
    #[must_use]
    pub fn get_non_null_value(&self, term: &Term) -> Option<&T> {
        self.entries
            .get(term.string())
            .and_then(|languages| languages.get_non_null(term.language_key()))
    }
}

impl<V: PartialEq> PartialEq for TermMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V: Eq> Eq for TermMap<V> {}

impl<V> FromIterator<(Term, V)> for TermMap<V> {
    fn from_iter<I: IntoIterator<Item = (Term, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<V> Extend<(Term, V)> for TermMap<V> {
    fn extend<I: IntoIterator<Item = (Term, V)>>(&mut self, iter: I) {
        for (term, value) in iter {
            self.put(term, value);
        }
    }
}

/// Serialized form of one term and its values.
#[derive(Serialize)]
struct TermEntryRef<'a, V> {
    /// Term string.
    string: &'a str,
    /// Term language, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    /// Values in insertion order.
    values: &'a [V],
}

/// Owned counterpart of [`TermEntryRef`].
#[derive(Deserialize)]
struct TermEntry<V> {
    /// Term string.
    #[serde(default)]
    string: String,
    /// Term language.
    #[serde(default)]
    language: Option<String>,
    /// Values in insertion order.
    values: Vec<V>,
}

impl<V: Serialize> Serialize for TermMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter().flat_map(|(string, languages)| {
            languages.as_map().iter().map(move |(language, values)| TermEntryRef {
                string: string.as_str(),
                language: language.as_deref(),
                values: values.as_slice(),
            })
        }))
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for TermMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<TermEntry<V>>::deserialize(deserializer)?;
        let mut map = Self::new();
        for entry in entries {
            map.put_all(Term::from_parts(entry.string, entry.language), entry.values);
        }
        Ok(map)
    }
}
