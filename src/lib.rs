//! termkit
//!
//! Language-tagged terms and the containers that hold values keyed by them.
//!
//! - [`Multimap`]: a key associated with an ordered collection of values
//! - [`TermMap`]: values keyed by a term string and an optional language code
//! - [`Term`]: a string with an optional language, written `value@lang`
//! - [`Language`]: the catalog of ISO 639-1 two-letter codes
//!
//! Helpers for string similarity, ISO-8601 dates and recursive file deletion
//! live in [`similarity`], [`dates`] and [`fs_util`].

pub mod config;
pub mod dates;
pub mod fs_util;
pub mod language;
pub mod multimap;
pub mod similarity;
pub mod term;
pub mod term_map;

pub use language::{
    Language,
    UnknownLanguageError,
};
pub use multimap::Multimap;
pub use term::Term;
pub use term_map::TermMap;
