//! ISO-8601 date rendering and parsing.
//!
//! Formats use strftime-style specifiers (see [`chrono::format::strftime`]).
//! Rendering without an explicit zone uses the local time zone of the process.

use std::fmt::Write as _;

use chrono::format::{
    Item,
    ParseErrorKind,
    StrftimeItems,
};
use chrono::{
    DateTime,
    FixedOffset,
    Local,
    NaiveDateTime,
    Offset,
    TimeZone,
    Utc,
};
use thiserror::Error;

use crate::config::DateSettings;

/// ISO-8601 date-time with a numeric offset, e.g. `2015-03-01T10:00:00+0100`.
pub const FORMAT_DATE_ISO: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("Failed to parse date '{input}': {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid date format '{0}'")]
    InvalidFormat(String),

    #[error("Invalid time zone '{0}'")]
    InvalidTimeZone(String),

    #[error("Local time '{0}' does not exist in the local time zone")]
    InvalidLocalTime(String),

    #[error("Failed to format date with '{0}'")]
    Format(String),
}

/// Parses a date in [`FORMAT_DATE_ISO`].
///
/// # Errors
/// Returns [`DateError::Parse`] if the input does not match the format.
pub fn from_iso_date_string(input: &str) -> Result<DateTime<FixedOffset>, DateError> {
    DateTime::parse_from_str(input, FORMAT_DATE_ISO).map_err(|source| parse_error(input, source))
}

/// Renders a date in [`FORMAT_DATE_ISO`], in the local time zone.
#[must_use]
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(FORMAT_DATE_ISO).to_string()
}

/// Renders a date with the given format and offset.
///
/// `format` defaults to [`FORMAT_DATE_ISO`] and `zone` to the local time zone.
///
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc};
/// use termkit::dates::to_iso_string_with;
///
/// let date = Utc.with_ymd_and_hms(2015, 3, 1, 9, 0, 0).unwrap();
/// let zone = FixedOffset::east_opt(3600);
/// assert_eq!(to_iso_string_with(&date, None, zone).unwrap(), "2015-03-01T10:00:00+0100");
/// ```
///
/// # Errors
/// - [`DateError::InvalidFormat`] if the format has an unknown specifier
/// - [`DateError::Format`] if the date cannot be rendered with the format
pub fn to_iso_string_with(
    date: &DateTime<Utc>,
    format: Option<&str>,
    zone: Option<FixedOffset>,
) -> Result<String, DateError> {
    let format = format.unwrap_or(FORMAT_DATE_ISO);
    validate_format(format)?;

    match zone {
        Some(offset) => render(&date.with_timezone(&offset), format),
        None => render(&date.with_timezone(&Local), format),
    }
}

/// Renders with the given format, reporting formatter failures as errors.
fn render<Tz>(date: &DateTime<Tz>, format: &str) -> Result<String, DateError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut rendered = String::new();
    write!(rendered, "{}", date.format_with_items(StrftimeItems::new(format)))
        .map_err(|_| DateError::Format(format.to_string()))?;
    Ok(rendered)
}

/// Checks that every specifier in `format` is known.
///
/// # Errors
/// Returns [`DateError::InvalidFormat`] naming the offending format.
pub fn validate_format(format: &str) -> Result<(), DateError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DateError::InvalidFormat(format.to_string()));
    }
    Ok(())
}

/// Parses a fixed offset such as `+01:00`, `-0530`, `Z` or `UTC`.
///
/// # Errors
/// Returns [`DateError::InvalidTimeZone`] for anything else, including named zones.
pub fn parse_time_zone(zone: &str) -> Result<FixedOffset, DateError> {
    match zone {
        "Z" | "UTC" => Ok(Utc.fix()),
        _ => zone.parse().map_err(|_| DateError::InvalidTimeZone(zone.to_string())),
    }
}

/// Logs and wraps a parse failure.
fn parse_error(input: &str, source: chrono::ParseError) -> DateError {
    tracing::debug!(input, %source, "Failed to parse date");
    DateError::Parse { input: input.to_string(), source }
}

/// Renders and parses dates with a fixed format and an optional fixed offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormatter {
    /// Validated strftime-style pattern.
    format: String,

    /// Local time zone when unset.
    zone: Option<FixedOffset>,
}

impl DateFormatter {
    /// # Errors
    /// Returns [`DateError::InvalidFormat`] if the format has an unknown specifier.
    pub fn new(format: impl Into<String>, zone: Option<FixedOffset>) -> Result<Self, DateError> {
        let format = format.into();
        validate_format(&format)?;
        Ok(Self { format, zone })
    }

    /// # Errors
    /// Returns an error if the format or the time zone of the settings is invalid.
    pub fn from_settings(settings: &DateSettings) -> Result<Self, DateError> {
        let zone = settings.time_zone.as_deref().map(parse_time_zone).transpose()?;
        Self::new(settings.format.clone(), zone)
    }

    #[must_use]
    pub fn format_str(&self) -> &str {
        &self.format
    }

    #[must_use]
    pub const fn zone(&self) -> Option<FixedOffset> {
        self.zone
    }

    /// # Errors
    /// Returns [`DateError::Format`] if the date cannot be rendered.
    pub fn format(&self, date: &DateTime<Utc>) -> Result<String, DateError> {
        to_iso_string_with(date, Some(&self.format), self.zone)
    }

    /// Parses a date in this formatter's format.
    ///
    /// If the format carries no offset, the input is read as a time in the
    /// formatter's zone.
    ///
    /// # Errors
    /// - [`DateError::Parse`] if the input does not match the format
    /// - [`DateError::InvalidLocalTime`] if the time falls in a local-time gap
    pub fn parse(&self, input: &str) -> Result<DateTime<FixedOffset>, DateError> {
        match DateTime::parse_from_str(input, &self.format) {
            Ok(date) => Ok(date),
            Err(e) if e.kind() == ParseErrorKind::NotEnough => {
                let naive = NaiveDateTime::parse_from_str(input, &self.format)
                    .map_err(|source| parse_error(input, source))?;
                self.attach_zone(&naive, input)
            }
            Err(source) => Err(parse_error(input, source)),
        }
    }

    /// Interprets a naive date-time in the formatter's zone.
    fn attach_zone(
        &self,
        naive: &NaiveDateTime,
        input: &str,
    ) -> Result<DateTime<FixedOffset>, DateError> {
        let date = match self.zone {
            Some(offset) => offset.from_local_datetime(naive).single(),
            None => Local.from_local_datetime(naive).earliest().map(|date| date.fixed_offset()),
        };
        date.ok_or_else(|| DateError::InvalidLocalTime(input.to_string()))
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self { format: FORMAT_DATE_ISO.to_string(), zone: None }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 3, 1, 9, 0, 0).unwrap()
    }

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[rstest]
    fn parse_iso_date(date: DateTime<Utc>) {
        let parsed = from_iso_date_string("2015-03-01T10:00:00+0100").unwrap();

        assert_that!(parsed.offset().local_minus_utc(), eq(3600));
        assert_eq!(parsed.with_timezone(&Utc), date);
    }

    #[rstest]
    #[case::date_only("2015-03-01")]
    #[case::missing_offset("2015-03-01T10:00:00")]
    #[case::garbage("yesterday")]
    fn parse_iso_date_rejects(#[case] input: &str) {
        let error = from_iso_date_string(input).unwrap_err();

        assert!(matches!(&error, DateError::Parse { input: i, .. } if i == input));
        assert_that!(error.to_string(), contains_substring(input));
    }

    #[rstest]
    fn to_iso_string_round_trips(date: DateTime<Utc>) {
        let rendered = to_iso_string(&date);

        let parsed = from_iso_date_string(&rendered).unwrap();
        assert_eq!(parsed.with_timezone(&Utc), date);
    }

    #[rstest]
    #[case::utc(0, "2015-03-01T09:00:00+0000")]
    #[case::east(1, "2015-03-01T10:00:00+0100")]
    #[case::west(-5, "2015-03-01T04:00:00-0500")]
    fn to_iso_string_with_zone(date: DateTime<Utc>, #[case] hours: i32, #[case] expected: &str) {
        let rendered = to_iso_string_with(&date, None, Some(offset(hours))).unwrap();

        assert_that!(rendered, eq(expected));
    }

    #[rstest]
    fn to_iso_string_with_custom_format(date: DateTime<Utc>) {
        let rendered = to_iso_string_with(&date, Some("%d/%m/%Y %H:%M"), Some(offset(2))).unwrap();

        assert_that!(rendered, eq("01/03/2015 11:00"));
    }

    #[rstest]
    fn to_iso_string_with_invalid_format(date: DateTime<Utc>) {
        let result = to_iso_string_with(&date, Some("%Y-%Q"), None);

        assert_eq!(result, Err(DateError::InvalidFormat("%Y-%Q".to_string())));
    }

    #[rstest]
    #[case("+01:00", 3600)]
    #[case("-0530", -19800)]
    #[case("Z", 0)]
    #[case("UTC", 0)]
    fn parse_time_zone_offsets(#[case] zone: &str, #[case] seconds: i32) {
        assert_that!(parse_time_zone(zone).unwrap().local_minus_utc(), eq(seconds));
    }

    #[rstest]
    #[case("Europe/Dublin")]
    #[case("+25:00")]
    #[case("")]
    fn parse_time_zone_rejects(#[case] zone: &str) {
        assert_eq!(parse_time_zone(zone), Err(DateError::InvalidTimeZone(zone.to_string())));
    }

    #[rstest]
    fn formatter_from_settings(date: DateTime<Utc>) {
        let settings =
            DateSettings { format: FORMAT_DATE_ISO.to_string(), time_zone: Some("+01:00".into()) };

        let formatter = DateFormatter::from_settings(&settings).unwrap();

        assert_that!(formatter.format(&date).unwrap(), eq("2015-03-01T10:00:00+0100"));
        assert_eq!(formatter.zone(), Some(offset(1)));
    }

    #[rstest]
    fn formatter_from_settings_rejects_zone() {
        let settings =
            DateSettings { format: FORMAT_DATE_ISO.to_string(), time_zone: Some("Mars".into()) };

        let result = DateFormatter::from_settings(&settings);

        assert_eq!(result, Err(DateError::InvalidTimeZone("Mars".to_string())));
    }

    #[rstest]
    fn formatter_parse_attaches_zone_to_naive_format(date: DateTime<Utc>) {
        let formatter = DateFormatter::new("%Y-%m-%d %H:%M:%S", Some(offset(2))).unwrap();

        let parsed = formatter.parse("2015-03-01 11:00:00").unwrap();

        assert_that!(parsed.offset().local_minus_utc(), eq(7200));
        assert_eq!(parsed.with_timezone(&Utc), date);
    }

    #[rstest]
    fn formatter_round_trips(date: DateTime<Utc>) {
        let formatter = DateFormatter::default();

        let rendered = formatter.format(&date).unwrap();

        assert_eq!(formatter.parse(&rendered).unwrap().with_timezone(&Utc), date);
    }
}
