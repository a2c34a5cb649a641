//! Timestamp normalization for meter readings.
//!
//! All readings live in one fixed civil timezone (UTC+5:30, no DST). The
//! functions here are the only place an offset is ever attached to or
//! stripped from a timestamp: the form hands over naive date/clock values,
//! [`combine`] localizes them exactly once, [`encode`] fixes the canonical
//! stored form, and [`decode`] rebuilds the same absolute instant from the
//! canonical form or from any encoding an earlier version of the store wrote.

use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// The configured civil timezone. A single fixed offset; no DST transitions
/// are ever applied.
pub const IST: UtcOffset = offset!(+5:30);

#[derive(thiserror::Error, Debug)]
pub enum TimestampParseError {
    #[error("time of day must look like 'hh:mm AM' or 'hh:mm PM': {0}")]
    Clock(#[source] time::error::Parse),
    #[error("timestamp '{text}' matches no supported encoding")]
    Timestamp { text: String },
}

/// Interpret a calendar date and wall-clock time as civil time in the fixed
/// timezone and attach its offset.
///
/// Both inputs are naive by construction, so a value that already carries an
/// offset cannot be localized a second time.
pub fn combine(date: Date, clock: Time) -> OffsetDateTime {
    PrimitiveDateTime::new(date, clock).assume_offset(IST)
}

/// Parse a free-text 12-hour clock entry with an explicit meridiem,
/// e.g. `"9:15 PM"` or `"09:15 PM"`.
///
/// Out-of-range hours (`"13:45 PM"`) are an error, never wrapped into a
/// valid time.
pub fn parse_clock_12h(text: &str) -> Result<Time, TimestampParseError> {
    let fmt = format_description!("[hour padding:none repr:12]:[minute] [period]");
    Time::parse(text.trim(), fmt).map_err(TimestampParseError::Clock)
}

/// Canonical stored encoding: RFC 3339 with an explicit offset, always
/// rendered in the fixed timezone (`2025-06-01T10:00:00+05:30`).
pub fn encode(instant: OffsetDateTime) -> Result<String, time::error::Format> {
    instant.to_offset(IST).format(&Rfc3339)
}

/// Rebuild an instant from a stored timestamp string.
///
/// Accepted encodings, in order of preference:
/// 1. RFC 3339 with explicit offset or `Z` (the canonical form);
/// 2. `YYYY-MM-DD HH:MM:SS ZZZ` with an abbreviated zone name, as written by
///    the flat-file era of the store (`IST` resolves to +5:30, `UTC`/`GMT`
///    to +0:00);
/// 3. bare `YYYY-MM-DD HH:MM:SS` with no offset information, treated as
///    civil time in the fixed timezone — never as raw UTC, which would shift
///    every report by five and a half hours.
pub fn decode(text: &str) -> Result<OffsetDateTime, TimestampParseError> {
    let text = text.trim();
    if let Ok(instant) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(instant);
    }

    let naive = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let (body, offset) = match text.rsplit_once(' ') {
        Some((body, zone @ ("IST" | "UTC" | "GMT"))) => {
            let offset = if zone == "IST" { IST } else { UtcOffset::UTC };
            (body, offset)
        }
        _ => (text, IST),
    };

    PrimitiveDateTime::parse(body, naive)
        .map(|dt| dt.assume_offset(offset))
        .map_err(|_| TimestampParseError::Timestamp {
            text: text.to_owned(),
        })
}

/// Render an instant for reports: converted to the fixed timezone, formatted
/// as `DD-MM-YYYY hh:mm AM/PM`.
pub fn display(instant: OffsetDateTime) -> String {
    let fmt = format_description!("[day]-[month]-[year] [hour repr:12]:[minute] [period]");
    instant
        .to_offset(IST)
        .format(fmt)
        .unwrap_or_else(|_| instant.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn combine_attaches_fixed_offset() {
        let instant = combine(date!(2025 - 06 - 01), time!(10:00));
        assert_eq!(instant, datetime!(2025-06-01 10:00:00 +5:30));
        assert_eq!(instant, datetime!(2025-06-01 04:30:00 UTC));
    }

    #[test]
    fn encode_is_rfc3339_in_fixed_offset() {
        let instant = datetime!(2025-06-01 04:30:00 UTC);
        assert_eq!(encode(instant).unwrap(), "2025-06-01T10:00:00+05:30");
    }

    #[test]
    fn round_trip_preserves_the_instant() {
        let instant = combine(date!(2024 - 12 - 31), time!(23:45));
        let stored = encode(instant).unwrap();
        assert_eq!(decode(&stored).unwrap(), instant);
    }

    #[test]
    fn decode_canonical_with_utc_marker() {
        let instant = decode("2025-06-01T04:30:00Z").unwrap();
        assert_eq!(instant, datetime!(2025-06-01 04:30:00 UTC));
    }

    #[test]
    fn decode_legacy_explicit_offset() {
        let instant = decode("2025-06-01T10:00:00+05:30").unwrap();
        assert_eq!(instant, datetime!(2025-06-01 04:30:00 UTC));
    }

    #[test]
    fn decode_legacy_zone_abbreviation() {
        let instant = decode("2025-06-01 10:00:00 IST").unwrap();
        assert_eq!(instant, datetime!(2025-06-01 04:30:00 UTC));
    }

    #[test]
    fn decode_legacy_utc_zone_abbreviation() {
        let instant = decode("2025-06-01 10:00:00 UTC").unwrap();
        assert_eq!(instant, datetime!(2025-06-01 10:00:00 UTC));
    }

    #[test]
    fn decode_bare_naive_is_local_civil_time_not_utc() {
        let instant = decode("2025-06-01 10:00:00").unwrap();
        assert_eq!(instant, datetime!(2025-06-01 04:30:00 UTC));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            decode("last tuesday, around noon"),
            Err(TimestampParseError::Timestamp { .. })
        ));
    }

    #[test]
    fn clock_parses_padded_and_unpadded_hours() {
        assert_eq!(parse_clock_12h("09:15 PM").unwrap(), time!(21:15));
        assert_eq!(parse_clock_12h("9:15 PM").unwrap(), time!(21:15));
        assert_eq!(parse_clock_12h("12:00 AM").unwrap(), time!(0:00));
        assert_eq!(parse_clock_12h("12:00 PM").unwrap(), time!(12:00));
    }

    #[test]
    fn clock_rejects_out_of_range_hour() {
        assert!(matches!(
            parse_clock_12h("13:45 PM"),
            Err(TimestampParseError::Clock(_))
        ));
    }

    #[test]
    fn clock_rejects_missing_meridiem() {
        assert!(parse_clock_12h("09:15").is_err());
    }

    #[test]
    fn display_renders_in_fixed_timezone() {
        assert_eq!(
            display(datetime!(2025-06-01 04:30:00 UTC)),
            "01-06-2025 10:00 AM"
        );
        assert_eq!(
            display(datetime!(2025-06-01 18:30:00 +5:30)),
            "01-06-2025 06:30 PM"
        );
        assert_eq!(
            display(datetime!(2025-06-01 00:15:00 +5:30)),
            "01-06-2025 12:15 AM"
        );
    }
}
