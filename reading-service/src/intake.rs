//! Validation of raw form input into a [`MeterReading`].
//!
//! Rules:
//! - kWh must be a finite, non-negative number.
//! - the combined instant must fall inside a broad sanity window
//!   [2000-01-01, 2100-01-01) UTC.
//! - a free-text clock entry must parse as a 12-hour time.

use reading_core::timefmt::{self, TimestampParseError};
use reading_core::MeterReading;
use time::macros::datetime;
use time::{Date, OffsetDateTime, Time};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("reading must be a non-negative kWh value, got {0}")]
    NegativeReading(f64),
    #[error("reading must be a finite kWh value")]
    NonFiniteReading,
    #[error("time of reading: {0}")]
    Clock(#[from] TimestampParseError),
    #[error("reading timestamp {0} is outside the accepted range")]
    TimestampOutOfRange(OffsetDateTime),
}

/// Clock input as the form provides it: a structured picker value or the
/// free-text 12-hour field.
#[derive(Debug, Clone)]
pub enum ClockEntry {
    Picker(Time),
    FreeText(String),
}

const MIN_TS: OffsetDateTime = datetime!(2000-01-01 00:00:00 UTC);
const MAX_TS: OffsetDateTime = datetime!(2100-01-01 00:00:00 UTC);

/// Build a validated reading from raw form input. The date/clock pair is
/// localized exactly once, here; no caller ever re-localizes an instant.
pub fn submit_reading(
    date: Date,
    clock: ClockEntry,
    kwh: f64,
) -> Result<MeterReading, ValidationError> {
    if !kwh.is_finite() {
        return Err(ValidationError::NonFiniteReading);
    }
    if kwh < 0.0 {
        return Err(ValidationError::NegativeReading(kwh));
    }

    let clock = match clock {
        ClockEntry::Picker(time) => time,
        ClockEntry::FreeText(text) => timefmt::parse_clock_12h(&text)?,
    };

    let ts = timefmt::combine(date, clock);
    if ts < MIN_TS || ts >= MAX_TS {
        return Err(ValidationError::TimestampOutOfRange(ts));
    }

    Ok(MeterReading::new(ts, kwh))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, time};

    #[test]
    fn accepts_a_valid_picker_submission() {
        let reading = submit_reading(
            date!(2025 - 06 - 01),
            ClockEntry::Picker(time!(10:00)),
            10.0,
        )
        .unwrap();
        assert_eq!(reading.ts, datetime!(2025-06-01 10:00:00 +5:30));
        assert_eq!(reading.kwh, 10.0);
    }

    #[test]
    fn accepts_a_valid_free_text_submission() {
        let reading = submit_reading(
            date!(2025 - 06 - 01),
            ClockEntry::FreeText("9:15 PM".into()),
            120.5,
        )
        .unwrap();
        assert_eq!(reading.ts, datetime!(2025-06-01 21:15:00 +5:30));
    }

    #[test]
    fn rejects_negative_reading() {
        let res = submit_reading(
            date!(2025 - 06 - 01),
            ClockEntry::Picker(time!(10:00)),
            -0.1,
        );
        assert!(matches!(res, Err(ValidationError::NegativeReading(_))));
    }

    #[test]
    fn rejects_non_finite_reading() {
        let res = submit_reading(
            date!(2025 - 06 - 01),
            ClockEntry::Picker(time!(10:00)),
            f64::NAN,
        );
        assert!(matches!(res, Err(ValidationError::NonFiniteReading)));
    }

    #[test]
    fn rejects_out_of_range_clock_text() {
        let res = submit_reading(
            date!(2025 - 06 - 01),
            ClockEntry::FreeText("13:45 PM".into()),
            10.0,
        );
        assert!(matches!(res, Err(ValidationError::Clock(_))));
    }

    #[test]
    fn rejects_timestamp_outside_sanity_window() {
        let res = submit_reading(
            date!(1999 - 12 - 31),
            ClockEntry::Picker(time!(10:00)),
            10.0,
        );
        assert!(matches!(res, Err(ValidationError::TimestampOutOfRange(_))));
    }
}
