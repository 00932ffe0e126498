//! Civil calendar dates.
//!
//! Converts between days since the Unix epoch (1970-01-01), Unix
//! milliseconds, `YYYY-MM-DD` strings (what an HTML date input submits) and
//! the `dd/mm/yyyy` display format used in Brazil.
//!
//! Every [`Date`] is valid: the fields are private and each constructor
//! either checks them or clamps into [`Date::MIN`]`..=`[`Date::MAX`].

use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::DateParseError;

const MILLISECONDS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const MIN_YEAR: i32 = -999_999;
const MAX_YEAR: i32 = 999_999;

const MIN_DAYS: i32 = date_to_days(MIN_YEAR, 1, 1);
const MAX_DAYS: i32 = date_to_days(MAX_YEAR, 12, 31);

/// A proleptic Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DateFields"))]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

/// Unchecked wire shape of a [`Date`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct DateFields {
    year: i32,
    month: u32,
    day: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<DateFields> for Date {
    type Error = DateParseError;

    fn try_from(f: DateFields) -> Result<Self, Self::Error> {
        Date::checked(f.year, f.month, f.day, || iso(f.year, f.month, f.day))
    }
}

/// Returns true if the given year is a leap year.
const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Returns the number of days in a given month (1-indexed).
const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Days since Unix epoch (Howard Hinnant's `days_from_civil`).
///
/// Only called with validated dates.
const fn date_to_days(year: i32, month: u32, day: u32) -> i32 {
    let y = if month <= 2 { year - 1 } else { year } as i64;
    let m = if month <= 2 {
        month as i64 + 9
    } else {
        month as i64 - 3
    };

    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u32; // year of era
    let doy = (153 * m as u32 + 2) / 5 + day - 1; // day of year
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // day of era

    (era * 146097 + doe as i64 - 719468) as i32
}

/// Inverse of [`date_to_days`].
const fn days_to_date(days: i32) -> (i32, u32, u32) {
    let z = days as i64 + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };

    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

fn iso(year: i32, month: u32, day: u32) -> String {
    format!("{year:04}-{month:02}-{day:02}")
}

impl Date {
    /// Earliest representable date, `-999999-01-01`.
    pub const MIN: Date = Date {
        year: MIN_YEAR,
        month: 1,
        day: 1,
    };

    /// Latest representable date, `999999-12-31`.
    pub const MAX: Date = Date {
        year: MAX_YEAR,
        month: 12,
        day: 31,
    };

    /// Compile-time constructor for the static tables; an invalid date
    /// fails const evaluation.
    pub(crate) const fn ymd(year: i32, month: u32, day: u32) -> Self {
        assert!(year >= MIN_YEAR && year <= MAX_YEAR);
        assert!(month >= 1 && month <= 12);
        assert!(day >= 1 && day <= days_in_month(year, month));
        Self { year, month, day }
    }

    fn checked(
        year: i32,
        month: u32,
        day: u32,
        input: impl FnOnce() -> String,
    ) -> Result<Self, DateParseError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateParseError::Year {
                input: input(),
                year,
            });
        }
        if !(1..=12).contains(&month) {
            return Err(DateParseError::Month {
                input: input(),
                month,
            });
        }
        if day < 1 || day > days_in_month(year, month) {
            return Err(DateParseError::Day {
                input: input(),
                day,
            });
        }
        Ok(Self { year, month, day })
    }

    /// Creates a date, returning `None` if any component is out of range.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        Self::checked(year, month, day, || iso(year, month, day)).ok()
    }

    /// Date `days` after the epoch, clamped to [`Date::MIN`]`..=`[`Date::MAX`].
    pub fn from_days_since_epoch(days: i32) -> Self {
        let (year, month, day) = days_to_date(days.clamp(MIN_DAYS, MAX_DAYS));
        Self { year, month, day }
    }

    /// Date (UTC) of a Unix timestamp in milliseconds, clamped like
    /// [`Date::from_days_since_epoch`].
    pub fn from_epoch_millis(millis: i64) -> Self {
        let days = millis
            .div_euclid(MILLISECONDS_PER_DAY)
            .clamp(i64::from(MIN_DAYS), i64::from(MAX_DAYS));
        Self::from_days_since_epoch(days as i32)
    }

    /// Today's date in UTC.
    pub fn today() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0);
        Self::from_epoch_millis(millis)
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Month, 1-12.
    pub const fn month(&self) -> u32 {
        self.month
    }

    pub const fn day(&self) -> u32 {
        self.day
    }

    pub fn days_since_epoch(&self) -> i32 {
        date_to_days(self.year, self.month, self.day)
    }

    /// Parses a `YYYY-MM-DD` date.
    pub fn parse_iso(input: &str) -> Result<Self, DateParseError> {
        let format_error = || DateParseError::Format {
            input: input.to_string(),
        };

        let bytes = input.as_bytes();
        if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
            return Err(format_error());
        }
        let field = |range: std::ops::Range<usize>| -> Result<u32, DateParseError> {
            let part = &input[range];
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(format_error());
            }
            part.parse().map_err(|_| format_error())
        };

        let year = field(0..4)? as i32;
        let month = field(5..7)?;
        let day = field(8..10)?;

        Self::checked(year, month, day, || input.to_string())
    }

    /// Formats as `YYYY-MM-DD`.
    pub fn to_iso(&self) -> String {
        iso(self.year, self.month, self.day)
    }

    /// Formats as `dd/mm/yyyy`.
    pub fn to_short_br(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }
}
