//! Date-time processing.

use core::fmt;

const DOY_AT_MONTH: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
const DOY_AT_MONTH_LEAP: [i32; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Number of seconds from 0000-01-01 00:00:00 to 1970-01-01 00:00:00.
const UNIX_EPOCH_FROM_YEAR_0: i128 = days_from_year_0(1970) as i128 * 86400;

/// Returns whether the year is a leap year for a 64-bit signed year.
///
/// The argument is the proleptic Gregorian year, with the ISO 8601
/// interpretation of year 0 as year 1 BC. Year 0 does not obey the usual rule
/// and is considered a leap year.
///
/// The whole `i64` value range is supported.
const fn is_leap(year: i64) -> bool {
    (year & 0b11) == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Calculates the month and the day of the month for a 0-based day of the year.
fn month_and_day_of_month(year: i64, doy: i32) -> (u8, u8) {
    let table = if is_leap(year) {
        &DOY_AT_MONTH_LEAP
    } else {
        &DOY_AT_MONTH
    };

    let idx = table.binary_search(&doy).unwrap_or_else(|e| e - 1);
    let month = idx as u8 + 1;
    let day = (doy - table[idx]) as u8 + 1;

    (month, day)
}

/// Returns the number of elapsed days since the first day of year 0 to the
/// first day of the provided year.
///
/// The argument is the proleptic Gregorian year, with the ISO 8601
/// interpretation of year 0 as year 1 BC.
///
/// The result is negative for negative years.
const fn days_from_year_0(year: i32) -> i64 {
    let year = year as i64;
    let offset = (year > 0) as i64;
    let y = year - offset;
    let m4 = y / 4 + offset;
    let m100 = y / 100;
    let m400 = m100 / 4;

    year * 365 + m4 - m100 + m400
}

/// Returns the year, the day of the year and the second of the day for the
/// provided timestamp.
///
/// This will not overflow provided that the timestamp is in the range ±2^97.
fn secs_to_date_time(secs_from_year_0: i128) -> (i64, i32, i64) {
    // Find the nearest 400-year boundary that is before or at the date. This
    // requires a division with rounding-down behavior even when the timestamp
    // is negative.
    let mut n_period = (secs_from_year_0 / (146097 * 86400)) as i64;
    let mut sec = (secs_from_year_0 % (146097 * 86400)) as i64;
    if sec < 0 {
        n_period -= 1;
        sec += 146097 * 86400;
    }

    // -- `sec` is now guaranteed to be positive.

    let mut year = 400 * n_period;
    let mut day = sec / 86400;
    let sec = sec - day * 86400;
    if day < 366 {
        return (year, day as i32, sec);
    }

    // Find the nearest 100-year, 4-year and 1-year boundaries that are before
    // or at the date.
    for (years_in_period, days_in_period, starts_with_non_leap_year) in
        [(100, 36524, 1), (4, 1461, 0), (1, 365, 1)]
    {
        day -= starts_with_non_leap_year;
        let n_period = day / days_in_period;
        year += years_in_period * n_period;
        day -= n_period * days_in_period;
        if day < (366 - starts_with_non_leap_year) {
            return (year, day as i32, sec);
        }
        day += starts_with_non_leap_year;
    }

    unreachable!();
}

/// A UTC date-time in the proleptic Gregorian calendar.
///
/// This is a plain calendar breakdown of a Unix timestamp, meant for display
/// and for interoperability with calendar APIs. Leap seconds are never
/// represented as a 60th second.
///
/// Its `Display` implementation produces an RFC 3339 string with nanosecond
/// precision.
///
/// # Examples
///
/// ```
/// use tai64_utc::UtcDateTime;
///
/// let date_time = UtcDateTime::from_unix_timestamp(951_827_696, 123_000_000);
///
/// assert_eq!((date_time.year(), date_time.month(), date_time.day()), (2000, 2, 29));
/// assert_eq!(date_time.to_string(), "2000-02-29T12:34:56.123000000Z");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UtcDateTime {
    // Declaration order sets the priority of the derived comparisons.
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    nanosecond: u32,
}

impl UtcDateTime {
    /// Creates a date-time from a Unix timestamp.
    ///
    /// # Panics
    ///
    /// This constructor will panic if the number of nanoseconds is greater than
    /// or equal to 1 second.
    pub fn from_unix_timestamp(secs: i64, subsec_nanos: u32) -> Self {
        assert!(
            subsec_nanos < crate::NANOS_PER_SEC,
            "invalid number of nanoseconds"
        );

        let (year, doy, sec_of_day) = secs_to_date_time(secs as i128 + UNIX_EPOCH_FROM_YEAR_0);
        let (month, day) = month_and_day_of_month(year, doy);

        Self {
            year,
            month,
            day,
            hour: (sec_of_day / 3600) as u8,
            minute: (sec_of_day / 60 % 60) as u8,
            second: (sec_of_day % 60) as u8,
            nanosecond: subsec_nanos,
        }
    }

    /// Returns the proleptic Gregorian year, year 0 being 1 BC.
    pub const fn year(&self) -> i64 {
        self.year
    }

    /// Returns the month, between 1 and 12.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the day of the month, between 1 and 31.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Returns the hour, between 0 and 23.
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Returns the minute, between 0 and 59.
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Returns the second, between 0 and 59.
    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Returns the sub-second number of nanoseconds.
    pub const fn nanosecond(&self) -> u32 {
        self.nanosecond
    }
}

impl fmt::Display for UtcDateTime {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year < 0 {
            write!(fmt, "-{:04}", self.year.unsigned_abs())?;
        } else {
            write!(fmt, "{:04}", self.year)?;
        }

        write!(
            fmt,
            "-{:02}-{:02}T{:02}:{:02}:{:02}.{:09}Z",
            self.month, self.day, self.hour, self.minute, self.second, self.nanosecond
        )
    }
}
