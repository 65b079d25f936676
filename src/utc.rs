//! Conversions between TAI64 labels and UTC-based timestamps.
//!
//! All conversions go through Unix seconds: the applicable leap seconds are
//! added or removed with a [`LeapSecondTable`] and the TAI64 bias is then
//! applied or removed.

use crate::date_time::UtcDateTime;
use crate::errors::OutOfRangeError;
use crate::leap_seconds::LeapSecondTable;
use crate::tai64::{Tai64, Tai64N, Tai64NA};
use crate::NANOS_PER_SEC;

impl Tai64 {
    /// Creates a label from a Unix timestamp.
    ///
    /// Returns an error if the timestamp is outside the representable range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai64_utc::{LeapSecondTable, Tai64};
    ///
    /// assert_eq!(
    ///     Tai64::from_unix_secs(0, &LeapSecondTable::IERS),
    ///     Ok(Tai64::UNIX_EPOCH)
    /// );
    /// ```
    pub fn from_unix_secs(secs: i64, table: &LeapSecondTable<'_>) -> Result<Self, OutOfRangeError> {
        table
            .checked_tai_from_utc(secs)
            .ok_or(OutOfRangeError(()))
            .and_then(Self::from_tai_secs)
    }

    /// Returns the number of seconds of the corresponding Unix timestamp.
    ///
    /// Returns an error if the label lies in the reserved range `[2^63,
    /// 2^64)`.
    pub fn to_unix_secs(&self, table: &LeapSecondTable<'_>) -> Result<i64, OutOfRangeError> {
        self.to_tai_secs().and_then(|secs| {
            table
                .checked_utc_from_tai(secs)
                .ok_or(OutOfRangeError(()))
        })
    }

    /// Returns the calendar breakdown of the corresponding UTC date-time.
    pub fn to_utc_date_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<UtcDateTime, OutOfRangeError> {
        self.to_tai64n().to_utc_date_time(table)
    }

    /// Creates a label from a `SystemTime` timestamp, truncating sub-second
    /// precision.
    #[cfg(feature = "std")]
    pub fn from_system_time(
        system_time: &std::time::SystemTime,
        table: &LeapSecondTable<'_>,
    ) -> Result<Self, OutOfRangeError> {
        Tai64N::from_system_time(system_time, table).map(|t| t.to_tai64())
    }

    /// Returns the corresponding `SystemTime`.
    #[cfg(feature = "std")]
    pub fn to_system_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<std::time::SystemTime, OutOfRangeError> {
        self.to_tai64n().to_system_time(table)
    }

    /// Returns the corresponding `chrono::DateTime`.
    #[cfg(feature = "chrono")]
    pub fn to_chrono_date_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<chrono::DateTime<chrono::Utc>, OutOfRangeError> {
        self.to_tai64n().to_chrono_date_time(table)
    }
}

impl Tai64N {
    /// Creates a label from a Unix timestamp.
    ///
    /// The leap seconds applicable at the date represented by the timestamp
    /// are looked up in the provided table.
    ///
    /// Returns an error if the timestamp is outside the representable range or
    /// if the number of nanoseconds is greater than or equal to 1 second.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai64_utc::{LeapSecondTable, Tai64N};
    ///
    /// // 2001-09-15 05:05:00.005 UTC, when TAI was 32s ahead of UTC.
    /// let label = Tai64N::from_unix_timestamp(1_000_530_300, 5_000_000, &LeapSecondTable::IERS)
    ///     .unwrap();
    ///
    /// assert_eq!(label.to_tai64().to_tai_secs(), Ok(1_000_530_332));
    /// assert_eq!(label.subsec_nanos(), 5_000_000);
    /// ```
    pub fn from_unix_timestamp(
        secs: i64,
        subsec_nanos: u32,
        table: &LeapSecondTable<'_>,
    ) -> Result<Self, OutOfRangeError> {
        if subsec_nanos >= NANOS_PER_SEC {
            return Err(OutOfRangeError(()));
        }

        Tai64::from_unix_secs(secs, table).map(|t| Self::new(t.0, subsec_nanos))
    }

    /// Creates a label from a signed number of nanoseconds since the Unix
    /// epoch.
    ///
    /// Negative counts designate instants before the Unix epoch; the
    /// nanosecond field of the label always points towards the future.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai64_utc::{LeapSecondTable, Tai64N};
    ///
    /// let table = LeapSecondTable::IERS;
    /// let label = Tai64N::from_unix_nanos(-1, &table).unwrap();
    ///
    /// assert_eq!(label.to_unix_timestamp(&table), Ok((-1, 999_999_999)));
    /// ```
    pub fn from_unix_nanos(
        nanos: i128,
        table: &LeapSecondTable<'_>,
    ) -> Result<Self, OutOfRangeError> {
        let secs = nanos.div_euclid(NANOS_PER_SEC as i128);
        let subsec_nanos = nanos.rem_euclid(NANOS_PER_SEC as i128) as u32;
        let secs = i64::try_from(secs).map_err(|_| OutOfRangeError(()))?;

        Self::from_unix_timestamp(secs, subsec_nanos, table)
    }

    /// Returns the Unix timestamp as a number of seconds and a sub-second
    /// number of nanoseconds.
    ///
    /// Returns an error if the label lies in the reserved range `[2^63,
    /// 2^64)`.
    pub fn to_unix_timestamp(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<(i64, u32), OutOfRangeError> {
        self.to_tai64()
            .to_unix_secs(table)
            .map(|secs| (secs, self.subsec_nanos()))
    }

    /// Returns the calendar breakdown of the corresponding UTC date-time.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai64_utc::{LeapSecondTable, Tai64N};
    ///
    /// let date_time = Tai64N::UNIX_EPOCH.to_utc_date_time(&LeapSecondTable::IERS).unwrap();
    ///
    /// assert_eq!(date_time.to_string(), "1970-01-01T00:00:00.000000000Z");
    /// ```
    pub fn to_utc_date_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<UtcDateTime, OutOfRangeError> {
        self.to_unix_timestamp(table)
            .map(|(secs, nanos)| UtcDateTime::from_unix_timestamp(secs, nanos))
    }

    /// Creates a label from the system clock.
    ///
    /// This is a shorthand for `from_system_time(&SystemTime::now(), table)`.
    ///
    /// Beware that the behavior of the system clock near a leap second
    /// shouldn't be relied upon, where *near* might actually stand for the
    /// whole 24h period preceding a leap second due to the possible use of the
    /// so-called *leap second smearing* strategy.
    ///
    /// See also: [`Tai64NClock`](crate::Tai64NClock) for a monotonic source of
    /// labels.
    #[cfg(feature = "std")]
    pub fn now(table: &LeapSecondTable<'_>) -> Result<Self, OutOfRangeError> {
        Self::from_system_time(&std::time::SystemTime::now(), table)
    }

    /// Creates a label from a `SystemTime` timestamp.
    ///
    /// Timestamps in the past of the Unix epoch are supported.
    #[cfg(feature = "std")]
    pub fn from_system_time(
        system_time: &std::time::SystemTime,
        table: &LeapSecondTable<'_>,
    ) -> Result<Self, OutOfRangeError> {
        let nanos = match system_time.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(after) => after.as_nanos() as i128,
            Err(before) => -(before.duration().as_nanos() as i128),
        };

        Self::from_unix_nanos(nanos, table)
    }

    /// Returns the corresponding `SystemTime`.
    ///
    /// Returns an error if the label lies in the reserved range or if the
    /// result cannot be represented by `SystemTime`.
    #[cfg(feature = "std")]
    pub fn to_system_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<std::time::SystemTime, OutOfRangeError> {
        use std::time::{Duration, SystemTime};

        let (secs, nanos) = self.to_unix_timestamp(table)?;
        let whole_secs = if secs >= 0 {
            SystemTime::UNIX_EPOCH.checked_add(Duration::from_secs(secs as u64))
        } else {
            SystemTime::UNIX_EPOCH.checked_sub(Duration::from_secs(secs.unsigned_abs()))
        };

        whole_secs
            .and_then(|t| t.checked_add(Duration::from_nanos(nanos as u64)))
            .ok_or(OutOfRangeError(()))
    }

    /// Creates a label from a `chrono::DateTime`.
    ///
    /// A `chrono` leap second (a nanosecond field of 1 second or more) is
    /// carried over to the next second.
    #[cfg(feature = "chrono")]
    pub fn from_chrono_date_time<Tz: chrono::TimeZone>(
        date_time: &chrono::DateTime<Tz>,
        table: &LeapSecondTable<'_>,
    ) -> Result<Self, OutOfRangeError> {
        let secs = date_time.timestamp();
        let subsec_nanos = date_time.timestamp_subsec_nanos();

        // The `chrono` crate adds leap seconds to the nanoseconds part, so move
        // any potential leap seconds to the `secs` if necessary.
        let (secs_carry, subsec_nanos) = if subsec_nanos < NANOS_PER_SEC {
            (0, subsec_nanos)
        } else {
            (1, subsec_nanos - NANOS_PER_SEC)
        };

        secs.checked_add(secs_carry)
            .ok_or(OutOfRangeError(()))
            .and_then(|secs| Self::from_unix_timestamp(secs, subsec_nanos, table))
    }

    /// Returns the corresponding `chrono::DateTime`.
    #[cfg(feature = "chrono")]
    pub fn to_chrono_date_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<chrono::DateTime<chrono::Utc>, OutOfRangeError> {
        self.to_unix_timestamp(table).and_then(|(secs, nanos)| {
            chrono::DateTime::from_timestamp(secs, nanos).ok_or(OutOfRangeError(()))
        })
    }
}

impl Tai64NA {
    /// Returns the Unix timestamp as a number of seconds and a sub-second
    /// number of nanoseconds, truncating the attoseconds.
    pub fn to_unix_timestamp(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<(i64, u32), OutOfRangeError> {
        self.to_tai64n().to_unix_timestamp(table)
    }

    /// Returns the calendar breakdown of the corresponding UTC date-time,
    /// truncating the attoseconds.
    pub fn to_utc_date_time(
        &self,
        table: &LeapSecondTable<'_>,
    ) -> Result<UtcDateTime, OutOfRangeError> {
        self.to_tai64n().to_utc_date_time(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leap_seconds::LeapSecond;

    const IERS: LeapSecondTable<'static> = LeapSecondTable::IERS;

    #[test]
    fn unix_epoch() {
        assert_eq!(Tai64::from_unix_secs(0, &IERS), Ok(Tai64::UNIX_EPOCH));
        assert_eq!(Tai64::UNIX_EPOCH.to_unix_secs(&IERS), Ok(0));
        assert_eq!(Tai64N::UNIX_EPOCH.to_unix_timestamp(&IERS), Ok((0, 0)));
        assert_eq!(Tai64NA::UNIX_EPOCH.to_unix_timestamp(&IERS), Ok((0, 0)));

        let date_time = Tai64::UNIX_EPOCH.to_utc_date_time(&IERS).unwrap();
        assert_eq!(date_time.year(), 1970);
        assert_eq!(date_time.month(), 1);
        assert_eq!(date_time.day(), 1);
        assert_eq!(date_time.hour(), 0);
        assert_eq!(date_time.minute(), 0);
        assert_eq!(date_time.second(), 0);
        assert_eq!(date_time.nanosecond(), 0);
    }

    #[test]
    fn from_unix_timestamp() {
        // 2021-11-26 16:50:19.25 UTC.
        let label = Tai64N::from_unix_timestamp(1_637_945_419, 250_000_000, &IERS).unwrap();

        assert_eq!(label.secs(), crate::TAI64_BIAS + 1_637_945_456);
        assert_eq!(label.subsec_nanos(), 250_000_000);
        assert_eq!(
            label.to_unix_timestamp(&IERS),
            Ok((1_637_945_419, 250_000_000))
        );
    }

    #[test]
    fn from_unix_timestamp_invalid() {
        assert!(Tai64N::from_unix_timestamp(0, NANOS_PER_SEC, &IERS).is_err());
        assert!(Tai64N::from_unix_timestamp(i64::MAX, 0, &IERS).is_err());
        assert!(Tai64::from_unix_secs(i64::MIN, &IERS).is_err());
    }

    #[test]
    fn reserved_labels() {
        assert!(Tai64(1 << 63).to_unix_secs(&IERS).is_err());
        assert!(Tai64NA::new(u64::MAX, 0, 0).to_unix_timestamp(&IERS).is_err());
    }

    #[test]
    fn from_unix_nanos() {
        let label = Tai64N::from_unix_nanos(1_500_000_000, &IERS).unwrap();
        assert_eq!(label.to_unix_timestamp(&IERS), Ok((1, 500_000_000)));

        let label = Tai64N::from_unix_nanos(-1_500_000_000, &IERS).unwrap();
        assert_eq!(label.to_unix_timestamp(&IERS), Ok((-2, 500_000_000)));
        assert_eq!(label.to_tai64().to_tai_secs(), Ok(8));

        assert!(Tai64N::from_unix_nanos(i128::MAX, &IERS).is_err());
    }

    #[test]
    fn custom_table() {
        const ENTRIES: [LeapSecond; 1] = [LeapSecond::new(0, 0)];
        let table = LeapSecondTable::new(&ENTRIES).unwrap();

        assert_eq!(Tai64::from_unix_secs(0, &table), Ok(Tai64(crate::TAI64_BIAS)));
    }

    #[test]
    fn before_the_leap_second() {
        // 2016-12-31 23:59:59.9 UTC and 2017-01-01 00:00:00 UTC are 1.1s apart
        // in TAI.
        let t0 = Tai64N::from_unix_timestamp(1_483_228_799, 900_000_000, &IERS).unwrap();
        let t1 = Tai64N::from_unix_timestamp(1_483_228_800, 0, &IERS).unwrap();

        assert_eq!(
            t1.duration_since(t0),
            core::time::Duration::new(1, 100_000_000)
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn now_smoke() {
        const TAI64_START_OF_2022: u64 = crate::TAI64_BIAS + 1_640_995_237;
        const TAI64_START_OF_2100: u64 = crate::TAI64_BIAS + 4_102_444_837;

        let now = Tai64N::now(&IERS).unwrap().secs();

        assert!(now > TAI64_START_OF_2022);
        assert!(now < TAI64_START_OF_2100);
    }

    #[cfg(feature = "std")]
    #[test]
    fn system_time_round_trip() {
        use std::time::{Duration, SystemTime};

        // 2001-01-01 12:34:56.789 UTC.
        let after = SystemTime::UNIX_EPOCH + Duration::new(978_352_496, 789_000_000);
        let label = Tai64N::from_system_time(&after, &IERS).unwrap();

        // Account for the +32 leap seconds on that date.
        assert_eq!(label.to_tai64().to_tai_secs(), Ok(978_352_528));
        assert_eq!(label.to_system_time(&IERS), Ok(after));

        // 1969-12-31 23:59:58.5 UTC.
        let before = SystemTime::UNIX_EPOCH - Duration::new(1, 500_000_000);
        let label = Tai64N::from_system_time(&before, &IERS).unwrap();

        assert_eq!(label.to_unix_timestamp(&IERS), Ok((-2, 500_000_000)));
        assert_eq!(label.to_system_time(&IERS), Ok(before));
    }

    #[cfg(feature = "std")]
    #[test]
    fn tai64_system_time() {
        let label = Tai64::UNIX_EPOCH;

        assert_eq!(
            label.to_system_time(&IERS),
            Ok(std::time::SystemTime::UNIX_EPOCH)
        );
        assert_eq!(
            Tai64::from_system_time(&std::time::SystemTime::UNIX_EPOCH, &IERS),
            Ok(label)
        );
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn from_chrono_date_time() {
        let chrono_date_time =
            chrono::DateTime::parse_from_rfc3339("2001-01-01T12:34:56.789Z").unwrap();
        let label = Tai64N::from_chrono_date_time(&chrono_date_time, &IERS).unwrap();

        // Account for the +32 leap seconds on that date.
        assert_eq!(label.to_tai64().to_tai_secs(), Ok(978_352_528));
        assert_eq!(label.subsec_nanos(), 789_000_000);
    }

    #[cfg(feature = "chrono")]
    #[test]
    fn to_chrono_date_time() {
        assert_eq!(
            Tai64::UNIX_EPOCH.to_chrono_date_time(&IERS).unwrap(),
            chrono::DateTime::parse_from_rfc3339("1970-01-01T00:00:00Z").unwrap()
        );

        // TAI64N label for 1999-01-01 01:23:45.678 UTC.
        let label = Tai64N::new(crate::TAI64_BIAS + 915_153_857, 678_000_000);
        assert_eq!(
            label.to_chrono_date_time(&IERS).unwrap(),
            chrono::DateTime::parse_from_rfc3339("1999-01-01T01:23:45.678Z").unwrap()
        );
    }
}
