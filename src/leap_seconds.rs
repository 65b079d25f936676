//! Leap-second table and TAI/UTC second conversions.

use crate::errors::LeapTableError;

/// Number of seconds between 1900-01-01 00:00:00 UTC (the NTP epoch) and
/// 1970-01-01 00:00:00 UTC (the Unix epoch).
pub const NTP_UNIX_SHIFT: i64 = 2_208_988_800;

/// A leap-second table entry.
///
/// From `utc` onward, TAI is ahead of UTC by `offset` seconds, until the
/// boundary of the next entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LeapSecond {
    /// UTC instant at which the offset takes effect, in seconds relative to
    /// the table epoch.
    pub utc: i64,
    /// Cumulative TAI - UTC offset in seconds.
    pub offset: i64,
}

impl LeapSecond {
    /// Creates a leap-second entry.
    pub const fn new(utc: i64, offset: i64) -> Self {
        Self { utc, offset }
    }
}

/// Leap seconds announced by the IERS, with boundaries counted from the NTP
/// epoch (1900-01-01 00:00:00 UTC).
///
/// See the [IERS table](https://hpiers.obspm.fr/iers/bul/bulc/Leap_Second.dat).
const IERS_NTP: [LeapSecond; 28] = [
    LeapSecond::new(2_272_060_800, 10), // 1972-01-01
    LeapSecond::new(2_287_785_600, 11), // 1972-07-01
    LeapSecond::new(2_303_683_200, 12), // 1973-01-01
    LeapSecond::new(2_335_219_200, 13), // 1974-01-01
    LeapSecond::new(2_366_755_200, 14), // 1975-01-01
    LeapSecond::new(2_398_291_200, 15), // 1976-01-01
    LeapSecond::new(2_429_913_600, 16), // 1977-01-01
    LeapSecond::new(2_461_449_600, 17), // 1978-01-01
    LeapSecond::new(2_492_985_600, 18), // 1979-01-01
    LeapSecond::new(2_524_521_600, 19), // 1980-01-01
    LeapSecond::new(2_571_782_400, 20), // 1981-07-01
    LeapSecond::new(2_603_318_400, 21), // 1982-07-01
    LeapSecond::new(2_634_854_400, 22), // 1983-07-01
    LeapSecond::new(2_698_012_800, 23), // 1985-07-01
    LeapSecond::new(2_776_982_400, 24), // 1988-01-01
    LeapSecond::new(2_840_140_800, 25), // 1990-01-01
    LeapSecond::new(2_871_676_800, 26), // 1991-01-01
    LeapSecond::new(2_918_937_600, 27), // 1992-07-01
    LeapSecond::new(2_950_473_600, 28), // 1993-07-01
    LeapSecond::new(2_982_009_600, 29), // 1994-07-01
    LeapSecond::new(3_029_443_200, 30), // 1996-01-01
    LeapSecond::new(3_076_704_000, 31), // 1997-07-01
    LeapSecond::new(3_124_137_600, 32), // 1999-01-01
    LeapSecond::new(3_345_062_400, 33), // 2006-01-01
    LeapSecond::new(3_439_756_800, 34), // 2009-01-01
    LeapSecond::new(3_550_089_600, 35), // 2012-07-01
    LeapSecond::new(3_644_697_600, 36), // 2015-07-01
    LeapSecond::new(3_692_217_600, 37), // 2017-01-01
];

const IERS_UNIX: [LeapSecond; 28] = shift_epoch(IERS_NTP, NTP_UNIX_SHIFT);

// The built-in table must satisfy the same invariants as user tables.
const _: () = assert!(validate(&IERS_UNIX).is_ok());

/// Rebases a leap-second table by subtracting `shift` seconds from every
/// boundary.
///
/// Use [`NTP_UNIX_SHIFT`] to turn a table counted from 1900-01-01 into one
/// counted from the Unix epoch.
///
/// # Examples
///
/// ```
/// use tai64_utc::{shift_epoch, LeapSecond, NTP_UNIX_SHIFT};
///
/// const NTP: [LeapSecond; 1] = [LeapSecond::new(2_272_060_800, 10)];
/// const UNIX: [LeapSecond; 1] = shift_epoch(NTP, NTP_UNIX_SHIFT);
///
/// assert_eq!(UNIX[0], LeapSecond::new(63_072_000, 10));
/// ```
pub const fn shift_epoch<const N: usize>(
    mut table: [LeapSecond; N],
    shift: i64,
) -> [LeapSecond; N] {
    let mut i = 0;
    while i < N {
        table[i].utc -= shift;
        i += 1;
    }

    table
}

const fn validate(entries: &[LeapSecond]) -> Result<(), LeapTableError> {
    if entries.is_empty() {
        return Err(LeapTableError::Empty);
    }

    let mut i = 1;
    while i < entries.len() {
        if entries[i].utc < entries[i - 1].utc {
            return Err(LeapTableError::Unsorted { index: i });
        }
        i += 1;
    }

    Ok(())
}

/// An immutable, validated table of cumulative TAI - UTC offsets counted from
/// the Unix epoch.
///
/// A table is never empty and its boundaries are non-decreasing. UTC instants
/// that precede the first boundary use the offset of the first entry.
///
/// Tables are cheap to copy and can be shared freely between threads.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeapSecondTable<'a> {
    entries: &'a [LeapSecond],
}

impl LeapSecondTable<'static> {
    /// The table of all leap seconds announced by the IERS as of this
    /// release, the last being +37s on 2017-01-01.
    pub const IERS: Self = Self {
        entries: &IERS_UNIX,
    };
}

impl<'a> LeapSecondTable<'a> {
    /// Creates a table from entries with boundaries counted from the Unix
    /// epoch.
    ///
    /// Returns an error if `entries` is empty or its boundaries are not
    /// sorted in non-decreasing order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai64_utc::{LeapSecond, LeapSecondTable};
    ///
    /// const ENTRIES: [LeapSecond; 2] = [LeapSecond::new(0, 0), LeapSecond::new(100, 1)];
    ///
    /// let table = LeapSecondTable::new(&ENTRIES).unwrap();
    /// assert_eq!(table.tai_from_utc(99), 99);
    /// assert_eq!(table.tai_from_utc(100), 101);
    /// ```
    pub const fn new(entries: &'a [LeapSecond]) -> Result<Self, LeapTableError> {
        match validate(entries) {
            Ok(()) => Ok(Self { entries }),
            Err(e) => Err(e),
        }
    }

    /// Returns the table entries.
    pub const fn entries(&self) -> &'a [LeapSecond] {
        self.entries
    }

    /// Returns the TAI - UTC offset applicable at the provided UTC instant.
    pub fn offset_at_utc(&self, utc_secs: i64) -> i64 {
        // Index of the last entry whose boundary has been reached, or of the
        // first entry if none has.
        let idx = self.entries[1..].partition_point(|e| e.utc <= utc_secs);

        self.entries[idx].offset
    }

    /// Returns the TAI - UTC offset applicable at the provided TAI instant.
    ///
    /// Boundaries are expressed in UTC, so each candidate offset is removed
    /// from the TAI instant before comparing it to the next boundary.
    pub fn offset_at_tai(&self, tai_secs: i64) -> i64 {
        let idx = self
            .entries
            .windows(2)
            .position(|w| w[1].utc > tai_secs.saturating_sub(w[0].offset))
            .unwrap_or(self.entries.len() - 1);

        self.entries[idx].offset
    }

    /// Converts Unix seconds to TAI seconds relative to 1970-01-01 00:00:00
    /// TAI by adding the applicable leap seconds.
    ///
    /// The argument must be far enough from the `i64` limits for the offset
    /// to be added without overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use tai64_utc::LeapSecondTable;
    ///
    /// // 2021-11-26 16:50:19 UTC.
    /// assert_eq!(LeapSecondTable::IERS.tai_from_utc(1_637_945_419), 1_637_945_456);
    /// ```
    pub fn tai_from_utc(&self, utc_secs: i64) -> i64 {
        utc_secs + self.offset_at_utc(utc_secs)
    }

    /// Converts TAI seconds to Unix seconds by removing the applicable leap
    /// seconds.
    ///
    /// This is the exact inverse of [`tai_from_utc`](Self::tai_from_utc).
    /// The argument must be far enough from the `i64` limits for the offset
    /// to be subtracted without overflow.
    pub fn utc_from_tai(&self, tai_secs: i64) -> i64 {
        tai_secs - self.offset_at_tai(tai_secs)
    }

    /// Fallible version of [`tai_from_utc`](Self::tai_from_utc) returning
    /// `None` on overflow.
    pub fn checked_tai_from_utc(&self, utc_secs: i64) -> Option<i64> {
        utc_secs.checked_add(self.offset_at_utc(utc_secs))
    }

    /// Fallible version of [`utc_from_tai`](Self::utc_from_tai) returning
    /// `None` on overflow.
    pub fn checked_utc_from_tai(&self, tai_secs: i64) -> Option<i64> {
        tai_secs.checked_sub(self.offset_at_tai(tai_secs))
    }
}

impl Default for LeapSecondTable<'static> {
    fn default() -> Self {
        Self::IERS
    }
}

/// Converts Unix seconds to TAI seconds with the [IERS
/// table](LeapSecondTable::IERS).
pub fn tai_from_utc(utc_secs: i64) -> i64 {
    LeapSecondTable::IERS.tai_from_utc(utc_secs)
}

/// Converts TAI seconds to Unix seconds with the [IERS
/// table](LeapSecondTable::IERS).
pub fn utc_from_tai(tai_secs: i64) -> i64 {
    LeapSecondTable::IERS.utc_from_tai(tai_secs)
}
