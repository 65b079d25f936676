//! TAI64, TAI64N and TAI64NA labels and their binary encoding.

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};
use core::time::Duration;

use crate::errors::{DecodeError, OutOfRangeError, SubSecondField};
use crate::{BIAS, NANOS_PER_SEC};

/// Reads a big-endian `u64` from the first 8 bytes of the slice.
fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0; 8];
    buf.copy_from_slice(&bytes[..8]);

    u64::from_be_bytes(buf)
}

/// Reads a big-endian `u32` from the first 4 bytes of the slice.
fn read_u32(bytes: &[u8]) -> u32 {
    let mut buf = [0; 4];
    buf.copy_from_slice(&bytes[..4]);

    u32::from_be_bytes(buf)
}

const fn check_subsec(field: SubSecondField, value: u32) -> Result<u32, DecodeError> {
    if value < NANOS_PER_SEC {
        Ok(value)
    } else {
        Err(DecodeError::SubSecondOutOfRange { field, value })
    }
}

const fn length_mismatch(expected: usize, actual: usize) -> DecodeError {
    DecodeError::LengthMismatch { expected, actual }
}

/// A TAI64 label: a second-precision TAI timestamp.
///
/// The wrapped value is the number of TAI seconds since 1970-01-01 00:00:00
/// TAI, offset by 2^62 so that any realistic instant maps to a positive
/// integer. Labels are encoded as 8 big-endian bytes.
///
/// # Examples
///
/// ```
/// use tai64_utc::Tai64;
///
/// let label = Tai64::UNIX_EPOCH;
/// let bytes = label.to_bytes();
///
/// assert_eq!(bytes, [0x40, 0, 0, 0, 0, 0, 0, 10]);
/// assert_eq!(Tai64::from_slice(&bytes), Ok(label));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tai64(pub u64);

impl Tai64 {
    /// Size of an encoded label in bytes.
    pub const SIZE: usize = 8;

    /// The label of 1970-01-01 00:00:00 UTC, i.e. 1970-01-01 00:00:10 TAI.
    pub const UNIX_EPOCH: Self = Self(crate::TAI64_BIAS + 10);

    /// Creates a label from a number of TAI seconds relative to 1970-01-01
    /// 00:00:00 TAI.
    ///
    /// Returns an error if the label would not lie in `[0, 2^63)`, the upper
    /// half of the label space being reserved by the TAI64 format.
    pub const fn from_tai_secs(secs: i64) -> Result<Self, OutOfRangeError> {
        if secs >= -BIAS && secs < BIAS {
            Ok(Self((secs + BIAS) as u64))
        } else {
            Err(OutOfRangeError(()))
        }
    }

    /// Returns the number of TAI seconds relative to 1970-01-01 00:00:00 TAI.
    ///
    /// Returns an error if the label lies in the reserved range `[2^63,
    /// 2^64)`.
    pub const fn to_tai_secs(&self) -> Result<i64, OutOfRangeError> {
        if self.0 <= i64::MAX as u64 {
            Ok(self.0 as i64 - BIAS)
        } else {
            Err(OutOfRangeError(()))
        }
    }

    /// Encodes the label.
    pub const fn to_bytes(&self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    /// Decodes a label.
    ///
    /// Any bit pattern is a valid TAI64 label.
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(u64::from_be_bytes(bytes))
    }

    /// Decodes a label from a slice of exactly 8 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != Self::SIZE {
            return Err(length_mismatch(Self::SIZE, bytes.len()));
        }

        Ok(Self(read_u64(bytes)))
    }

    /// Returns a TAI64N label with a null nanosecond field.
    pub const fn to_tai64n(&self) -> Tai64N {
        Tai64N {
            secs: self.0,
            nanos: 0,
        }
    }

    /// Returns a TAI64NA label with null sub-second fields.
    pub const fn to_tai64na(&self) -> Tai64NA {
        Tai64NA {
            secs: self.0,
            nanos: 0,
            attos: 0,
        }
    }
}

impl fmt::Display for Tai64 {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TAI64({})", self.0)
    }
}

impl From<Tai64> for [u8; 8] {
    fn from(label: Tai64) -> Self {
        label.to_bytes()
    }
}

impl From<[u8; 8]> for Tai64 {
    fn from(bytes: [u8; 8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Tai64 {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

/// A TAI64N label: a nanosecond-precision TAI timestamp.
///
/// Labels are encoded as 12 big-endian bytes: the TAI64 seconds followed by
/// the nanoseconds.
///
/// # Examples
///
/// ```
/// use tai64_utc::Tai64N;
///
/// let t0 = Tai64N::new(0x4000_0000_6000_0000, 999_999_999);
/// let t1 = Tai64N::new(0x4000_0000_6000_0001, 0);
///
/// assert!(t0 < t1);
/// assert_eq!(Tai64N::from_slice(&t0.to_bytes()), Ok(t0));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "fields::Tai64NFields"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tai64N {
    /// The TAI64 seconds.
    ///
    /// Note that the automatic derivation of `PartialOrd` relies on
    /// lexicographical comparison so the `secs` field must appear before
    /// `nanos` in declaration order to be given higher priority.
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    secs: u64,
    /// The sub-second number of nanoseconds.
    #[cfg_attr(feature = "serde", serde(rename = "ns"))]
    nanos: u32,
}

impl Tai64N {
    /// Size of an encoded label in bytes.
    pub const SIZE: usize = 12;

    /// The label of 1970-01-01 00:00:00 UTC.
    pub const UNIX_EPOCH: Self = Tai64::UNIX_EPOCH.to_tai64n();

    /// Creates a label from TAI64 seconds and nanoseconds.
    ///
    /// # Panics
    ///
    /// This constructor will panic if the number of nanoseconds is greater than
    /// or equal to 1 second.
    pub const fn new(secs: u64, subsec_nanos: u32) -> Self {
        assert!(
            subsec_nanos < NANOS_PER_SEC,
            "invalid number of nanoseconds"
        );

        Self {
            secs,
            nanos: subsec_nanos,
        }
    }

    /// Creates a label from TAI64 seconds and nanoseconds, returning an error
    /// if the number of nanoseconds is greater than or equal to 1 second.
    pub const fn try_new(secs: u64, subsec_nanos: u32) -> Result<Self, DecodeError> {
        match check_subsec(SubSecondField::Nanoseconds, subsec_nanos) {
            Ok(nanos) => Ok(Self { secs, nanos }),
            Err(e) => Err(e),
        }
    }

    /// Returns the TAI64 seconds.
    pub const fn secs(&self) -> u64 {
        self.secs
    }

    /// Returns the sub-second number of nanoseconds.
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Encodes the label.
    pub fn to_bytes(&self) -> [u8; 12] {
        let mut bytes = [0; 12];
        bytes[..8].copy_from_slice(&self.secs.to_be_bytes());
        bytes[8..].copy_from_slice(&self.nanos.to_be_bytes());

        bytes
    }

    /// Decodes a label.
    ///
    /// Returns an error if the nanosecond field is greater than or equal to 1
    /// second.
    pub fn from_bytes(bytes: [u8; 12]) -> Result<Self, DecodeError> {
        Self::try_new(read_u64(&bytes), read_u32(&bytes[8..]))
    }

    /// Decodes a label from a slice of exactly 12 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != Self::SIZE {
            return Err(length_mismatch(Self::SIZE, bytes.len()));
        }

        Self::try_new(read_u64(bytes), read_u32(&bytes[8..]))
    }

    /// Returns a TAI64 label, truncating the nanoseconds.
    pub const fn to_tai64(&self) -> Tai64 {
        Tai64(self.secs)
    }

    /// Returns a TAI64NA label with a null attosecond field.
    pub const fn to_tai64na(&self) -> Tai64NA {
        Tai64NA {
            secs: self.secs,
            nanos: self.nanos,
            attos: 0,
        }
    }

    /// Adds a duration to a label, returning `None` on overflow.
    pub const fn checked_add(self, rhs: Duration) -> Option<Self> {
        let mut secs = if let Some(s) = self.secs.checked_add(rhs.as_secs()) {
            s
        } else {
            return None;
        };

        let mut nanos = self.nanos + rhs.subsec_nanos();
        if nanos >= NANOS_PER_SEC {
            secs = if let Some(s) = secs.checked_add(1) {
                s
            } else {
                return None;
            };
            nanos -= NANOS_PER_SEC;
        }

        Some(Self { secs, nanos })
    }

    /// Subtracts a duration from a label, returning `None` on overflow.
    pub const fn checked_sub(self, rhs: Duration) -> Option<Self> {
        let mut secs = if let Some(s) = self.secs.checked_sub(rhs.as_secs()) {
            s
        } else {
            return None;
        };

        let nanos = if self.nanos < rhs.subsec_nanos() {
            secs = if let Some(s) = secs.checked_sub(1) {
                s
            } else {
                return None;
            };

            (self.nanos + NANOS_PER_SEC) - rhs.subsec_nanos()
        } else {
            self.nanos - rhs.subsec_nanos()
        };

        Some(Self { secs, nanos })
    }

    /// Returns the duration elapsed since an earlier label.
    ///
    /// # Panics
    ///
    /// This method will panic if `earlier` is in the future of `self`.
    pub const fn duration_since(self, earlier: Self) -> Duration {
        if let Some(duration) = self.checked_duration_since(earlier) {
            return duration;
        }

        panic!("attempt to substract a timestamp from an earlier timestamp");
    }

    /// Returns the duration elapsed since an earlier label, or `None` if
    /// `earlier` is in the future of `self`.
    pub const fn checked_duration_since(self, earlier: Self) -> Option<Duration> {
        // If the subtraction of the nanosecond fractions would overflow, carry
        // over one second to the nanoseconds.
        let (secs, nanos) = if earlier.nanos > self.nanos {
            if let Some(s) = self.secs.checked_sub(1) {
                (s, self.nanos + NANOS_PER_SEC)
            } else {
                return None;
            }
        } else {
            (self.secs, self.nanos)
        };

        if secs < earlier.secs {
            return None;
        }

        Some(Duration::new(secs - earlier.secs, nanos - earlier.nanos))
    }
}

impl fmt::Display for Tai64N {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "TAI64N(s={}, ns={})", self.secs, self.nanos)
    }
}

impl From<Tai64> for Tai64N {
    fn from(label: Tai64) -> Self {
        label.to_tai64n()
    }
}

impl From<Tai64N> for [u8; 12] {
    fn from(label: Tai64N) -> Self {
        label.to_bytes()
    }
}

impl TryFrom<[u8; 12]> for Tai64N {
    type Error = DecodeError;

    fn try_from(bytes: [u8; 12]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Tai64N {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

impl Add<Duration> for Tai64N {
    type Output = Self;

    fn add(self, other: Duration) -> Self {
        self.checked_add(other)
            .expect("overflow when adding duration to timestamp")
    }
}

impl Sub<Duration> for Tai64N {
    type Output = Self;

    fn sub(self, other: Duration) -> Self {
        self.checked_sub(other)
            .expect("overflow when subtracting duration from timestamp")
    }
}

impl AddAssign<Duration> for Tai64N {
    fn add_assign(&mut self, other: Duration) {
        *self = *self + other;
    }
}

impl SubAssign<Duration> for Tai64N {
    fn sub_assign(&mut self, other: Duration) {
        *self = *self - other;
    }
}

/// A TAI64NA label: an attosecond-precision TAI timestamp.
///
/// Labels are encoded as 16 big-endian bytes: the TAI64 seconds followed by
/// the nanoseconds and the attoseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "fields::Tai64NAFields"))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tai64NA {
    // Declaration order sets the priority of the derived comparisons.
    #[cfg_attr(feature = "serde", serde(rename = "s"))]
    secs: u64,
    #[cfg_attr(feature = "serde", serde(rename = "ns"))]
    nanos: u32,
    #[cfg_attr(feature = "serde", serde(rename = "as"))]
    attos: u32,
}

impl Tai64NA {
    /// Size of an encoded label in bytes.
    pub const SIZE: usize = 16;

    /// The label of 1970-01-01 00:00:00 UTC.
    pub const UNIX_EPOCH: Self = Tai64::UNIX_EPOCH.to_tai64na();

    /// Creates a label from TAI64 seconds, nanoseconds and attoseconds.
    ///
    /// # Panics
    ///
    /// This constructor will panic if the number of nanoseconds or of
    /// attoseconds is greater than or equal to 10^9.
    pub const fn new(secs: u64, subsec_nanos: u32, subnano_attos: u32) -> Self {
        assert!(
            subsec_nanos < NANOS_PER_SEC,
            "invalid number of nanoseconds"
        );
        assert!(
            subnano_attos < NANOS_PER_SEC,
            "invalid number of attoseconds"
        );

        Self {
            secs,
            nanos: subsec_nanos,
            attos: subnano_attos,
        }
    }

    /// Creates a label from TAI64 seconds, nanoseconds and attoseconds,
    /// returning an error if a sub-second field is greater than or equal to
    /// 10^9.
    pub const fn try_new(
        secs: u64,
        subsec_nanos: u32,
        subnano_attos: u32,
    ) -> Result<Self, DecodeError> {
        let nanos = match check_subsec(SubSecondField::Nanoseconds, subsec_nanos) {
            Ok(nanos) => nanos,
            Err(e) => return Err(e),
        };
        let attos = match check_subsec(SubSecondField::Attoseconds, subnano_attos) {
            Ok(attos) => attos,
            Err(e) => return Err(e),
        };

        Ok(Self { secs, nanos, attos })
    }

    /// Returns the TAI64 seconds.
    pub const fn secs(&self) -> u64 {
        self.secs
    }

    /// Returns the sub-second number of nanoseconds.
    pub const fn subsec_nanos(&self) -> u32 {
        self.nanos
    }

    /// Returns the sub-nanosecond number of attoseconds.
    pub const fn subnano_attos(&self) -> u32 {
        self.attos
    }

    /// Encodes the label.
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut bytes = [0; 16];
        bytes[..8].copy_from_slice(&self.secs.to_be_bytes());
        bytes[8..12].copy_from_slice(&self.nanos.to_be_bytes());
        bytes[12..].copy_from_slice(&self.attos.to_be_bytes());

        bytes
    }

    /// Decodes a label.
    ///
    /// Returns an error if a sub-second field is greater than or equal to
    /// 10^9.
    pub fn from_bytes(bytes: [u8; 16]) -> Result<Self, DecodeError> {
        Self::from_slice(&bytes)
    }

    /// Decodes a label from a slice of exactly 16 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != Self::SIZE {
            return Err(length_mismatch(Self::SIZE, bytes.len()));
        }

        Self::try_new(
            read_u64(bytes),
            read_u32(&bytes[8..]),
            read_u32(&bytes[12..]),
        )
    }

    /// Returns a TAI64 label, truncating the sub-second fields.
    pub const fn to_tai64(&self) -> Tai64 {
        Tai64(self.secs)
    }

    /// Returns a TAI64N label, truncating the attoseconds.
    pub const fn to_tai64n(&self) -> Tai64N {
        Tai64N {
            secs: self.secs,
            nanos: self.nanos,
        }
    }
}

impl fmt::Display for Tai64NA {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "TAI64NA(s={}, ns={}, as={})",
            self.secs, self.nanos, self.attos
        )
    }
}

impl From<Tai64> for Tai64NA {
    fn from(label: Tai64) -> Self {
        label.to_tai64na()
    }
}

impl From<Tai64N> for Tai64NA {
    fn from(label: Tai64N) -> Self {
        label.to_tai64na()
    }
}

impl From<Tai64NA> for [u8; 16] {
    fn from(label: Tai64NA) -> Self {
        label.to_bytes()
    }
}

impl TryFrom<[u8; 16]> for Tai64NA {
    type Error = DecodeError;

    fn try_from(bytes: [u8; 16]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for Tai64NA {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(bytes)
    }
}

/// Unvalidated field sets deserialized before range checking.
#[cfg(feature = "serde")]
mod fields {
    use super::{DecodeError, Tai64N, Tai64NA};

    #[derive(serde::Deserialize)]
    pub(super) struct Tai64NFields {
        s: u64,
        ns: u32,
    }

    impl TryFrom<Tai64NFields> for Tai64N {
        type Error = DecodeError;

        fn try_from(fields: Tai64NFields) -> Result<Self, Self::Error> {
            Tai64N::try_new(fields.s, fields.ns)
        }
    }

    #[derive(serde::Deserialize)]
    pub(super) struct Tai64NAFields {
        s: u64,
        ns: u32,
        #[serde(rename = "as")]
        attos: u32,
    }

    impl TryFrom<Tai64NAFields> for Tai64NA {
        type Error = DecodeError;

        fn try_from(fields: Tai64NAFields) -> Result<Self, Self::Error> {
            Tai64NA::try_new(fields.s, fields.ns, fields.attos)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_layout() {
        let label = Tai64NA::new(0x0102_0304_0506_0708, 0x090A_0B0C, 0x0D0E_0F10);

        assert_eq!(
            label.to_bytes(),
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]
        );
        assert_eq!(
            label.to_tai64n().to_bytes(),
            [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]
        );
        assert_eq!(label.to_tai64().to_bytes(), [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn decode_round_trip() {
        let t64 = Tai64(0x4000_0000_61a1_0f50);
        let t64n = Tai64N::new(0x4000_0000_61a1_0f50, 999_999_999);
        let t64na = Tai64NA::new(u64::MAX, 123_456_789, 999_999_999);

        assert_eq!(Tai64::from_slice(&t64.to_bytes()), Ok(t64));
        assert_eq!(Tai64N::from_slice(&t64n.to_bytes()), Ok(t64n));
        assert_eq!(Tai64NA::from_slice(&t64na.to_bytes()), Ok(t64na));
        assert_eq!(Tai64NA::from_bytes(t64na.to_bytes()), Ok(t64na));
    }

    #[test]
    fn decode_any_seconds() {
        let bytes = [0xFF; 8];

        assert_eq!(Tai64::from_slice(&bytes), Ok(Tai64(u64::MAX)));
    }

    #[test]
    fn decode_wrong_length() {
        let bytes = [0u8; 17];

        for len in 0..bytes.len() {
            if len != Tai64::SIZE {
                assert_eq!(
                    Tai64::from_slice(&bytes[..len]),
                    Err(DecodeError::LengthMismatch {
                        expected: 8,
                        actual: len
                    })
                );
            }
            if len != Tai64N::SIZE {
                assert_eq!(
                    Tai64N::from_slice(&bytes[..len]),
                    Err(DecodeError::LengthMismatch {
                        expected: 12,
                        actual: len
                    })
                );
            }
            if len != Tai64NA::SIZE {
                assert_eq!(
                    Tai64NA::from_slice(&bytes[..len]),
                    Err(DecodeError::LengthMismatch {
                        expected: 16,
                        actual: len
                    })
                );
            }
        }
    }

    #[test]
    fn decode_nanos_out_of_range() {
        let mut bytes = Tai64N::UNIX_EPOCH.to_bytes();
        bytes[8..].copy_from_slice(&NANOS_PER_SEC.to_be_bytes());

        assert_eq!(
            Tai64N::from_slice(&bytes),
            Err(DecodeError::SubSecondOutOfRange {
                field: SubSecondField::Nanoseconds,
                value: NANOS_PER_SEC
            })
        );

        let mut bytes = Tai64NA::UNIX_EPOCH.to_bytes();
        bytes[8..12].copy_from_slice(&u32::MAX.to_be_bytes());

        assert_eq!(
            Tai64NA::from_slice(&bytes),
            Err(DecodeError::SubSecondOutOfRange {
                field: SubSecondField::Nanoseconds,
                value: u32::MAX
            })
        );
    }

    #[test]
    fn decode_attos_out_of_range() {
        let mut bytes = Tai64NA::new(1, 999_999_999, 0).to_bytes();
        bytes[12..].copy_from_slice(&NANOS_PER_SEC.to_be_bytes());

        assert_eq!(
            Tai64NA::from_slice(&bytes),
            Err(DecodeError::SubSecondOutOfRange {
                field: SubSecondField::Attoseconds,
                value: NANOS_PER_SEC
            })
        );
    }

    #[test]
    fn ordering() {
        let t0 = Tai64N::new(10, 999_999_999);
        let t1 = Tai64N::new(11, 0);
        let t2 = Tai64N::new(11, 1);

        assert!(t0 < t1);
        assert!(t1 < t2);
        assert!(t0 < t2);
        assert_eq!(t1.cmp(&t1), core::cmp::Ordering::Equal);

        let a0 = Tai64NA::new(11, 0, 999_999_999);
        let a1 = Tai64NA::new(11, 1, 0);

        assert!(a0 < a1);
        assert!(a1 > a0);
        assert!(Tai64(u64::MAX) > Tai64(1 << 63));
    }

    #[test]
    fn truncate_and_widen() {
        let label = Tai64NA::new(42, 123, 456);

        assert_eq!(label.to_tai64n(), Tai64N::new(42, 123));
        assert_eq!(label.to_tai64(), Tai64(42));
        assert_eq!(Tai64NA::from(Tai64N::new(42, 123)), Tai64NA::new(42, 123, 0));
        assert_eq!(Tai64N::from(Tai64(42)), Tai64N::new(42, 0));

        let t64n = Tai64N::new(7, 999_999_999);
        assert_eq!(t64n.to_tai64na().to_tai64n(), t64n);
        assert_eq!(Tai64(7).to_tai64na().to_tai64(), Tai64(7));
    }

    #[test]
    fn tai_secs_bias() {
        assert_eq!(Tai64::from_tai_secs(10), Ok(Tai64::UNIX_EPOCH));
        assert_eq!(Tai64::UNIX_EPOCH.to_tai_secs(), Ok(10));
        assert_eq!(Tai64::from_tai_secs(-(1 << 62)), Ok(Tai64(0)));
        assert_eq!(Tai64(0).to_tai_secs(), Ok(-(1 << 62)));

        assert!(Tai64::from_tai_secs(-(1 << 62) - 1).is_err());
        assert!(Tai64::from_tai_secs(1 << 62).is_err());
        assert!(Tai64(1 << 63).to_tai_secs().is_err());
        assert_eq!(Tai64((1 << 63) - 1).to_tai_secs(), Ok((1 << 62) - 1));
    }

    #[test]
    fn try_new() {
        assert!(Tai64N::try_new(0, 999_999_999).is_ok());
        assert!(Tai64N::try_new(0, NANOS_PER_SEC).is_err());
        assert_eq!(
            Tai64NA::try_new(0, 0, NANOS_PER_SEC),
            Err(DecodeError::SubSecondOutOfRange {
                field: SubSecondField::Attoseconds,
                value: NANOS_PER_SEC
            })
        );
    }

    #[test]
    #[should_panic]
    fn invalid_nanos() {
        Tai64N::new(123, 1_000_000_000);
    }

    #[test]
    #[should_panic]
    fn invalid_attos() {
        Tai64NA::new(123, 0, 1_000_000_000);
    }

    #[cfg(feature = "std")]
    #[test]
    fn display() {
        assert_eq!(Tai64(5).to_string(), "TAI64(5)");
        assert_eq!(Tai64N::new(5, 6).to_string(), "TAI64N(s=5, ns=6)");
        assert_eq!(
            Tai64NA::new(5, 6, 7).to_string(),
            "TAI64NA(s=5, ns=6, as=7)"
        );
    }

    #[test]
    fn duration_since_smoke() {
        let t0 = Tai64N::new(100, 100_000_000);
        let t1 = Tai64N::new(123, 223_456_789);

        assert_eq!(
            t1.checked_duration_since(t0),
            Some(Duration::new(23, 123_456_789))
        );
    }

    #[test]
    fn duration_with_carry() {
        let t0 = Tai64N::new(100, 200_000_000);
        let t1 = Tai64N::new(101, 100_000_000);

        assert_eq!(
            t1.checked_duration_since(t0),
            Some(Duration::new(0, 900_000_000))
        );
    }

    #[test]
    fn duration_since_invalid() {
        let t0 = Tai64N::new(100, 0);
        let t1 = Tai64N::new(99, 0);

        assert_eq!(t1.checked_duration_since(t0), None);
    }

    #[test]
    fn add_sub_duration() {
        let t = Tai64N::new(100, 900_000_000);

        assert_eq!(
            t + Duration::new(400, 300_000_000),
            Tai64N::new(501, 200_000_000)
        );
        assert_eq!(
            t - Duration::new(50, 950_000_000),
            Tai64N::new(49, 950_000_000)
        );
        assert_eq!(Tai64N::new(u64::MAX, 1).checked_add(Duration::new(0, 999_999_999)), None);
        assert_eq!(Tai64N::new(0, 0).checked_sub(Duration::new(0, 1)), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_field_names() {
        let label = Tai64NA::new(1, 2, 3);
        let json = serde_json::to_string(&label).unwrap();

        assert_eq!(json, r#"{"s":1,"ns":2,"as":3}"#);
        assert_eq!(serde_json::from_str::<Tai64NA>(&json).unwrap(), label);
        assert_eq!(serde_json::to_string(&Tai64(9)).unwrap(), "9");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_rejects_invalid_nanos() {
        assert!(serde_json::from_str::<Tai64N>(r#"{"s":1,"ns":1000000000}"#).is_err());
    }
}
