//! Error types.

use core::fmt;

/// The sub-second field of a timestamp that failed validation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SubSecondField {
    /// The nanosecond field of a TAI64N or TAI64NA label.
    Nanoseconds,
    /// The attosecond field of a TAI64NA label.
    Attoseconds,
}

impl fmt::Display for SubSecondField {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nanoseconds => "nanoseconds".fmt(fmt),
            Self::Attoseconds => "attoseconds".fmt(fmt),
        }
    }
}

/// The error type returned when a binary TAI64, TAI64N or TAI64NA label is
/// malformed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// The input does not have the exact width of the target label.
    LengthMismatch {
        /// The width of the target label in bytes.
        expected: usize,
        /// The length of the provided input.
        actual: usize,
    },
    /// A sub-second field is greater than or equal to 10^9.
    SubSecondOutOfRange {
        /// The offending field.
        field: SubSecondField,
        /// The decoded value of the field.
        value: u32,
    },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch { expected, actual } => write!(
                fmt,
                "wrong label length: expected {} bytes, got {}",
                expected, actual
            ),
            Self::SubSecondOutOfRange { field, value } => {
                write!(fmt, "{} value '{}' exceeds 999 999 999", field, value)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// The error type returned when a leap-second table cannot be built from the
/// provided entries.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LeapTableError {
    /// The table has no entries.
    Empty,
    /// The UTC boundary of the entry at this index is lower than that of the
    /// previous entry.
    Unsorted {
        /// Index of the first out-of-order entry.
        index: usize,
    },
}

impl fmt::Display for LeapTableError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => "leap-second table is empty".fmt(fmt),
            Self::Unsorted { index } => write!(
                fmt,
                "leap-second table entry {} precedes the previous entry",
                index
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LeapTableError {}

/// The error type returned when the result of a conversion to or from a
/// TAI64 label is outside the representable range, or the conversion would
/// cause the result to overflow.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError(pub(crate) ());

impl fmt::Display for OutOfRangeError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        "timestamp out of representable range".fmt(fmt)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "std")]
    #[test]
    fn display_messages() {
        let err = DecodeError::LengthMismatch {
            expected: 12,
            actual: 11,
        };
        assert_eq!(
            err.to_string(),
            "wrong label length: expected 12 bytes, got 11"
        );

        let err = DecodeError::SubSecondOutOfRange {
            field: SubSecondField::Attoseconds,
            value: 1_000_000_000,
        };
        assert_eq!(
            err.to_string(),
            "attoseconds value '1000000000' exceeds 999 999 999"
        );

        assert_eq!(
            LeapTableError::Unsorted { index: 3 }.to_string(),
            "leap-second table entry 3 precedes the previous entry"
        );
        assert_eq!(
            OutOfRangeError(()).to_string(),
            "timestamp out of representable range"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_decode_error() {
        let err = DecodeError::LengthMismatch {
            expected: 8,
            actual: 0,
        };
        let json = serde_json::to_string(&err).unwrap();
        let back: DecodeError = serde_json::from_str(&json).unwrap();

        assert_eq!(back, err);
    }
}
