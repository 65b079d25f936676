//! TAI64, TAI64N and TAI64NA timestamps with leap-second aware conversion
//! to and from UTC.
//!
//! # Overview
//!
//! [TAI64] labels are compact, fixed-width, big-endian binary timestamps
//! based on International Atomic Time ([TAI]). Since TAI has no leap
//! seconds, labels are strictly monotonic and can be compared byte-wise,
//! which makes them a popular choice for wire protocols and logs.
//!
//! This crate provides:
//!
//! - the three label types [`Tai64`] (seconds), [`Tai64N`] (nanoseconds) and
//!   [`Tai64NA`] (attoseconds) with their 8, 12 and 16-byte encodings,
//!   lossless widening, truncating narrowing and total ordering,
//! - a [`LeapSecondTable`] converting between Unix (UTC) seconds and TAI
//!   seconds, together with the built-in [`LeapSecondTable::IERS`] table,
//! - conversions between labels and Unix timestamps, `SystemTime`,
//!   `chrono` date-times and a simple [`UtcDateTime`] calendar breakdown.
//!
//! [TAI64]: https://cr.yp.to/libtai/tai64.html
//! [TAI]: https://en.wikipedia.org/wiki/International_Atomic_Time
//!
//!
//! # Design choices and limitations
//!
//! The leap-second table is always passed explicitly to conversion methods.
//! Leap seconds cannot be predicted, so a build of this crate anterior to the
//! announcement of a new leap second will silently convert later dates with
//! an outdated offset. Applications that need to stay correct beyond the
//! last announced leap second should provide their own up-to-date table.
//!
//! Labels in the upper half of the label space (`>= 2^63`) are reserved by the
//! TAI64 format. They are accepted by decoders but cannot be converted to UTC.
//!
//!
//! # Features flags
//!
//! ### Support for `no-std`
//!
//! By default, this crate enables the `std` feature to access the operating
//! system clock and allow conversion to/from `time::SystemTime`, but specifying
//! `default-features = false` makes it `no-std`-compatible.
//!
//! ### Support for time-related crates
//!
//! Conversion methods to and from UTC date-time stamps from the [chrono] crate
//! are available with the `chrono` feature.
//!
//! [chrono]: https://crates.io/crates/chrono
//!
//! ### Serialization
//!
//! Labels, leap-second entries and error types can be (de)serialized with
//! `serde` by activating the `serde` feature. Deserialized labels are range
//! checked.
//!
//! ### Logging
//!
//! All public value and error types implement `defmt::Format` when the
//! `defmt` feature is activated.
//!
//!
//! # Examples
#![cfg_attr(
    feature = "std",
    doc = r##"
```
use tai64_utc::{LeapSecondTable, Tai64N};

let table = LeapSecondTable::IERS;

// Label for 2021-11-26 16:50:19.5 UTC, when TAI was 37s ahead of UTC.
let label = Tai64N::from_unix_timestamp(1_637_945_419, 500_000_000, &table).unwrap();
assert_eq!(label.to_tai64().to_tai_secs(), Ok(1_637_945_456));

// Wire round trip.
let bytes = label.to_bytes();
assert_eq!(Tai64N::from_slice(&bytes), Ok(label));

// Back to UTC.
assert_eq!(label.to_unix_timestamp(&table), Ok((1_637_945_419, 500_000_000)));

// Current time.
let now = Tai64N::now(&table).unwrap();
assert!(now > label);
```"##
)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod date_time;
mod errors;
mod leap_seconds;
mod tai64;
#[cfg(feature = "std")]
mod tai_clock;
mod utc;

pub use date_time::UtcDateTime;
pub use errors::{DecodeError, LeapTableError, OutOfRangeError, SubSecondField};
pub use leap_seconds::{
    shift_epoch, tai_from_utc, utc_from_tai, LeapSecond, LeapSecondTable, NTP_UNIX_SHIFT,
};
pub use tai64::{Tai64, Tai64N, Tai64NA};
#[cfg(feature = "std")]
pub use tai_clock::Tai64NClock;

const NANOS_PER_SEC: u32 = 1_000_000_000;

/// Offset added to TAI seconds counted from 1970-01-01 00:00:00 TAI to obtain
/// the value of a TAI64 label.
pub const TAI64_BIAS: u64 = 1 << 62;

/// [`TAI64_BIAS`] as a signed value.
const BIAS: i64 = 1 << 62;
