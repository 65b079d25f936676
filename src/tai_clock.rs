use std::time::{Instant, SystemTime};

use crate::errors::OutOfRangeError;
use crate::leap_seconds::LeapSecondTable;
use crate::tai64::Tai64N;

/// A monotonic clock that generates [`Tai64N`] labels.
///
/// This clock internally relies on [`Instant::now`]: once initialized, the
/// labels it returns are never affected by adjustments of the system clock,
/// which makes them suitable as replay-protection timestamps. This comes at
/// the cost of a possible drift with respect to UTC time over long periods.
///
/// A `Tai64NClock` instance can be simultaneously accessed from several
/// threads.
///
/// # Examples
///
/// ```
/// use std::thread;
/// use std::sync::Arc;
/// use tai64_utc::{LeapSecondTable, Tai64NClock};
///
/// let clock = Arc::new(Tai64NClock::init_from_utc(&LeapSecondTable::IERS).unwrap());
///
/// // Time the execution of 2 different threads.
/// let th1 = thread::spawn({
///     let clock = clock.clone();
///     move || clock.now()
/// });
/// let th2 = thread::spawn(
///     move || clock.now()
/// );
/// let t1 = th1.join().unwrap();
/// let t2 = th2.join().unwrap();
///
/// println!("thread 1 has completed at {}", t1);
/// println!("thread 2 has completed at {}", t2);
/// ```
#[derive(Copy, Clone, Debug, Hash)]
pub struct Tai64NClock {
    timestamp_ref: Tai64N,
    wall_clock_ref: Instant,
}

impl Tai64NClock {
    /// Initializes the clock by associating a label to the current wall clock
    /// time.
    ///
    /// Future calls to [`now`](Self::now) will return labels that are
    /// relative to the provided label, with a constant offset with respect to
    /// the monotonic wall clock time.
    pub fn init_at(now: Tai64N) -> Self {
        Self::init_from_instant(now, Instant::now())
    }

    /// Initializes the clock from the UTC system clock.
    ///
    /// The leap seconds applicable at the current date are looked up in the
    /// provided table.
    ///
    /// Note that `Tai64NClock` is based on the monotonic system clock while
    /// UTC time can only be obtained from the non-monotonic system clock. This
    /// constructor attempts to find a well-correlated pair of monotonic and
    /// UTC system clock timestamps by collecting several candidate samples
    /// from interleaved calls to `SystemTime::now` and `Instant::now`.
    ///
    /// Returns an error if the system clock is outside the range of TAI64N
    /// labels.
    pub fn init_from_utc(table: &LeapSecondTable<'_>) -> Result<Self, OutOfRangeError> {
        let (system_time_ref, instant_ref) = get_correlated_time_refs();

        Tai64N::from_system_time(&system_time_ref, table)
            .map(|timestamp_ref| Self::init_from_instant(timestamp_ref, instant_ref))
    }

    /// Initializes the clock by associating the provided label to the
    /// provided `Instant`.
    ///
    /// The `wall_clock_ref` argument may lie in the past or in the future of
    /// the current wall clock time.
    ///
    /// Future calls to [`now`](Self::now) will return labels with a constant
    /// offset with respect to the monotonic wall clock time. The offset is
    /// defined by the requirement that [`now`](Self::now) should return
    /// `timestamp_ref` when the wall clock time matches `wall_clock_ref`.
    pub fn init_from_instant(timestamp_ref: Tai64N, wall_clock_ref: Instant) -> Self {
        Self {
            timestamp_ref,
            wall_clock_ref,
        }
    }

    /// Initializes the clock by associating a label to a `SystemTime`.
    ///
    /// The `wall_clock_ref` argument may lie in the past or in the future of
    /// the current wall clock time.
    ///
    /// Future calls to [`now`](Self::now) will return labels with a constant
    /// offset with respect to the monotonic wall clock time. The offset is
    /// defined by the requirement that [`now`](Self::now) should return
    /// `timestamp_ref` when the wall clock time matches `wall_clock_ref`.
    pub fn init_from_system_time(timestamp_ref: Tai64N, wall_clock_ref: SystemTime) -> Self {
        let (system_time_ref, instant_ref) = get_correlated_time_refs();

        let timestamp_ref = match system_time_ref.duration_since(wall_clock_ref) {
            Ok(elapsed) => timestamp_ref + elapsed,
            Err(ahead) => timestamp_ref - ahead.duration(),
        };

        Self::init_from_instant(timestamp_ref, instant_ref)
    }

    /// Returns a label corresponding to the current wall clock time.
    ///
    /// The returned label will never be lower than a label returned by a
    /// previous call to `now`.
    pub fn now(&self) -> Tai64N {
        let now = Instant::now();

        if now >= self.wall_clock_ref {
            self.timestamp_ref + now.duration_since(self.wall_clock_ref)
        } else {
            self.timestamp_ref - self.wall_clock_ref.duration_since(now)
        }
    }
}

/// Returns a pair of well-correlated `SystemTime` and `Instant`.
fn get_correlated_time_refs() -> (SystemTime, Instant) {
    const EXTRA_SAMPLES: usize = 2;

    let mut instant = Instant::now();
    let system_time = SystemTime::now();
    let mut instant_after = Instant::now();

    let delta = instant_after.saturating_duration_since(instant); // uncertainty on measurement.
    let mut measurement = (instant, delta, system_time);

    for _ in 0..EXTRA_SAMPLES {
        instant = instant_after;
        let system_time = SystemTime::now();
        instant_after = Instant::now();
        let delta = instant_after.saturating_duration_since(instant);

        // If the uncertainty on this measurement is lower then prefer this
        // measurement. Measurements with a null uncertainty are discarded
        // as they are most likely indicative of a platform bug.
        if measurement.1.is_zero() || (delta < measurement.1 && !delta.is_zero()) {
            measurement = (instant, delta, system_time);
        }
    }

    // Take the best measurement and associate its `SystemTime` to the average
    // value of the `Instant`s measured just before and just after it.
    (measurement.2, measurement.0 + measurement.1.mul_f32(0.5))
}
