//!
//! Sources for the freshness values injected into every signed payload
//!

use rand::Rng;
use std::{
    ops::RangeInclusive,
    time::{SystemTime, UNIX_EPOCH},
};

/// Range of the random value. Verifiers check for exactly six digits.
pub const NONCE_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Source of the per-request random value
///
/// The value is a replay guard, not a secret. It doesn't need to come from a cryptographically secure generator.
pub trait NonceSource: Send + Sync {
    /// Draw an integer from the inclusive range
    fn generate(&self, range: RangeInclusive<u32>) -> u32;
}

/// Nonce source backed by the thread-local RNG
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRng;

impl NonceSource for ThreadRng {
    #[inline]
    fn generate(&self, range: RangeInclusive<u32>) -> u32 {
        rand::thread_rng().gen_range(range)
    }
}

/// Wall clock
pub trait Clock: Send + Sync {
    /// Read the current time
    fn now(&self) -> SystemTime;
}

/// Clock reading the system time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Milliseconds since the Unix epoch
///
/// Times before the epoch are clamped to zero
#[must_use]
pub fn unix_millis(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}
