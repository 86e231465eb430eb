use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use time::{Duration, OffsetDateTime};

//--------------------------------------------------------------------------------------------------
// Unix timestamp in whole milliseconds
//--------------------------------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[serde(transparent)]
pub struct UnixMillis(i64);

const NANOS_PER_MILLI: i128 = 1_000_000;

impl UnixMillis {
    pub const fn from_millis(millis: i64) -> Self {
        UnixMillis(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    pub fn now() -> Self {
        UnixMillis::from(OffsetDateTime::now_utc())
    }

    pub fn saturating_add(self, duration: Duration) -> Self {
        UnixMillis(self.0.saturating_add(clamped_millis(duration)))
    }
}

fn clamped_millis(duration: Duration) -> i64 {
    let millis = duration.whole_milliseconds();
    i64::try_from(millis).unwrap_or(if millis < 0 { i64::MIN } else { i64::MAX })
}

// Sub-millisecond precision is truncated
impl From<OffsetDateTime> for UnixMillis {
    fn from(dt: OffsetDateTime) -> Self {
        let millis = dt.unix_timestamp_nanos() / NANOS_PER_MILLI;
        UnixMillis(i64::try_from(millis).unwrap_or(i64::MAX))
    }
}

//--------------------------------------------------------------------------------------------------
// Clock
//--------------------------------------------------------------------------------------------------

/// Source of "now" for minting and expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> UnixMillis;
}

impl<T: Clock> Clock for Arc<T> {
    fn now(&self) -> UnixMillis {
        self.deref().now()
    }
}

#[derive(Clone, Copy, Default, Debug)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UnixMillis {
        UnixMillis::now()
    }
}

/// A clock that only moves when told to. Share it through an `Arc` to drive a `TokenService`
/// from a test.
#[derive(Debug)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    pub fn new(start: UnixMillis) -> Self {
        ManualClock(AtomicI64::new(start.as_millis()))
    }

    pub fn set(&self, to: UnixMillis) {
        self.0.store(to.as_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        self.0.fetch_add(clamped_millis(by), Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> UnixMillis {
        UnixMillis(self.0.load(Ordering::SeqCst))
    }
}

//--------------------------------------------------------------------------------------------------


//--------------------------------------------------------------------------------------------------
