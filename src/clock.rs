//! Time sources for gyro integration
//!
//! The estimator never reads a global clock. It asks an injected
//! [`TimeSource`] for a timestamp once per cycle and integrates the gyro over
//! the difference. Timestamps must never go backwards.

use core::time::Duration;

/// Monotonic timestamp provider
pub trait TimeSource {
    /// Time elapsed since an arbitrary fixed epoch
    fn now(&mut self) -> Duration;
}

impl<T> TimeSource for &mut T
where
    T: TimeSource + ?Sized,
{
    fn now(&mut self) -> Duration {
        (**self).now()
    }
}

/// Manually driven clock for simulation and tests
///
/// Every call to [`now`](TimeSource::now) returns the current time and then
/// moves it forward by the configured step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManualClock {
    now: Duration,
    step: Duration,
}

impl ManualClock {
    /// Clock stopped at zero
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
            step: Duration::ZERO,
        }
    }

    /// Clock starting at zero that advances by `step` after every reading
    #[must_use]
    pub const fn with_step(step: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step,
        }
    }

    /// Move the clock forward
    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    /// Time the next reading will return
    #[must_use]
    pub const fn peek(&self) -> Duration {
        self.now
    }
}

impl TimeSource for ManualClock {
    fn now(&mut self) -> Duration {
        let now = self.now;
        self.now += self.step;
        now
    }
}

/// Clock backed by the `embassy-time` driver
#[cfg(feature = "embassy-time")]
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

#[cfg(feature = "embassy-time")]
impl TimeSource for EmbassyClock {
    fn now(&mut self) -> Duration {
        Duration::from_micros(embassy_time::Instant::now().as_micros())
    }
}
