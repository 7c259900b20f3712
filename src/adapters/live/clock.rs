//! Live clock using the system wall clock.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads the real wall clock.
///
/// The wall clock can be stepped backwards by NTP or an operator; the
/// time-ordered generator copes with that, so no monotonic source is mixed in.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
