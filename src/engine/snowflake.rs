//! Time-ordered (Snowflake-style) id generation.
//!
//! Each id packs the milliseconds since [`EPOCH_MILLIS`], the node id, and a
//! per-millisecond sequence (see [`crate::id`] for the layout). One node mints
//! up to 4096 ids per millisecond; ids from one instance strictly increase.
//!
//! # Thread Safety
//!
//! The `(last_timestamp, sequence)` pair lives behind a `Mutex` and the whole
//! read-modify-write happens under the lock, so callers sharing one instance
//! through `Arc` never receive the same id.
//!
//! # Clock Regression
//!
//! If the clock reads earlier than the last emitted timestamp, the generator
//! keeps using the last timestamp as a logical clock and keeps counting the
//! sequence, so ids stay unique and ordered while the wall clock catches up.
//! A clock running past the last millisecond the layout can encode is held
//! there the same way, so ids never wrap.

use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use tracing::{info, trace, warn};

use crate::error::{IdError, Result};
use crate::id::{GeneratedId, NodeId, SnowflakeParts, EPOCH_MILLIS, MAX_SEQUENCE, TIMESTAMP_BITS};
use crate::ports::{Clock, IdGenerator};

use super::node::NodeIdentityResolver;

/// Last clock reading the timestamp field can encode.
const LAST_ENCODABLE_MILLIS: i64 = EPOCH_MILLIS + (1_i64 << TIMESTAMP_BITS) - 1;

/// `last_timestamp` before the first id.
const NEVER: i64 = -1;

struct GeneratorState {
    last_timestamp: i64,
    sequence: u16,
    /// Set while the clock reads behind `last_timestamp`.
    holding: bool,
}

/// Mints time-ordered ids for one node.
pub struct TimeOrderedIdGenerator {
    clock: Arc<dyn Clock>,
    node_id: NodeId,
    state: Mutex<GeneratorState>,
}

impl TimeOrderedIdGenerator {
    /// Creates a generator for `node_id` reading time from `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError::ClockOutOfRange`] if the clock reads before the
    /// epoch or beyond what the 41-bit timestamp field can hold.
    pub fn new(clock: Arc<dyn Clock>, node_id: NodeId) -> Result<Self> {
        let now = clock.now_millis();
        if !(EPOCH_MILLIS..=LAST_ENCODABLE_MILLIS).contains(&now) {
            return Err(IdError::ClockOutOfRange { now_ms: now });
        }

        info!(node_id = node_id.get(), "time-ordered generator ready");
        Ok(Self {
            clock,
            node_id,
            state: Mutex::new(GeneratorState {
                last_timestamp: NEVER,
                sequence: 0,
                holding: false,
            }),
        })
    }

    /// Creates a generator whose node id comes from `resolver`, which is
    /// consulted exactly once.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures as [`IdError::Configuration`], and
    /// clock problems as in [`TimeOrderedIdGenerator::new`].
    pub fn from_resolver(clock: Arc<dyn Clock>, resolver: &NodeIdentityResolver) -> Result<Self> {
        let node_id = resolver.resolve()?;
        Self::new(clock, node_id)
    }

    /// The node id embedded in every id from this instance.
    #[must_use]
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Reads the clock, pinned to the range the timestamp field can encode.
    ///
    /// A reading past the last encodable millisecond looks like a clock that
    /// stopped there, so the sequence runs out and the generator waits rather
    /// than wrapping the timestamp.
    fn read_clock(&self) -> i64 {
        let now = self.clock.now_millis();
        now.clamp(EPOCH_MILLIS, LAST_ENCODABLE_MILLIS)
    }

    /// Blocks until the clock reads strictly after `last`.
    fn wait_past(&self, last: i64) -> i64 {
        let mut backoff = Backoff::default();
        loop {
            let now = self.read_clock();
            if now > last {
                return now;
            }
            backoff.snooze();
        }
    }
}

impl IdGenerator for TimeOrderedIdGenerator {
    fn generate(&self) -> GeneratedId {
        // The state is two integers that are always written together, so a
        // panic elsewhere cannot leave it half-updated.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let mut now = self.read_clock();

        if now < state.last_timestamp {
            if !state.holding {
                warn!(
                    now_ms = now,
                    last_ms = state.last_timestamp,
                    "clock moved backwards; holding the last timestamp until it catches up"
                );
                state.holding = true;
            }
            now = state.last_timestamp;
        } else if state.holding {
            info!(now_ms = now, "clock caught up after regression");
            state.holding = false;
        }

        if now == state.last_timestamp {
            state.sequence = (state.sequence + 1) & MAX_SEQUENCE;
            if state.sequence == 0 {
                trace!(
                    last_ms = state.last_timestamp,
                    "sequence exhausted; waiting for next millisecond"
                );
                now = self.wait_past(state.last_timestamp);
                state.holding = false;
            }
        } else {
            state.sequence = 0;
        }
        state.last_timestamp = now;

        SnowflakeParts {
            timestamp_delta: u64::try_from(now - EPOCH_MILLIS).unwrap_or(0),
            node_id: self.node_id,
            sequence: state.sequence,
        }
        .compose()
    }
}

/// Spin briefly, then yield, then sleep in short slices.
#[derive(Default)]
struct Backoff {
    step: u32,
}

impl Backoff {
    const SPIN_LIMIT: u32 = 64;
    const YIELD_LIMIT: u32 = 128;
    const SLEEP: Duration = Duration::from_micros(50);

    fn snooze(&mut self) {
        if self.step < Self::SPIN_LIMIT {
            std::hint::spin_loop();
        } else if self.step < Self::YIELD_LIMIT {
            thread::yield_now();
        } else {
            thread::sleep(Self::SLEEP);
        }
        self.step = self.step.saturating_add(1);
    }
}
