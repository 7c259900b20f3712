//! Concurrency and timing tests for the time-ordered generator.
//!
//! A `ManualClock` holds time still so sequence exhaustion is exact; the
//! shared-instance tests use the live clock.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use idmint::adapters::fixed::ManualClock;
use idmint::adapters::live::LiveClock;
use idmint::engine::{RandomIdGenerator, TimeOrderedIdGenerator};
use idmint::id::{GeneratedId, NodeId, SnowflakeParts, EPOCH_MILLIS};
use idmint::ports::IdGenerator;

const START: i64 = EPOCH_MILLIS + 1_000;

fn manual_generator(clock: &Arc<ManualClock>, node: u16) -> Arc<TimeOrderedIdGenerator> {
    let node_id = NodeId::new(node).unwrap();
    let generator = TimeOrderedIdGenerator::new(clock.clone(), node_id);
    Arc::new(generator.unwrap())
}

fn mint(generator: &dyn IdGenerator, count: usize) -> Vec<GeneratedId> {
    (0..count).map(|_| generator.generate()).collect()
}

#[test]
fn exhausted_sequence_waits_for_next_millisecond() {
    let clock = Arc::new(ManualClock::new(START));
    let generator = manual_generator(&clock, 5);

    let mut last = None;
    for expected in 0..4096_u16 {
        let id = generator.generate();
        let parts = SnowflakeParts::decompose(id);
        assert_eq!(parts.sequence, expected);
        assert_eq!(parts.timestamp_delta, 1_000);
        last = Some(id);
    }
    let last = last.unwrap();

    let waiter = {
        let generator = Arc::clone(&generator);
        thread::spawn(move || generator.generate())
    };

    thread::sleep(Duration::from_millis(50));
    assert!(
        !waiter.is_finished(),
        "4097th id was emitted before the clock advanced"
    );

    clock.advance(1);
    let next = waiter.join().unwrap();
    let parts = SnowflakeParts::decompose(next);

    assert_eq!(parts.sequence, 0);
    assert_eq!(parts.timestamp_delta, 1_001);
    assert_eq!(parts.node_id.get(), 5);
    assert!(next > last);
}

#[test]
fn shared_instance_never_repeats() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 20_000;

    let node_id = NodeId::new(17).unwrap();
    let clock = Arc::new(LiveClock);
    let generator = Arc::new(TimeOrderedIdGenerator::new(clock, node_id).unwrap());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || {
                let ids = mint(generator.as_ref(), PER_THREAD);
                // Each caller sees its own ids in increasing order.
                assert!(ids.windows(2).all(|w| w[1] > w[0]));
                ids
            })
        })
        .collect();

    let all: Vec<GeneratedId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    let distinct: HashSet<GeneratedId> = all.iter().copied().collect();

    assert_eq!(all.len(), THREADS * PER_THREAD);
    assert_eq!(
        distinct.len(),
        all.len(),
        "duplicate ids under concurrent access"
    );
    let node_ids: HashSet<u16> = all
        .iter()
        .map(|&id| SnowflakeParts::decompose(id).node_id.get())
        .collect();
    assert_eq!(node_ids, HashSet::from([17]));
}

#[test]
fn shared_instance_with_frozen_clock_spreads_over_milliseconds() {
    let clock = Arc::new(ManualClock::new(START));
    let generator = manual_generator(&clock, 1);

    // Four callers share 4096 slots in the frozen millisecond; a ticker moves
    // the clock on so the rest can finish.
    let ticker = {
        let clock = Arc::clone(&clock);
        thread::spawn(move || {
            for _ in 0..20 {
                thread::sleep(Duration::from_millis(5));
                clock.advance(1);
            }
        })
    };

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || mint(generator.as_ref(), 2_000))
        })
        .collect();

    let all: Vec<GeneratedId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    ticker.join().unwrap();

    let distinct: HashSet<GeneratedId> = all.iter().copied().collect();
    assert_eq!(distinct.len(), 8_000);
    let max_delta = all
        .iter()
        .map(|&id| SnowflakeParts::decompose(id).timestamp_delta)
        .max()
        .unwrap();
    assert!(max_delta > 1_000);
}

#[test]
fn random_generator_is_shareable() {
    let generator: Arc<dyn IdGenerator> = Arc::new(RandomIdGenerator::default());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || mint(generator.as_ref(), 5_000))
        })
        .collect();

    let all: Vec<GeneratedId> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert!(all.iter().all(|id| id.get() < (1 << 53)));
    assert_eq!(all.iter().collect::<HashSet<_>>().len(), all.len());
}
