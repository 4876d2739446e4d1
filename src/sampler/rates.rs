// Rate derivation from two counter snapshots

use std::time::Duration;

use crate::models::{ByteCounters, CounterSnapshot};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Read/write throughput in MB/s.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IoRate {
    pub read_mbs: f64,
    pub write_mbs: f64,
}

impl IoRate {
    pub fn is_active(&self) -> bool {
        self.read_mbs > 0.0 || self.write_mbs > 0.0
    }
}

/// `bytes` transferred over `elapsed`, as binary megabytes per second.
/// Zero elapsed yields 0.
pub fn mb_per_sec(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    (bytes as f64 / BYTES_PER_MB) * (1.0 / secs)
}

/// Rate between two readings of the same device. A counter that went backwards
/// (device reset) counts as no transfer.
pub fn counter_rate(before: &ByteCounters, after: &ByteCounters, elapsed: Duration) -> IoRate {
    IoRate {
        read_mbs: mb_per_sec(after.read.saturating_sub(before.read), elapsed),
        write_mbs: mb_per_sec(after.written.saturating_sub(before.written), elapsed),
    }
}

fn elapsed_between(before: &CounterSnapshot, after: &CounterSnapshot) -> Duration {
    after.taken_at.saturating_duration_since(before.taken_at)
}

/// Disk throughput: walks devices of `current` in name order and returns the
/// rate of the first one with any read or write activity. Devices missing from
/// `previous` are skipped. No active device yields zero.
pub fn first_active_device_rate(previous: &CounterSnapshot, current: &CounterSnapshot) -> IoRate {
    let elapsed = elapsed_between(previous, current);
    current
        .devices
        .iter()
        .filter_map(|(name, after)| {
            previous
                .get(name)
                .map(|before| counter_rate(before, after, elapsed))
        })
        .find(IoRate::is_active)
        .unwrap_or_default()
}

/// Throughput of a single named interface between two snapshots; zero when
/// the name is empty or absent from either snapshot.
pub fn interface_rate(before: &CounterSnapshot, after: &CounterSnapshot, name: &str) -> IoRate {
    if name.is_empty() {
        return IoRate::default();
    }
    match (before.get(name), after.get(name)) {
        (Some(b), Some(a)) => counter_rate(b, a, elapsed_between(before, after)),
        _ => IoRate::default(),
    }
}

/// Holds the previous disk snapshot between ticks.
#[derive(Debug, Default)]
pub struct DiskRateTracker {
    previous: Option<CounterSnapshot>,
}

impl DiskRateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the baseline without producing a rate.
    pub fn seed(&mut self, snapshot: CounterSnapshot) {
        self.previous = Some(snapshot);
    }

    /// Rate against the stored baseline, then `current` becomes the baseline.
    /// With no (or an empty) baseline the current reading is adopted and zero
    /// is reported.
    pub fn update(&mut self, current: CounterSnapshot) -> IoRate {
        let rate = match self.previous.as_ref() {
            Some(prev) if !prev.is_empty() => first_active_device_rate(prev, &current),
            _ => IoRate::default(),
        };
        self.previous = Some(current);
        rate
    }
}
