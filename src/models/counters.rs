// Point-in-time readings of cumulative OS byte counters

use std::collections::BTreeMap;
use std::time::Instant;

/// Cumulative bytes for one disk device or network interface.
/// For interfaces, `read` is bytes received and `written` is bytes sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteCounters {
    pub read: u64,
    pub written: u64,
}

/// Counters for every device at one instant, keyed by device name.
/// BTreeMap keeps iteration order stable across ticks.
#[derive(Debug, Clone)]
pub struct CounterSnapshot {
    pub taken_at: Instant,
    pub devices: BTreeMap<String, ByteCounters>,
}

impl CounterSnapshot {
    pub fn new(taken_at: Instant) -> Self {
        Self {
            taken_at,
            devices: BTreeMap::new(),
        }
    }

    /// Empty snapshot stamped now; used when the OS read fails.
    pub fn empty() -> Self {
        Self::new(Instant::now())
    }

    pub fn with_device(mut self, name: impl Into<String>, read: u64, written: u64) -> Self {
        self.devices
            .insert(name.into(), ByteCounters { read, written });
        self
    }

    pub fn get(&self, name: &str) -> Option<&ByteCounters> {
        self.devices.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
