// Fixed-capacity sliding window backing one scrolling graph

use serde::Serialize;
use std::collections::VecDeque;

/// Fixed-length FIFO of samples. Length is always exactly the capacity given at
/// construction; pushing evicts the oldest sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricSeries {
    values: VecDeque<f64>,
}

impl MetricSeries {
    /// Zero-filled series of `capacity` points.
    pub fn new(capacity: usize) -> Self {
        Self {
            values: std::iter::repeat_n(0.0, capacity).collect(),
        }
    }

    /// One-in, one-out. A zero-capacity series stays empty.
    pub fn push(&mut self, value: f64) {
        if self.values.is_empty() {
            return;
        }
        self.values.pop_front();
        self.values.push_back(value);
    }

    /// Newest sample, or 0 for a zero-capacity series.
    pub fn current_value(&self) -> f64 {
        self.values.back().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    /// Largest sample in the window (0 when empty or all samples are below 0).
    pub fn peak(&self) -> f64 {
        self.iter().fold(0.0, f64::max)
    }
}
