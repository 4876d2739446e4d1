// Worker integration tests: scripted source, tick, shutdown, snapshot contents

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use sysgraph::models::TickSample;
use sysgraph::sampler::MetricSource;
use sysgraph::worker::{WorkerConfig, WorkerDeps, snapshot_channel, spawn};
use tokio::sync::oneshot;
use tokio::time::timeout;

/// Reports 10, 20, 30, ... as CPU usage on successive calls.
#[derive(Default)]
struct CountingSource {
    calls: AtomicU64,
}

impl MetricSource for CountingSource {
    async fn sample(&self) -> TickSample {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        common::tick(n as f64 * 10.0)
    }
}

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn worker_records_ticks_and_stops_on_shutdown() {
    let source = Arc::new(CountingSource::default());
    let (snapshot_tx, mut snapshot_rx) = snapshot_channel(5, 125.0);
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let handle = spawn(
        WorkerDeps {
            source: source.clone(),
            snapshot_tx,
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval_ms: 10,
        },
    );

    timeout(WAIT, snapshot_rx.wait_for(|s| s.ticks >= 3))
        .await
        .expect("three ticks within timeout")
        .expect("worker alive");

    shutdown_tx.send(()).unwrap();
    timeout(WAIT, handle)
        .await
        .expect("worker stops after shutdown")
        .unwrap();

    let snapshot = snapshot_rx.borrow().clone();
    let ticks = snapshot.ticks;
    assert!(ticks >= 3);
    assert_eq!(source.calls.load(Ordering::SeqCst), ticks);

    let newest = ticks as f64 * 10.0;
    assert_eq!(snapshot.cpu_usage, newest);
    assert_eq!(snapshot.cpu.len(), 5);
    assert_eq!(snapshot.cpu.current_value(), newest);
    let values = snapshot.cpu.to_vec();
    assert_eq!(values[3], newest - 10.0);
    assert_eq!(values[2], newest - 20.0);
    assert_eq!(snapshot.ram.current_value(), newest / 2.0);
    assert_eq!(snapshot.net_read.current_value(), 1.5);
    assert_eq!(snapshot.interface, "eth0");
    assert_eq!(snapshot.max_network_speed, 125.0);
}

#[tokio::test]
async fn worker_stops_when_all_receivers_dropped() {
    let source = Arc::new(CountingSource::default());
    let (snapshot_tx, snapshot_rx) = snapshot_channel(3, 125.0);
    let (_shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    drop(snapshot_rx);

    let handle = spawn(
        WorkerDeps {
            source: source.clone(),
            snapshot_tx,
            shutdown_rx,
        },
        WorkerConfig {
            sample_interval_ms: 10,
        },
    );

    timeout(WAIT, handle)
        .await
        .expect("worker exits without receivers")
        .unwrap();
    assert_eq!(source.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn snapshot_channel_starts_zero_filled() {
    let (_tx, rx) = snapshot_channel(7, 62.5);
    let snapshot = rx.borrow();
    assert_eq!(snapshot.ticks, 0);
    assert_eq!(snapshot.data_points(), 7);
    assert_eq!(snapshot.max_network_speed, 62.5);
    assert!(snapshot.net_write.iter().all(|v| v == 0.0));
}
