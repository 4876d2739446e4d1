// Background sampling worker.
// Owns the only sender of the snapshot channel; every tick mutates the snapshot in place.

use crate::models::SystemSnapshot;
use crate::sampler::MetricSource;
use std::sync::Arc;
use tokio::sync::{oneshot, watch};
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::Instrument;

/// Sampler and shutdown for the worker.
pub struct WorkerDeps<S> {
    pub source: Arc<S>,
    pub snapshot_tx: watch::Sender<SystemSnapshot>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub sample_interval_ms: u64,
}

/// Snapshot channel seeded with zero-filled history; hand the receiver to renderers.
pub fn snapshot_channel(
    data_points: usize,
    max_network_speed: f64,
) -> (watch::Sender<SystemSnapshot>, watch::Receiver<SystemSnapshot>) {
    watch::channel(SystemSnapshot::new(data_points, max_network_speed))
}

pub fn spawn<S: MetricSource>(
    deps: WorkerDeps<S>,
    config: WorkerConfig,
) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        source,
        snapshot_tx,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig { sample_interval_ms } = config;

    let worker_span = tracing::debug_span!("worker", sample_interval_ms);
    let task = async move {
        let mut tick = interval(Duration::from_millis(sample_interval_ms));
        // Overrun delays the next tick; ticks are never queued.
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let sample = source.sample().await;
                    snapshot_tx.send_modify(|snapshot| snapshot.record(&sample));
                    if snapshot_tx.is_closed() {
                        tracing::debug!("All snapshot receivers dropped; worker stopping");
                        break;
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
            }
        }
    };
    tokio::spawn(task.instrument(worker_span))
}
