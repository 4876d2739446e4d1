// Live sampler smoke tests against the host running the suite

use std::time::Duration;
use sysgraph::sampler::{MetricSource, Sampler, SamplerConfig, used_percent};

fn quick_sampler() -> Sampler {
    Sampler::new(SamplerConfig {
        network_window: Duration::from_millis(50),
        ..SamplerConfig::default()
    })
}

#[tokio::test]
async fn sample_values_are_in_range() {
    let sampler = quick_sampler();
    let first = sampler.sample().await;
    assert_eq!(first.cpu_percent, 0.0, "first CPU reading is the baseline");

    tokio::time::sleep(Duration::from_millis(250)).await;
    let sample = sampler.sample().await;
    for pct in [sample.cpu_percent, sample.ram_percent, sample.disk_percent] {
        assert!((0.0..=100.0).contains(&pct), "{pct} out of range");
    }
    for rate in [
        sample.disk_read_mbs,
        sample.disk_write_mbs,
        sample.net_read_mbs,
        sample.net_write_mbs,
    ] {
        assert!(rate >= 0.0 && rate.is_finite());
    }
    if sample.interface.is_empty() {
        assert_eq!(sample.net_read_mbs, 0.0);
        assert_eq!(sample.net_write_mbs, 0.0);
    }
    assert!(sample.memory.used <= sample.memory.total);
}

#[tokio::test]
async fn host_info_has_at_least_one_core() {
    let host = quick_sampler().host_info().await;
    assert!(host.physical_cores >= 1);
    assert!(host.logical_cores >= 1);
    assert!(!host.cpu_model.is_empty());
}

#[tokio::test]
async fn interfaces_are_sorted_by_name() {
    let interfaces = quick_sampler().interfaces().await;
    let names: Vec<&str> = interfaces.iter().map(|i| i.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn used_percent_excludes_reserved_blocks() {
    // 1000 total, 100 free of which 50 reserved for root: df shows 900 / 950.
    let pct = used_percent(1000, 100, 50);
    assert!((pct - 94.736_842).abs() < 1e-4, "{pct}");
    // Without reservation it reduces to used / total.
    assert_eq!(used_percent(1000, 300, 300), 70.0);
    // Mostly-empty volume with a large reserve is not reported as mostly full.
    assert!((used_percent(100, 80, 15) - (20.0 / 35.0 * 100.0)).abs() < 1e-9);
}

#[test]
fn used_percent_handles_degenerate_inputs() {
    assert_eq!(used_percent(0, 0, 0), 0.0);
    assert_eq!(used_percent(100, 100, 100), 0.0);
    assert_eq!(used_percent(100, 0, 0), 100.0);
    // free larger than total saturates to zero used.
    assert_eq!(used_percent(100, 200, 50), 0.0);
}

#[tokio::test]
async fn disk_usage_of_unreadable_mount_is_zero() {
    let sampler = Sampler::new(SamplerConfig {
        disk_mount: "/definitely/not/a/mount/point".into(),
        ..SamplerConfig::default()
    });
    let (pct, _) = sampler.disk().await;
    assert_eq!(pct, 0.0);
}

#[tokio::test]
async fn disk_usage_of_root_is_in_range() {
    let (pct, _) = quick_sampler().disk().await;
    assert!((0.0..=100.0).contains(&pct), "{pct}");
}
