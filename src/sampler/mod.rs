// Host metrics via sysinfo. Every read falls back to a zero value; a tick never fails.

pub mod interface;
mod linux;
pub mod rates;

use crate::models::{ByteCounters, CounterSnapshot, HostInfo, MemoryInfo, TickSample, UNKNOWN_CPU};
use interface::{InterfaceInfo, Platform, select_active_interface};
use rates::{DiskRateTracker, IoRate, interface_rate};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use sysinfo::{Disks, Networks, System};
use tracing::instrument;

/// Produces one [`TickSample`] per call. The worker only sees this trait.
pub trait MetricSource: Send + Sync + 'static {
    fn sample(&self) -> impl Future<Output = TickSample> + Send;
}

/// Sampler timing and targets.
#[derive(Debug, Clone)]
pub struct SamplerConfig {
    /// Gap between the two network counter readings.
    pub network_window: Duration,
    /// Mount point whose used percentage is reported as disk usage.
    pub disk_mount: PathBuf,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            network_window: Duration::from_millis(500),
            disk_mount: PathBuf::from(default_disk_mount()),
        }
    }
}

/// Root of the system volume.
pub fn default_disk_mount() -> &'static str {
    if cfg!(windows) { "C:\\" } else { "/" }
}

/// Network counters together with the interface list they were read from.
#[derive(Debug, Clone)]
pub struct NetworkReading {
    pub counters: CounterSnapshot,
    pub interfaces: Vec<InterfaceInfo>,
}

impl NetworkReading {
    fn empty() -> Self {
        Self {
            counters: CounterSnapshot::empty(),
            interfaces: Vec::new(),
        }
    }
}

pub struct Sampler {
    sys: Arc<Mutex<System>>,
    disks: Arc<Mutex<Disks>>,
    networks: Arc<Mutex<Networks>>,
    disk_rates: Arc<Mutex<DiskRateTracker>>,
    last_cpu_refresh: Arc<Mutex<Option<(Instant, f64)>>>,
    config: SamplerConfig,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

/// Run a blocking sysinfo read off the async runtime; `None` if the task panicked.
async fn blocking<T, F>(operation: &'static str, f: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce() -> Option<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, operation, "sysinfo task join failed");
            None
        }
    }
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_cpu_all();
        let disks = Disks::new_with_refreshed_list();
        let networks = Networks::new_with_refreshed_list();

        let mut disk_rates = DiskRateTracker::new();
        disk_rates.seed(disk_counters(&disks));

        Self {
            sys: Arc::new(Mutex::new(sys)),
            disks: Arc::new(Mutex::new(disks)),
            networks: Arc::new(Mutex::new(networks)),
            disk_rates: Arc::new(Mutex::new(disk_rates)),
            last_cpu_refresh: Arc::new(Mutex::new(None)),
            config,
        }
    }

    /// Aggregate CPU utilisation, 0-100. The first call only sets the baseline
    /// and reports 0; calls closer than sysinfo's minimum update interval
    /// return the cached value.
    #[instrument(level = "debug", skip(self), fields(operation = "cpu_percent"))]
    pub async fn cpu_percent(&self) -> f64 {
        let sys = self.sys.clone();
        let last_cpu_refresh = self.last_cpu_refresh.clone();
        blocking("cpu_percent", move || {
            let mut sys = sys.lock().ok()?;
            let mut last = last_cpu_refresh.lock().ok()?;
            let now = Instant::now();
            let usage = match *last {
                Some((prev_ts, prev_usage))
                    if now.duration_since(prev_ts) < sysinfo::MINIMUM_CPU_UPDATE_INTERVAL =>
                {
                    prev_usage
                }
                Some(_) => {
                    sys.refresh_cpu_usage();
                    let usage = f64::from(sys.global_cpu_usage()).clamp(0.0, 100.0);
                    *last = Some((now, usage));
                    usage
                }
                None => {
                    sys.refresh_cpu_usage();
                    *last = Some((now, 0.0));
                    0.0
                }
            };
            Some(usage)
        })
        .await
        .unwrap_or(0.0)
    }

    /// Virtual memory totals; zeroed on failure.
    #[instrument(level = "debug", skip(self), fields(operation = "memory"))]
    pub async fn memory(&self) -> MemoryInfo {
        let sys = self.sys.clone();
        blocking("memory", move || {
            let mut sys = sys.lock().ok()?;
            sys.refresh_memory();
            let total = sys.total_memory();
            let available = sys.available_memory();
            let used = total.saturating_sub(available);
            let usage_percent = if total > 0 {
                (used as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            Some(MemoryInfo {
                total,
                used,
                free: sys.free_memory(),
                available,
                usage_percent,
            })
        })
        .await
        .unwrap_or_default()
    }

    /// Used percentage of the filesystem at the configured mount point; 0 if unreadable.
    /// Also takes the disk I/O counter reading for this tick.
    #[instrument(level = "debug", skip(self), fields(operation = "disk"))]
    pub async fn disk(&self) -> (f64, CounterSnapshot) {
        let disks = self.disks.clone();
        let mount = self.config.disk_mount.clone();
        blocking("disk", move || {
            let mut disks = disks.lock().ok()?;
            disks.refresh(true);
            Some((mount_usage_percent(&mount), disk_counters(&disks)))
        })
        .await
        .unwrap_or_else(|| (0.0, CounterSnapshot::empty()))
    }

    /// Disk throughput against the previous tick's counters.
    pub fn disk_rate(&self, current: CounterSnapshot) -> IoRate {
        match self.disk_rates.lock() {
            Ok(mut tracker) => tracker.update(current),
            Err(e) => {
                tracing::warn!(error = %e, operation = "disk_rate", "disk rate lock poisoned");
                IoRate::default()
            }
        }
    }

    /// Cumulative counters and flags for every interface.
    #[instrument(level = "debug", skip(self), fields(operation = "network"))]
    pub async fn network(&self) -> NetworkReading {
        let networks = self.networks.clone();
        blocking("network", move || {
            let mut networks = networks.lock().ok()?;
            networks.refresh(true);
            let mut counters = CounterSnapshot::new(Instant::now());
            let mut interfaces = Vec::with_capacity(networks.list().len());
            for (name, data) in networks.list() {
                counters.devices.insert(
                    name.clone(),
                    ByteCounters {
                        read: data.total_received(),
                        written: data.total_transmitted(),
                    },
                );
                interfaces.push(interface_info(
                    name,
                    data.ip_networks().iter().map(|n| n.addr).collect(),
                ));
            }
            interfaces.sort_by(|a, b| a.name.cmp(&b.name));
            Some(NetworkReading {
                counters,
                interfaces,
            })
        })
        .await
        .unwrap_or_else(NetworkReading::empty)
    }

    /// Interface list only; used for link-speed detection at startup.
    pub async fn interfaces(&self) -> Vec<InterfaceInfo> {
        self.network().await.interfaces
    }

    /// CPU brand and core counts. Falls back to [`HostInfo::default`] values.
    #[instrument(level = "debug", skip(self), fields(operation = "host_info"))]
    pub async fn host_info(&self) -> HostInfo {
        let sys = self.sys.clone();
        blocking("host_info", move || {
            let mut sys = sys.lock().ok()?;
            sys.refresh_cpu_all();
            let cpu_model = linux::read_cpu_model_linux()
                .or_else(|| {
                    sys.cpus()
                        .first()
                        .map(|c| c.brand().trim().to_string())
                        .filter(|s| !s.is_empty() && s != "cpu0")
                })
                .unwrap_or_else(|| UNKNOWN_CPU.into());
            let logical_cores = sys.cpus().len().max(1);
            let physical_cores = System::physical_core_count().unwrap_or(1).max(1);
            Some(HostInfo {
                cpu_model,
                physical_cores,
                logical_cores,
            })
        })
        .await
        .unwrap_or_default()
    }
}

impl MetricSource for Sampler {
    async fn sample(&self) -> TickSample {
        let cpu_percent = self.cpu_percent().await;
        let memory = self.memory().await;
        let (disk_percent, disk_counters) = self.disk().await;

        let before = self.network().await;
        tokio::time::sleep(self.config.network_window).await;
        let after = self.network().await;

        let interface = select_active_interface(&after.interfaces, Platform::current())
            .unwrap_or_default()
            .to_string();
        let net = interface_rate(&before.counters, &after.counters, &interface);
        let disk = self.disk_rate(disk_counters);

        tracing::debug!(
            cpu_percent,
            ram_percent = memory.usage_percent,
            disk_percent,
            interface = %interface,
            "sample taken"
        );

        TickSample {
            cpu_percent,
            ram_percent: memory.usage_percent,
            disk_percent,
            disk_read_mbs: disk.read_mbs,
            disk_write_mbs: disk.write_mbs,
            net_read_mbs: net.read_mbs,
            net_write_mbs: net.write_mbs,
            interface,
            memory,
        }
    }
}

/// Used percentage of the filesystem holding `path`, as `df` reports it:
/// reserved blocks count as neither used nor available. 0 when unreadable.
fn mount_usage_percent(path: &Path) -> f64 {
    match fs4::statvfs(path) {
        Ok(stats) => used_percent(
            stats.total_space(),
            stats.free_space(),
            stats.available_space(),
        ),
        Err(e) => {
            tracing::debug!(error = %e, operation = "disk", path = %path.display(), "statvfs failed");
            0.0
        }
    }
}

/// `used / (used + available) * 100` with `used = total - free`.
pub fn used_percent(total: u64, free: u64, available: u64) -> f64 {
    let used = total.saturating_sub(free);
    let capacity = used.saturating_add(available);
    if capacity == 0 {
        return 0.0;
    }
    (used as f64 / capacity as f64) * 100.0
}

fn disk_counters(disks: &Disks) -> CounterSnapshot {
    disks
        .list()
        .iter()
        .fold(CounterSnapshot::new(Instant::now()), |snap, d| {
            let usage = d.usage();
            snap.with_device(
                d.name().to_string_lossy().into_owned(),
                usage.total_read_bytes,
                usage.total_written_bytes,
            )
        })
}

fn interface_info(name: &str, addresses: Vec<std::net::IpAddr>) -> InterfaceInfo {
    match linux::read_interface_flags(name) {
        Some(flags) => InterfaceInfo {
            name: name.to_string(),
            is_up: flags.up,
            is_loopback: flags.loopback,
            addresses,
        },
        None => {
            // No flags source: loopback if every address is, up if addressed.
            let is_loopback = name == "lo"
                || name.starts_with("lo0")
                || (!addresses.is_empty() && addresses.iter().all(|a| a.is_loopback()));
            InterfaceInfo {
                name: name.to_string(),
                is_up: !addresses.is_empty(),
                is_loopback,
                addresses,
            }
        }
    }
}
