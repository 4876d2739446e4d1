// Aggregate of current values and history windows exposed to renderers

use serde::Serialize;

use super::MetricSeries;

/// Memory totals in bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub available: u64,
    pub usage_percent: f64,
}

/// Static CPU identity; read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub cpu_model: String,
    pub physical_cores: usize,
    pub logical_cores: usize,
}

pub const UNKNOWN_CPU: &str = "Unknown CPU";

impl Default for HostInfo {
    fn default() -> Self {
        Self {
            cpu_model: UNKNOWN_CPU.into(),
            physical_cores: 1,
            logical_cores: 1,
        }
    }
}

/// One value per metric, produced by a single sampling pass.
/// Rates are MB/s, percentages are 0-100.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickSample {
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
    pub disk_read_mbs: f64,
    pub disk_write_mbs: f64,
    pub net_read_mbs: f64,
    pub net_write_mbs: f64,
    /// Empty when no active interface was found.
    pub interface: String,
    pub memory: MemoryInfo,
}

/// Current scalars plus the six history windows. Created once and updated in
/// place by [`SystemSnapshot::record`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSnapshot {
    pub ticks: u64,
    pub cpu_usage: f64,
    pub ram_usage: f64,
    pub disk_usage: f64,
    pub interface: String,
    pub memory: MemoryInfo,
    /// Graph scale for the network series, MB/s.
    pub max_network_speed: f64,
    pub cpu: MetricSeries,
    pub ram: MetricSeries,
    pub disk_read: MetricSeries,
    pub disk_write: MetricSeries,
    pub net_read: MetricSeries,
    pub net_write: MetricSeries,
}

impl SystemSnapshot {
    pub fn new(data_points: usize, max_network_speed: f64) -> Self {
        Self {
            ticks: 0,
            cpu_usage: 0.0,
            ram_usage: 0.0,
            disk_usage: 0.0,
            interface: String::new(),
            memory: MemoryInfo::default(),
            max_network_speed,
            cpu: MetricSeries::new(data_points),
            ram: MetricSeries::new(data_points),
            disk_read: MetricSeries::new(data_points),
            disk_write: MetricSeries::new(data_points),
            net_read: MetricSeries::new(data_points),
            net_write: MetricSeries::new(data_points),
        }
    }

    /// Applies one tick: scalars replaced, each series shifted by one.
    pub fn record(&mut self, sample: &TickSample) {
        self.ticks += 1;
        self.cpu_usage = sample.cpu_percent;
        self.ram_usage = sample.ram_percent;
        self.disk_usage = sample.disk_percent;
        self.memory = sample.memory;
        if self.interface != sample.interface {
            self.interface.clone_from(&sample.interface);
        }

        self.cpu.push(sample.cpu_percent);
        self.ram.push(sample.ram_percent);
        self.disk_read.push(sample.disk_read_mbs);
        self.disk_write.push(sample.disk_write_mbs);
        self.net_read.push(sample.net_read_mbs);
        self.net_write.push(sample.net_write_mbs);
    }

    pub fn data_points(&self) -> usize {
        self.cpu.len()
    }
}
