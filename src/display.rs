// Panel contents for renderers: labels, formatted detail rows, graph scale, layout mode.

use crate::models::{ColorScheme, HostInfo, MetricSeries, Rgba, SystemSnapshot};

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;
const PERCENT_SCALE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Cpu,
    Ram,
    Disk,
    Network,
}

impl PanelKind {
    pub const ALL: [PanelKind; 4] = [
        PanelKind::Cpu,
        PanelKind::Ram,
        PanelKind::Disk,
        PanelKind::Network,
    ];

    pub fn title(self) -> &'static str {
        match self {
            PanelKind::Cpu => "CPU",
            PanelKind::Ram => "RAM",
            PanelKind::Disk => "Disk",
            PanelKind::Network => "Net",
        }
    }

    pub fn color(self, scheme: &ColorScheme) -> Rgba {
        match self {
            PanelKind::Cpu => scheme.cpu,
            PanelKind::Ram => scheme.ram,
            PanelKind::Disk => scheme.disk,
            PanelKind::Network => scheme.net,
        }
    }

    /// Top of the graph's y axis.
    pub fn max_value(self, snapshot: &SystemSnapshot) -> f64 {
        match self {
            PanelKind::Network => snapshot.max_network_speed,
            _ => PERCENT_SCALE,
        }
    }

    /// One series for single-value panels, read/write pair for I/O panels.
    pub fn series(self, snapshot: &SystemSnapshot) -> (&MetricSeries, Option<&MetricSeries>) {
        match self {
            PanelKind::Cpu => (&snapshot.cpu, None),
            PanelKind::Ram => (&snapshot.ram, None),
            PanelKind::Disk => (&snapshot.disk_read, Some(&snapshot.disk_write)),
            PanelKind::Network => (&snapshot.net_read, Some(&snapshot.net_write)),
        }
    }

    /// Headline value shown next to the title.
    pub fn summary(self, snapshot: &SystemSnapshot) -> String {
        match self {
            PanelKind::Cpu => format_percent(snapshot.cpu_usage, 1),
            PanelKind::Ram => format_percent(snapshot.ram_usage, 1),
            PanelKind::Disk => format!(
                "R {} W {}",
                format_rate(snapshot.disk_read.current_value()),
                format_rate(snapshot.disk_write.current_value())
            ),
            PanelKind::Network => format!(
                "D {} U {}",
                format_rate(snapshot.net_read.current_value()),
                format_rate(snapshot.net_write.current_value())
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

impl InfoRow {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

pub fn format_rate(mbs: f64) -> String {
    format!("{:.2} MB/s", mbs)
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value)
}

pub fn format_gb(bytes: u64) -> String {
    format!("{:.1} GB", bytes as f64 / BYTES_PER_GB)
}

/// Detail column for one panel.
pub fn info_rows(kind: PanelKind, snapshot: &SystemSnapshot, host: &HostInfo) -> Vec<InfoRow> {
    match kind {
        PanelKind::Cpu => vec![
            InfoRow::new("Model", host.cpu_model.clone()),
            InfoRow::new("Usage", format_percent(snapshot.cpu_usage, 2)),
            InfoRow::new(
                "Cores",
                format!(
                    "{} physical / {} logical",
                    host.physical_cores, host.logical_cores
                ),
            ),
        ],
        PanelKind::Ram => vec![
            InfoRow::new("Total", format_gb(snapshot.memory.total)),
            InfoRow::new(
                "Used",
                format!(
                    "{} ({})",
                    format_gb(snapshot.memory.used),
                    format_percent(snapshot.ram_usage, 1)
                ),
            ),
            InfoRow::new("Free", format_gb(snapshot.memory.free)),
        ],
        PanelKind::Disk => vec![
            InfoRow::new("Read", format_rate(snapshot.disk_read.current_value())),
            InfoRow::new("Write", format_rate(snapshot.disk_write.current_value())),
            InfoRow::new("Usage", format_percent(snapshot.disk_usage, 1)),
        ],
        PanelKind::Network => vec![
            InfoRow::new("Interface", snapshot.interface.clone()),
            InfoRow::new(
                "Max Speed",
                format!("{:.1} MB/s", snapshot.max_network_speed),
            ),
            InfoRow::new("Down", format_rate(snapshot.net_read.current_value())),
            InfoRow::new("Up", format_rate(snapshot.net_write.current_value())),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Detailed,
    Compact,
}

impl LayoutMode {
    /// Compact strictly below `min_width`.
    pub fn for_width(width: u16, min_width: u16) -> Self {
        if width < min_width {
            LayoutMode::Compact
        } else {
            LayoutMode::Detailed
        }
    }

    pub fn shows_detail(self) -> bool {
        self == LayoutMode::Detailed
    }
}

/// Remembers the last observed size and reports when the layout mode flips.
#[derive(Debug, Clone)]
pub struct LayoutTracker {
    min_width: u16,
    mode: LayoutMode,
    size: Option<(u16, u16)>,
}

impl LayoutTracker {
    pub fn new(min_width: u16) -> Self {
        Self {
            min_width,
            mode: LayoutMode::Detailed,
            size: None,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// Records a size; returns the new mode only when it changed.
    pub fn observe(&mut self, width: u16, height: u16) -> Option<LayoutMode> {
        if self.size == Some((width, height)) {
            return None;
        }
        self.size = Some((width, height));
        let mode = LayoutMode::for_width(width, self.min_width);
        if mode == self.mode {
            return None;
        }
        self.mode = mode;
        Some(mode)
    }
}

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Text sparkline of `series` scaled to `max`; values above `max` clip to the top.
pub fn sparkline(series: &MetricSeries, max: f64) -> String {
    let top = SPARK_LEVELS.len() - 1;
    series
        .iter()
        .map(|v| {
            let ratio = if max > 0.0 { (v / max).clamp(0.0, 1.0) } else { 0.0 };
            SPARK_LEVELS[(ratio * top as f64).round() as usize]
        })
        .collect()
}
