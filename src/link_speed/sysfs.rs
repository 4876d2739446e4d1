// Linux: /sys/class/net/<interface>/speed, reported in Mbps.

use std::path::PathBuf;

use super::{LinkSpeedProbe, ProbeError, mbps_to_mbs, positive};

#[derive(Debug, Clone)]
pub struct SysfsProbe {
    root: PathBuf,
}

impl Default for SysfsProbe {
    fn default() -> Self {
        Self::with_root("/sys/class/net")
    }
}

impl SysfsProbe {
    /// Probe reading `<root>/<interface>/speed`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Mbps value from the sysfs `speed` file, converted to MB/s.
pub fn parse_sysfs_speed(content: &str) -> Result<f64, ProbeError> {
    let trimmed = content.trim();
    let mbps: f64 = trimmed
        .parse()
        .map_err(|_| ProbeError::Unparsable(trimmed.to_string()))?;
    positive(mbps_to_mbs(mbps))
}

impl LinkSpeedProbe for SysfsProbe {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn link_speed(&self, interface: &str) -> Result<f64, ProbeError> {
        let path = self.root.join(interface).join("speed");
        let content = std::fs::read_to_string(&path).map_err(|source| ProbeError::Read {
            path: path.display().to_string(),
            source,
        })?;
        parse_sysfs_speed(&content)
    }
}
