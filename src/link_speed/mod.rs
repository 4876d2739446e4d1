// Best-effort link capacity of the active interface, in MB/s.
// Any failure resolves to the configured default rather than an error.

pub mod macos;
pub mod sysfs;
pub mod windows;

use crate::sampler::interface::{InterfaceInfo, first_link_candidate};

/// 1 Gbps expressed in MB/s.
pub const DEFAULT_NETWORK_SPEED_MBS: f64 = 125.0;

/// Divisor from megabits per second to megabytes per second.
pub const MBPS_TO_MBS: f64 = 8.0;

/// Divisor from bits per second to binary megabytes per second.
pub const BPS_TO_MBS: f64 = 8.0 * 1024.0 * 1024.0;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    ExitStatus {
        command: &'static str,
        status: std::process::ExitStatus,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no hardware port found for interface {0}")]
    NoHardwarePort(String),
    #[error("could not parse link speed from {0:?}")]
    Unparsable(String),
    #[error("link speed {0} is not a usable capacity")]
    NotPositive(f64),
}

pub fn mbps_to_mbs(mbps: f64) -> f64 {
    mbps / MBPS_TO_MBS
}

pub fn bps_to_mbs(bps: f64) -> f64 {
    bps / BPS_TO_MBS
}

/// Rejects zero, negative (e.g. sysfs reports -1 for an unknown wireless
/// rate) and non-finite speeds.
pub(crate) fn positive(speed_mbs: f64) -> Result<f64, ProbeError> {
    if speed_mbs.is_finite() && speed_mbs > 0.0 {
        Ok(speed_mbs)
    } else {
        Err(ProbeError::NotPositive(speed_mbs))
    }
}

/// Run a platform utility and capture stdout.
pub(crate) fn run_command(command: &'static str, args: &[&str]) -> Result<String, ProbeError> {
    let output = std::process::Command::new(command)
        .args(args)
        .output()
        .map_err(|source| ProbeError::Spawn { command, source })?;
    if !output.status.success() {
        return Err(ProbeError::ExitStatus {
            command,
            status: output.status,
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// One platform's way of asking the OS for an interface's nominal speed.
pub trait LinkSpeedProbe: Send + Sync {
    fn name(&self) -> &'static str;

    /// Nominal capacity of `interface` in MB/s.
    fn link_speed(&self, interface: &str) -> Result<f64, ProbeError>;
}

/// Always answers with the same speed; used where no platform probe exists or
/// when detection is turned off.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub f64);

impl LinkSpeedProbe for FixedProbe {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn link_speed(&self, _interface: &str) -> Result<f64, ProbeError> {
        positive(self.0)
    }
}

/// Probe for the platform this binary was built for.
pub fn platform_probe() -> Box<dyn LinkSpeedProbe> {
    #[cfg(target_os = "linux")]
    {
        Box::new(sysfs::SysfsProbe::default())
    }
    #[cfg(target_os = "macos")]
    {
        Box::new(macos::NetworksetupProbe)
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WmicProbe)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Box::new(FixedProbe(DEFAULT_NETWORK_SPEED_MBS))
    }
}

/// Max speed of the first up, non-loopback interface, or `default` when there
/// is none or the probe fails.
pub fn detect_max_speed(
    probe: &dyn LinkSpeedProbe,
    interfaces: &[InterfaceInfo],
    default: f64,
) -> f64 {
    let Some(interface) = first_link_candidate(interfaces) else {
        tracing::debug!(
            operation = "detect_max_speed",
            default,
            "no candidate interface; using default speed"
        );
        return default;
    };
    match probe.link_speed(interface).and_then(positive) {
        Ok(speed) => {
            tracing::info!(interface, probe = probe.name(), speed_mbs = speed, "link speed detected");
            speed
        }
        Err(e) => {
            tracing::debug!(
                error = %e,
                operation = "detect_max_speed",
                interface,
                probe = probe.name(),
                default,
                "link speed unavailable; using default speed"
            );
            default
        }
    }
}
