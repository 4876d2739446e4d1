// Windows: wmic reports adapter speed in bits per second.

use super::{LinkSpeedProbe, ProbeError, bps_to_mbs, positive, run_command};

#[derive(Debug, Clone, Copy, Default)]
pub struct WmicProbe;

/// First numeric line of `wmic nic ... get Speed`, converted to MB/s.
pub fn parse_wmic_speed(output: &str) -> Result<f64, ProbeError> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && *line != "Speed")
        .find_map(|line| line.parse::<f64>().ok())
        .map(bps_to_mbs)
        .ok_or_else(|| ProbeError::Unparsable(output.trim().to_string()))
        .and_then(positive)
}

impl LinkSpeedProbe for WmicProbe {
    fn name(&self) -> &'static str {
        "wmic"
    }

    fn link_speed(&self, interface: &str) -> Result<f64, ProbeError> {
        let filter = format!("NetConnectionID='{}'", interface);
        let output = run_command("wmic", &["nic", "where", &filter, "get", "Speed"])?;
        parse_wmic_speed(&output)
    }
}
