// macOS: networksetup maps the device to its hardware port, then reports media speed.

use super::{LinkSpeedProbe, ProbeError, mbps_to_mbs, positive, run_command};

#[derive(Debug, Clone, Copy, Default)]
pub struct NetworksetupProbe;

/// Hardware port owning `device` in `networksetup -listallhardwareports`
/// output. The port line precedes the line naming the device.
pub fn hardware_port_for(listing: &str, device: &str) -> Option<String> {
    let lines: Vec<&str> = listing.lines().collect();
    lines.windows(2).find_map(|pair| {
        let owns_device = pair[1]
            .trim()
            .strip_prefix("Device:")
            .is_some_and(|d| d.trim() == device);
        if !owns_device {
            return None;
        }
        pair[0]
            .trim()
            .strip_prefix("Hardware Port:")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
    })
}

/// First parsable `Speed: <n> Mbps` line of `networksetup -getmedia`, in MB/s.
pub fn parse_media_speed(media: &str) -> Result<f64, ProbeError> {
    media
        .lines()
        .filter_map(|line| line.split_once("Speed:").map(|(_, rest)| rest))
        .find_map(|rest| {
            rest.trim()
                .trim_end_matches("Mbps")
                .trim()
                .parse::<f64>()
                .ok()
        })
        .map(mbps_to_mbs)
        .ok_or_else(|| ProbeError::Unparsable(media.trim().to_string()))
        .and_then(positive)
}

impl LinkSpeedProbe for NetworksetupProbe {
    fn name(&self) -> &'static str {
        "networksetup"
    }

    fn link_speed(&self, interface: &str) -> Result<f64, ProbeError> {
        let listing = run_command("networksetup", &["-listallhardwareports"])?;
        let port = hardware_port_for(&listing, interface)
            .ok_or_else(|| ProbeError::NoHardwarePort(interface.to_string()))?;
        let media = run_command("networksetup", &["-getmedia", &port])?;
        parse_media_speed(&media)
    }
}
