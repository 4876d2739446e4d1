// Link speed conversion, parsing and default fallback tests

mod common;

use common::iface;
use sysgraph::link_speed::macos::{hardware_port_for, parse_media_speed};
use sysgraph::link_speed::sysfs::{SysfsProbe, parse_sysfs_speed};
use sysgraph::link_speed::windows::parse_wmic_speed;
use sysgraph::link_speed::{
    DEFAULT_NETWORK_SPEED_MBS, FixedProbe, LinkSpeedProbe, ProbeError, bps_to_mbs,
    detect_max_speed, mbps_to_mbs,
};

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

#[test]
fn test_gigabit_mbps_is_125_mbs() {
    assert_eq!(mbps_to_mbs(1000.0), 125.0);
}

#[test]
fn test_gigabit_bps_is_119_209_mbs() {
    assert_eq!(round3(bps_to_mbs(1_000_000_000.0)), 119.209);
}

#[test]
fn test_default_speed_is_one_gigabit() {
    assert_eq!(DEFAULT_NETWORK_SPEED_MBS, 125.0);
}

#[test]
fn test_parse_sysfs_speed() {
    assert_eq!(parse_sysfs_speed("1000\n").unwrap(), 125.0);
    assert_eq!(parse_sysfs_speed("10000").unwrap(), 1250.0);
    assert!(matches!(
        parse_sysfs_speed("-1\n"),
        Err(ProbeError::NotPositive(_))
    ));
    assert!(matches!(
        parse_sysfs_speed("unknown"),
        Err(ProbeError::Unparsable(_))
    ));
}

const HARDWARE_PORTS: &str = "
Hardware Port: Ethernet
Device: en0
Ethernet Address: a4:83:e7:00:00:01

Hardware Port: Wi-Fi
Device: en1
Ethernet Address: a4:83:e7:00:00:02

VLAN Configurations
===================
";

#[test]
fn test_hardware_port_lookup() {
    assert_eq!(hardware_port_for(HARDWARE_PORTS, "en0").as_deref(), Some("Ethernet"));
    assert_eq!(hardware_port_for(HARDWARE_PORTS, "en1").as_deref(), Some("Wi-Fi"));
    assert_eq!(hardware_port_for(HARDWARE_PORTS, "en2"), None);
    // Prefix of another device name must not match.
    assert_eq!(hardware_port_for(HARDWARE_PORTS, "en"), None);
}

#[test]
fn test_parse_media_speed() {
    let media = "Current: autoselect (1000baseT <full-duplex>)\nActive: 1000baseT\nSpeed: 1000 Mbps\n";
    assert_eq!(parse_media_speed(media).unwrap(), 125.0);
    assert!(parse_media_speed("Current: autoselect\nActive: none\n").is_err());
    assert!(parse_media_speed("Speed: fast\n").is_err());
}

#[test]
fn test_parse_wmic_speed() {
    let output = "Speed      \r\n1000000000 \r\n\r\n";
    assert_eq!(round3(parse_wmic_speed(output).unwrap()), 119.209);
    assert!(parse_wmic_speed("Speed\r\n\r\n").is_err());
    assert!(parse_wmic_speed("Speed\r\n0\r\n").is_err());
}

#[test]
fn test_sysfs_probe_reads_speed_file() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("eth0")).unwrap();
    std::fs::write(dir.path().join("eth0").join("speed"), "2500\n").unwrap();

    let probe = SysfsProbe::with_root(dir.path());
    assert_eq!(probe.link_speed("eth0").unwrap(), 312.5);
    assert!(matches!(
        probe.link_speed("wlan0"),
        Err(ProbeError::Read { .. })
    ));
}

struct FailingProbe;

impl LinkSpeedProbe for FailingProbe {
    fn name(&self) -> &'static str {
        "failing"
    }

    fn link_speed(&self, interface: &str) -> Result<f64, ProbeError> {
        Err(ProbeError::NoHardwarePort(interface.to_string()))
    }
}

#[test]
fn test_detect_uses_probe_result() {
    let list = vec![iface("lo", true, true, true), iface("eth0", true, false, true)];
    assert_eq!(detect_max_speed(&FixedProbe(1250.0), &list, 125.0), 1250.0);
}

#[test]
fn test_detect_falls_back_on_probe_error() {
    let list = vec![iface("eth0", true, false, true)];
    assert_eq!(
        detect_max_speed(&FailingProbe, &list, DEFAULT_NETWORK_SPEED_MBS),
        125.0
    );
}

#[test]
fn test_detect_falls_back_without_candidate() {
    let list = vec![iface("lo", true, true, true)];
    assert_eq!(detect_max_speed(&FixedProbe(1250.0), &list, 125.0), 125.0);
    assert_eq!(detect_max_speed(&FixedProbe(1250.0), &[], 80.0), 80.0);
}

#[test]
fn test_detect_rejects_non_positive_probe_result() {
    let list = vec![iface("eth0", true, false, true)];
    assert_eq!(detect_max_speed(&FixedProbe(-0.125), &list, 125.0), 125.0);
    assert_eq!(detect_max_speed(&FixedProbe(f64::NAN), &list, 125.0), 125.0);
}
