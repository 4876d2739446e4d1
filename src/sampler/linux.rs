// Linux-specific helpers: /proc/cpuinfo and /sys/class/net interface flags.

const IFF_UP: u32 = 0x1;
const IFF_LOOPBACK: u32 = 0x8;

/// Administrative up / loopback bits of a network interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct InterfaceFlags {
    pub up: bool,
    pub loopback: bool,
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
/// Parse the hex flags word exposed by sysfs (e.g. "0x1003").
pub(super) fn parse_interface_flags(content: &str) -> Option<InterfaceFlags> {
    let raw = content.trim();
    let hex = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let bits = u32::from_str_radix(hex, 16).ok()?;
    Some(InterfaceFlags {
        up: bits & IFF_UP != 0,
        loopback: bits & IFF_LOOPBACK != 0,
    })
}

/// Read /sys/class/net/<interface>/flags (Linux). None elsewhere or when unreadable.
pub(super) fn read_interface_flags(interface_name: &str) -> Option<InterfaceFlags> {
    #[cfg(target_os = "linux")]
    {
        let path = format!("/sys/class/net/{}/flags", interface_name);
        let content = std::fs::read_to_string(path).ok()?;
        parse_interface_flags(&content)
    }
    #[cfg(not(target_os = "linux"))]
    {
        let _ = interface_name;
        None
    }
}

/// First "model name" from /proc/cpuinfo (Linux). Preferred over sysinfo's brand
/// when that comes back empty or as "cpu0".
pub(super) fn read_cpu_model_linux() -> Option<String> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/cpuinfo").ok()?;
        parse_cpu_model(&content)
    }
    #[cfg(not(target_os = "linux"))]
    {
        None
    }
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_cpu_model(cpuinfo: &str) -> Option<String> {
    cpuinfo
        .lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, name)| name.trim())
        .filter(|name| !name.is_empty() && *name != "cpu0")
        .map(str::to_string)
}
