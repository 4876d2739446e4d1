// Active network interface selection

use std::net::IpAddr;

/// What the sampler knows about one enumerated interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceInfo {
    pub name: String,
    pub is_up: bool,
    pub is_loopback: bool,
    pub addresses: Vec<IpAddr>,
}

impl InterfaceInfo {
    /// Up and not loopback.
    pub fn is_link_candidate(&self) -> bool {
        self.is_up && !self.is_loopback
    }

    /// Link candidate with at least one address assigned.
    pub fn is_usable(&self) -> bool {
        self.is_link_candidate() && !self.addresses.is_empty()
    }
}

/// Naming convention used to prefer one usable interface over another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Other,
}

const MACOS_PREFERRED: [&str; 2] = ["en0", "en1"];
const COMMON_NAME_PATTERNS: [&str; 5] = ["wi-fi", "wlan", "eth", "en", "wlp"];

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Other
        }
    }

    fn prefers(self, name: &str) -> bool {
        match self {
            Platform::MacOs => MACOS_PREFERRED.contains(&name),
            Platform::Other => {
                let lower = name.to_lowercase();
                COMMON_NAME_PATTERNS.iter().any(|p| lower.contains(p))
            }
        }
    }
}

/// First usable interface matching the platform's naming preference, else the
/// first usable interface at all. `interfaces` order is the tie-breaker.
pub fn select_active_interface(interfaces: &[InterfaceInfo], platform: Platform) -> Option<&str> {
    let mut usable = interfaces.iter().filter(|i| i.is_usable());
    let first = usable.clone().next()?;
    let preferred = usable.find(|i| platform.prefers(&i.name)).unwrap_or(first);
    Some(preferred.name.as_str())
}

/// First interface that is up and not loopback, whether or not it has an
/// address. Used for link-speed probing.
pub fn first_link_candidate(interfaces: &[InterfaceInfo]) -> Option<&str> {
    interfaces
        .iter()
        .find(|i| i.is_link_candidate())
        .map(|i| i.name.as_str())
}
