// Shared test helpers

#![allow(dead_code)]

use sysgraph::models::*;
use sysgraph::sampler::interface::InterfaceInfo;
use std::net::{IpAddr, Ipv4Addr};

pub fn tick(cpu: f64) -> TickSample {
    TickSample {
        cpu_percent: cpu,
        ram_percent: cpu / 2.0,
        disk_percent: 40.0,
        disk_read_mbs: cpu / 10.0,
        disk_write_mbs: 0.0,
        net_read_mbs: 1.5,
        net_write_mbs: 0.25,
        interface: "eth0".into(),
        memory: MemoryInfo {
            total: 8 * 1024 * 1024 * 1024,
            used: 2 * 1024 * 1024 * 1024,
            free: 6 * 1024 * 1024 * 1024,
            available: 6 * 1024 * 1024 * 1024,
            usage_percent: 25.0,
        },
    }
}

pub fn iface(name: &str, up: bool, loopback: bool, addressed: bool) -> InterfaceInfo {
    InterfaceInfo {
        name: name.into(),
        is_up: up,
        is_loopback: loopback,
        addresses: if addressed {
            vec![IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))]
        } else {
            vec![]
        },
    }
}
