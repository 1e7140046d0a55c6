//! Network utilities
//!
//! Data-port derivation and EPRT argument formatting.

use std::net::SocketAddr;

/// Fixed offset between the control channel's local port and the data
/// listening port. The data port is never negotiated with the server.
pub const DATA_PORT_OFFSET: u16 = 1;

/// Derive the active-mode data port from the control channel's local port.
pub fn data_port(control_port: u16) -> u16 {
    control_port.wrapping_add(DATA_PORT_OFFSET)
}

/// Format the EPRT argument advertising `addr`'s IP and the data port:
/// `|1|<addr>|<port>|`.
pub fn eprt_argument(addr: &SocketAddr, data_port: u16) -> String {
    format!("|1|{}|{}|", addr.ip(), data_port)
}
