//! Network identity via connected UDP sockets.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use tracing::{debug, warn};

use crate::domain::LOOPBACK_HOST;
use crate::port::NetworkIdentity;

/// Well-known public address used to pick the default route.
const DEFAULT_ROUTE_TARGET: &str = "8.8.8.8:53";

/// Discovers local addresses by asking the kernel which interface it would
/// route a datagram through. Connecting a UDP socket sends no packets.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpIdentity;

impl UdpIdentity {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn route_source(target: &str) -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect(target)?;
        Ok(socket.local_addr()?.ip())
    }

    fn discover(target: &str) -> String {
        match Self::route_source(target) {
            Ok(ip) if !ip.is_unspecified() => {
                debug!(target, %ip, "Discovered local address");
                ip.to_string()
            }
            Ok(_) => LOOPBACK_HOST.to_string(),
            Err(err) => {
                warn!(target, error = %err, "Address discovery failed, using loopback");
                LOOPBACK_HOST.to_string()
            }
        }
    }
}

impl NetworkIdentity for UdpIdentity {
    fn local_address(&self) -> String {
        Self::discover(DEFAULT_ROUTE_TARGET)
    }

    fn address_toward(&self, target: &str) -> String {
        Self::discover(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loopback_target_routes_through_loopback() {
        assert_eq!(UdpIdentity::new().address_toward("127.0.0.1:6379"), "127.0.0.1");
    }

    #[test]
    fn malformed_target_falls_back_to_loopback() {
        assert_eq!(UdpIdentity::new().address_toward("no-port-here"), LOOPBACK_HOST);
    }
}
