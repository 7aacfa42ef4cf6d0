//! Cluster bootstrap addresses.

use std::fmt;

/// Loopback host a freshly launched head is first addressed by.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Port the metadata service listens on when none is given.
pub const DEFAULT_BOOTSTRAP_PORT: u16 = 6379;

/// `host:port` endpoint of the cluster metadata service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapAddress {
    host: String,
    port: u16,
}

impl BootstrapAddress {
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Split a `host:port` string. The port is taken after the last colon.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let raw = raw.trim();
        let (host, port) = raw
            .rsplit_once(':')
            .ok_or_else(|| format!("'{raw}' is not in host:port form"))?;
        if host.is_empty() {
            return Err(format!("'{raw}' has an empty host"));
        }
        let port = port
            .parse::<u16>()
            .map_err(|e| format!("'{port}' is not a valid port: {e}"))?;
        Ok(Self::new(host, port))
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    #[must_use]
    pub fn is_loopback(&self) -> bool {
        self.host == LOOPBACK_HOST
    }
}

impl fmt::Display for BootstrapAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_host_and_port() {
        let addr = BootstrapAddress::parse("10.0.0.5:6380").unwrap();
        assert_eq!(addr.host(), "10.0.0.5");
        assert_eq!(addr.port(), 6380);
        assert_eq!(addr.to_string(), "10.0.0.5:6380");
    }

    #[test]
    fn parse_rejects_missing_port() {
        assert!(BootstrapAddress::parse("10.0.0.5").is_err());
        assert!(BootstrapAddress::parse("10.0.0.5:http").is_err());
    }

    #[test]
    fn parse_rejects_empty_host() {
        assert!(BootstrapAddress::parse(":6379").is_err());
    }

    #[test]
    fn loopback_is_detected() {
        assert!(BootstrapAddress::new(LOOPBACK_HOST, 6379).is_loopback());
        assert!(!BootstrapAddress::new("10.0.0.5", 6379).is_loopback());
    }
}
