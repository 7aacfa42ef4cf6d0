//! TCP readiness probe for self-launched heads.

use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::error::{BootstrapError, Result};
use crate::infrastructure::config::settings::ReadinessConfig;
use crate::port::HeadReadiness;

/// Polls the head's metadata port until it accepts a TCP connection.
#[derive(Debug, Clone)]
pub struct TcpReadinessProbe {
    timeout: Duration,
    poll_interval: Duration,
}

impl TcpReadinessProbe {
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    #[must_use]
    pub fn from_config(config: &ReadinessConfig) -> Self {
        Self::new(
            Duration::from_millis(config.timeout_ms),
            Duration::from_millis(config.poll_interval_ms),
        )
    }
}

#[async_trait]
impl HeadReadiness for TcpReadinessProbe {
    async fn wait_until_ready(&self, address: &str) -> Result<()> {
        let deadline = Instant::now() + self.timeout;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, TcpStream::connect(address)).await {
                Ok(Ok(_)) => {
                    info!(address, attempts, "Head is accepting connections");
                    return Ok(());
                }
                Ok(Err(err)) => debug!(address, attempts, error = %err, "Head not ready yet"),
                Err(_) => debug!(address, attempts, "Readiness probe attempt timed out"),
            }

            if Instant::now() + self.poll_interval >= deadline {
                return Err(BootstrapError::Connection {
                    address: address.to_string(),
                }
                .into());
            }
            sleep(self.poll_interval).await;
        }
    }
}
