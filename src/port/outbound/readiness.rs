//! Head readiness hook.
//!
//! The node tool's `start --head` command provisions the head daemons and
//! exits; nothing in that contract says the metadata service is accepting
//! connections by then. A [`HeadReadiness`] implementation can wait for it.

use async_trait::async_trait;

use crate::error::Result;

/// Port invoked after a head launch, before connecting to it.
#[async_trait]
pub trait HeadReadiness: Send + Sync {
    /// Return once the head at `address` (`host:port`) is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the head never becomes ready.
    async fn wait_until_ready(&self, address: &str) -> Result<()>;
}

/// Trusts the launch command and returns immediately.
pub struct AssumeReady;

#[async_trait]
impl HeadReadiness for AssumeReady {
    async fn wait_until_ready(&self, _address: &str) -> Result<()> {
        Ok(())
    }
}
