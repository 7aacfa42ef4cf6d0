//! Local network identity port.

/// Port for discovering the address other cluster members can reach this
/// host on.
///
/// Discovery never fails: implementations fall back to a loopback address
/// when nothing better is available.
pub trait NetworkIdentity: Send + Sync {
    /// The host's primary discoverable address.
    fn local_address(&self) -> String;

    /// The local address of the interface that routes toward `target`
    /// (`host:port`).
    fn address_toward(&self, target: &str) -> String;
}
