//! Deterministic network identity.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::NetworkIdentity;

#[derive(Clone)]
pub struct FixedIdentity {
    local: String,
    routed: String,
    route_targets: Arc<Mutex<Vec<String>>>,
}

impl FixedIdentity {
    pub fn new(local: impl Into<String>, routed: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            routed: routed.into(),
            route_targets: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Targets passed to `address_toward`, in order.
    pub fn route_targets(&self) -> Vec<String> {
        self.route_targets.lock().clone()
    }
}

impl NetworkIdentity for FixedIdentity {
    fn local_address(&self) -> String {
        self.local.clone()
    }

    fn address_toward(&self, target: &str) -> String {
        self.route_targets.lock().push(target.to_string());
        self.routed.clone()
    }
}
