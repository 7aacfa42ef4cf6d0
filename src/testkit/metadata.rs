//! Metadata service fake with canned answers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::{domain, Call, CallLog};
use crate::domain::{JobId, MetadataClientOptions};
use crate::error::{Error, Result};
use crate::port::{ClusterMetadata, MetadataFactory, SESSION_DIR_KEY, SESSION_NAMESPACE};

/// Answers every accessor built from [`ScriptedMetadata::factory`] returns.
#[derive(Debug, Clone)]
pub struct MetadataScript {
    pub reachable: bool,
    /// `None` makes the node-for-driver lookup fail.
    pub node_record: Option<Vec<u8>>,
    /// `None` makes job id allocation fail.
    pub next_job_id: Option<JobId>,
    pub kv: HashMap<(String, String), String>,
}

impl Default for MetadataScript {
    fn default() -> Self {
        let mut kv = HashMap::new();
        kv.insert(
            (SESSION_NAMESPACE.to_string(), SESSION_DIR_KEY.to_string()),
            domain::SESSION_DIR.to_string(),
        );
        Self {
            reachable: true,
            node_record: Some(domain::default_node_record()),
            next_job_id: Some(JobId::from_int(1)),
            kv,
        }
    }
}

#[derive(Clone)]
pub struct ScriptedMetadata {
    log: CallLog,
    script: Arc<Mutex<MetadataScript>>,
    addresses: Arc<Mutex<Vec<String>>>,
}

impl ScriptedMetadata {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            script: Arc::new(Mutex::new(MetadataScript::default())),
            addresses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Edit the canned answers.
    pub fn script(&self, edit: impl FnOnce(&mut MetadataScript)) {
        edit(&mut self.script.lock());
    }

    /// Addresses accessors were built for, in order.
    pub fn addresses(&self) -> Vec<String> {
        self.addresses.lock().clone()
    }

    pub fn factory(&self) -> MetadataFactory {
        let this = self.clone();
        Arc::new(move |options: &MetadataClientOptions| {
            this.addresses.lock().push(options.address.clone());
            Box::new(ScriptedAccessor {
                address: options.address.clone(),
                log: this.log.clone(),
                script: Arc::clone(&this.script),
            }) as Box<dyn ClusterMetadata>
        })
    }
}

struct ScriptedAccessor {
    address: String,
    log: CallLog,
    script: Arc<Mutex<MetadataScript>>,
}

#[async_trait]
impl ClusterMetadata for ScriptedAccessor {
    async fn connect(&self) -> bool {
        self.log.push(Call::Connect(self.address.clone()));
        self.script.lock().reachable
    }

    async fn node_for_driver(&self, node_ip: &str) -> Result<Vec<u8>> {
        self.log.push(Call::NodeForDriver(node_ip.to_string()));
        self.script
            .lock()
            .node_record
            .clone()
            .ok_or_else(|| Error::Metadata(format!("no node registered for {node_ip}")))
    }

    async fn next_job_id(&self) -> Result<JobId> {
        self.log.push(Call::NextJobId);
        self.script
            .lock()
            .next_job_id
            .ok_or_else(|| Error::Metadata("job counter unavailable".into()))
    }

    async fn internal_kv(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        self.log
            .push(Call::InternalKv(namespace.to_string(), key.to_string()));
        Ok(self
            .script
            .lock()
            .kv
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }
}
