//! Job descriptor handed to the worker runtime.

use prost::Message;

use super::id::JobId;
use super::proto::{job_config, JobConfig};
use super::role::ActorLifetime;
use crate::error::BootstrapError;

/// Job identity plus the job-wide settings shipped to the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// Present for drivers only.
    pub job_id: Option<JobId>,
    pub default_actor_lifetime: ActorLifetime,
    pub code_search_path: Vec<String>,
}

impl JobDescriptor {
    /// Encode the job config blob.
    ///
    /// The job id travels separately in the startup options and is not part
    /// of the blob, so equal settings always encode to equal bytes.
    pub fn serialize(&self) -> Result<Vec<u8>, BootstrapError> {
        let config = JobConfig {
            code_search_path: self.code_search_path.clone(),
            default_actor_lifetime: wire_lifetime(self.default_actor_lifetime) as i32,
        };
        let mut buf = Vec::with_capacity(config.encoded_len());
        config
            .encode(&mut buf)
            .map_err(BootstrapError::Serialization)?;
        Ok(buf)
    }
}

fn wire_lifetime(lifetime: ActorLifetime) -> job_config::ActorLifetime {
    match lifetime {
        ActorLifetime::Detached => job_config::ActorLifetime::Detached,
        ActorLifetime::NonDetached => job_config::ActorLifetime::NonDetached,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(job_id: u32) -> JobDescriptor {
        JobDescriptor {
            job_id: Some(JobId::from_int(job_id)),
            default_actor_lifetime: ActorLifetime::Detached,
            code_search_path: vec!["/opt/app/lib".into(), "/opt/app/plugins".into()],
        }
    }

    #[test]
    fn serialize_ignores_job_id() {
        let a = descriptor(1).serialize().unwrap();
        let b = descriptor(2).serialize().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn serialize_preserves_paths_and_lifetime() {
        let blob = descriptor(1).serialize().unwrap();
        let decoded = JobConfig::decode(blob.as_slice()).unwrap();
        assert_eq!(decoded.code_search_path, ["/opt/app/lib", "/opt/app/plugins"]);
        assert_eq!(
            decoded.default_actor_lifetime,
            job_config::ActorLifetime::Detached as i32
        );
    }

    #[test]
    fn non_detached_lifetime_is_encoded() {
        let mut job = descriptor(1);
        job.default_actor_lifetime = ActorLifetime::NonDetached;
        let decoded = JobConfig::decode(job.serialize().unwrap().as_slice()).unwrap();
        assert_eq!(
            decoded.default_actor_lifetime,
            job_config::ActorLifetime::NonDetached as i32
        );
    }
}
