//! HTTP client for the cluster metadata gateway.
//!
//! The gateway fronts the cluster's metadata service with four endpoints:
//!
//! | Operation        | Request                               | Response                     |
//! |------------------|---------------------------------------|------------------------------|
//! | connect          | `GET /api/health`                     | any 2xx                      |
//! | node for driver  | `GET /api/nodes/driver?node_ip=<ip>`  | protobuf node record         |
//! | next job id      | `POST /api/jobs/next`                 | `{"job_id": "<hex>"}`        |
//! | internal KV      | `GET /api/kv/<namespace>/<key>`       | value as text, 404 if unset  |
//!
//! Requests are never retried; every failure is fatal to the bootstrap.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use tracing::{debug, warn};
use url::Url;

use super::dto::NextJobIdResponse;
use crate::domain::{JobId, MetadataClientOptions};
use crate::error::{Error, Result};
use crate::port::{ClusterMetadata, MetadataFactory};

/// Metadata accessor for one bootstrap address.
pub struct HttpMetadataClient {
    http: HttpClient,
    scheme: String,
    address: String,
}

impl HttpMetadataClient {
    /// Build a client for `options.address` using `scheme` (`http` or `https`).
    #[must_use]
    pub fn new(options: &MetadataClientOptions, scheme: &str) -> Self {
        let http = HttpClient::builder()
            .timeout(options.request_timeout)
            .connect_timeout(options.request_timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            scheme: scheme.to_string(),
            address: options.address.clone(),
        }
    }

    /// Factory producing a fresh client per bootstrap address.
    #[must_use]
    pub fn factory(scheme: impl Into<String>) -> MetadataFactory {
        let scheme = scheme.into();
        Arc::new(move |options: &MetadataClientOptions| {
            Box::new(Self::new(options, &scheme)) as Box<dyn ClusterMetadata>
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}://{}", self.scheme, self.address))?;
        url.path_segments_mut()
            .map_err(|()| Error::Parse(format!("address cannot be a base: {}", self.address)))?
            .clear()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl ClusterMetadata for HttpMetadataClient {
    async fn connect(&self) -> bool {
        let url = match self.endpoint(&["api", "health"]) {
            Ok(url) => url,
            Err(err) => {
                warn!(address = %self.address, error = %err, "Invalid metadata service address");
                return false;
            }
        };

        debug!(url = %url, "Checking metadata service health");
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                warn!(status = %response.status(), "Metadata service reported unhealthy");
                false
            }
            Err(err) => {
                warn!(address = %self.address, error = %err, "Metadata service unreachable");
                false
            }
        }
    }

    async fn node_for_driver(&self, node_ip: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&["api", "nodes", "driver"])?;
        debug!(url = %url, node_ip, "Requesting node for driver");

        let response = self
            .http
            .get(url)
            .query(&[("node_ip", node_ip)])
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::Metadata(format!(
                "no node registered for {node_ip}"
            )));
        }
        let body = response.error_for_status()?.bytes().await?;
        Ok(body.to_vec())
    }

    async fn next_job_id(&self) -> Result<JobId> {
        let url = self.endpoint(&["api", "jobs", "next"])?;
        debug!(url = %url, "Requesting next job id");

        let response: NextJobIdResponse = self
            .http
            .post(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.job_id)
    }

    async fn internal_kv(&self, namespace: &str, key: &str) -> Result<Option<String>> {
        let url = self.endpoint(&["api", "kv", namespace, key])?;
        debug!(url = %url, "Reading internal KV");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let value = response.error_for_status()?.text().await?;
        Ok(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn client(address: &str) -> HttpMetadataClient {
        let options = MetadataClientOptions::new(address, Duration::from_millis(200));
        HttpMetadataClient::new(&options, "http")
    }

    #[test]
    fn endpoint_escapes_path_segments() {
        let url = client("10.0.0.5:6380")
            .endpoint(&["api", "kv", "session", "a/b"])
            .unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.5:6380/api/kv/session/a%2Fb");
    }

    #[test]
    fn endpoint_rejects_address_without_host() {
        assert!(client(":6379").endpoint(&["api", "health"]).is_err());
    }

    #[tokio::test]
    async fn connect_fails_for_address_without_host() {
        assert!(!client(":6379").connect().await);
    }
}
