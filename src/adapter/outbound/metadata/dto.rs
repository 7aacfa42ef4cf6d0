//! Wire types for the metadata gateway's JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::JobId;

/// Body of `POST /api/jobs/next`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextJobIdResponse {
    /// Hex form of the allocated id.
    pub job_id: JobId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_job_id() {
        let body: NextJobIdResponse = serde_json::from_str(r#"{"job_id":"0000002a"}"#).unwrap();
        assert_eq!(body.job_id, JobId::from_int(42));
    }

    #[test]
    fn rejects_short_job_id() {
        let body = serde_json::from_str::<NextJobIdResponse>(r#"{"job_id":"2a"}"#);
        assert!(body.is_err());
    }
}
