//! API response types and errors for the identity service.

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::domain::Compartment;

/// Errors raised while talking to the identity service
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("profile '{profile}' has no region; pass --region or add region to the profile")]
    MissingRegion { profile: String },

    #[error("failed to read private key {}", path.display())]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid private key {}: {reason}", path.display())]
    InvalidKey { path: PathBuf, reason: String },

    #[error("failed to sign request: {0}")]
    Signing(String),

    #[error("invalid endpoint URL")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP request failed")]
    Transport(#[source] reqwest::Error),

    #[error("service returned HTTP {status} ({code}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
        request_id: Option<String>,
    },

    #[error("failed to parse API response")]
    Decode(#[source] serde_json::Error),

    #[error("service repeated page token '{token}'")]
    RepeatedPageToken { token: String },
}

impl ApiError {
    /// Whether the failure points at the caller's credentials
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::KeyFile { .. } | ApiError::InvalidKey { .. } => true,
            ApiError::Service { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error body returned by OCI services on non-2xx responses
#[derive(Debug, Deserialize)]
pub(super) struct ServiceErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Compartment entry from `GET /20160918/compartments`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CompartmentSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub compartment_id: Option<String>,
    #[serde(default)]
    pub lifecycle_state: Option<String>,
}

impl From<CompartmentSummary> for Compartment {
    fn from(summary: CompartmentSummary) -> Self {
        Self {
            parent_id: summary.compartment_id,
            lifecycle_state: summary.lifecycle_state,
            ..Compartment::new(summary.name, summary.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_compartment_page() {
        let json = r#"[
            {
                "compartmentId": "ocid1.tenancy.oc1..example",
                "description": "Production workloads",
                "id": "ocid1.compartment.oc1..prod",
                "lifecycleState": "ACTIVE",
                "name": "prod",
                "timeCreated": "2018-06-01T12:00:00.000Z"
            },
            {
                "id": "ocid1.compartment.oc1..dev",
                "name": "dev"
            }
        ]"#;

        let page: Vec<CompartmentSummary> = serde_json::from_str(json).unwrap();
        let compartments: Vec<Compartment> = page.into_iter().map(Compartment::from).collect();

        assert_eq!(compartments[0].name, "prod");
        assert_eq!(compartments[0].id, "ocid1.compartment.oc1..prod");
        assert_eq!(
            compartments[0].parent_id.as_deref(),
            Some("ocid1.tenancy.oc1..example")
        );
        assert_eq!(compartments[0].lifecycle_state.as_deref(), Some("ACTIVE"));
        assert_eq!(compartments[1], Compartment::new("dev", "ocid1.compartment.oc1..dev"));
    }

    #[test]
    fn test_auth_failure_classification() {
        let unauthorized = ApiError::Service {
            status: 401,
            code: "NotAuthenticated".to_string(),
            message: "bad signature".to_string(),
            request_id: None,
        };
        assert!(unauthorized.is_auth_failure());

        let server = ApiError::Service {
            status: 500,
            code: "InternalServerError".to_string(),
            message: "oops".to_string(),
            request_id: None,
        };
        assert!(!server.is_auth_failure());
        assert!(server.to_string().contains("HTTP 500"));
    }
}
