use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::types::{ApiError, ApiResult};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default CLI version (from Cargo.toml)
const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Domain of the commercial OCI realm
const REALM_DOMAIN: &str = "oraclecloud.com";

/// Build the User-Agent string
fn build_user_agent() -> String {
    std::env::var("OCI_TOOL_USER_AGENT")
        .unwrap_or_else(|_| format!("oci-tool/{}", DEFAULT_VERSION))
}

/// HTTP client for the identity service
pub struct IdentityClient {
    pub(super) client: Client,
    pub(super) user_agent: String,
    endpoint: Option<Url>,
}

impl IdentityClient {
    /// Create a new identity client.
    ///
    /// # Arguments
    /// * `timeout_secs` - Per-request timeout; `0` leaves requests unbounded
    /// * `endpoint` - Base URL replacing the regional identity endpoint
    pub fn new(timeout_secs: u64, endpoint: Option<&str>) -> ApiResult<Self> {
        let mut builder = Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build().map_err(ApiError::Transport)?;

        let endpoint = endpoint.map(Url::parse).transpose()?;

        Ok(Self {
            client,
            user_agent: build_user_agent(),
            endpoint,
        })
    }

    /// Base URL of the identity service for `region`.
    pub(super) fn identity_endpoint(&self, region: &str) -> ApiResult<Url> {
        match &self.endpoint {
            Some(url) => Ok(url.clone()),
            None => Ok(Url::parse(&format!(
                "https://identity.{}.{}",
                region, REALM_DOMAIN
            ))?),
        }
    }
}

impl std::fmt::Debug for IdentityClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityClient")
            .field("user_agent", &self.user_agent)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}
