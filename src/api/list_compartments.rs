//! Compartment listing with pagination.

use std::collections::HashSet;

use tracing::debug;
use url::Url;

use super::client::IdentityClient;
use super::http::send_signed_get;
use super::signer::RequestSigner;
use super::types::{ApiError, ApiResult, CompartmentSummary};
use crate::config::ClientConfig;
use crate::domain::{Compartment, CompartmentList};
use crate::startup::CompartmentSource;

const COMPARTMENTS_PATH: &str = "/20160918/compartments";

/// Maximum page size accepted by the identity service
const PAGE_LIMIT: &str = "1000";

/// Response header carrying the next page token
const NEXT_PAGE_HEADER: &str = "opc-next-page";

impl IdentityClient {
    /// Fetch every active compartment in the tenancy, following pagination.
    pub async fn fetch_compartments(&self, config: &ClientConfig) -> ApiResult<CompartmentList> {
        let region = config.region().ok_or_else(|| ApiError::MissingRegion {
            profile: config.profile().to_string(),
        })?;
        let signer = RequestSigner::from_config(config)?;
        let base = self.identity_endpoint(region)?;

        let mut compartments: Vec<Compartment> = Vec::new();
        let mut page: Option<String> = None;
        let mut seen_tokens: HashSet<String> = HashSet::new();
        let mut pages = 0usize;

        loop {
            let url = compartments_url(&base, config.tenancy(), page.as_deref())?;
            let response = send_signed_get(&self.client, &signer, &self.user_agent, url).await?;

            let next_page = response
                .headers()
                .get(NEXT_PAGE_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(str::to_string);

            let text = response.text().await.map_err(ApiError::Transport)?;
            let batch: Vec<CompartmentSummary> =
                serde_json::from_str(&text).map_err(ApiError::Decode)?;

            pages += 1;
            debug!("Page {}: {} compartments", pages, batch.len());
            compartments.extend(batch.into_iter().map(Compartment::from));

            match next_page {
                Some(token) => {
                    if !seen_tokens.insert(token.clone()) {
                        debug!("Page token '{}' was already followed, stopping", token);
                        return Err(ApiError::RepeatedPageToken { token });
                    }
                    page = Some(token);
                }
                None => break,
            }
        }

        debug!(
            "Fetched {} compartments across {} page(s)",
            compartments.len(),
            pages
        );
        Ok(CompartmentList::new(compartments))
    }
}

impl CompartmentSource for IdentityClient {
    async fn list_compartments(&self, config: &ClientConfig) -> ApiResult<CompartmentList> {
        self.fetch_compartments(config).await
    }
}

/// Build the list URL for one page.
fn compartments_url(base: &Url, tenancy: &str, page: Option<&str>) -> ApiResult<Url> {
    let mut url = base.join(COMPARTMENTS_PATH)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("compartmentId", tenancy)
            .append_pair("compartmentIdInSubtree", "true")
            .append_pair("accessLevel", "ANY")
            .append_pair("lifecycleState", "ACTIVE")
            .append_pair("limit", PAGE_LIMIT);
        if let Some(page) = page {
            query.append_pair("page", page);
        }
    }
    Ok(url)
}
