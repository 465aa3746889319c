//! Client for the OCI identity service.
//!
//! Only the compartment listing endpoint is used. Requests are signed with
//! the profile's API key and sent without retries.

mod client;
mod http;
mod list_compartments;
mod signer;
mod types;

pub use client::{IdentityClient, DEFAULT_TIMEOUT_SECS};
pub use types::{ApiError, ApiResult};
