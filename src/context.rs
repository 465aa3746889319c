//! Per-invocation context.
//!
//! Built once from the parsed flags, filled in by the bootstrap, and then
//! handed by reference to the selected subcommand. Nothing here is global;
//! the context lives exactly as long as the process invocation.

use crate::cli::GlobalArgs;
use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct InvocationContext {
    config_path: String,
    profile: String,
    region: Option<String>,
    compartment: Option<String>,
    compartment_id: Option<String>,
    debug: bool,
    /// Set by the bootstrap once the profile has been loaded
    client_config: Option<ClientConfig>,
}

impl InvocationContext {
    pub fn from_args(args: &GlobalArgs) -> Self {
        Self {
            config_path: args.config.clone(),
            profile: args.profile.clone(),
            region: non_empty(args.region.as_deref()),
            compartment: non_empty(args.compartment.as_deref()),
            compartment_id: non_empty(args.compartment_id.as_deref()),
            debug: args.debug,
            client_config: None,
        }
    }

    /// Configured credentials path, relative to the home directory
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    /// Region override from the command line
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Requested compartment name
    pub fn compartment(&self) -> Option<&str> {
        self.compartment.as_deref()
    }

    pub fn compartment_id(&self) -> Option<&str> {
        self.compartment_id.as_deref()
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn client_config(&self) -> Option<&ClientConfig> {
        self.client_config.as_ref()
    }

    pub(crate) fn set_compartment_id(&mut self, id: String) {
        self.compartment_id = Some(id);
    }

    pub(crate) fn set_client_config(&mut self, config: ClientConfig) {
        self.client_config = Some(config);
    }
}

/// Only an empty flag counts as absent; whitespace is kept as given.
fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
