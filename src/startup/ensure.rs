//! Bootstrap state machine.
//!
//! ```text
//! Init -> ConfigLoaded -> Ready
//!                      -> CompartmentPending -> Ready
//! (any state) -> Failed
//! ```
//!
//! `version` short-circuits straight to `Ready` without touching the
//! credentials file. Every other command walks the full chain, and the
//! first failure is returned to the caller; nothing here exits the process.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, error, info};

use super::compartment_resolver::{resolve, CompartmentSource};
use crate::api::ApiError;
use crate::cli::{resolve_config_path, Commands};
use crate::config::{create_config, ClientConfig, ConfigError};
use crate::context::InvocationContext;

/// Fatal bootstrap failures
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("error finding user's home directory")]
    HomeResolution,

    #[error("error getting OCI config")]
    ConfigFile(#[source] ConfigError),

    #[error("error fetching compartments")]
    CompartmentFetch(#[source] ApiError),

    #[error("no identifier found for compartment '{name}'")]
    CompartmentNotFound { name: String },
}

/// Result type for bootstrap operations
pub type BootstrapResult<T> = std::result::Result<T, BootstrapError>;

/// Where the bootstrap currently stands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BootstrapState {
    #[default]
    Init,
    ConfigLoaded,
    CompartmentPending,
    Ready,
    Failed,
}

type HomeDirFn<'a> = Box<dyn Fn() -> Option<PathBuf> + 'a>;

/// Drives config loading and compartment resolution for one invocation.
///
/// # Example
/// ```ignore
/// let client = IdentityClient::new(DEFAULT_TIMEOUT_SECS, None)?;
/// let mut bootstrap = BootstrapController::new(&client);
/// bootstrap.run(&cli.command, &mut ctx).await?;
/// // ctx now carries the client config and the resolved compartment id
/// ```
pub struct BootstrapController<'a, S> {
    source: &'a S,
    home_dir: HomeDirFn<'a>,
    state: BootstrapState,
}

impl<'a, S: CompartmentSource> BootstrapController<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            home_dir: Box::new(dirs::home_dir),
            state: BootstrapState::Init,
        }
    }

    /// Replace the home directory lookup.
    pub fn with_home_dir(mut self, home_dir: impl Fn() -> Option<PathBuf> + 'a) -> Self {
        self.home_dir = Box::new(home_dir);
        self
    }

    #[cfg(test)]
    pub fn state(&self) -> BootstrapState {
        self.state
    }

    fn transition(&mut self, next: BootstrapState) {
        debug!("Bootstrap: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Run the bootstrap for `command`, populating `ctx` on success.
    pub async fn run(
        &mut self,
        command: &Commands,
        ctx: &mut InvocationContext,
    ) -> BootstrapResult<()> {
        if command.skips_bootstrap() {
            debug!("'{}' does not need credentials, skipping bootstrap", command.name());
            self.transition(BootstrapState::Ready);
            return Ok(());
        }

        match self.ensure_all(ctx).await {
            Ok(()) => {
                self.transition(BootstrapState::Ready);
                Ok(())
            }
            Err(e) => {
                debug!("Bootstrap failed in state {:?}: {}", self.state, e);
                self.transition(BootstrapState::Failed);
                Err(e)
            }
        }
    }

    async fn ensure_all(&mut self, ctx: &mut InvocationContext) -> BootstrapResult<()> {
        let home = (self.home_dir)().ok_or(BootstrapError::HomeResolution)?;

        let config = self.ensure_config(home, ctx)?;
        self.transition(BootstrapState::ConfigLoaded);

        if let Some(id) = self.ensure_compartment(&config, ctx).await? {
            ctx.set_compartment_id(id);
        }

        ctx.set_client_config(config);
        Ok(())
    }

    fn ensure_config(
        &self,
        home: PathBuf,
        ctx: &InvocationContext,
    ) -> BootstrapResult<ClientConfig> {
        let path = resolve_config_path(&home, ctx.config_path());
        debug!("Reading profile '{}' from {}", ctx.profile(), path.display());

        create_config(&path, ctx.profile(), ctx.region(), &home)
            .map_err(BootstrapError::ConfigFile)
    }

    /// Resolve `--compartment` when it was given.
    ///
    /// Returns `Ok(None)` when no compartment was requested.
    async fn ensure_compartment(
        &mut self,
        config: &ClientConfig,
        ctx: &InvocationContext,
    ) -> BootstrapResult<Option<String>> {
        let name = match ctx.compartment() {
            Some(name) => name,
            None => return Ok(None),
        };
        self.transition(BootstrapState::CompartmentPending);

        let compartments = self
            .source
            .list_compartments(config)
            .await
            .map_err(|e| {
                if e.is_auth_failure() {
                    error!("   Please check key_file and fingerprint for profile '{}'", config.profile());
                }
                BootstrapError::CompartmentFetch(e)
            })?;
        debug!("Fetched {} compartments", compartments.len());

        let id = resolve(&compartments, name).ok_or_else(|| BootstrapError::CompartmentNotFound {
            name: name.to_string(),
        })?;

        info!("Using compartment '{}' ({})", name, id);
        Ok(Some(id.to_string()))
    }
}
