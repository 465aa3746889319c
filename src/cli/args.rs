use clap::{Args, Parser, Subcommand};

use crate::api::DEFAULT_TIMEOUT_SECS;
use crate::config::{DEFAULT_CONFIG_PATH, DEFAULT_PROFILE};

/// User friendly interactions with the Oracle OCI API
#[derive(Parser, Debug)]
#[command(name = "oci-tool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file, relative to the home directory
    #[arg(long = "config", global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// OCI region (overrides the profile's region)
    #[arg(long, global = true, env = "OCI_CLI_REGION")]
    pub region: Option<String>,

    /// Config file profile
    #[arg(long, global = true, env = "OCI_CLI_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,

    /// Compartment name to resolve
    #[arg(long, global = true)]
    pub compartment: Option<String>,

    /// Compartment OCID (set automatically when --compartment resolves)
    #[arg(long = "compartment-id", global = true)]
    pub compartment_id: Option<String>,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Timeout for API requests in seconds (0 disables the timeout)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Custom identity service endpoint (for testing only)
    #[arg(long, global = true, hide = true, env = "OCI_IDENTITY_ENDPOINT")]
    pub identity_endpoint: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print version information
    Version,
    /// Show the resolved profile, region and compartment
    Context,
    /// Compartment operations
    #[command(subcommand)]
    Compartments(CompartmentsCommand),
}

#[derive(Subcommand, Debug)]
pub enum CompartmentsCommand {
    /// List the compartments visible to the caller
    List,
}

impl Commands {
    /// Name the command was invoked as
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Version => "version",
            Commands::Context => "context",
            Commands::Compartments(CompartmentsCommand::List) => "compartments list",
        }
    }

    /// Commands that run without credentials
    pub fn skips_bootstrap(&self) -> bool {
        matches!(self, Commands::Version)
    }
}
