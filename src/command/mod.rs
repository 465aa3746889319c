mod compartments;
mod context;
mod version;

pub use compartments::run_list_compartments;
pub use context::run_context;
pub use version::run_version;

use anyhow::Result;

use crate::api::IdentityClient;
use crate::cli::{Commands, CompartmentsCommand};
use crate::context::InvocationContext;

/// Hand a bootstrapped context to the selected subcommand.
pub async fn dispatch(
    command: &Commands,
    ctx: &InvocationContext,
    client: &IdentityClient,
) -> Result<()> {
    match command {
        Commands::Version => run_version(),
        Commands::Context => run_context(ctx),
        Commands::Compartments(CompartmentsCommand::List) => {
            run_list_compartments(ctx, client).await
        }
    }
}
