use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod cli;
mod command;
mod config;
mod context;
mod domain;
mod startup;

use api::IdentityClient;
use cli::Cli;
use context::InvocationContext;
use startup::BootstrapController;

/// Exit status for any failure before or during the subcommand
const FATAL_EXIT_STATUS: u8 = 1;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.global.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    ExitCode::from(exit_status(run(cli).await))
}

async fn run(cli: Cli) -> Result<()> {
    let mut ctx = InvocationContext::from_args(&cli.global);
    let client = IdentityClient::new(
        cli.global.timeout_secs,
        cli.global.identity_endpoint.as_deref(),
    )?;

    BootstrapController::new(&client)
        .run(&cli.command, &mut ctx)
        .await?;

    command::dispatch(&cli.command, &ctx, &client).await
}

/// The single place where failures are reported and turned into an exit status.
fn exit_status(result: Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("Error: {}", report(&err));
            FATAL_EXIT_STATUS
        }
    }
}

/// Render an error followed by each of its causes.
fn report(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        message.push_str(&format!("\n  caused by: {}", cause));
    }
    message
}
