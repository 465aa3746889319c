use anyhow::{Context, Result};

use crate::context::InvocationContext;

pub fn run_context(ctx: &InvocationContext) -> Result<()> {
    let config = ctx
        .client_config()
        .context("client configuration was not resolved")?;

    println!("Profile:        {}", config.profile());
    println!("Region:         {}", config.region().unwrap_or("-"));
    println!("Tenancy:        {}", config.tenancy());
    println!("User:           {}", config.user());
    println!("Fingerprint:    {}", config.fingerprint());
    println!("Key file:       {}", config.key_file().display());
    println!("Compartment:    {}", ctx.compartment().unwrap_or("-"));
    println!("Compartment ID: {}", ctx.compartment_id().unwrap_or("-"));
    if ctx.debug() {
        println!("Config path:    {}", ctx.config_path());
    }

    Ok(())
}
