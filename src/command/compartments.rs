use anyhow::{Context, Result};

use crate::api::IdentityClient;
use crate::context::InvocationContext;
use crate::domain::Compartment;

pub async fn run_list_compartments(ctx: &InvocationContext, client: &IdentityClient) -> Result<()> {
    let config = ctx
        .client_config()
        .context("client configuration was not resolved")?;

    let compartments = client
        .fetch_compartments(config)
        .await
        .context("error fetching compartments")?;

    if compartments.is_empty() {
        println!("No compartments visible to {}", config.user());
        return Ok(());
    }

    let width = compartments
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0);

    for compartment in &compartments {
        println!("{}", format_row(compartment, ctx.compartment_id(), width));
    }

    Ok(())
}

/// One listing line: marker, padded name, OCID, state and parent OCID.
fn format_row(compartment: &Compartment, selected: Option<&str>, width: usize) -> String {
    // Mark the compartment the invocation resolved to
    let marker = if selected == Some(compartment.id.as_str()) {
        "*"
    } else {
        " "
    };
    format!(
        "{} {:<width$}  {}  {}  {}",
        marker,
        compartment.name,
        compartment.id,
        compartment.lifecycle_state.as_deref().unwrap_or("-"),
        compartment.parent_id.as_deref().unwrap_or("-"),
        width = width
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_shows_parent_and_marker() {
        let compartment = Compartment {
            parent_id: Some("ocid1.tenancy.oc1..example".to_string()),
            lifecycle_state: Some("ACTIVE".to_string()),
            ..Compartment::new("prod", "ocid1.compartment.prod")
        };

        assert_eq!(
            format_row(&compartment, Some("ocid1.compartment.prod"), 6),
            "* prod    ocid1.compartment.prod  ACTIVE  ocid1.tenancy.oc1..example"
        );
    }

    #[test]
    fn test_row_without_optional_fields() {
        let compartment = Compartment::new("dev", "ocid1.compartment.dev");

        assert_eq!(
            format_row(&compartment, None, 3),
            "  dev  ocid1.compartment.dev  -  -"
        );
    }
}
