//! Bootstrap that runs before every subcommand.
//!
//! The flow mirrors a fail-fast ensure chain:
//! - locate the home directory
//! - load the requested profile from the credentials file
//! - resolve `--compartment` to an OCID when one was requested
//!
//! Any failure stops the chain and surfaces as a [`BootstrapError`]; the
//! selected subcommand only runs once the context is fully resolved.

mod compartment_resolver;
mod ensure;

pub use compartment_resolver::CompartmentSource;
pub use ensure::{BootstrapController, BootstrapError};
