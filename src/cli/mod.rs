mod args;
mod paths;

pub use args::{Cli, Commands, CompartmentsCommand, GlobalArgs};
pub use paths::resolve_config_path;
