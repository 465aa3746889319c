use std::path::{Path, PathBuf};

/// Build the credentials file path under `home`.
///
/// The configured path is always taken relative to the home directory, so
/// leading separators are dropped before joining.
pub fn resolve_config_path(home: &Path, configured: &str) -> PathBuf {
    home.join(configured.trim_start_matches(|c| c == '/' || c == '\\'))
}
