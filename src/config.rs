//! Credentials file loading.
//!
//! Reads a single `[PROFILE]` section from an OCI-style credentials file and
//! turns it into the immutable [`ClientConfig`] used to sign API requests.
//!
//! ```text
//! [DEFAULT]
//! user=ocid1.user.oc1..aaaa
//! fingerprint=20:3b:97:13:55:1c:5b:0d:d3:37:d8:50:4e:c5:3a:34
//! key_file=~/.oci/oci_api_key.pem
//! tenancy=ocid1.tenancy.oc1..aaaa
//! region=us-ashburn-1
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Profile used when `--profile` is not given
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Config file location, relative to the home directory
pub const DEFAULT_CONFIG_PATH: &str = "/.oci/config";

const OCID_PREFIX: &str = "ocid1.";

type Section = HashMap<String, String>;

/// Errors raised while reading the credentials file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {} at line {line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },

    #[error("profile '{profile}' not found in {}", path.display())]
    ProfileNotFound { path: PathBuf, profile: String },

    #[error("profile '{profile}' is missing required field '{field}'")]
    MissingField {
        profile: String,
        field: &'static str,
    },

    #[error("profile '{profile}' has an invalid {field}: '{value}'")]
    InvalidField {
        profile: String,
        field: &'static str,
        value: String,
    },
}

/// Resolved authentication and region parameters for one invocation.
///
/// Built once by [`create_config`] and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    profile: String,
    tenancy: String,
    user: String,
    fingerprint: String,
    key_file: PathBuf,
    pass_phrase: Option<String>,
    region: Option<String>,
}

impl ClientConfig {
    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn tenancy(&self) -> &str {
        &self.tenancy
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn key_file(&self) -> &Path {
        &self.key_file
    }

    pub fn pass_phrase(&self) -> Option<&str> {
        self.pass_phrase.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Key identifier sent in the request signature: `tenancy/user/fingerprint`.
    pub fn key_id(&self) -> String {
        format!("{}/{}/{}", self.tenancy, self.user, self.fingerprint)
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("profile", &self.profile)
            .field("tenancy", &self.tenancy)
            .field("user", &self.user)
            .field("fingerprint", &self.fingerprint)
            .field("key_file", &self.key_file)
            .field("pass_phrase", &self.pass_phrase.as_ref().map(|_| "[REDACTED]"))
            .field("region", &self.region)
            .finish()
    }
}

/// Load `profile` from the credentials file at `path`.
///
/// A non-empty `region_override` replaces whatever region the profile
/// declares. Fields missing from a named profile are inherited from
/// `[DEFAULT]`, but the named section itself must exist. A `key_file`
/// starting with `~` is expanded against `home`.
pub fn create_config(
    path: &Path,
    profile: &str,
    region_override: Option<&str>,
    home: &Path,
) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let sections = parse_sections(path, &content)?;
    let section = sections
        .get(profile)
        .ok_or_else(|| ConfigError::ProfileNotFound {
            path: path.to_path_buf(),
            profile: profile.to_string(),
        })?;
    let fallback = if profile == DEFAULT_PROFILE {
        None
    } else {
        sections.get(DEFAULT_PROFILE)
    };

    let lookup = |key: &str| -> Option<String> {
        section
            .get(key)
            .or_else(|| fallback.and_then(|d| d.get(key)))
            .filter(|v| !v.is_empty())
            .cloned()
    };
    let required = |field: &'static str| -> Result<String, ConfigError> {
        lookup(field).ok_or_else(|| ConfigError::MissingField {
            profile: profile.to_string(),
            field,
        })
    };

    let user = required("user")?;
    let tenancy = required("tenancy")?;
    let fingerprint = required("fingerprint")?;
    let key_file = required("key_file")?;

    for (field, value) in [("user", &user), ("tenancy", &tenancy)] {
        if !value.starts_with(OCID_PREFIX) {
            return Err(ConfigError::InvalidField {
                profile: profile.to_string(),
                field,
                value: value.clone(),
            });
        }
    }
    if !fingerprint_pattern().is_match(&fingerprint) {
        return Err(ConfigError::InvalidField {
            profile: profile.to_string(),
            field: "fingerprint",
            value: fingerprint,
        });
    }

    let region = match region_override.filter(|r| !r.is_empty()) {
        Some(region) => {
            debug!("Region override '{}' supersedes profile region", region);
            Some(region.to_string())
        }
        None => lookup("region"),
    };

    debug!("Loaded profile '{}' from {}", profile, path.display());

    Ok(ClientConfig {
        profile: profile.to_string(),
        tenancy,
        user,
        fingerprint,
        key_file: expand_home(home, &key_file),
        pass_phrase: lookup("pass_phrase"),
        region,
    })
}

fn fingerprint_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{2}(:[0-9a-fA-F]{2}){15}$").expect("fingerprint pattern is valid")
    })
}

/// Split the file into `section name -> key/value` maps.
fn parse_sections(path: &Path, content: &str) -> Result<HashMap<String, Section>, ConfigError> {
    let malformed = |line: usize, reason: &'static str| ConfigError::Malformed {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let mut sections: HashMap<String, Section> = HashMap::new();
    let mut current: Option<String> = None;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest
                .strip_suffix(']')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .ok_or_else(|| malformed(idx + 1, "invalid section header"))?;
            sections.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| malformed(idx + 1, "expected key=value"))?;
        let section = current
            .as_ref()
            .ok_or_else(|| malformed(idx + 1, "entry appears before any profile section"))?;

        sections
            .entry(section.clone())
            .or_default()
            .insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(sections)
}

fn expand_home(home: &Path, value: &str) -> PathBuf {
    match value.strip_prefix('~') {
        Some(rest) => home.join(rest.trim_start_matches(|c| c == '/' || c == '\\')),
        None => PathBuf::from(value),
    }
}
