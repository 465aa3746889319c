//! Compartment resolver for mapping display names to OCIDs.
//!
//! Matching is an exact, case-sensitive comparison on the display name.
//! When several compartments share a name the first one in provider
//! response order wins, and the ambiguity is logged.

use tracing::{debug, warn};

use crate::api::ApiResult;
use crate::config::ClientConfig;
use crate::domain::CompartmentList;

/// Anything that can enumerate the caller's compartments.
///
/// Implemented by [`crate::api::IdentityClient`]; tests substitute an
/// in-memory source.
pub trait CompartmentSource {
    async fn list_compartments(&self, config: &ClientConfig) -> ApiResult<CompartmentList>;
}

/// Resolve a compartment name to its identifier.
///
/// Returns `None` when no compartment carries that name. Callers treat
/// absence as a resolution failure.
pub fn resolve<'a>(list: &'a CompartmentList, name: &str) -> Option<&'a str> {
    let mut matches = list.iter().filter(|c| c.name == name);
    let first = matches.next()?;

    let others: Vec<&str> = matches.map(|c| c.id.as_str()).collect();
    if !others.is_empty() {
        warn!(
            "Compartment name '{}' is ambiguous; using {} and ignoring {}",
            name,
            first.id,
            others.join(", ")
        );
    }

    debug!("Resolved compartment '{}' to '{}'", name, first.id);
    Some(first.id.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Compartment;

    fn sample_list() -> CompartmentList {
        CompartmentList::new(vec![
            Compartment::new("prod", "ocid1.compartment.prod"),
            Compartment::new("dev", "ocid1.compartment.dev"),
        ])
    }

    #[test]
    fn test_resolve_existing_name() {
        let list = sample_list();
        assert_eq!(resolve(&list, "prod"), Some("ocid1.compartment.prod"));
        assert_eq!(resolve(&list, "dev"), Some("ocid1.compartment.dev"));
    }

    #[test]
    fn test_resolve_missing_name() {
        let list = sample_list();
        assert_eq!(resolve(&list, "staging"), None);
        assert_eq!(resolve(&CompartmentList::default(), "prod"), None);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let list = sample_list();
        assert_eq!(resolve(&list, "Prod"), None);
        assert_eq!(resolve(&list, "prod "), None);
    }

    #[test]
    fn test_resolve_duplicate_takes_first() {
        let list = CompartmentList::new(vec![
            Compartment::new("shared", "ocid1.compartment.first"),
            Compartment::new("dev", "ocid1.compartment.dev"),
            Compartment::new("shared", "ocid1.compartment.second"),
        ]);
        assert_eq!(resolve(&list, "shared"), Some("ocid1.compartment.first"));
    }
}
