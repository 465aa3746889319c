//! Domain types shared across modules.
//!
//! Compartments are produced by the API module and consumed by the
//! startup resolver and subcommands; keeping them here avoids a
//! dependency cycle between `api` and `startup`.

/// A compartment as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compartment {
    pub name: String,
    pub id: String,
    /// OCID of the parent compartment
    pub parent_id: Option<String>,
    pub lifecycle_state: Option<String>,
}

impl Compartment {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            parent_id: None,
            lifecycle_state: None,
        }
    }
}

/// Compartments visible to the caller, in provider response order.
///
/// Fetched fresh on every invocation; never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompartmentList {
    compartments: Vec<Compartment>,
}

impl CompartmentList {
    pub fn new(compartments: Vec<Compartment>) -> Self {
        Self { compartments }
    }

    pub fn len(&self) -> usize {
        self.compartments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compartments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Compartment> {
        self.compartments.iter()
    }
}

impl FromIterator<Compartment> for CompartmentList {
    fn from_iter<I: IntoIterator<Item = Compartment>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CompartmentList {
    type Item = &'a Compartment;
    type IntoIter = std::slice::Iter<'a, Compartment>;

    fn into_iter(self) -> Self::IntoIter {
        self.compartments.iter()
    }
}
