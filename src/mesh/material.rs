//! Per-element material records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Material number of an element, as listed in the solver's material table.
///
/// Written verbatim to the materials file, one record per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialId(pub u32);

impl MaterialId {
    /// Create a material record.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl From<u32> for MaterialId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
