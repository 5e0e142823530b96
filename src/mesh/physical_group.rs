//! Physical groups: named sets of element boundary edges.
//!
//! Boundary conditions are attached to the mesh through physical groups.
//! The exporter looks up two of them by name, one for the acoustic free
//! surface and one for the absorbing boundary, through [`BoundaryRole`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{EdgeType, ElementIndex};

/// One side of one element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundaryEdge {
    /// Element owning the edge.
    pub element: ElementIndex,
    /// Which side of the element.
    pub side: EdgeType,
}

impl BoundaryEdge {
    /// Create a boundary edge.
    pub fn new(element: impl Into<ElementIndex>, side: EdgeType) -> Self {
        Self {
            element: element.into(),
            side,
        }
    }
}

/// A set of boundary edges tagged with a common boundary condition.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicalGroup {
    /// Edges in export order.
    pub edges: Vec<BoundaryEdge>,
}

impl PhysicalGroup {
    /// Create a group from its edges.
    pub fn new(edges: Vec<BoundaryEdge>) -> Self {
        Self { edges }
    }

    /// Create a group from parallel element and side sequences.
    ///
    /// Returns `None` if the sequences differ in length.
    pub fn from_parallel(elements: &[usize], sides: &[EdgeType]) -> Option<Self> {
        if elements.len() != sides.len() {
            return None;
        }
        let edges = elements
            .iter()
            .zip(sides)
            .map(|(&e, &s)| BoundaryEdge::new(e, s))
            .collect();
        Some(Self { edges })
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the group has no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over the edges.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &BoundaryEdge> {
        self.edges.iter()
    }
}

/// Physical groups keyed by name.
pub type PhysicalGroups = BTreeMap<String, PhysicalGroup>;

static NULL_GROUP: PhysicalGroup = PhysicalGroup { edges: Vec::new() };

/// A boundary role (free surface, absorbing) bound to the model.
///
/// A role is either bound to a named group or is null. A null role behaves
/// as a group with zero edges: the role is simply absent in this mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundaryRole<'a> {
    /// The role uses the named group.
    Bound {
        /// Group name in the model.
        name: &'a str,
        /// The group itself.
        group: &'a PhysicalGroup,
    },
    /// The role is disabled or its group is absent from the model.
    Null {
        /// Placeholder label, e.g. `_NULL_AFS_`.
        label: &'static str,
    },
}

impl<'a> BoundaryRole<'a> {
    /// Resolve a role name against the model's groups.
    ///
    /// `None` and names not present in `groups` both resolve to
    /// [`BoundaryRole::Null`] with the given label.
    pub fn resolve(
        groups: &'a PhysicalGroups,
        name: Option<&str>,
        null_label: &'static str,
    ) -> Self {
        match name.and_then(|n| groups.get_key_value(n)) {
            Some((name, group)) => BoundaryRole::Bound {
                name: name.as_str(),
                group,
            },
            None => BoundaryRole::Null { label: null_label },
        }
    }

    /// The group to export; empty for a null role.
    pub fn group(&self) -> &'a PhysicalGroup {
        match *self {
            BoundaryRole::Bound { group, .. } => group,
            BoundaryRole::Null { .. } => &NULL_GROUP,
        }
    }

    /// Group name, or the null label.
    pub fn name(&self) -> &'a str {
        match *self {
            BoundaryRole::Bound { name, .. } => name,
            BoundaryRole::Null { label } => label,
        }
    }

    /// Whether the role is null.
    pub fn is_null(&self) -> bool {
        matches!(self, BoundaryRole::Null { .. })
    }
}
