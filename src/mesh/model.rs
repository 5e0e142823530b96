//! The 2D mesh model handed to the exporter.
//!
//! The model is produced upstream by a mesher and is read-only here. Nodes
//! are stored in 3D; the exporter projects them to the solver's plane.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::material::MaterialId;
use super::nonconforming::NonconformingInterfaces;
use super::physical_group::{BoundaryEdge, PhysicalGroup, PhysicalGroups};
use super::topology::ElementTopology;
use crate::types::{ElementIndex, InvalidEdgeType, NodeIndex};

/// Error type for mesh model invariants.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Element connectivity does not match the topology.
    #[error("element {element} has {found} nodes, but topology {topology} expects {expected}")]
    ArityMismatch {
        /// Offending element.
        element: usize,
        /// Topology name.
        topology: &'static str,
        /// Nodes per element of the topology.
        expected: usize,
        /// Nodes listed for the element.
        found: usize,
    },

    /// Connectivity references a node that does not exist.
    #[error("element {element} references node {node}, but the model has {n_nodes} nodes")]
    NodeOutOfRange {
        /// Offending element.
        element: usize,
        /// Referenced node.
        node: usize,
        /// Number of nodes in the model.
        n_nodes: usize,
    },

    /// A group or interface references an element that does not exist.
    #[error("{context} references element {element}, but the model has {n_elements} elements")]
    ElementOutOfRange {
        /// Where the reference was found.
        context: String,
        /// Referenced element.
        element: usize,
        /// Number of elements in the model.
        n_elements: usize,
    },

    /// Materials are not positionally aligned with elements.
    #[error("model has {materials} material records for {elements} elements")]
    MaterialCountMismatch {
        /// Number of material records.
        materials: usize,
        /// Number of elements.
        elements: usize,
    },

    /// The nonconforming interface sequences cannot be paired.
    #[error(
        "nonconforming interface sequences differ in length \
         (elements_a: {elements_a}, elements_b: {elements_b}, edges_a: {edges_a}, edges_b: {edges_b})"
    )]
    InterfaceLengthMismatch {
        /// Length of `elements_a`.
        elements_a: usize,
        /// Length of `elements_b`.
        elements_b: usize,
        /// Length of `edges_a`.
        edges_a: usize,
        /// Length of `edges_b`.
        edges_b: usize,
    },

    /// A raw side code is not a valid edge type.
    #[error(transparent)]
    InvalidEdge(#[from] InvalidEdgeType),
}

/// A 2D spectral-element mesh model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Node coordinates (x, y, z).
    pub nodes: Vec<[f64; 3]>,

    /// Element topology shared by all elements.
    #[serde(default)]
    pub topology: ElementTopology,

    /// Element-to-node connectivity, zero-based, in topology-local order.
    pub elements: Vec<Vec<usize>>,

    /// Material of each element; `materials[k]` belongs to `elements[k]`.
    pub materials: Vec<MaterialId>,

    /// Named boundary edge sets.
    #[serde(default)]
    pub physical_groups: PhysicalGroups,

    /// Element pairs joined along nonconforming sides.
    #[serde(default)]
    pub nonconforming_interfaces: NonconformingInterfaces,
}

impl Model {
    /// Create a QUA9 model without groups or interfaces.
    pub fn new(nodes: Vec<[f64; 3]>, elements: Vec<Vec<usize>>, materials: Vec<MaterialId>) -> Self {
        Self {
            nodes,
            topology: ElementTopology::Qua9,
            elements,
            materials,
            physical_groups: PhysicalGroups::new(),
            nonconforming_interfaces: NonconformingInterfaces::default(),
        }
    }

    /// Set the element topology.
    pub fn with_topology(mut self, topology: ElementTopology) -> Self {
        self.topology = topology;
        self
    }

    /// Add (or replace) a named physical group.
    pub fn with_physical_group(mut self, name: impl Into<String>, group: PhysicalGroup) -> Self {
        self.physical_groups.insert(name.into(), group);
        self
    }

    /// Set the nonconforming interfaces.
    pub fn with_nonconforming_interfaces(mut self, interfaces: NonconformingInterfaces) -> Self {
        self.nonconforming_interfaces = interfaces;
        self
    }

    /// Number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of elements.
    pub fn n_elements(&self) -> usize {
        self.elements.len()
    }

    /// Look up a physical group by name.
    pub fn physical_group(&self, name: &str) -> Option<&PhysicalGroup> {
        self.physical_groups.get(name)
    }

    /// Global nodes of an element.
    pub fn element_nodes(&self, element: ElementIndex) -> &[usize] {
        &self.elements[element]
    }

    /// Global corner nodes bounding a boundary edge.
    pub fn edge_corner_nodes(&self, edge: &BoundaryEdge) -> (NodeIndex, NodeIndex) {
        let nodes = self.element_nodes(edge.element);
        let (a, b) = self.topology.side_corners(edge.side);
        (NodeIndex::new(nodes[a]), NodeIndex::new(nodes[b]))
    }

    /// Check every index and length invariant of the model.
    pub fn validate(&self) -> Result<(), ModelError> {
        let n_nodes = self.n_nodes();
        let n_elements = self.n_elements();
        let expected = self.topology.nodes_per_element();

        for (k, elem) in self.elements.iter().enumerate() {
            if elem.len() != expected {
                return Err(ModelError::ArityMismatch {
                    element: k,
                    topology: self.topology.name(),
                    expected,
                    found: elem.len(),
                });
            }
            if let Some(&node) = elem.iter().find(|&&n| n >= n_nodes) {
                return Err(ModelError::NodeOutOfRange {
                    element: k,
                    node,
                    n_nodes,
                });
            }
        }

        if self.materials.len() != n_elements {
            return Err(ModelError::MaterialCountMismatch {
                materials: self.materials.len(),
                elements: n_elements,
            });
        }

        for (name, group) in &self.physical_groups {
            if let Some(edge) = group.iter().find(|e| !e.element.is_within(n_elements)) {
                return Err(ModelError::ElementOutOfRange {
                    context: format!("physical group '{}'", name),
                    element: edge.element.get(),
                    n_elements,
                });
            }
        }

        let interfaces = &self.nonconforming_interfaces;
        interfaces.check_lengths()?;
        if let Some(elem) = interfaces
            .elements_a
            .iter()
            .chain(&interfaces.elements_b)
            .find(|e| !e.is_within(n_elements))
        {
            return Err(ModelError::ElementOutOfRange {
                context: "nonconforming interfaces".to_string(),
                element: elem.get(),
                n_elements,
            });
        }

        Ok(())
    }
}

/// Small hand-built models shared by the unit tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::mesh::InterfacePair;
    use crate::types::EdgeType;

    /// Two QUA9 elements side by side on a 5 x 3 node grid in the x-z plane.
    ///
    /// ```text
    /// 10--11--12--13--14
    ///  |       |       |
    ///  5   6   7   8   9
    ///  |       |       |
    ///  0---1---2---3---4
    /// ```
    pub(crate) fn two_element_model() -> Model {
        let mut nodes = Vec::new();
        for j in 0..3 {
            for i in 0..5 {
                nodes.push([0.5 * i as f64, 0.0, 0.5 * j as f64]);
            }
        }
        let elements = vec![
            vec![0, 2, 12, 10, 1, 7, 11, 5, 6],
            vec![2, 4, 14, 12, 3, 9, 13, 7, 8],
        ];
        let materials = vec![MaterialId::new(1), MaterialId::new(2)];

        Model::new(nodes, elements, materials)
            .with_physical_group(
                "acoustic_free_surface",
                PhysicalGroup::new(vec![
                    BoundaryEdge::new(0, EdgeType::Top),
                    BoundaryEdge::new(1, EdgeType::Top),
                ]),
            )
            .with_physical_group(
                "absorbing",
                PhysicalGroup::new(vec![
                    BoundaryEdge::new(0, EdgeType::Left),
                    BoundaryEdge::new(0, EdgeType::Bottom),
                    BoundaryEdge::new(1, EdgeType::Bottom),
                    BoundaryEdge::new(1, EdgeType::Right),
                ]),
            )
            .with_nonconforming_interfaces(NonconformingInterfaces::from_pairs([InterfacePair {
                element_a: 0.into(),
                element_b: 1.into(),
                edge_a: EdgeType::Right,
                edge_b: EdgeType::Left,
            }]))
    }
}
