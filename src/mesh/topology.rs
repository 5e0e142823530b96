//! Element topologies and their side-to-node maps.
//!
//! Local node layout of a 9-node quadrilateral:
//!
//! ```text
//! 3---6---2
//! |       |
//! 7   8   5
//! |       |
//! 0---4---1
//! ```
//!
//! The 4-node quadrilateral uses the corners 0..3 only.

use serde::{Deserialize, Serialize};

use crate::types::EdgeType;

/// Element topology of a mesh model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementTopology {
    /// Bilinear quadrilateral, corners only.
    #[serde(rename = "QUA4")]
    Qua4,
    /// Biquadratic quadrilateral with mid-edge and centre nodes.
    #[default]
    #[serde(rename = "QUA9")]
    Qua9,
}

const QUA4_SIDES: [[usize; 2]; 4] = [[0, 1], [1, 2], [2, 3], [3, 0]];
const QUA9_SIDES: [[usize; 3]; 4] = [[0, 4, 1], [1, 5, 2], [2, 6, 3], [3, 7, 0]];

impl ElementTopology {
    /// Number of nodes per element.
    pub fn nodes_per_element(self) -> usize {
        match self {
            ElementTopology::Qua4 => 4,
            ElementTopology::Qua9 => 9,
        }
    }

    /// Local node indices along a side, in traversal order.
    ///
    /// For `Qua9` the middle entry is the mid-edge node.
    pub fn side_nodes(self, side: EdgeType) -> &'static [usize] {
        let s = side.code() as usize;
        match self {
            ElementTopology::Qua4 => &QUA4_SIDES[s],
            ElementTopology::Qua9 => &QUA9_SIDES[s],
        }
    }

    /// Local indices of the two corner nodes bounding a side.
    ///
    /// Every other entry of the side sequence, which for both quadrilaterals
    /// is its first and last entry.
    pub fn side_corners(self, side: EdgeType) -> (usize, usize) {
        let nodes = self.side_nodes(side);
        (nodes[0], nodes[nodes.len() - 1])
    }

    /// Name used in model files and logs.
    pub fn name(self) -> &'static str {
        match self {
            ElementTopology::Qua4 => "QUA4",
            ElementTopology::Qua9 => "QUA9",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_counts() {
        assert_eq!(ElementTopology::Qua4.nodes_per_element(), 4);
        assert_eq!(ElementTopology::Qua9.nodes_per_element(), 9);
    }

    #[test]
    fn test_qua9_corners_skip_midpoint() {
        let topo = ElementTopology::Qua9;
        for side in EdgeType::ALL {
            let nodes = topo.side_nodes(side);
            assert_eq!(nodes.len(), 3);
            let every_other: Vec<_> = nodes.iter().step_by(2).copied().collect();
            let (a, b) = topo.side_corners(side);
            assert_eq!(every_other, vec![a, b]);
            assert!(a < 4 && b < 4);
            assert!(nodes[1] >= 4);
        }
        assert_eq!(topo.side_corners(EdgeType::Bottom), (0, 1));
        assert_eq!(topo.side_corners(EdgeType::Left), (3, 0));
    }

    #[test]
    fn test_qua4_corners() {
        let topo = ElementTopology::Qua4;
        assert_eq!(topo.side_corners(EdgeType::Right), (1, 2));
        assert_eq!(topo.side_corners(EdgeType::Top), (2, 3));
    }

    #[test]
    fn test_sides_share_corners() {
        // Consecutive sides meet at a corner: end of one is start of the next.
        for topo in [ElementTopology::Qua4, ElementTopology::Qua9] {
            for (i, side) in EdgeType::ALL.iter().enumerate() {
                let next = EdgeType::ALL[(i + 1) % 4];
                assert_eq!(topo.side_corners(*side).1, topo.side_corners(next).0);
            }
        }
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&ElementTopology::Qua9).unwrap(), "\"QUA9\"");
        let topo: ElementTopology = serde_json::from_str("\"QUA4\"").unwrap();
        assert_eq!(topo, ElementTopology::Qua4);
    }
}
