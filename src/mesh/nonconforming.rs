//! Nonconforming interfaces between element pairs.
//!
//! Two elements meeting along a side whose nodes do not coincide are
//! recorded as a pair `(element_a, element_b, side_a, side_b)`. The model
//! stores the pairs as four parallel sequences; pairing is strict.

use serde::{Deserialize, Serialize};

use super::model::ModelError;
use crate::types::{EdgeType, ElementIndex};

/// One nonconforming element pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterfacePair {
    /// First element.
    pub element_a: ElementIndex,
    /// Second element.
    pub element_b: ElementIndex,
    /// Side of `element_a` on the interface.
    pub edge_a: EdgeType,
    /// Side of `element_b` on the interface.
    pub edge_b: EdgeType,
}

/// Nonconforming interfaces as parallel sequences.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonconformingInterfaces {
    /// First element of each pair.
    pub elements_a: Vec<ElementIndex>,
    /// Second element of each pair.
    pub elements_b: Vec<ElementIndex>,
    /// Side of the first element.
    pub edges_a: Vec<EdgeType>,
    /// Side of the second element.
    pub edges_b: Vec<EdgeType>,
}

impl NonconformingInterfaces {
    /// Build from a list of pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = InterfacePair>) -> Self {
        let mut out = Self::default();
        for p in pairs {
            out.elements_a.push(p.element_a);
            out.elements_b.push(p.element_b);
            out.edges_a.push(p.edge_a);
            out.edges_b.push(p.edge_b);
        }
        out
    }

    /// Build from raw parallel sequences, translating side codes.
    ///
    /// Side codes outside the [`EdgeType`] range are rejected.
    pub fn from_raw(
        elements_a: &[usize],
        elements_b: &[usize],
        edges_a: &[i64],
        edges_b: &[i64],
    ) -> Result<Self, ModelError> {
        let sides = |codes: &[i64]| {
            codes
                .iter()
                .map(|&c| EdgeType::try_from(c))
                .collect::<Result<Vec<_>, _>>()
        };
        let out = Self {
            elements_a: elements_a.iter().map(|&e| e.into()).collect(),
            elements_b: elements_b.iter().map(|&e| e.into()).collect(),
            edges_a: sides(edges_a)?,
            edges_b: sides(edges_b)?,
        };
        out.check_lengths()?;
        Ok(out)
    }

    /// Number of pairs, taken from `edges_a`.
    pub fn num_pairs(&self) -> usize {
        self.edges_a.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.num_pairs() == 0
    }

    /// Ensure the four sequences have the same length.
    pub fn check_lengths(&self) -> Result<(), ModelError> {
        let n = self.elements_a.len();
        if self.elements_b.len() != n || self.edges_a.len() != n || self.edges_b.len() != n {
            return Err(ModelError::InterfaceLengthMismatch {
                elements_a: self.elements_a.len(),
                elements_b: self.elements_b.len(),
                edges_a: self.edges_a.len(),
                edges_b: self.edges_b.len(),
            });
        }
        Ok(())
    }

    /// Iterate over the pairs with strict pairing of the four sequences.
    pub fn pairs(&self) -> Result<impl ExactSizeIterator<Item = InterfacePair> + '_, ModelError> {
        self.check_lengths()?;
        Ok((0..self.elements_a.len()).map(move |i| InterfacePair {
            element_a: self.elements_a[i],
            element_b: self.elements_b[i],
            edge_a: self.edges_a[i],
            edge_b: self.edges_b[i],
        }))
    }
}
