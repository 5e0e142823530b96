//! Element side identifiers.
//!
//! A quadrilateral element has four sides. Their integer codes follow the
//! counterclockwise-from-bottom convention used by the meshfem files:
//! `Bottom = 0`, `Right = 1`, `Top = 2`, `Left = 3`.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when an integer does not name an element side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "cannot convert edge type value {value}: must be one of BOTTOM (0), RIGHT (1), TOP (2) or LEFT (3)"
)]
pub struct InvalidEdgeType {
    /// The rejected value.
    pub value: i64,
}

/// One side of a quadrilateral element.
///
/// # Example
///
/// ```
/// use meshfem_export::types::EdgeType;
///
/// assert_eq!(EdgeType::Right.code(), 1);
/// assert_eq!(EdgeType::Right.meshfem_code(), 2);
/// assert!(EdgeType::try_from(7_i64).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum EdgeType {
    /// Side at s = -1
    Bottom = 0,
    /// Side at r = +1
    Right = 1,
    /// Side at s = +1
    Top = 2,
    /// Side at r = -1
    Left = 3,
}

impl EdgeType {
    /// All sides in code order.
    pub const ALL: [EdgeType; 4] = [
        EdgeType::Bottom,
        EdgeType::Right,
        EdgeType::Top,
        EdgeType::Left,
    ];

    /// Zero-based integer code of this side.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Side numbering expected by the meshfem reader (1-based).
    pub fn meshfem_code(self) -> u8 {
        match self {
            EdgeType::Bottom => 1,
            EdgeType::Right => 2,
            EdgeType::Top => 3,
            EdgeType::Left => 4,
        }
    }

    /// Upper-case name used in messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            EdgeType::Bottom => "BOTTOM",
            EdgeType::Right => "RIGHT",
            EdgeType::Top => "TOP",
            EdgeType::Left => "LEFT",
        }
    }
}

/// Translate a raw side code into meshfem side numbering.
///
/// Any value outside the four side codes is rejected rather than producing
/// a malformed line.
pub fn model_edge_to_meshfem_edge(value: i64) -> Result<u8, InvalidEdgeType> {
    EdgeType::try_from(value).map(EdgeType::meshfem_code)
}

impl TryFrom<i64> for EdgeType {
    type Error = InvalidEdgeType;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(EdgeType::Bottom),
            1 => Ok(EdgeType::Right),
            2 => Ok(EdgeType::Top),
            3 => Ok(EdgeType::Left),
            _ => Err(InvalidEdgeType { value }),
        }
    }
}

impl From<EdgeType> for i64 {
    fn from(side: EdgeType) -> i64 {
        i64::from(side.code())
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.code())
    }
}
