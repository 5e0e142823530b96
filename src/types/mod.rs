//! Strongly-typed domain types.
//!
//! - [`EdgeType`]: the four sides of a quadrilateral element
//! - [`ElementIndex`], [`NodeIndex`]: zero-based indices that know how to
//!   become the one-based values written to meshfem files
//!
//! # Example
//!
//! ```
//! use meshfem_export::types::{EdgeType, ElementIndex};
//!
//! let elem = ElementIndex::new(0);
//! assert_eq!(elem.one_based(), 1);
//! assert_eq!(EdgeType::Left.meshfem_code(), 4);
//! ```

mod indices;
mod sides;

pub use indices::{ElementIndex, NodeIndex};
pub use sides::{EdgeType, InvalidEdgeType, model_edge_to_meshfem_edge};
