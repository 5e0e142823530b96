//! Mesh model.
//!
//! Provides the read-only data handed to the exporter:
//! - Node coordinates and element connectivity with an explicit topology
//! - Per-element material records
//! - Physical groups of boundary edges, and the boundary roles bound to them
//! - Nonconforming element interfaces

mod material;
mod model;
mod nonconforming;
mod physical_group;
mod topology;

pub use material::MaterialId;
pub use model::{Model, ModelError};
pub use nonconforming::{InterfacePair, NonconformingInterfaces};
pub use physical_group::{BoundaryEdge, BoundaryRole, PhysicalGroup, PhysicalGroups};
pub use topology::ElementTopology;

#[cfg(test)]
pub(crate) use model::fixtures;
