//! Line encoders for the meshfem text files.
//!
//! Each function writes one complete file body to any [`Write`]. All files
//! are ASCII with space-separated fields; indices are one-based.
//!
//! ## Layouts
//!
//! ```text
//! node_coords        mesh                  free_surface
//! N                  M                     E
//! x z                n1 n2 ... n9          elem 2 a b
//!
//! absorbing_surface  nonconforming_adjacencies
//! E                  2P
//! elem 2 a b side    elem_a elem_b 3 side_a
//!                    elem_b elem_a 3 side_b
//! ```
//!
//! Coordinates are written with 10 fractional digits.

use std::fmt::Display;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::exporter::ExportError;
use crate::mesh::{Model, NonconformingInterfaces, PhysicalGroup};

/// Fractional digits of node coordinates.
pub const COORDINATE_PRECISION: usize = 10;

/// Edge type tag for a 2-node edge segment.
pub const TWO_NODE_EDGE: u8 = 2;

/// Connection type tag for a nonconforming adjacency.
pub const NONCONFORMING_CONNECTION_TYPE: u8 = 3;

/// Which two of the three model axes span the solver's plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaneProjection {
    /// Keep x and z, drop y.
    #[default]
    Xz,
    /// Keep x and y, drop z.
    Xy,
}

impl PlaneProjection {
    /// Project a 3D point to the plane. The dropped axis is not checked.
    #[inline]
    pub fn project(self, p: &[f64; 3]) -> (f64, f64) {
        match self {
            PlaneProjection::Xz => (p[0], p[2]),
            PlaneProjection::Xy => (p[0], p[1]),
        }
    }
}

/// Node count, then one `x z` line per node.
pub fn write_node_coords<W: Write>(
    w: &mut W,
    nodes: &[[f64; 3]],
    projection: PlaneProjection,
) -> io::Result<()> {
    writeln!(w, "{}", nodes.len())?;
    for p in nodes {
        let (a, b) = projection.project(p);
        writeln!(
            w,
            "{:.prec$} {:.prec$}",
            a,
            b,
            prec = COORDINATE_PRECISION
        )?;
    }
    Ok(())
}

/// Element count, then the one-based node indices of each element.
pub fn write_connectivity<W: Write>(w: &mut W, elements: &[Vec<usize>]) -> io::Result<()> {
    writeln!(w, "{}", elements.len())?;
    for elem in elements {
        let mut first = true;
        for &n in elem {
            if !first {
                write!(w, " ")?;
            }
            write!(w, "{}", n + 1)?;
            first = false;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// One material record per line, no header.
pub fn write_materials<W: Write, M: Display>(w: &mut W, materials: &[M]) -> io::Result<()> {
    for mat in materials {
        writeln!(w, "{}", mat)?;
    }
    Ok(())
}

/// Edge count, then `elem 2 a b` per edge, optionally followed by the
/// one-based side code.
///
/// `a` and `b` are the corner nodes of the edge's side.
pub fn write_surface_edges<W: Write>(
    w: &mut W,
    model: &Model,
    group: &PhysicalGroup,
    with_side_code: bool,
) -> io::Result<()> {
    writeln!(w, "{}", group.len())?;
    for edge in group.iter() {
        let (a, b) = model.edge_corner_nodes(edge);
        write!(
            w,
            "{} {} {} {}",
            edge.element.one_based(),
            TWO_NODE_EDGE,
            a.one_based(),
            b.one_based()
        )?;
        if with_side_code {
            write!(w, " {}", edge.side.code() + 1)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Count-only body for artifacts that carry no data yet.
pub fn write_placeholder<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "0")
}

/// Twice the pair count, then both directions of every pair.
pub fn write_nonconforming_adjacencies<W: Write>(
    w: &mut W,
    interfaces: &NonconformingInterfaces,
) -> Result<(), ExportError> {
    let pairs = interfaces.pairs()?;
    writeln!(w, "{}", 2 * pairs.len())?;
    for p in pairs {
        writeln!(
            w,
            "{} {} {} {}",
            p.element_a.one_based(),
            p.element_b.one_based(),
            NONCONFORMING_CONNECTION_TYPE,
            p.edge_a.meshfem_code()
        )?;
        writeln!(
            w,
            "{} {} {} {}",
            p.element_b.one_based(),
            p.element_a.one_based(),
            NONCONFORMING_CONNECTION_TYPE,
            p.edge_b.meshfem_code()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::fixtures::two_element_model;
    use crate::mesh::ModelError;

    fn encode<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_node_coords() {
        let nodes = [[0.0, 7.0, 1.5], [-2.25, 0.0, 1.0 / 3.0]];
        let out = encode(|w| write_node_coords(w, &nodes, PlaneProjection::Xz));
        assert_eq!(out, "2\n0.0000000000 1.5000000000\n-2.2500000000 0.3333333333\n");

        let out = encode(|w| write_node_coords(w, &nodes, PlaneProjection::Xy));
        assert_eq!(out.lines().nth(1), Some("0.0000000000 7.0000000000"));
    }

    #[test]
    fn test_connectivity_is_one_based() {
        let model = two_element_model();
        let out = encode(|w| write_connectivity(w, &model.elements));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "1 3 13 11 2 8 12 6 7");
        assert_eq!(lines[2], "3 5 15 13 4 10 14 8 9");

        // Subtracting one recovers the model connectivity.
        let back: Vec<usize> = lines[2]
            .split(' ')
            .map(|t| t.parse::<usize>().unwrap() - 1)
            .collect();
        assert_eq!(back, model.elements[1]);
    }

    #[test]
    fn test_materials_have_no_header() {
        let model = two_element_model();
        let out = encode(|w| write_materials(w, &model.materials));
        assert_eq!(out, "1\n2\n");
    }

    #[test]
    fn test_free_surface_edges() {
        let model = two_element_model();
        let group = model.physical_group("acoustic_free_surface").unwrap();
        let out = encode(|w| write_surface_edges(w, &model, group, false));
        assert_eq!(out, "2\n1 2 13 11\n2 2 15 13\n");
    }

    #[test]
    fn test_absorbing_edges_carry_side_code() {
        let model = two_element_model();
        let group = model.physical_group("absorbing").unwrap();
        let out = encode(|w| write_surface_edges(w, &model, group, true));
        assert_eq!(out, "4\n1 2 11 1 4\n1 2 1 3 1\n2 2 3 5 1\n2 2 5 15 2\n");
    }

    #[test]
    fn test_empty_group() {
        let model = two_element_model();
        let out = encode(|w| write_surface_edges(w, &model, &PhysicalGroup::default(), true));
        assert_eq!(out, "0\n");
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(encode(|w| write_placeholder(w)), "0");
    }

    #[test]
    fn test_nonconforming_adjacencies() {
        let model = two_element_model();
        let mut buf = Vec::new();
        write_nonconforming_adjacencies(&mut buf, &model.nonconforming_interfaces).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "2\n1 2 3 2\n2 1 3 4\n");
    }

    #[test]
    fn test_nonconforming_length_mismatch_writes_nothing() {
        let mut model = two_element_model();
        model.nonconforming_interfaces.elements_b.clear();
        let mut buf = Vec::new();
        let err = write_nonconforming_adjacencies(&mut buf, &model.nonconforming_interfaces)
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Model(ModelError::InterfaceLengthMismatch { .. })
        ));
        assert!(buf.is_empty());
    }
}
