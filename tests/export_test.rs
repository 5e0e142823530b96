//! Integration tests for meshfem export.
//!
//! These tests verify the file contract on structured QUA9 grids:
//! - Header counts match the model
//! - Indices are written one-based and map back to the model
//! - Boundary edges list the corner nodes of their side
//! - Nonconforming pairs are written in both directions
//! - Disabled files are never touched

use std::fs;
use std::path::Path;

use meshfem_export::io::meshfem_format::{write_surface_edges, COORDINATE_PRECISION};
use meshfem_export::mesh::InterfacePair;
use meshfem_export::{
    BoundaryEdge, EdgeType, ElementTopology, ExportArtifact, ExportFileConfig, Exporter,
    MaterialId, Model, NonconformingInterfaces, PhysicalGroup, read_model_json,
    write_model_json,
};
use tempfile::TempDir;

/// Structured grid of `nx` x `nz` QUA9 elements on [0, nx] x [0, nz], z pointing up.
///
/// Top row edges form the free surface, the other three sides the absorbing
/// boundary, and every horizontal neighbour pair in the bottom row is
/// declared nonconforming.
fn qua9_grid(nx: usize, nz: usize) -> Model {
    let npx = 2 * nx + 1;
    let npz = 2 * nz + 1;
    let id = |i: usize, j: usize| j * npx + i;

    let mut nodes = Vec::with_capacity(npx * npz);
    for j in 0..npz {
        for i in 0..npx {
            nodes.push([0.5 * i as f64, 0.0, 0.5 * j as f64]);
        }
    }

    let mut elements = Vec::with_capacity(nx * nz);
    let mut materials = Vec::with_capacity(nx * nz);
    for ez in 0..nz {
        for ex in 0..nx {
            let (i, j) = (2 * ex, 2 * ez);
            elements.push(vec![
                id(i, j),
                id(i + 2, j),
                id(i + 2, j + 2),
                id(i, j + 2),
                id(i + 1, j),
                id(i + 2, j + 1),
                id(i + 1, j + 2),
                id(i, j + 1),
                id(i + 1, j + 1),
            ]);
            materials.push(MaterialId::new(1 + (ez % 2) as u32));
        }
    }

    let k = |ex: usize, ez: usize| ez * nx + ex;
    let top: Vec<_> = (0..nx)
        .map(|ex| BoundaryEdge::new(k(ex, nz - 1), EdgeType::Top))
        .collect();
    let mut absorbing: Vec<_> = (0..nx)
        .map(|ex| BoundaryEdge::new(k(ex, 0), EdgeType::Bottom))
        .collect();
    for ez in 0..nz {
        absorbing.push(BoundaryEdge::new(k(0, ez), EdgeType::Left));
        absorbing.push(BoundaryEdge::new(k(nx - 1, ez), EdgeType::Right));
    }

    let pairs = (0..nx.saturating_sub(1)).map(|ex| InterfacePair {
        element_a: k(ex, 0).into(),
        element_b: k(ex + 1, 0).into(),
        edge_a: EdgeType::Right,
        edge_b: EdgeType::Left,
    });

    Model::new(nodes, elements, materials)
        .with_physical_group("acoustic_free_surface", PhysicalGroup::new(top))
        .with_physical_group("absorbing", PhysicalGroup::new(absorbing))
        .with_nonconforming_interfaces(NonconformingInterfaces::from_pairs(pairs))
}

fn all_files(dir: &Path) -> ExportFileConfig {
    ExportArtifact::ALL
        .into_iter()
        .fold(ExportFileConfig::empty(dir), |c, a| c.with_default_file(a))
}

fn lines(dir: &Path, name: &str) -> Vec<String> {
    fs::read_to_string(dir.join(name))
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

fn fields(line: &str) -> Vec<usize> {
    line.split(' ').map(|t| t.parse().unwrap()).collect()
}

#[test]
fn test_node_coords_file() {
    let model = qua9_grid(3, 2);
    let tmp = TempDir::new().unwrap();
    Exporter::new(&model, tmp.path()).unwrap().export_mesh().unwrap();

    let lines = lines(tmp.path(), "node_coords");
    assert_eq!(lines[0], model.n_nodes().to_string());
    assert_eq!(lines.len(), model.n_nodes() + 1);

    for (line, node) in lines[1..].iter().zip(&model.nodes) {
        let parts: Vec<&str> = line.split(' ').collect();
        assert_eq!(parts.len(), 2);
        for p in &parts {
            let frac = p.split('.').nth(1).unwrap();
            assert_eq!(frac.len(), COORDINATE_PRECISION);
        }
        assert_eq!(parts[0].parse::<f64>().unwrap(), node[0]);
        assert_eq!(parts[1].parse::<f64>().unwrap(), node[2]);
    }
}

#[test]
fn test_mesh_file_roundtrips_connectivity() {
    let model = qua9_grid(4, 3);
    let tmp = TempDir::new().unwrap();
    Exporter::new(&model, tmp.path()).unwrap().export_mesh().unwrap();

    let lines = lines(tmp.path(), "mesh");
    assert_eq!(lines[0], "12");
    assert_eq!(lines.len(), 13);
    for (line, elem) in lines[1..].iter().zip(&model.elements) {
        let back: Vec<usize> = fields(line).into_iter().map(|n| n - 1).collect();
        assert_eq!(&back, elem);
    }
}

#[test]
fn test_materials_file() {
    let model = qua9_grid(2, 3);
    let tmp = TempDir::new().unwrap();
    Exporter::new(&model, tmp.path()).unwrap().export_mesh().unwrap();

    let lines = lines(tmp.path(), "materials");
    assert_eq!(lines.len(), model.n_elements());
    for (line, mat) in lines.iter().zip(&model.materials) {
        assert_eq!(line, &mat.to_string());
    }
}

#[test]
fn test_surface_edges_use_side_corners() {
    let model = qua9_grid(3, 3);
    let tmp = TempDir::new().unwrap();
    Exporter::new(&model, tmp.path()).unwrap().export_mesh().unwrap();

    for (file, group, with_side) in [
        ("free_surface", "acoustic_free_surface", false),
        ("absorbing_surface", "absorbing", true),
    ] {
        let group = model.physical_group(group).unwrap();
        let lines = lines(tmp.path(), file);
        assert_eq!(lines[0], group.len().to_string());

        for (line, edge) in lines[1..].iter().zip(group.iter()) {
            let f = fields(line);
            assert_eq!(f.len(), if with_side { 5 } else { 4 });
            assert_eq!(f[0], edge.element.one_based());
            assert_eq!(f[1], 2);

            let elem = &model.elements[edge.element.get()];
            let side = ElementTopology::Qua9.side_nodes(edge.side);
            assert_eq!(f[2], elem[side[0]] + 1);
            assert_eq!(f[3], elem[side[2]] + 1);
            if with_side {
                assert_eq!(f[4], edge.side.code() as usize + 1);
            }
        }
    }
}

#[test]
fn test_nonconforming_adjacencies_file() {
    let model = qua9_grid(4, 1);
    let tmp = TempDir::new().unwrap();
    Exporter::new(&model, all_files(tmp.path()))
        .unwrap()
        .export_mesh()
        .unwrap();

    let pairs = model.nonconforming_interfaces.num_pairs();
    assert_eq!(pairs, 3);

    let lines = lines(tmp.path(), "nonconforming_adjacencies");
    assert_eq!(lines[0], (2 * pairs).to_string());
    assert_eq!(lines.len(), 2 * pairs + 1);

    for chunk in lines[1..].chunks(2) {
        let forward = fields(&chunk[0]);
        let backward = fields(&chunk[1]);
        assert_eq!(forward[0], backward[1]);
        assert_eq!(forward[1], backward[0]);
        assert_eq!(forward[2], 3);
        assert_eq!(backward[2], 3);
        assert_eq!(forward[3], EdgeType::Right.meshfem_code() as usize);
        assert_eq!(backward[3], EdgeType::Left.meshfem_code() as usize);
    }
}

#[test]
fn test_every_artifact_enabled() {
    let model = qua9_grid(2, 2);
    let tmp = TempDir::new().unwrap();
    let summary = Exporter::new(&model, all_files(tmp.path()))
        .unwrap()
        .export_mesh()
        .unwrap();

    // Axial elements are configured but never produced.
    assert_eq!(summary.len(), ExportArtifact::ALL.len() - 1);
    for name in [
        "acoustic_forcing_surface",
        "absorbing_cpml",
        "tangential_detection_curve",
    ] {
        assert_eq!(fs::read_to_string(tmp.path().join(name)).unwrap(), "0");
    }
}

#[test]
fn test_disabled_optional_files_are_not_created() {
    let model = qua9_grid(2, 2);
    let tmp = TempDir::new().unwrap();
    let config = ExportFileConfig::new(tmp.path()).without_file(ExportArtifact::AbsorbingSurface);
    Exporter::new(&model, config).unwrap().export_mesh().unwrap();

    let mut written: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    written.sort();
    assert_eq!(written, vec!["free_surface", "materials", "mesh", "node_coords"]);
}

#[test]
fn test_enabled_placeholder_with_missing_role() {
    let model = qua9_grid(1, 1);
    let tmp = TempDir::new().unwrap();
    let config = ExportFileConfig::new(tmp.path())
        .with_default_file(ExportArtifact::AcousticForcingSurface);

    Exporter::new(&model, config)
        .unwrap()
        .with_free_surface_group(Some("not_in_this_mesh"))
        .export_mesh()
        .unwrap();

    assert_eq!(lines(tmp.path(), "free_surface"), vec!["0"]);
    assert_eq!(lines(tmp.path(), "acoustic_forcing_surface"), vec!["0"]);
}

#[test]
fn test_qua4_topology() {
    let nodes = vec![
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [2.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0],
        [2.0, 0.0, 1.0],
    ];
    let model = Model::new(
        nodes,
        vec![vec![0, 1, 4, 3], vec![1, 2, 5, 4]],
        vec![MaterialId::new(1), MaterialId::new(1)],
    )
    .with_topology(ElementTopology::Qua4)
    .with_physical_group(
        "absorbing",
        PhysicalGroup::new(vec![
            BoundaryEdge::new(0, EdgeType::Left),
            BoundaryEdge::new(1, EdgeType::Right),
        ]),
    );

    let mut buf = Vec::new();
    write_surface_edges(&mut buf, &model, model.physical_group("absorbing").unwrap(), true)
        .unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "2\n1 2 4 1 4\n2 2 3 6 2\n");
}

#[test]
fn test_json_model_exports_identically() {
    let model = qua9_grid(3, 2);
    let tmp = TempDir::new().unwrap();
    let model_path = tmp.path().join("model.json");
    write_model_json(&model, &model_path).unwrap();
    let loaded = read_model_json(&model_path).unwrap();

    let direct = tmp.path().join("direct");
    let via_json = tmp.path().join("via_json");
    Exporter::new(&model, all_files(&direct)).unwrap().export_mesh().unwrap();
    Exporter::new(&loaded, all_files(&via_json))
        .unwrap()
        .export_mesh()
        .unwrap();

    for artifact in ExportArtifact::ALL {
        let name = artifact.default_filename();
        let a = fs::read(direct.join(name)).ok();
        let b = fs::read(via_json.join(name)).ok();
        assert_eq!(a, b, "{} differs", name);
    }
}
