//! JSON mesh model files.
//!
//! The mesher hands its model over as a JSON document:
//!
//! ```text
//! {
//!   "nodes": [[0.0, 0.0, 0.0], ...],
//!   "topology": "QUA9",
//!   "elements": [[0, 2, 12, 10, 1, 7, 11, 5, 6], ...],
//!   "materials": [1, ...],
//!   "physical_groups": {
//!     "absorbing": { "edges": [{ "element": 0, "side": 3 }, ...] }
//!   },
//!   "nonconforming_interfaces": {
//!     "elements_a": [0], "elements_b": [1], "edges_a": [1], "edges_b": [3]
//!   }
//! }
//! ```
//!
//! Sides are integer codes (0 bottom, 1 right, 2 top, 3 left). `topology`,
//! `physical_groups` and `nonconforming_interfaces` may be omitted.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::mesh::{Model, ModelError};

/// Error type for model file I/O.
#[derive(Debug, Error)]
pub enum ModelFileError {
    /// File could not be opened or written.
    #[error("model file {}: {source}", path.display())]
    Io {
        /// The model file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File is not a valid model document.
    #[error("model file {}: {source}", path.display())]
    Json {
        /// The model file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The model parsed but violates an invariant.
    #[error("model file {}: {source}", path.display())]
    Invalid {
        /// The model file.
        path: PathBuf,
        /// Violated invariant.
        #[source]
        source: ModelError,
    },
}

/// Read and validate a model from a JSON file.
pub fn read_model_json(path: &Path) -> Result<Model, ModelFileError> {
    let file = File::open(path).map_err(|source| ModelFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model: Model =
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ModelFileError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    model.validate().map_err(|source| ModelFileError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(model)
}

/// Write a model to a JSON file.
pub fn write_model_json(model: &Model, path: &Path) -> Result<(), ModelFileError> {
    let io_err = |source| ModelFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, model).map_err(|source| ModelFileError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_err)?;
    Ok(())
}
