//! # Workflows Module
//!
//! End-to-end procedures over the `core` and `engine` layers, used directly by
//! library users and by the command-line tool.
//!
//! ## Architecture
//!
//! - **Packing** ([`pack`]) - PDB records to a [`PackedResidueSystem`](crate::core::models::system::PackedResidueSystem), and back to PDB text
//! - **Scoring** ([`score`]) - Per-term and weighted energies for a packed system
//! - **Canonical form** ([`canonical`]) - PDB records to a versioned canonical form, its TOML
//!   persistence, and the way back to a packed system
//!
//! Each workflow returns a [`WorkflowError`] that wraps the error of whichever
//! layer failed.

use crate::core::chemical::database::ChemicalError;
use crate::core::forcefield::params::ParamLoadError;
use crate::core::io::canonical::form::CanonicalFormError;
use crate::core::io::pdb::PdbError;
use crate::core::models::system::PackingError;
use crate::engine::error::EngineError;
use thiserror::Error;

pub mod canonical;
pub mod pack;
pub mod score;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Structure file error: {0}")]
    Pdb(#[from] PdbError),
    #[error("Chemical database error: {0}")]
    Chemical(#[from] ChemicalError),
    #[error("Parameter database error: {0}")]
    Parameters(#[from] ParamLoadError),
    #[error("Packing failed: {0}")]
    Packing(#[from] PackingError),
    #[error("Canonical form error: {0}")]
    Canonical(#[from] CanonicalFormError),
    #[error("Scoring failed: {0}")]
    Engine(#[from] EngineError),
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    TomlDe {
        path: String,
        source: toml::de::Error,
    },
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}
