//! Provides input/output functionality for structure files.
//!
//! This module contains the fixed-column PDB reader and writer, the grouping of
//! parsed atom records into chemical residues, and the canonical ordering used
//! to exchange structures with external sources through stable integer
//! indices.

pub mod canonical;
pub mod pdb;
pub mod residues;
pub mod traits;
