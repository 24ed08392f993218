//! # Core Models Module
//!
//! Residue instances and the packed residue system built from them.
//!
//! ## Overview
//!
//! A [`residue::Residue`] pairs a shared residue-type template with coordinates
//! in template atom order. [`system::PackedResidueSystem`] lays a sequence of
//! residues out in one block-aligned, NaN-padded coordinate buffer and derives
//! the global indexing every score term consumes:
//!
//! - **Atom metadata** - residue index, residue name, atom name and atom type per buffer slot
//! - **Bonds** - intra-residue bonds offset into the buffer, plus one bond per linked connection
//! - **Connections** - `up`/`down` links between adjacent residues of one chain, in both directions
//! - **Torsions** - named four-atom paths resolved to global indices, `-1` where unresolved
//!
//! ## Usage
//!
//! ```ignore
//! use resipack::core::chemical::database::ChemicalDatabase;
//! use resipack::core::models::system::{DEFAULT_BLOCK_SIZE, PackedResidueSystem};
//!
//! let db = ChemicalDatabase::bundled()?;
//! let system = PackedResidueSystem::from_residues(&residues, DEFAULT_BLOCK_SIZE)?;
//! let phi = &system.torsion_metadata()[0];
//! ```

#[cfg(test)]
pub(crate) mod fixtures;
pub mod metadata;
pub mod residue;
pub mod system;
