use super::tables::{
    CANONICAL_RESIDUE_TYPES, MAX_N_CANONICAL_ATOMS, PDB_V2_ATOM_NAMES, PDB_V3_ATOM_NAMES,
    RESIDUE_TYPE_INDEX,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of the canonical layout. Serialized canonical forms carry it so that
/// stored integer indices can be checked against the table they refer to.
pub const CANONICAL_ORDERING_VERSION: u32 = 1;

/// Residue-type index assigned to residues whose name is not a canonical type.
pub const UNRECOGNIZED_RESIDUE_TYPE: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingConvention {
    /// Current PDB hydrogen names (`HB1`, `H1`).
    PdbV3,
    /// Historical PDB hydrogen names (`1HB`, `1H`).
    PdbV2,
}

impl NamingConvention {
    pub const ALL: [NamingConvention; 2] = [NamingConvention::PdbV3, NamingConvention::PdbV2];
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanonicalLookupError {
    #[error("Unknown residue type: '{0}'")]
    UnknownResidueType(String),
    #[error("Unknown atom '{atom}' for residue type '{residue}'")]
    UnknownAtom { residue: String, atom: String },
}

/// Handle over the fixed canonical residue and atom layout.
///
/// The layout is append-only: residue-type positions and per-residue atom
/// slots are a durable serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalOrdering;

impl CanonicalOrdering {
    pub fn new() -> Self {
        Self
    }

    pub fn version(&self) -> u32 {
        CANONICAL_ORDERING_VERSION
    }

    pub fn residue_types(&self) -> &'static [&'static str] {
        &CANONICAL_RESIDUE_TYPES
    }

    /// Width of every canonical per-residue coordinate row.
    pub fn max_n_canonical_atoms(&self) -> usize {
        MAX_N_CANONICAL_ATOMS
    }

    pub fn residue_type_index(&self, residue_name: &str) -> Result<usize, CanonicalLookupError> {
        RESIDUE_TYPE_INDEX
            .get(residue_name.trim())
            .copied()
            .ok_or_else(|| CanonicalLookupError::UnknownResidueType(residue_name.to_string()))
    }

    pub fn residue_type_name(&self, index: usize) -> Option<&'static str> {
        CANONICAL_RESIDUE_TYPES.get(index).copied()
    }

    pub fn atom_names(
        &self,
        residue_name: &str,
        convention: NamingConvention,
    ) -> Result<&'static [&'static str], CanonicalLookupError> {
        let table = match convention {
            NamingConvention::PdbV3 => &PDB_V3_ATOM_NAMES,
            NamingConvention::PdbV2 => &PDB_V2_ATOM_NAMES,
        };
        table
            .get(residue_name.trim())
            .copied()
            .ok_or_else(|| CanonicalLookupError::UnknownResidueType(residue_name.to_string()))
    }

    /// Returns the canonical atom slot of `atom_name` under one naming convention.
    /// Names are compared with surrounding whitespace removed.
    pub fn index_of(
        &self,
        residue_name: &str,
        atom_name: &str,
        convention: NamingConvention,
    ) -> Result<usize, CanonicalLookupError> {
        let atom_name = atom_name.trim();
        self.atom_names(residue_name, convention)?
            .iter()
            .position(|&name| name == atom_name)
            .ok_or_else(|| CanonicalLookupError::UnknownAtom {
                residue: residue_name.to_string(),
                atom: atom_name.to_string(),
            })
    }

    /// Returns the canonical atom slot of `atom_name` under whichever naming
    /// convention knows it, trying the current convention first.
    pub fn index_of_any(
        &self,
        residue_name: &str,
        atom_name: &str,
    ) -> Result<usize, CanonicalLookupError> {
        let mut last_err = None;
        for convention in NamingConvention::ALL {
            match self.index_of(residue_name, atom_name, convention) {
                Ok(index) => return Ok(index),
                Err(err @ CanonicalLookupError::UnknownResidueType(_)) => return Err(err),
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| CanonicalLookupError::UnknownAtom {
            residue: residue_name.to_string(),
            atom: atom_name.trim().to_string(),
        }))
    }
}
