use serde::{Deserialize, Serialize};

/// Per-slot description of the packed coordinate buffer. Padding slots carry
/// `None` in every field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomMetadata {
    pub residue_index: Option<usize>,
    pub residue_name: Option<String>,
    pub atom_name: Option<String>,
    pub atom_type: Option<String>,
}

impl AtomMetadata {
    pub fn is_padding(&self) -> bool {
        self.residue_index.is_none()
    }
}

/// One directed residue-to-residue link. Every link is recorded in both
/// directions so it can be looked up from either endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMetadata {
    pub from_residue_index: usize,
    pub from_connection_name: String,
    pub to_residue_index: usize,
    pub to_connection_name: String,
}

/// A named torsion of one residue resolved to global atom indices; `-1`
/// marks an atom that could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorsionMetadata {
    pub residue_index: usize,
    pub name: String,
    pub atom_indices: [i64; 4],
}

impl TorsionMetadata {
    pub fn is_complete(&self) -> bool {
        self.atom_indices.iter().all(|&i| i >= 0)
    }
}
