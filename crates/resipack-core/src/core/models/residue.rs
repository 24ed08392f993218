use super::system::PackingError;
use crate::core::chemical::residue_type::ResidueType;
use crate::core::utils::geometry::nan_point;
use nalgebra::Point3;
use std::sync::Arc;

/// One residue instance: a shared residue-type template plus coordinates in
/// the template's atom order. Absent atoms carry NaN coordinates.
#[derive(Debug, Clone)]
pub struct Residue {
    pub residue_type: Arc<ResidueType>,
    pub chain_index: usize, // Residues in different chains are never linked
    /// Set when residues between this one and its predecessor are missing, so
    /// the two must not be linked even within one chain.
    pub chain_break: bool,
    coords: Vec<Point3<f64>>,
}

impl Residue {
    pub fn new(
        residue_type: Arc<ResidueType>,
        coords: Vec<Point3<f64>>,
    ) -> Result<Self, PackingError> {
        if coords.len() != residue_type.n_atoms() {
            return Err(PackingError::CoordinateCountMismatch {
                residue_name: residue_type.name.clone(),
                expected: residue_type.n_atoms(),
                actual: coords.len(),
            });
        }
        Ok(Self {
            residue_type,
            chain_index: 0,
            chain_break: false,
            coords,
        })
    }

    /// A residue with every atom absent.
    pub fn unplaced(residue_type: Arc<ResidueType>) -> Self {
        let coords = vec![nan_point(); residue_type.n_atoms()];
        Self {
            residue_type,
            chain_index: 0,
            chain_break: false,
            coords,
        }
    }

    pub fn with_chain_index(mut self, chain_index: usize) -> Self {
        self.chain_index = chain_index;
        self
    }

    pub fn with_chain_break(mut self, chain_break: bool) -> Self {
        self.chain_break = chain_break;
        self
    }

    pub fn name(&self) -> &str {
        &self.residue_type.name
    }

    #[inline]
    pub fn n_atoms(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[Point3<f64>] {
        &self.coords
    }

    pub fn atom_coord(&self, atom_name: &str) -> Option<&Point3<f64>> {
        self.residue_type
            .atom_index(atom_name)
            .map(|i| &self.coords[i])
    }

    /// Sets the coordinate of a named atom. Returns `false` if the residue type
    /// has no such atom.
    pub fn set_atom_coord(&mut self, atom_name: &str, position: Point3<f64>) -> bool {
        match self.residue_type.atom_index(atom_name) {
            Some(i) => {
                self.coords[i] = position;
                true
            }
            None => false,
        }
    }
}
