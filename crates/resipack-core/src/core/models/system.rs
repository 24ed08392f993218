use super::metadata::{AtomMetadata, ConnectionMetadata, TorsionMetadata};
use super::residue::Residue;
use crate::core::chemical::residue_type::{DOWNSTREAM_CONNECTION, ResidueType, UPSTREAM_CONNECTION};
use crate::core::io::pdb::AtomRecord;
use crate::core::utils::geometry::{is_finite_point, nan_point};
use nalgebra::Point3;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

pub const DEFAULT_BLOCK_SIZE: usize = 8;

/// Global atom index of an atom that could not be resolved. Read through
/// [`PackedResidueSystem::coord`] it lands on the last buffer slot, which is
/// always padding.
pub const MISSING_ATOM_INDEX: i64 = -1;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PackingError {
    #[error("Cannot pack an empty residue sequence")]
    EmptySystem,
    #[error("Block size must be positive (got {0})")]
    InvalidBlockSize(usize),
    #[error(
        "Last residue has {n_atoms} atoms, an exact multiple of block size {block_size}; no padding slot remains for missing-atom indices"
    )]
    MissingSentinelSlot { n_atoms: usize, block_size: usize },
    #[error("Residue '{residue_name}' expects {expected} coordinates, got {actual}")]
    CoordinateCountMismatch {
        residue_name: String,
        expected: usize,
        actual: usize,
    },
    #[error(
        "Residue {residue_index} ('{residue_name}') references connection '{connection}' that its residue type does not define"
    )]
    TopologyIntegrity {
        residue_index: usize,
        residue_name: String,
        connection: String,
    },
}

/// Block-aligned range of one residue inside the coordinate buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResidueSegment {
    pub start: usize,
    pub n_atoms: usize,
    pub len: usize, // n_atoms rounded up to a multiple of the block size
}

impl ResidueSegment {
    #[inline]
    pub fn atom_range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.n_atoms
    }
}

/// One structure's atoms laid out in a single NaN-padded coordinate buffer.
///
/// Residues do not own coordinates; each is a `(start, n_atoms)` segment of
/// the shared buffer, so edits through [`Self::residue_coords_mut`] and
/// [`Self::coords_mut`] are the same edit.
#[derive(Debug, Clone)]
pub struct PackedResidueSystem {
    block_size: usize,
    residue_types: Vec<Arc<ResidueType>>,
    chain_indices: Vec<usize>,
    segments: Vec<ResidueSegment>,
    coords: Vec<Point3<f64>>,
    bonds: Vec<[usize; 2]>,
    atom_metadata: Vec<AtomMetadata>,
    torsion_metadata: Vec<TorsionMetadata>,
    connection_metadata: Vec<ConnectionMetadata>,
}

impl PackedResidueSystem {
    #[instrument(
        skip_all,
        name = "pack_residues",
        fields(residues = residues.len(), block_size = block_size)
    )]
    pub fn from_residues(residues: &[Residue], block_size: usize) -> Result<Self, PackingError> {
        let last = residues.last().ok_or(PackingError::EmptySystem)?;
        if block_size == 0 {
            return Err(PackingError::InvalidBlockSize(block_size));
        }
        if last.n_atoms() % block_size == 0 {
            return Err(PackingError::MissingSentinelSlot {
                n_atoms: last.n_atoms(),
                block_size,
            });
        }

        let segments = allocate_segments(residues, block_size);
        let system_size = segments.last().map_or(0, |s| s.start + s.len);

        let mut coords = vec![nan_point(); system_size];
        let mut atom_metadata = vec![AtomMetadata::default(); system_size];
        for (r, (residue, segment)) in residues.iter().zip(&segments).enumerate() {
            coords[segment.atom_range()].copy_from_slice(residue.coords());
            for (atom, slot) in residue.residue_type.atoms.iter().zip(segment.atom_range()) {
                atom_metadata[slot] = AtomMetadata {
                    residue_index: Some(r),
                    residue_name: Some(residue.residue_type.name.clone()),
                    atom_name: Some(atom.name.clone()),
                    atom_type: Some(atom.atom_type.clone()),
                };
            }
        }

        let connection_metadata = link_adjacent_residues(residues);
        let connection_targets: HashMap<(usize, &str), usize> = connection_metadata
            .iter()
            .map(|c| ((c.from_residue_index, c.from_connection_name.as_str()), c.to_residue_index))
            .collect();

        let mut bonds: Vec<[usize; 2]> = Vec::new();
        for (residue, segment) in residues.iter().zip(&segments) {
            bonds.extend(
                residue
                    .residue_type
                    .bonds
                    .iter()
                    .map(|[a, b]| [a + segment.start, b + segment.start]),
            );
        }
        for connection in &connection_metadata {
            let from = connection_atom_global(
                residues,
                &segments,
                connection.from_residue_index,
                &connection.from_connection_name,
            )?;
            let to = connection_atom_global(
                residues,
                &segments,
                connection.to_residue_index,
                &connection.to_connection_name,
            )?;
            bonds.push([from, to]);
        }

        let mut torsion_metadata = Vec::new();
        for (r, residue) in residues.iter().enumerate() {
            for torsion in &residue.residue_type.torsions {
                let mut atom_indices = [MISSING_ATOM_INDEX; 4];
                for (slot, spec) in atom_indices.iter_mut().zip(&torsion.atoms) {
                    let target = match &spec.connection {
                        None => Some(r),
                        Some(name) => {
                            if !residue.residue_type.has_connection(name) {
                                return Err(PackingError::TopologyIntegrity {
                                    residue_index: r,
                                    residue_name: residue.residue_type.name.clone(),
                                    connection: name.clone(),
                                });
                            }
                            connection_targets.get(&(r, name.as_str())).copied()
                        }
                    };
                    if let Some(target) = target {
                        if let Some(local) = residues[target].residue_type.atom_index(&spec.atom) {
                            *slot = (segments[target].start + local) as i64;
                        }
                    }
                }
                torsion_metadata.push(TorsionMetadata {
                    residue_index: r,
                    name: torsion.name.clone(),
                    atom_indices,
                });
            }
        }

        debug!(
            system_size,
            bonds = bonds.len(),
            connections = connection_metadata.len(),
            torsions = torsion_metadata.len(),
            "Packed residue system."
        );

        Ok(Self {
            block_size,
            residue_types: residues.iter().map(|r| r.residue_type.clone()).collect(),
            chain_indices: residues.iter().map(|r| r.chain_index).collect(),
            segments,
            coords,
            bonds,
            atom_metadata,
            torsion_metadata,
            connection_metadata,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn system_size(&self) -> usize {
        self.coords.len()
    }

    pub fn n_residues(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[ResidueSegment] {
        &self.segments
    }

    pub fn residue_starts(&self) -> Vec<usize> {
        self.segments.iter().map(|s| s.start).collect()
    }

    pub fn residue_types(&self) -> &[Arc<ResidueType>] {
        &self.residue_types
    }

    pub fn chain_indices(&self) -> &[usize] {
        &self.chain_indices
    }

    pub fn coords(&self) -> &[Point3<f64>] {
        &self.coords
    }

    pub fn coords_mut(&mut self) -> &mut [Point3<f64>] {
        &mut self.coords
    }

    /// Reads one buffer slot. Negative indices count from the end, so
    /// [`MISSING_ATOM_INDEX`] reads the trailing padding slot.
    pub fn coord(&self, index: i64) -> Option<&Point3<f64>> {
        let resolved = if index < 0 {
            self.coords.len().checked_sub(index.unsigned_abs() as usize)?
        } else {
            index as usize
        };
        self.coords.get(resolved)
    }

    pub fn residue_coords(&self, residue_index: usize) -> Option<&[Point3<f64>]> {
        let segment = self.segments.get(residue_index)?;
        Some(&self.coords[segment.atom_range()])
    }

    pub fn residue_coords_mut(&mut self, residue_index: usize) -> Option<&mut [Point3<f64>]> {
        let segment = *self.segments.get(residue_index)?;
        Some(&mut self.coords[segment.atom_range()])
    }

    /// Snapshot of the residues with their current buffer coordinates.
    pub fn residues(&self) -> Vec<Residue> {
        self.residue_types
            .iter()
            .zip(&self.segments)
            .zip(&self.chain_indices)
            .filter_map(|((rt, segment), &chain)| {
                Residue::new(rt.clone(), self.coords[segment.atom_range()].to_vec())
                    .ok()
                    .map(|r| r.with_chain_index(chain))
            })
            .collect()
    }

    pub fn bonds(&self) -> &[[usize; 2]] {
        &self.bonds
    }

    pub fn atom_metadata(&self) -> &[AtomMetadata] {
        &self.atom_metadata
    }

    pub fn torsion_metadata(&self) -> &[TorsionMetadata] {
        &self.torsion_metadata
    }

    pub fn connection_metadata(&self) -> &[ConnectionMetadata] {
        &self.connection_metadata
    }

    pub fn atom_types(&self) -> Vec<Option<String>> {
        self.atom_metadata.iter().map(|m| m.atom_type.clone()).collect()
    }

    /// Atom types with every slot whose coordinates are not finite set to `None`.
    pub fn atom_types_with_missing_dropped(&self) -> Vec<Option<String>> {
        self.atom_metadata
            .iter()
            .zip(&self.coords)
            .map(|(m, p)| if is_finite_point(p) { m.atom_type.clone() } else { None })
            .collect()
    }

    /// Atom records for every present atom, numbered from 1 in buffer order.
    /// Residues are numbered from 1 and chains lettered from `A`.
    pub fn to_atom_records(&self) -> Vec<AtomRecord> {
        let mut records = Vec::new();
        for (r, (rt, segment)) in self.residue_types.iter().zip(&self.segments).enumerate() {
            let chaini = self.chain_indices[r];
            for (atom, slot) in rt.atoms.iter().zip(segment.atom_range()) {
                let position = self.coords[slot];
                if !is_finite_point(&position) {
                    continue;
                }
                records.push(AtomRecord {
                    model: String::new(),
                    modeli: 0,
                    chaini,
                    record_name: "ATOM".to_string(),
                    atomi: records.len() as i64 + 1,
                    atomn: atom.name.clone(),
                    location: String::new(),
                    resn: rt.name.clone(),
                    chain: chain_letter(chaini).to_string(),
                    resi: r as i64 + 1,
                    insert: String::new(),
                    position,
                    occupancy: 1.0,
                    b: 0.0,
                });
            }
        }
        records
    }
}

fn allocate_segments(residues: &[Residue], block_size: usize) -> Vec<ResidueSegment> {
    let mut start = 0;
    residues
        .iter()
        .map(|residue| {
            let n_atoms = residue.n_atoms();
            let len = n_atoms.div_ceil(block_size) * block_size;
            let segment = ResidueSegment { start, n_atoms, len };
            start += len;
            segment
        })
        .collect()
}

fn link_adjacent_residues(residues: &[Residue]) -> Vec<ConnectionMetadata> {
    let mut rows = Vec::new();
    for (i, pair) in residues.windows(2).enumerate() {
        let (prev, next) = (&pair[0], &pair[1]);
        let linkable = prev.residue_type.has_connection(UPSTREAM_CONNECTION)
            && next.residue_type.has_connection(DOWNSTREAM_CONNECTION)
            && prev.chain_index == next.chain_index
            && !next.chain_break;
        if !linkable {
            debug!(
                residue = i,
                prev = prev.name(),
                next = next.name(),
                "Adjacent residues are not linked."
            );
            continue;
        }
        rows.push(ConnectionMetadata {
            from_residue_index: i,
            from_connection_name: UPSTREAM_CONNECTION.to_string(),
            to_residue_index: i + 1,
            to_connection_name: DOWNSTREAM_CONNECTION.to_string(),
        });
        rows.push(ConnectionMetadata {
            from_residue_index: i + 1,
            from_connection_name: DOWNSTREAM_CONNECTION.to_string(),
            to_residue_index: i,
            to_connection_name: UPSTREAM_CONNECTION.to_string(),
        });
    }
    rows
}

fn connection_atom_global(
    residues: &[Residue],
    segments: &[ResidueSegment],
    residue_index: usize,
    connection: &str,
) -> Result<usize, PackingError> {
    let residue_type = &residues[residue_index].residue_type;
    residue_type
        .connection_atom(connection)
        .map(|local| segments[residue_index].start + local)
        .ok_or_else(|| PackingError::TopologyIntegrity {
            residue_index,
            residue_name: residue_type.name.clone(),
            connection: connection.to_string(),
        })
}

fn chain_letter(chain_index: usize) -> char {
    char::from(b'A' + (chain_index % 26) as u8)
}
