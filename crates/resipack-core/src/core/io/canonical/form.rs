use super::ordering::{CanonicalLookupError, CanonicalOrdering, UNRECOGNIZED_RESIDUE_TYPE};
use crate::core::chemical::database::ChemicalDatabase;
use crate::core::io::pdb::AtomRecord;
use crate::core::models::residue::Residue;
use crate::core::models::system::PackingError;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, instrument, warn};

#[derive(Debug, Error)]
pub enum CanonicalFormError {
    #[error("Shape mismatch for '{what}': expected {expected}, found {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Source residue-type index {0} is outside the source table")]
    UnknownSourceResidueType(usize),
    #[error("Canonical residue-type index {0} is not defined")]
    UnknownResidueType(i32),
    #[error("Canonical form uses ordering version {found}, this build provides {expected}")]
    VersionMismatch { expected: u32, found: u32 },
    #[error("Failed to build residue: {0}")]
    Residue(#[from] PackingError),
}

/// Serializable structure in canonical residue and atom indices.
///
/// Every per-residue row has `max_n_canonical_atoms` slots; absent atoms have
/// NaN coordinates and `false` presence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanonicalForm {
    pub ordering_version: u32,
    pub chain_id: Vec<i32>,
    pub res_types: Vec<i32>,
    pub coords: Vec<Vec<[f64; 3]>>,
    pub atom_is_present: Vec<Vec<bool>>,
}

impl CanonicalForm {
    fn with_residues(ordering: &CanonicalOrdering, n_res: usize) -> Self {
        let width = ordering.max_n_canonical_atoms();
        Self {
            ordering_version: ordering.version(),
            chain_id: vec![0; n_res],
            res_types: vec![UNRECOGNIZED_RESIDUE_TYPE; n_res],
            coords: vec![vec![[f64::NAN; 3]; width]; n_res],
            atom_is_present: vec![vec![false; width]; n_res],
        }
    }

    pub fn n_residues(&self) -> usize {
        self.res_types.len()
    }

    /// Checks the version stamp and that every table agrees on its shape.
    pub fn validate(&self, ordering: &CanonicalOrdering) -> Result<(), CanonicalFormError> {
        if self.ordering_version != ordering.version() {
            return Err(CanonicalFormError::VersionMismatch {
                expected: ordering.version(),
                found: self.ordering_version,
            });
        }
        let n_res = self.res_types.len();
        check_len("chain_id", n_res, self.chain_id.len())?;
        check_len("coords", n_res, self.coords.len())?;
        check_len("atom_is_present", n_res, self.atom_is_present.len())?;
        let width = ordering.max_n_canonical_atoms();
        for (row, present) in self.coords.iter().zip(&self.atom_is_present) {
            check_len("coords row", width, row.len())?;
            check_len("atom_is_present row", width, present.len())?;
        }
        Ok(())
    }

    /// Converts the canonical form into residues of a chemical database.
    ///
    /// Unrecognized residues and residue types the database lacks are skipped
    /// with a warning; the next residue of the same chain is marked as a chain
    /// break so the gap is never bonded across.
    pub fn to_residues(
        &self,
        ordering: &CanonicalOrdering,
        chemical_db: &ChemicalDatabase,
    ) -> Result<Vec<Residue>, CanonicalFormError> {
        self.validate(ordering)?;

        let mut chain_rank: HashMap<i32, usize> = HashMap::new();
        let mut residues = Vec::with_capacity(self.n_residues());
        let mut previous_chain: Option<i32> = None;
        let mut skipped = false;
        for (i, &res_type) in self.res_types.iter().enumerate() {
            if res_type < 0 {
                warn!(residue = i, "Skipping unrecognized residue.");
                skipped = true;
                continue;
            }
            let name = ordering
                .residue_type_name(res_type as usize)
                .ok_or(CanonicalFormError::UnknownResidueType(res_type))?;
            let Some(residue_type) = chemical_db.get(name) else {
                warn!(residue = i, name, "Residue type is missing from the chemical database.");
                skipped = true;
                continue;
            };
            let chain_break = skipped && previous_chain == Some(self.chain_id[i]);
            previous_chain = Some(self.chain_id[i]);
            skipped = false;

            let coords = residue_type
                .atoms
                .iter()
                .map(|atom| match ordering.index_of_any(name, &atom.name) {
                    Ok(slot) if self.atom_is_present[i][slot] => {
                        let [x, y, z] = self.coords[i][slot];
                        Point3::new(x, y, z)
                    }
                    _ => Point3::new(f64::NAN, f64::NAN, f64::NAN),
                })
                .collect();
            let next_rank = chain_rank.len();
            let chain = *chain_rank.entry(self.chain_id[i]).or_insert(next_rank);
            residues.push(
                Residue::new(residue_type.clone(), coords)?
                    .with_chain_index(chain)
                    .with_chain_break(chain_break),
            );
        }
        Ok(residues)
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<(), CanonicalFormError> {
    if expected == actual {
        Ok(())
    } else {
        Err(CanonicalFormError::ShapeMismatch {
            what,
            expected,
            actual,
        })
    }
}

/// Builds a canonical form from parsed atom records.
///
/// Residues are keyed by chain index, residue number and insertion code in
/// first-seen order; chain ids are numbered by first-seen chain.
#[instrument(skip_all, name = "canonical_form_from_records")]
pub fn canonical_form_from_records(
    ordering: &CanonicalOrdering,
    records: &[AtomRecord],
) -> CanonicalForm {
    let mut residue_index: HashMap<(usize, i64, &str), usize> = HashMap::new();
    let mut residue_of_record = Vec::with_capacity(records.len());
    for record in records {
        let next = residue_index.len();
        let index = *residue_index
            .entry((record.chaini, record.resi, record.insert.as_str()))
            .or_insert(next);
        residue_of_record.push(index);
    }

    let mut form = CanonicalForm::with_residues(ordering, residue_index.len());
    let mut chain_rank: HashMap<usize, i32> = HashMap::new();
    let mut seen = vec![false; residue_index.len()];

    for (record, &r) in records.iter().zip(&residue_of_record) {
        if !seen[r] {
            seen[r] = true;
            let next_rank = chain_rank.len() as i32;
            form.chain_id[r] = *chain_rank.entry(record.chaini).or_insert(next_rank);
            match ordering.residue_type_index(&record.resn) {
                Ok(t) => form.res_types[r] = t as i32,
                Err(_) => warn!(
                    residue = record.resn.as_str(),
                    resi = record.resi,
                    "Unrecognized residue type."
                ),
            }
        }
        if form.res_types[r] == UNRECOGNIZED_RESIDUE_TYPE {
            continue;
        }
        match ordering.index_of_any(&record.resn, &record.atomn) {
            Ok(slot) => {
                let p = record.position;
                form.coords[r][slot] = [p.x, p.y, p.z];
                form.atom_is_present[r][slot] = true;
            }
            Err(CanonicalLookupError::UnknownAtom { residue, atom }) => {
                debug!(
                    residue = residue.as_str(),
                    atom = atom.as_str(),
                    "Skipping non-canonical atom."
                );
            }
            Err(CanonicalLookupError::UnknownResidueType(_)) => {}
        }
    }
    form
}

/// Precomputed translation from an external structure source's residue-type
/// and per-residue atom layout into canonical indices.
#[derive(Debug, Clone)]
pub struct SourceMapping {
    residue_types: Vec<i32>,
    atom_slots: Vec<Vec<Option<usize>>>,
}

impl SourceMapping {
    /// `source_atom_names[t]` lists the source atom slots of source residue
    /// type `t`; empty names mark unused slots.
    pub fn new(
        ordering: &CanonicalOrdering,
        source_residue_names: &[&str],
        source_atom_names: &[&[&str]],
    ) -> Result<Self, CanonicalFormError> {
        check_len("source_atom_names", source_residue_names.len(), source_atom_names.len())?;

        let mut residue_types = Vec::with_capacity(source_residue_names.len());
        let mut atom_slots = Vec::with_capacity(source_residue_names.len());
        for (&resn, &atoms) in source_residue_names.iter().zip(source_atom_names) {
            match ordering.residue_type_index(resn) {
                Ok(t) => {
                    residue_types.push(t as i32);
                    atom_slots.push(
                        atoms
                            .iter()
                            .map(|atomn| {
                                if atomn.trim().is_empty() {
                                    None
                                } else {
                                    ordering.index_of_any(resn, atomn).ok()
                                }
                            })
                            .collect(),
                    );
                }
                Err(_) => {
                    residue_types.push(UNRECOGNIZED_RESIDUE_TYPE);
                    atom_slots.push(vec![None; atoms.len()]);
                }
            }
        }
        Ok(Self {
            residue_types,
            atom_slots,
        })
    }

    pub fn canonical_residue_type(&self, source_type: usize) -> Option<i32> {
        self.residue_types.get(source_type).copied()
    }

    pub fn canonical_atom_slot(&self, source_type: usize, source_atom: usize) -> Option<usize> {
        self.atom_slots.get(source_type)?.get(source_atom).copied().flatten()
    }

    /// Translates one structure from the source layout.
    ///
    /// `positions[r][k]` is the coordinate of source atom slot `k` of residue
    /// `r`; `chain_index[r]` is copied through unchanged.
    pub fn canonical_form_from_source(
        &self,
        ordering: &CanonicalOrdering,
        aatype: &[usize],
        positions: &[Vec<[f64; 3]>],
        chain_index: &[i32],
    ) -> Result<CanonicalForm, CanonicalFormError> {
        check_len("positions", aatype.len(), positions.len())?;
        check_len("chain_index", aatype.len(), chain_index.len())?;

        let mut form = CanonicalForm::with_residues(ordering, aatype.len());
        for (r, (&source_type, row)) in aatype.iter().zip(positions).enumerate() {
            let res_type = self
                .canonical_residue_type(source_type)
                .ok_or(CanonicalFormError::UnknownSourceResidueType(source_type))?;
            form.res_types[r] = res_type;
            form.chain_id[r] = chain_index[r];
            for (k, xyz) in row.iter().enumerate() {
                if let Some(slot) = self.canonical_atom_slot(source_type, k) {
                    form.coords[r][slot] = *xyz;
                    form.atom_is_present[r][slot] = xyz.iter().all(|c| c.is_finite());
                }
            }
        }
        Ok(form)
    }
}
