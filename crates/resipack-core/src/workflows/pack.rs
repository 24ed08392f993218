use super::WorkflowError;
use crate::core::chemical::database::ChemicalDatabase;
use crate::core::io::pdb::{AtomRecord, PdbFile};
use crate::core::io::residues::ResidueReader;
use crate::core::io::traits::StructureFile;
use crate::core::models::system::PackedResidueSystem;
use std::path::Path;
use tracing::{info, instrument};

/// Counts describing one packed system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackSummary {
    pub n_residues: usize,
    pub n_chains: usize,
    pub system_size: usize,
    pub n_atoms: usize,
    pub n_bonds: usize,
    pub n_connections: usize,
    pub n_torsions: usize,
    pub n_complete_torsions: usize,
}

impl PackSummary {
    pub fn of(system: &PackedResidueSystem) -> Self {
        let mut chains = system.chain_indices().to_vec();
        chains.dedup();
        Self {
            n_residues: system.n_residues(),
            n_chains: chains.len(),
            system_size: system.system_size(),
            n_atoms: system.atom_metadata().iter().filter(|m| !m.is_padding()).count(),
            n_bonds: system.bonds().len(),
            n_connections: system.connection_metadata().len(),
            n_torsions: system.torsion_metadata().len(),
            n_complete_torsions: system
                .torsion_metadata()
                .iter()
                .filter(|t| t.is_complete())
                .count(),
        }
    }
}

/// Groups atom records into residues and packs them.
#[instrument(skip_all, name = "pack_workflow", fields(records = records.len(), block_size))]
pub fn run(
    records: &[AtomRecord],
    chemical_db: &ChemicalDatabase,
    block_size: usize,
) -> Result<PackedResidueSystem, WorkflowError> {
    let residues = ResidueReader::new(chemical_db).read(records);
    let system = PackedResidueSystem::from_residues(&residues, block_size)?;
    info!(
        residues = system.n_residues(),
        system_size = system.system_size(),
        "Packed residue system."
    );
    Ok(system)
}

pub fn run_from_path(
    path: &Path,
    chemical_db: &ChemicalDatabase,
    block_size: usize,
) -> Result<PackedResidueSystem, WorkflowError> {
    let records = PdbFile::read_from_path(path)?;
    run(&records, chemical_db, block_size)
}

pub fn write_pdb(system: &PackedResidueSystem, path: &Path) -> Result<(), WorkflowError> {
    PdbFile::write_to_path(&system.to_atom_records(), path)?;
    Ok(())
}
