use super::WorkflowError;
use crate::core::chemical::database::ChemicalDatabase;
use crate::core::io::canonical::form::{CanonicalForm, canonical_form_from_records};
use crate::core::io::canonical::ordering::CanonicalOrdering;
use crate::core::io::pdb::AtomRecord;
use crate::core::models::system::PackedResidueSystem;
use std::path::Path;
use tracing::{info, instrument};

#[instrument(skip_all, name = "canonical_workflow", fields(records = records.len()))]
pub fn run(records: &[AtomRecord]) -> CanonicalForm {
    let ordering = CanonicalOrdering::new();
    let form = canonical_form_from_records(&ordering, records);
    let recognized = form.res_types.iter().filter(|&&t| t >= 0).count();
    info!(
        residues = form.n_residues(),
        recognized,
        "Built canonical form."
    );
    form
}

pub fn write_toml(form: &CanonicalForm, path: &Path) -> Result<(), WorkflowError> {
    let content = toml::to_string(form)?;
    std::fs::write(path, content).map_err(|e| WorkflowError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })
}

/// Reads a canonical form and checks it against this build's ordering.
pub fn read_toml(path: &Path) -> Result<CanonicalForm, WorkflowError> {
    let content = std::fs::read_to_string(path).map_err(|e| WorkflowError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let form: CanonicalForm = toml::from_str(&content).map_err(|e| WorkflowError::TomlDe {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    form.validate(&CanonicalOrdering::new())?;
    Ok(form)
}

pub fn to_system(
    form: &CanonicalForm,
    chemical_db: &ChemicalDatabase,
    block_size: usize,
) -> Result<PackedResidueSystem, WorkflowError> {
    let residues = form.to_residues(&CanonicalOrdering::new(), chemical_db)?;
    Ok(PackedResidueSystem::from_residues(&residues, block_size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::canonical::form::CanonicalFormError;
    use crate::core::models::fixtures::{bundled_db, peptide};
    use tempfile::tempdir;

    fn records() -> Vec<AtomRecord> {
        let db = bundled_db();
        PackedResidueSystem::from_residues(&peptide(&db, &["ALA", "SER", "GLY"]), 8)
            .unwrap()
            .to_atom_records()
    }

    #[test]
    fn form_round_trips_through_toml_and_back_to_a_system() {
        let db = bundled_db();
        let original =
            PackedResidueSystem::from_residues(&peptide(&db, &["ALA", "SER", "GLY"]), 8).unwrap();
        let form = run(&original.to_atom_records());
        assert_eq!(form.n_residues(), 3);

        let dir = tempdir().unwrap();
        let path = dir.path().join("form.toml");
        write_toml(&form, &path).unwrap();
        let restored = read_toml(&path).unwrap();
        assert_eq!(restored.res_types, form.res_types);

        let system = to_system(&restored, &db, 8).unwrap();
        assert_eq!(system.system_size(), original.system_size());
        for (a, b) in original.coords().iter().zip(system.coords()) {
            if a.x.is_nan() {
                assert!(b.x.is_nan());
            } else {
                assert!((a - b).norm() < 1e-3);
            }
        }
    }

    #[test]
    fn read_rejects_a_form_from_another_ordering_version() {
        let mut form = run(&records());
        form.ordering_version += 1;
        let dir = tempdir().unwrap();
        let path = dir.path().join("future.toml");
        write_toml(&form, &path).unwrap();

        assert!(matches!(
            read_toml(&path),
            Err(WorkflowError::Canonical(CanonicalFormError::VersionMismatch { .. }))
        ));
    }

    #[test]
    fn read_reports_missing_and_malformed_files() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_toml(&dir.path().join("absent.toml")),
            Err(WorkflowError::Io { .. })
        ));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not toml").unwrap();
        assert!(matches!(read_toml(&path), Err(WorkflowError::TomlDe { .. })));
    }
}
