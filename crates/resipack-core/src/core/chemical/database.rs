use super::residue_type::{ResidueType, ResidueTypeDef};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const BUNDLED_CHEMICAL_DATABASE: &str = include_str!("../../../data/chemical.toml");
const BUNDLED_SOURCE: &str = "<bundled>";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ChemicalDatabaseFile {
    residues: Vec<ResidueTypeDef>,
}

/// Read-only lookup of residue-type templates keyed by residue name.
#[derive(Debug, Clone, Default)]
pub struct ChemicalDatabase {
    residues: HashMap<String, Arc<ResidueType>>,
}

impl ChemicalDatabase {
    pub fn load(path: &Path) -> Result<Self, ChemicalError> {
        let content = std::fs::read_to_string(path).map_err(|e| ChemicalError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ChemicalError> {
        Self::parse(content, BUNDLED_SOURCE)
    }

    /// The default database of polymer residues shipped with the crate.
    pub fn bundled() -> Result<Self, ChemicalError> {
        Self::from_toml_str(BUNDLED_CHEMICAL_DATABASE)
    }

    fn parse(content: &str, source_name: &str) -> Result<Self, ChemicalError> {
        let file: ChemicalDatabaseFile = toml::from_str(content).map_err(|e| ChemicalError::Toml {
            path: source_name.to_string(),
            source: e,
        })?;

        let mut residues = HashMap::with_capacity(file.residues.len());
        for def in file.residues {
            let residue_type = ResidueType::from_def(def)?;
            let name = residue_type.name.clone();
            if residues.insert(name.clone(), Arc::new(residue_type)).is_some() {
                return Err(ChemicalError::DuplicateResidueType(name));
            }
        }
        debug!(
            source = source_name,
            residue_types = residues.len(),
            "Loaded chemical database."
        );
        Ok(Self { residues })
    }

    pub fn get(&self, residue_name: &str) -> Option<&Arc<ResidueType>> {
        self.residues.get(residue_name)
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Residue names in sorted order.
    pub fn residue_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.residues.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Error)]
pub enum ChemicalError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Residue type '{residue}' references unknown atom '{atom}' in a {context}")]
    UnknownAtom {
        residue: String,
        atom: String,
        context: &'static str,
    },
    #[error("Residue type '{0}' is defined more than once")]
    DuplicateResidueType(String),
    #[error("Residue type '{residue}' defines atom '{atom}' more than once")]
    DuplicateAtom { residue: String, atom: String },
}
