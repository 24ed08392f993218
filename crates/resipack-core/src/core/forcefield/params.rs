use crate::core::topology::hbond::HBondPatterns;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

const BUNDLED_SCORING: &str = include_str!("../../../data/scoring.toml");
const BUNDLED_PARTIAL_CHARGES: &str = include_str!("../../../data/partial_charges.csv");
const BUNDLED_SOURCE: &str = "<bundled>";

fn default_lk_cutoff() -> f64 {
    6.0
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ElecParams {
    pub dielectric: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LjLkTypeParams {
    pub lj_radius: f64,
    pub lj_wdepth: f64,
    pub lk_dgfree: f64,
    pub lk_lambda: f64,
    pub lk_volume: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LjLkParams {
    #[serde(default = "default_lk_cutoff")]
    pub lk_cutoff: f64,
    pub atom_types: HashMap<String, LjLkTypeParams>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HBondPairParams {
    pub donor_type: String,
    pub acceptor_type: String,
    pub equilibrium_distance: f64,
    pub well_depth: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct HBondParams {
    #[serde(default)]
    pub atom_groups: HBondPatterns,
    #[serde(default)]
    pub pair_parameters: Vec<HBondPairParams>,
}

impl HBondParams {
    pub fn pair(&self, donor_type: &str, acceptor_type: &str) -> Option<&HBondPairParams> {
        self.pair_parameters
            .iter()
            .find(|p| p.donor_type == donor_type && p.acceptor_type == acceptor_type)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BondLengthParams {
    pub atom_types: [String; 2],
    pub x0: f64,
    pub k: f64,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CartBondedParams {
    #[serde(default)]
    pub lengths: Vec<BondLengthParams>,
}

impl CartBondedParams {
    /// Finds the bond-length parameters for an unordered pair of atom types.
    pub fn length(&self, type_a: &str, type_b: &str) -> Option<&BondLengthParams> {
        self.lengths.iter().find(|p| {
            let [t0, t1] = &p.atom_types;
            (t0 == type_a && t1 == type_b) || (t0 == type_b && t1 == type_a)
        })
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OmegaParams {
    pub k: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringParams {
    pub elec: ElecParams,
    pub ljlk: LjLkParams,
    #[serde(default)]
    pub hbond: HBondParams,
    #[serde(default)]
    pub cartbonded: CartBondedParams,
    pub omega: OmegaParams,
}

#[derive(Debug, Deserialize)]
struct PartialChargeRecord {
    res: String,
    atom: String,
    charge: f64,
}

/// Scoring parameters plus per-(residue, atom) partial charges.
#[derive(Debug, Clone)]
pub struct ParameterDatabase {
    pub scoring: ScoringParams,
    pub partial_charges: HashMap<(String, String), f64>,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("CSV parsing error for '{path}': {source}")]
    Csv { path: String, source: csv::Error },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl ParameterDatabase {
    pub fn load(scoring_path: &Path, partial_charges_path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(scoring_path).map_err(|e| ParamLoadError::Io {
            path: scoring_path.to_string_lossy().to_string(),
            source: e,
        })?;
        let scoring = Self::parse_scoring(&content, &scoring_path.to_string_lossy())?;

        let file = std::fs::File::open(partial_charges_path).map_err(|e| ParamLoadError::Io {
            path: partial_charges_path.to_string_lossy().to_string(),
            source: e,
        })?;
        let partial_charges =
            Self::parse_partial_charges(file, &partial_charges_path.to_string_lossy())?;

        Ok(Self {
            scoring,
            partial_charges,
        })
    }

    pub fn from_sources(
        scoring_toml: &str,
        partial_charges_csv: &str,
    ) -> Result<Self, ParamLoadError> {
        Ok(Self {
            scoring: Self::parse_scoring(scoring_toml, BUNDLED_SOURCE)?,
            partial_charges: Self::parse_partial_charges(
                partial_charges_csv.as_bytes(),
                BUNDLED_SOURCE,
            )?,
        })
    }

    /// Parameters for the residue types of
    /// [`ChemicalDatabase::bundled`](crate::core::chemical::database::ChemicalDatabase::bundled).
    pub fn bundled() -> Result<Self, ParamLoadError> {
        Self::from_sources(BUNDLED_SCORING, BUNDLED_PARTIAL_CHARGES)
    }

    pub fn partial_charge(&self, residue_name: &str, atom_name: &str) -> Option<f64> {
        self.partial_charges
            .get(&(residue_name.to_string(), atom_name.to_string()))
            .copied()
    }

    fn parse_scoring(content: &str, source_name: &str) -> Result<ScoringParams, ParamLoadError> {
        toml::from_str(content).map_err(|e| ParamLoadError::Toml {
            path: source_name.to_string(),
            source: e,
        })
    }

    fn parse_partial_charges<R: Read>(
        reader: R,
        source_name: &str,
    ) -> Result<HashMap<(String, String), f64>, ParamLoadError> {
        let mut reader = csv::Reader::from_reader(reader);
        let mut charges = HashMap::new();
        for result in reader.deserialize::<PartialChargeRecord>() {
            let record = result.map_err(|e| ParamLoadError::Csv {
                path: source_name.to_string(),
                source: e,
            })?;
            charges.insert((record.res, record.atom), record.charge);
        }
        debug!(source = source_name, charges = charges.len(), "Loaded partial charges.");
        Ok(charges)
    }
}
