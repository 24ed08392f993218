pub mod canonical;
pub mod pack;
pub mod score;

use crate::error::Result;
use resipack::core::chemical::database::ChemicalDatabase;
use resipack::core::forcefield::params::ParameterDatabase;
use resipack::workflows::WorkflowError;
use std::path::{Path, PathBuf};
use tracing::info;

pub(crate) fn load_chemical_db(path: Option<&Path>) -> Result<ChemicalDatabase> {
    let db = match path {
        Some(path) => {
            info!("Loading residue types from {:?}", path);
            ChemicalDatabase::load(path)
        }
        None => ChemicalDatabase::bundled(),
    };
    Ok(db.map_err(WorkflowError::from)?)
}

pub(crate) fn load_parameters(paths: Option<&(PathBuf, PathBuf)>) -> Result<ParameterDatabase> {
    let params = match paths {
        Some((scoring, charges)) => {
            info!("Loading scoring parameters from {:?} and {:?}", scoring, charges);
            ParameterDatabase::load(scoring, charges)
        }
        None => ParameterDatabase::bundled(),
    };
    Ok(params.map_err(WorkflowError::from)?)
}

#[cfg(test)]
pub(crate) mod testing {
    /// ALA-GLY chain without side-chain hydrogens.
    pub const ALA_GLY: &str = "\
ATOM      1  N   ALA A   1       0.000   1.430   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      3  C   ALA A   1       1.520   0.000   0.000  1.00  0.00           C
ATOM      4  O   ALA A   1       2.150   1.050   0.000  1.00  0.00           O
ATOM      5  CB  ALA A   1      -0.530  -0.770  -1.200  1.00  0.00           C
ATOM      6  H   ALA A   1      -0.900   1.850   0.000  1.00  0.00           H
ATOM      7  N   GLY A   2       2.150  -1.150   0.000  1.00  0.00           N
ATOM      8  CA  GLY A   2       3.590  -1.250   0.000  1.00  0.00           C
ATOM      9  C   GLY A   2       4.150  -2.660   0.000  1.00  0.00           C
ATOM     10  O   GLY A   2       3.420  -3.650   0.000  1.00  0.00           O
ATOM     11  H   GLY A   2       1.600  -1.990   0.000  1.00  0.00           H
";
}
