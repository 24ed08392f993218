use crate::cli::ScoreArgs;
use crate::error::{CliError, Result};
use anyhow::Context;
use resipack::core::forcefield::term::ScoreTerm;
use resipack::engine::config::{ScoreConfig, ScoreConfigBuilder};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Contents of a scoring configuration file. Every key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileConfig {
    pub block_size: Option<usize>,
    pub drop_missing_atoms: Option<bool>,
    #[serde(default)]
    pub weights: BTreeMap<ScoreTerm, f64>,
    pub chemical_db: Option<PathBuf>,
    pub scoring_params: Option<PathBuf>,
    pub partial_charges: Option<PathBuf>,
}

impl FileConfig {
    /// Reads a config file. Relative data paths resolve against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let mut config: FileConfig = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        for data_path in [
            &mut config.chemical_db,
            &mut config.scoring_params,
            &mut config.partial_charges,
        ]
        .into_iter()
        .flatten()
        {
            if data_path.is_relative() {
                *data_path = base.join(&*data_path);
            }
        }
        debug!(?config, "Loaded configuration file.");
        Ok(config)
    }
}

/// Where the chemical and scoring data come from; `None` means bundled.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DataSources {
    pub chemical_db: Option<PathBuf>,
    pub parameters: Option<(PathBuf, PathBuf)>,
}

/// Combines the file config with `score` flags. Flags win.
pub fn resolve_score_config(
    file: &FileConfig,
    args: &ScoreArgs,
) -> Result<(ScoreConfig, DataSources)> {
    let mut builder = ScoreConfigBuilder::new();

    if let Some(block_size) = args.block_size.or(file.block_size) {
        builder = builder.block_size(block_size);
    }
    builder = builder
        .drop_missing_atoms(args.drop_missing_atoms || file.drop_missing_atoms.unwrap_or(false));

    if args.terms.is_empty() {
        if file.weights.is_empty() {
            builder = builder.terms(ScoreTerm::ALL);
        } else {
            for (&term, &weight) in &file.weights {
                builder = builder.term(term, weight);
            }
        }
    } else {
        for name in &args.terms {
            let term: ScoreTerm = name.parse().map_err(|e| CliError::Argument(format!("{e}")))?;
            builder = builder.term(term, file.weights.get(&term).copied().unwrap_or(1.0));
        }
    }

    let config = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

    let parameters = match (&file.scoring_params, &file.partial_charges) {
        (Some(scoring), Some(charges)) => Some((scoring.clone(), charges.clone())),
        (None, None) => None,
        _ => {
            return Err(CliError::Config(
                "'scoring-params' and 'partial-charges' must be given together".to_string(),
            ));
        }
    };

    Ok((
        config,
        DataSources {
            chemical_db: file.chemical_db.clone(),
            parameters,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn score_args(terms: &[&str]) -> ScoreArgs {
        ScoreArgs {
            input: PathBuf::from("in.pdb"),
            config: None,
            terms: terms.iter().map(|t| t.to_string()).collect(),
            block_size: None,
            drop_missing_atoms: false,
        }
    }

    fn write_config(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("score.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_kebab_case_keys_and_resolves_relative_paths() {
        let (dir, path) = write_config(
            r#"
            block-size = 24
            drop-missing-atoms = true
            chemical-db = "data/chemical.toml"
            scoring-params = "/abs/scoring.toml"
            partial-charges = "charges.csv"

            [weights]
            elec = 0.5
            hbond = 2.0
            "#,
        );
        let config = FileConfig::from_file(&path).unwrap();

        assert_eq!(config.block_size, Some(24));
        assert_eq!(config.drop_missing_atoms, Some(true));
        assert_eq!(config.weights.get(&ScoreTerm::HBond), Some(&2.0));
        assert_eq!(config.chemical_db, Some(dir.path().join("data/chemical.toml")));
        assert_eq!(config.scoring_params, Some(PathBuf::from("/abs/scoring.toml")));
        assert_eq!(config.partial_charges, Some(dir.path().join("charges.csv")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let (_dir, path) = write_config("block-size = 8\nthreads = 4\n");
        assert!(matches!(FileConfig::from_file(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_weight_terms_are_rejected() {
        let (_dir, path) = write_config("[weights]\nvdw = 1.0\n");
        assert!(matches!(FileConfig::from_file(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempdir().unwrap();
        let result = FileConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(CliError::Other(_))));
    }

    #[test]
    fn defaults_enable_every_term_with_unit_weight() {
        let (config, sources) =
            resolve_score_config(&FileConfig::default(), &score_args(&[])).unwrap();
        assert_eq!(config.terms(), ScoreTerm::ALL.to_vec());
        assert!(ScoreTerm::ALL.iter().all(|&t| config.weight(t) == Some(1.0)));
        assert!(!config.drop_missing_atoms);
        assert_eq!(sources, DataSources::default());
    }

    #[test]
    fn file_weights_select_terms() {
        let file = FileConfig {
            weights: BTreeMap::from([(ScoreTerm::Lj, 0.5), (ScoreTerm::Omega, 3.0)]),
            block_size: Some(12),
            ..Default::default()
        };
        let (config, _) = resolve_score_config(&file, &score_args(&[])).unwrap();
        assert_eq!(config.terms(), vec![ScoreTerm::Lj, ScoreTerm::Omega]);
        assert_eq!(config.weight(ScoreTerm::Omega), Some(3.0));
        assert_eq!(config.block_size, 12);
    }

    #[test]
    fn flags_override_the_file() {
        let file = FileConfig {
            weights: BTreeMap::from([(ScoreTerm::Lj, 0.5), (ScoreTerm::Omega, 3.0)]),
            block_size: Some(12),
            ..Default::default()
        };
        let mut args = score_args(&["lj", "elec"]);
        args.block_size = Some(40);
        args.drop_missing_atoms = true;

        let (config, _) = resolve_score_config(&file, &args).unwrap();
        assert_eq!(config.terms(), vec![ScoreTerm::Elec, ScoreTerm::Lj]);
        assert_eq!(config.weight(ScoreTerm::Lj), Some(0.5));
        assert_eq!(config.weight(ScoreTerm::Elec), Some(1.0));
        assert_eq!(config.weight(ScoreTerm::Omega), None);
        assert_eq!(config.block_size, 40);
        assert!(config.drop_missing_atoms);
    }

    #[test]
    fn unknown_term_flag_is_an_argument_error() {
        let result = resolve_score_config(&FileConfig::default(), &score_args(&["vdw"]));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn zero_block_size_is_a_config_error() {
        let mut args = score_args(&[]);
        args.block_size = Some(0);
        let result = resolve_score_config(&FileConfig::default(), &args);
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn parameter_files_must_come_in_pairs() {
        let file = FileConfig {
            scoring_params: Some(PathBuf::from("scoring.toml")),
            ..Default::default()
        };
        assert!(matches!(
            resolve_score_config(&file, &score_args(&[])),
            Err(CliError::Config(_))
        ));
    }
}
