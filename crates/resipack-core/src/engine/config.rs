use crate::core::forcefield::term::ScoreTerm;
use crate::core::models::system::DEFAULT_BLOCK_SIZE;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue { parameter: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreConfig {
    pub block_size: usize,
    pub weights: HashMap<ScoreTerm, f64>,
    /// Treat atoms with NaN coordinates as untyped, removing them from every term.
    pub drop_missing_atoms: bool,
}

impl ScoreConfig {
    /// Enabled score terms in canonical order.
    pub fn terms(&self) -> Vec<ScoreTerm> {
        ScoreTerm::ALL
            .into_iter()
            .filter(|term| self.weights.contains_key(term))
            .collect()
    }

    pub fn weight(&self, term: ScoreTerm) -> Option<f64> {
        self.weights.get(&term).copied()
    }
}

#[derive(Default)]
pub struct ScoreConfigBuilder {
    block_size: Option<usize>,
    weights: Option<HashMap<ScoreTerm, f64>>,
    drop_missing_atoms: bool,
}

impl ScoreConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_size(mut self, block_size: usize) -> Self {
        self.block_size = Some(block_size);
        self
    }
    pub fn term(mut self, term: ScoreTerm, weight: f64) -> Self {
        self.weights.get_or_insert_with(HashMap::new).insert(term, weight);
        self
    }
    /// Enables each term with unit weight, keeping weights already set.
    pub fn terms<I: IntoIterator<Item = ScoreTerm>>(mut self, terms: I) -> Self {
        let weights = self.weights.get_or_insert_with(HashMap::new);
        for term in terms {
            weights.entry(term).or_insert(1.0);
        }
        self
    }
    pub fn drop_missing_atoms(mut self, drop: bool) -> Self {
        self.drop_missing_atoms = drop;
        self
    }

    pub fn build(self) -> Result<ScoreConfig, ConfigError> {
        let block_size = self.block_size.unwrap_or(DEFAULT_BLOCK_SIZE);
        if block_size == 0 {
            return Err(ConfigError::InvalidValue {
                parameter: "block_size",
                reason: "must be at least 1".to_string(),
            });
        }

        let weights = self.weights.ok_or(ConfigError::MissingParameter("terms"))?;
        if weights.is_empty() {
            return Err(ConfigError::MissingParameter("terms"));
        }
        if let Some((term, weight)) = weights.iter().find(|(_, w)| !w.is_finite()) {
            return Err(ConfigError::InvalidValue {
                parameter: "weights",
                reason: format!("weight of '{term}' is {weight}"),
            });
        }

        Ok(ScoreConfig {
            block_size,
            weights,
            drop_missing_atoms: self.drop_missing_atoms,
        })
    }
}
