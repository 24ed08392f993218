use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// The score methods a [`ScoreSystem`](crate::engine::score_system::ScoreSystem) can evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTerm {
    Elec,
    Lj,
    Lk,
    HBond,
    CartBonded,
    Omega,
}

impl ScoreTerm {
    pub const ALL: [ScoreTerm; 6] = [
        ScoreTerm::Elec,
        ScoreTerm::Lj,
        ScoreTerm::Lk,
        ScoreTerm::HBond,
        ScoreTerm::CartBonded,
        ScoreTerm::Omega,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScoreTerm::Elec => "elec",
            ScoreTerm::Lj => "lj",
            ScoreTerm::Lk => "lk",
            ScoreTerm::HBond => "hbond",
            ScoreTerm::CartBonded => "cartbonded",
            ScoreTerm::Omega => "omega",
        }
    }
}

impl fmt::Display for ScoreTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownScoreTerm(pub String);

impl fmt::Display for UnknownScoreTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown score term '{}'", self.0)
    }
}

impl std::error::Error for UnknownScoreTerm {}

impl FromStr for ScoreTerm {
    type Err = UnknownScoreTerm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ScoreTerm::ALL
            .into_iter()
            .find(|term| term.name() == name)
            .ok_or_else(|| UnknownScoreTerm(s.to_string()))
    }
}

/// Unweighted per-term energies of one structure.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerms {
    pub elec: f64,
    pub lj: f64,
    pub lk: f64,
    pub hbond: f64,
    pub cartbonded: f64,
    pub omega: f64,
}

impl EnergyTerms {
    pub fn get(&self, term: ScoreTerm) -> f64 {
        match term {
            ScoreTerm::Elec => self.elec,
            ScoreTerm::Lj => self.lj,
            ScoreTerm::Lk => self.lk,
            ScoreTerm::HBond => self.hbond,
            ScoreTerm::CartBonded => self.cartbonded,
            ScoreTerm::Omega => self.omega,
        }
    }

    pub fn get_mut(&mut self, term: ScoreTerm) -> &mut f64 {
        match term {
            ScoreTerm::Elec => &mut self.elec,
            ScoreTerm::Lj => &mut self.lj,
            ScoreTerm::Lk => &mut self.lk,
            ScoreTerm::HBond => &mut self.hbond,
            ScoreTerm::CartBonded => &mut self.cartbonded,
            ScoreTerm::Omega => &mut self.omega,
        }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        ScoreTerm::ALL.iter().map(|&t| self.get(t)).sum()
    }

    /// Sum of the weighted terms; terms without a weight contribute nothing.
    pub fn weighted_total(&self, weights: &HashMap<ScoreTerm, f64>) -> f64 {
        weights.iter().map(|(&term, &w)| w * self.get(term)).sum()
    }
}

impl Add for EnergyTerms {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for EnergyTerms {
    fn add_assign(&mut self, rhs: Self) {
        for term in ScoreTerm::ALL {
            *self.get_mut(term) += rhs.get(term);
        }
    }
}
