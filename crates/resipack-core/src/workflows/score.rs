use super::WorkflowError;
use crate::core::forcefield::params::ParameterDatabase;
use crate::core::forcefield::term::{EnergyTerms, ScoreTerm};
use crate::core::models::system::PackedResidueSystem;
use crate::engine::config::ScoreConfig;
use crate::engine::score_system::ScoreSystem;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq)]
pub struct TermScore {
    pub term: ScoreTerm,
    pub energy: f64,
    pub weight: f64,
}

impl TermScore {
    pub fn weighted(&self) -> f64 {
        self.weight * self.energy
    }
}

/// Energies of one structure under one score configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub energies: EnergyTerms,
    pub terms: Vec<TermScore>,
    pub total: f64,
}

#[instrument(skip_all, name = "score_workflow", fields(system_size = system.system_size()))]
pub fn run(
    system: &PackedResidueSystem,
    config: &ScoreConfig,
    params: &ParameterDatabase,
) -> Result<ScoreReport, WorkflowError> {
    let score_system = ScoreSystem::build_for(system, config, params)?;
    let energies = score_system.intra_forward(system.coords())?;
    let terms: Vec<TermScore> = config
        .terms()
        .into_iter()
        .map(|term| TermScore {
            term,
            energy: energies.get(term),
            weight: config.weight(term).unwrap_or(0.0),
        })
        .collect();
    let total = terms.iter().map(TermScore::weighted).sum();

    info!(total, "Scored structure.");
    Ok(ScoreReport {
        energies,
        terms,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::fixtures::{bundled_db, peptide};
    use crate::engine::config::ScoreConfigBuilder;
    use crate::engine::error::EngineError;

    fn system() -> PackedResidueSystem {
        let db = bundled_db();
        PackedResidueSystem::from_residues(&peptide(&db, &["SER", "ALA", "GLY"]), 8).unwrap()
    }

    #[test]
    fn report_lists_enabled_terms_in_order_with_weighted_total() {
        let params = ParameterDatabase::bundled().unwrap();
        let config = ScoreConfigBuilder::new()
            .term(ScoreTerm::Omega, 2.0)
            .term(ScoreTerm::Elec, 0.5)
            .term(ScoreTerm::CartBonded, 1.0)
            .build()
            .unwrap();
        let report = run(&system(), &config, &params).unwrap();

        let listed: Vec<ScoreTerm> = report.terms.iter().map(|t| t.term).collect();
        assert_eq!(listed, vec![ScoreTerm::Elec, ScoreTerm::CartBonded, ScoreTerm::Omega]);
        let expected =
            0.5 * report.energies.elec + report.energies.cartbonded + 2.0 * report.energies.omega;
        assert!((report.total - expected).abs() < 1e-9 * expected.abs().max(1.0));
        assert_eq!(report.energies.lj, 0.0);
    }

    #[test]
    fn every_term_scores_finitely_with_bundled_parameters() {
        let params = ParameterDatabase::bundled().unwrap();
        let config = ScoreConfigBuilder::new().terms(ScoreTerm::ALL).build().unwrap();
        let report = run(&system(), &config, &params).unwrap();
        assert_eq!(report.terms.len(), ScoreTerm::ALL.len());
        assert!(report.terms.iter().all(|t| t.energy.is_finite()));
        assert!(report.total.is_finite());
    }

    #[test]
    fn engine_failures_surface_as_workflow_errors() {
        let mut params = ParameterDatabase::bundled().unwrap();
        params.scoring.ljlk.atom_types.clear();
        let config = ScoreConfigBuilder::new().term(ScoreTerm::Lj, 1.0).build().unwrap();
        assert!(matches!(
            run(&system(), &config, &params),
            Err(WorkflowError::Engine(EngineError::Parameter { term: ScoreTerm::Lj, .. }))
        ));
    }
}
