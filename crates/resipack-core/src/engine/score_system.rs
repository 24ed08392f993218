use super::config::ScoreConfig;
use super::error::EngineError;
use super::modules::{
    BondedAtoms, ModuleKind, analyze_hbond_elements, build_order, resolve_ljlk_types,
    resolve_partial_charges,
};
use crate::core::forcefield::kernels::EnergyKernel;
use crate::core::forcefield::kernels::cartbonded::CartBondedKernel;
use crate::core::forcefield::kernels::elec::ElecKernel;
use crate::core::forcefield::kernels::hbond::HBondKernel;
use crate::core::forcefield::kernels::ljlk::{LjKernel, LkKernel};
use crate::core::forcefield::kernels::omega::OmegaKernel;
use crate::core::forcefield::params::{LjLkTypeParams, ParameterDatabase};
use crate::core::forcefield::term::{EnergyTerms, ScoreTerm};
use crate::core::models::system::PackedResidueSystem;
use crate::core::topology::hbond::HBondElementAnalysis;
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, instrument};

fn missing(module: ModuleKind) -> EngineError {
    EngineError::Internal(format!("module '{module}' requested before it was built"))
}

/// Modules built so far, filled in dependency order.
#[derive(Default)]
struct ModuleStore {
    bonded_atoms: Option<BondedAtoms>,
    hbond_elements: Option<HBondElementAnalysis>,
    partial_charges: Option<Vec<Option<f64>>>,
    ljlk_types: Option<Vec<Option<LjLkTypeParams>>>,
    kernels: Vec<(ScoreTerm, Box<dyn EnergyKernel>)>,
}

impl ModuleStore {
    fn bonded_atoms(&self) -> Result<&BondedAtoms, EngineError> {
        self.bonded_atoms.as_ref().ok_or_else(|| missing(ModuleKind::BondedAtoms))
    }

    fn hbond_elements(&self) -> Result<&HBondElementAnalysis, EngineError> {
        self.hbond_elements
            .as_ref()
            .ok_or_else(|| missing(ModuleKind::HBondElements))
    }

    fn partial_charges(&self) -> Result<&[Option<f64>], EngineError> {
        self.partial_charges
            .as_deref()
            .ok_or_else(|| missing(ModuleKind::PartialCharges))
    }

    fn ljlk_types(&self) -> Result<Vec<Option<&LjLkTypeParams>>, EngineError> {
        let types = self.ljlk_types.as_ref().ok_or_else(|| missing(ModuleKind::LjLkTypes))?;
        Ok(types.iter().map(Option::as_ref).collect())
    }

    fn build(
        &mut self,
        module: ModuleKind,
        system: &PackedResidueSystem,
        config: &ScoreConfig,
        params: &ParameterDatabase,
    ) -> Result<(), EngineError> {
        match module {
            ModuleKind::BondedAtoms => {
                self.bonded_atoms = Some(BondedAtoms::build_for(system, config));
            }
            ModuleKind::HBondElements => {
                self.hbond_elements = Some(analyze_hbond_elements(self.bonded_atoms()?, params));
            }
            ModuleKind::PartialCharges => {
                self.partial_charges = Some(resolve_partial_charges(self.bonded_atoms()?, params)?);
            }
            ModuleKind::LjLkTypes => {
                // Only reached on behalf of lj or lk; report whichever asked.
                let term = if config.weight(ScoreTerm::Lj).is_some() {
                    ScoreTerm::Lj
                } else {
                    ScoreTerm::Lk
                };
                self.ljlk_types = Some(resolve_ljlk_types(self.bonded_atoms()?, params, term)?);
            }
            ModuleKind::Method(term) => {
                let kernel = self.build_kernel(term, system, params)?;
                self.kernels.push((term, kernel));
            }
        }
        Ok(())
    }

    fn build_kernel(
        &self,
        term: ScoreTerm,
        system: &PackedResidueSystem,
        params: &ParameterDatabase,
    ) -> Result<Box<dyn EnergyKernel>, EngineError> {
        let scoring = &params.scoring;
        let kernel: Box<dyn EnergyKernel> = match term {
            ScoreTerm::Elec => {
                let topology = &self.bonded_atoms()?.topology;
                Box::new(ElecKernel::new(topology, self.partial_charges()?, &scoring.elec))
            }
            ScoreTerm::Lj => {
                let topology = &self.bonded_atoms()?.topology;
                Box::new(LjKernel::new(topology, &self.ljlk_types()?))
            }
            ScoreTerm::Lk => {
                let topology = &self.bonded_atoms()?.topology;
                Box::new(LkKernel::new(topology, &self.ljlk_types()?, scoring.ljlk.lk_cutoff))
            }
            ScoreTerm::HBond => {
                let topology = &self.bonded_atoms()?.topology;
                Box::new(HBondKernel::new(topology, self.hbond_elements()?, &scoring.hbond))
            }
            ScoreTerm::CartBonded => {
                let topology = &self.bonded_atoms()?.topology;
                Box::new(CartBondedKernel::new(topology, &scoring.cartbonded))
            }
            ScoreTerm::Omega => Box::new(OmegaKernel::new(
                system.system_size(),
                system.torsion_metadata(),
                &scoring.omega,
            )),
        };
        Ok(kernel)
    }
}

/// The score modules for one packed system, built once and evaluated against
/// any coordinate buffer of the same layout.
pub struct ScoreSystem {
    config: ScoreConfig,
    system_size: usize,
    build_order: Vec<ModuleKind>,
    modules: ModuleStore,
}

impl ScoreSystem {
    #[instrument(skip_all, name = "score_system_build", fields(system_size = system.system_size()))]
    pub fn build_for(
        system: &PackedResidueSystem,
        config: &ScoreConfig,
        params: &ParameterDatabase,
    ) -> Result<Self, EngineError> {
        let roots: Vec<ModuleKind> = config.terms().into_iter().map(ModuleKind::Method).collect();
        let order = build_order(&roots)?;

        let mut modules = ModuleStore::default();
        for &module in &order {
            debug!(module = %module, "Building score module.");
            modules.build(module, system, config, params)?;
        }
        info!(
            terms = roots.len(),
            modules = order.len(),
            "Score system ready."
        );

        Ok(Self {
            config: config.clone(),
            system_size: system.system_size(),
            build_order: order,
            modules,
        })
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    pub fn system_size(&self) -> usize {
        self.system_size
    }

    pub fn build_order(&self) -> &[ModuleKind] {
        &self.build_order
    }

    pub fn terms(&self) -> Vec<ScoreTerm> {
        self.modules.kernels.iter().map(|(term, _)| *term).collect()
    }

    pub fn bonded_atoms(&self) -> Option<&BondedAtoms> {
        self.modules.bonded_atoms.as_ref()
    }

    pub fn hbond_elements(&self) -> Option<&HBondElementAnalysis> {
        self.modules.hbond_elements.as_ref()
    }

    fn check_coords(&self, coords: &[Point3<f64>]) -> Result<(), EngineError> {
        if coords.len() != self.system_size {
            return Err(EngineError::CoordinateCount {
                expected: self.system_size,
                actual: coords.len(),
            });
        }
        Ok(())
    }

    /// Unweighted energy of every enabled term; disabled terms stay zero.
    pub fn intra_forward(&self, coords: &[Point3<f64>]) -> Result<EnergyTerms, EngineError> {
        self.check_coords(coords)?;
        let mut terms = EnergyTerms::default();
        for (term, kernel) in &self.modules.kernels {
            *terms.get_mut(*term) = kernel.forward(coords);
        }
        Ok(terms)
    }

    pub fn intra_total(&self, coords: &[Point3<f64>]) -> Result<f64, EngineError> {
        Ok(self.intra_forward(coords)?.weighted_total(&self.config.weights))
    }

    /// Gradient of [`intra_total`](Self::intra_total) with respect to every coordinate.
    pub fn intra_backward(&self, coords: &[Point3<f64>]) -> Result<Vec<Vector3<f64>>, EngineError> {
        self.check_coords(coords)?;
        let mut gradient = vec![Vector3::zeros(); self.system_size];
        for (term, kernel) in &self.modules.kernels {
            let weight = self.config.weight(*term).unwrap_or(0.0);
            for (total, g) in gradient.iter_mut().zip(kernel.backward(coords)) {
                *total += g * weight;
            }
        }
        Ok(gradient)
    }
}
