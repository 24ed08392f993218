use super::config::ScoreConfig;
use super::error::EngineError;
use crate::core::forcefield::params::{LjLkTypeParams, ParameterDatabase};
use crate::core::forcefield::term::ScoreTerm;
use crate::core::models::system::PackedResidueSystem;
use crate::core::topology::bonded::BondedAtomTopology;
use crate::core::topology::hbond::HBondElementAnalysis;
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// One node of the score module graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKind {
    BondedAtoms,
    HBondElements,
    PartialCharges,
    LjLkTypes,
    Method(ScoreTerm),
}

impl ModuleKind {
    pub fn depends_on(self) -> &'static [ModuleKind] {
        use ModuleKind as M;
        match self {
            M::BondedAtoms => &[],
            M::HBondElements | M::PartialCharges | M::LjLkTypes => &[M::BondedAtoms],
            M::Method(ScoreTerm::Elec) => &[M::BondedAtoms, M::PartialCharges],
            M::Method(ScoreTerm::Lj) | M::Method(ScoreTerm::Lk) => &[M::BondedAtoms, M::LjLkTypes],
            M::Method(ScoreTerm::HBond) => &[M::BondedAtoms, M::HBondElements],
            M::Method(ScoreTerm::CartBonded) => &[M::BondedAtoms],
            M::Method(ScoreTerm::Omega) => &[],
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModuleKind::BondedAtoms => f.write_str("bonded_atoms"),
            ModuleKind::HBondElements => f.write_str("hbond_elements"),
            ModuleKind::PartialCharges => f.write_str("partial_charges"),
            ModuleKind::LjLkTypes => f.write_str("ljlk_types"),
            ModuleKind::Method(term) => write!(f, "{term}"),
        }
    }
}

/// Orders the dependency closure of `roots` so that every module follows all
/// of its dependencies. Ties resolve in `roots` order, then declaration order.
pub fn build_order(roots: &[ModuleKind]) -> Result<Vec<ModuleKind>, EngineError> {
    fn visit(
        module: ModuleKind,
        visiting: &mut BTreeSet<ModuleKind>,
        done: &mut BTreeSet<ModuleKind>,
        order: &mut Vec<ModuleKind>,
    ) -> Result<(), EngineError> {
        if done.contains(&module) {
            return Ok(());
        }
        if !visiting.insert(module) {
            return Err(EngineError::Internal(format!(
                "dependency cycle through module '{module}'"
            )));
        }
        for &dependency in module.depends_on() {
            visit(dependency, visiting, done, order)?;
        }
        visiting.remove(&module);
        done.insert(module);
        order.push(module);
        Ok(())
    }

    let mut visiting = BTreeSet::new();
    let mut done = BTreeSet::new();
    let mut order = Vec::new();
    for &root in roots {
        visit(root, &mut visiting, &mut done, &mut order)?;
    }
    Ok(order)
}

/// Per-atom labels and the bond graph of the system being scored.
#[derive(Debug, Clone)]
pub struct BondedAtoms {
    pub topology: BondedAtomTopology,
    pub real_atoms: Vec<bool>,
    pub residue_names: Vec<Option<String>>,
    pub atom_names: Vec<Option<String>>,
}

impl BondedAtoms {
    pub fn build_for(system: &PackedResidueSystem, config: &ScoreConfig) -> Self {
        let atom_types = if config.drop_missing_atoms {
            system.atom_types_with_missing_dropped()
        } else {
            system.atom_types()
        };
        let topology = BondedAtomTopology::new(atom_types, system.bonds().to_vec());
        let real_atoms = topology.real_atoms();
        let (residue_names, atom_names): (Vec<_>, Vec<_>) = system
            .atom_metadata()
            .iter()
            .map(|m| (m.residue_name.clone(), m.atom_name.clone()))
            .unzip();

        debug!(
            system_size = topology.system_size,
            real_atoms = real_atoms.iter().filter(|&&r| r).count(),
            bonds = topology.bonds.len(),
            "Built bonded atom topology."
        );
        Self {
            topology,
            real_atoms,
            residue_names,
            atom_names,
        }
    }
}

pub fn resolve_partial_charges(
    bonded: &BondedAtoms,
    params: &ParameterDatabase,
) -> Result<Vec<Option<f64>>, EngineError> {
    let mut charges = vec![None; bonded.topology.system_size];
    for (i, charge) in charges.iter_mut().enumerate() {
        if !bonded.real_atoms[i] {
            continue;
        }
        let (Some(residue), Some(atom)) = (&bonded.residue_names[i], &bonded.atom_names[i]) else {
            continue;
        };
        *charge = Some(params.partial_charge(residue, atom).ok_or_else(|| EngineError::Parameter {
            term: ScoreTerm::Elec,
            message: format!("no partial charge for atom '{atom}' of residue '{residue}'"),
        })?);
    }
    Ok(charges)
}

pub fn resolve_ljlk_types(
    bonded: &BondedAtoms,
    params: &ParameterDatabase,
    term: ScoreTerm,
) -> Result<Vec<Option<LjLkTypeParams>>, EngineError> {
    let atom_types = &params.scoring.ljlk.atom_types;
    bonded
        .topology
        .atom_types
        .iter()
        .map(|atom_type| match atom_type {
            None => Ok(None),
            Some(t) => atom_types.get(t).cloned().map(Some).ok_or_else(|| EngineError::Parameter {
                term,
                message: format!("no LJ/LK parameters for atom type '{t}'"),
            }),
        })
        .collect()
}

pub fn analyze_hbond_elements(
    bonded: &BondedAtoms,
    params: &ParameterDatabase,
) -> HBondElementAnalysis {
    let analysis = HBondElementAnalysis::setup(
        &bonded.topology.atom_types,
        &bonded.topology.bonds,
        &params.scoring.hbond.atom_groups,
    );
    debug!(
        donors = analysis.donors.len(),
        sp2_acceptors = analysis.sp2_acceptors.len(),
        sp3_acceptors = analysis.sp3_acceptors.len(),
        ring_acceptors = analysis.ring_acceptors.len(),
        "Identified hydrogen-bond elements."
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(order: &[ModuleKind], module: ModuleKind) -> usize {
        order.iter().position(|&m| m == module).unwrap()
    }

    #[test]
    fn build_order_places_dependencies_first() {
        let roots: Vec<ModuleKind> = ScoreTerm::ALL.into_iter().map(ModuleKind::Method).collect();
        let order = build_order(&roots).unwrap();

        for &module in &order {
            for &dependency in module.depends_on() {
                assert!(
                    position(&order, dependency) < position(&order, module),
                    "{dependency} before {module}"
                );
            }
        }
        let unique: BTreeSet<_> = order.iter().collect();
        assert_eq!(unique.len(), order.len());
        assert_eq!(order.len(), 4 + ScoreTerm::ALL.len());
    }

    #[test]
    fn build_order_takes_only_the_needed_closure() {
        let order = build_order(&[ModuleKind::Method(ScoreTerm::HBond)]).unwrap();
        assert_eq!(
            order,
            vec![
                ModuleKind::BondedAtoms,
                ModuleKind::HBondElements,
                ModuleKind::Method(ScoreTerm::HBond)
            ]
        );

        let omega = build_order(&[ModuleKind::Method(ScoreTerm::Omega)]).unwrap();
        assert_eq!(omega, vec![ModuleKind::Method(ScoreTerm::Omega)]);
    }

    #[test]
    fn lj_and_lk_share_one_type_resolver() {
        let order =
            build_order(&[ModuleKind::Method(ScoreTerm::Lj), ModuleKind::Method(ScoreTerm::Lk)])
                .unwrap();
        assert_eq!(order.iter().filter(|&&m| m == ModuleKind::LjLkTypes).count(), 1);
    }
}
