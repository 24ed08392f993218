use super::{EnergyKernel, WeightedPair, accumulate_gradient, separation, sum_terms, weighted_pairs};
use crate::core::forcefield::params::ElecParams;
use crate::core::forcefield::potentials::coulomb;
use crate::core::topology::bonded::BondedAtomTopology;
use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone)]
struct ChargePair {
    pair: WeightedPair,
    q_i: f64,
    q_j: f64,
}

/// Coulomb electrostatics with a constant dielectric.
#[derive(Debug, Clone)]
pub struct ElecKernel {
    system_size: usize,
    dielectric: f64,
    pairs: Vec<ChargePair>,
}

impl ElecKernel {
    /// `partial_charges` holds one entry per atom; `None` excludes the atom.
    pub fn new(
        topology: &BondedAtomTopology,
        partial_charges: &[Option<f64>],
        params: &ElecParams,
    ) -> Self {
        let charge = |i: usize| partial_charges.get(i).copied().flatten();
        let pairs = weighted_pairs(topology, |i| {
            topology.atom_type(i).is_some() && charge(i).is_some_and(|q| q != 0.0)
        })
        .into_iter()
        .filter_map(|pair| {
            Some(ChargePair {
                pair,
                q_i: charge(pair.i)?,
                q_j: charge(pair.j)?,
            })
        })
        .collect();

        Self {
            system_size: topology.system_size,
            dielectric: params.dielectric,
            pairs,
        }
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }
}

impl EnergyKernel for ElecKernel {
    fn forward(&self, coords: &[Point3<f64>]) -> f64 {
        sum_terms(&self.pairs, |p| match separation(coords, p.pair.i, p.pair.j) {
            Some((dist, _)) => p.pair.weight * coulomb(dist, p.q_i, p.q_j, self.dielectric).0,
            None => 0.0,
        })
    }

    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>> {
        accumulate_gradient(self.system_size, &self.pairs, |p| {
            let (dist, unit) = separation(coords, p.pair.i, p.pair.j)?;
            let g = unit * (p.pair.weight * coulomb(dist, p.q_i, p.q_j, self.dielectric).1);
            Some([(p.pair.i, g), (p.pair.j, -g)])
        })
    }
}
