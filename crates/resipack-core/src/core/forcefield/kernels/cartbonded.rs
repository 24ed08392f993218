use super::{EnergyKernel, accumulate_gradient, separation, sum_terms};
use crate::core::forcefield::params::CartBondedParams;
use crate::core::forcefield::potentials::harmonic;
use crate::core::topology::bonded::BondedAtomTopology;
use nalgebra::{Point3, Vector3};
use std::collections::BTreeSet;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
struct BondLength {
    i: usize,
    j: usize,
    x0: f64,
    k: f64,
}

/// Harmonic bond-length restraints over every parameterized bond.
#[derive(Debug, Clone)]
pub struct CartBondedKernel {
    system_size: usize,
    lengths: Vec<BondLength>,
}

impl CartBondedKernel {
    pub fn new(topology: &BondedAtomTopology, params: &CartBondedParams) -> Self {
        // Linked residues list their shared bond once per direction.
        let unique: BTreeSet<(usize, usize)> = topology
            .bonds
            .iter()
            .filter(|[i, j]| i != j)
            .map(|&[i, j]| (i.min(j), i.max(j)))
            .collect();

        let mut lengths = Vec::with_capacity(unique.len());
        for (i, j) in unique {
            let (Some(type_i), Some(type_j)) = (topology.atom_type(i), topology.atom_type(j)) else {
                continue;
            };
            match params.length(type_i, type_j) {
                Some(p) => lengths.push(BondLength { i, j, x0: p.x0, k: p.k }),
                None => debug!(type_i, type_j, "No bond-length parameters for bond."),
            }
        }

        Self {
            system_size: topology.system_size,
            lengths,
        }
    }

    pub fn n_bonds(&self) -> usize {
        self.lengths.len()
    }
}

impl EnergyKernel for CartBondedKernel {
    fn forward(&self, coords: &[Point3<f64>]) -> f64 {
        sum_terms(&self.lengths, |b| match separation(coords, b.i, b.j) {
            Some((dist, _)) => harmonic(dist, b.x0, b.k).0,
            None => 0.0,
        })
    }

    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>> {
        accumulate_gradient(self.system_size, &self.lengths, |b| {
            let (dist, unit) = separation(coords, b.i, b.j)?;
            let g = unit * harmonic(dist, b.x0, b.k).1;
            Some([(b.i, g), (b.j, -g)])
        })
    }
}
