use super::{EnergyKernel, WeightedPair, accumulate_gradient, separation, sum_terms, weighted_pairs};
use crate::core::forcefield::params::LjLkTypeParams;
use crate::core::forcefield::potentials::{lennard_jones_12_6, lk_desolvation_fraction};
use crate::core::topology::bonded::BondedAtomTopology;
use nalgebra::{Point3, Vector3};

#[derive(Debug, Clone)]
struct LjPair {
    pair: WeightedPair,
    r_min: f64,
    well_depth: f64,
}

/// Lennard-Jones 12-6 with additive radii and geometric-mean well depths.
#[derive(Debug, Clone)]
pub struct LjKernel {
    system_size: usize,
    pairs: Vec<LjPair>,
}

impl LjKernel {
    pub fn new(topology: &BondedAtomTopology, atom_params: &[Option<&LjLkTypeParams>]) -> Self {
        let param = |i: usize| atom_params.get(i).copied().flatten();
        let pairs = weighted_pairs(topology, |i| param(i).is_some())
            .into_iter()
            .filter_map(|pair| {
                let (a, b) = (param(pair.i)?, param(pair.j)?);
                Some(LjPair {
                    pair,
                    r_min: a.lj_radius + b.lj_radius,
                    well_depth: (a.lj_wdepth * b.lj_wdepth).sqrt(),
                })
            })
            .collect();

        Self {
            system_size: topology.system_size,
            pairs,
        }
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }
}

impl EnergyKernel for LjKernel {
    fn forward(&self, coords: &[Point3<f64>]) -> f64 {
        sum_terms(&self.pairs, |p| match separation(coords, p.pair.i, p.pair.j) {
            Some((dist, _)) => p.pair.weight * lennard_jones_12_6(dist, p.r_min, p.well_depth).0,
            None => 0.0,
        })
    }

    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>> {
        accumulate_gradient(self.system_size, &self.pairs, |p| {
            let (dist, unit) = separation(coords, p.pair.i, p.pair.j)?;
            let g = unit * (p.pair.weight * lennard_jones_12_6(dist, p.r_min, p.well_depth).1);
            Some([(p.pair.i, g), (p.pair.j, -g)])
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct LkAtom {
    dgfree: f64,
    lambda: f64,
    radius: f64,
    volume: f64,
}

impl From<&LjLkTypeParams> for LkAtom {
    fn from(p: &LjLkTypeParams) -> Self {
        Self {
            dgfree: p.lk_dgfree,
            lambda: p.lk_lambda,
            radius: p.lj_radius,
            volume: p.lk_volume,
        }
    }
}

#[derive(Debug, Clone)]
struct LkPair {
    pair: WeightedPair,
    atom_i: LkAtom,
    atom_j: LkAtom,
}

impl LkPair {
    // Each atom is desolvated by the other's volume.
    fn energy_and_derivative(&self, dist: f64) -> (f64, f64) {
        let (f_i, df_i) = lk_desolvation_fraction(
            dist,
            self.atom_i.dgfree,
            self.atom_i.lambda,
            self.atom_i.radius,
        );
        let (f_j, df_j) = lk_desolvation_fraction(
            dist,
            self.atom_j.dgfree,
            self.atom_j.lambda,
            self.atom_j.radius,
        );
        let energy = f_i * self.atom_j.volume + f_j * self.atom_i.volume;
        let d_energy = df_i * self.atom_j.volume + df_j * self.atom_i.volume;
        (self.pair.weight * energy, self.pair.weight * d_energy)
    }
}

/// Isotropic Lazaridis-Karplus solvation, truncated at a fixed cutoff.
#[derive(Debug, Clone)]
pub struct LkKernel {
    system_size: usize,
    cutoff: f64,
    pairs: Vec<LkPair>,
}

impl LkKernel {
    pub fn new(
        topology: &BondedAtomTopology,
        atom_params: &[Option<&LjLkTypeParams>],
        cutoff: f64,
    ) -> Self {
        let param = |i: usize| atom_params.get(i).copied().flatten();
        let pairs = weighted_pairs(topology, |i| param(i).is_some())
            .into_iter()
            .filter_map(|pair| {
                let (a, b) = (param(pair.i)?, param(pair.j)?);
                if a.lk_volume == 0.0 && b.lk_volume == 0.0 {
                    return None;
                }
                Some(LkPair {
                    pair,
                    atom_i: a.into(),
                    atom_j: b.into(),
                })
            })
            .collect();

        Self {
            system_size: topology.system_size,
            cutoff,
            pairs,
        }
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }
}

impl EnergyKernel for LkKernel {
    fn forward(&self, coords: &[Point3<f64>]) -> f64 {
        sum_terms(&self.pairs, |p| match separation(coords, p.pair.i, p.pair.j) {
            Some((dist, _)) if dist < self.cutoff => p.energy_and_derivative(dist).0,
            _ => 0.0,
        })
    }

    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>> {
        accumulate_gradient(self.system_size, &self.pairs, |p| {
            let (dist, unit) = separation(coords, p.pair.i, p.pair.j)?;
            if dist >= self.cutoff {
                return None;
            }
            let g = unit * p.energy_and_derivative(dist).1;
            Some([(p.pair.i, g), (p.pair.j, -g)])
        })
    }
}
