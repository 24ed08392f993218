//! Energy kernels over a flat coordinate buffer.
//!
//! Each kernel is built once from resolved per-atom parameters and the bonded
//! topology, then evaluated repeatedly. Non-bonded kernels precompute their
//! pair lists, including the count-pair weight, at construction.

use crate::core::topology::bonded::BondedAtomTopology;
use crate::core::utils::geometry::is_finite_point;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod cartbonded;
pub mod elec;
pub mod hbond;
pub mod ljlk;
pub mod omega;

pub trait EnergyKernel: Send + Sync {
    fn forward(&self, coords: &[Point3<f64>]) -> f64;

    /// Gradient of [`forward`](Self::forward) with respect to every coordinate.
    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>>;
}

/// Scales non-bonded interactions by bonded separation: pairs closer than four
/// bonds are excluded, pairs exactly four bonds apart count one fifth.
#[inline]
pub fn count_pair_weight(path_length: f32) -> f64 {
    if path_length < 4.0 {
        0.0
    } else if path_length == 4.0 {
        0.2
    } else {
        1.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WeightedPair {
    pub i: usize,
    pub j: usize,
    pub weight: f64,
}

/// Every `i < j` pair of eligible atoms with a nonzero count-pair weight.
pub(crate) fn weighted_pairs<F>(topology: &BondedAtomTopology, eligible: F) -> Vec<WeightedPair>
where
    F: Fn(usize) -> bool,
{
    let atoms: Vec<usize> = (0..topology.system_size).filter(|&i| eligible(i)).collect();
    let mut pairs = Vec::new();
    for (n, &i) in atoms.iter().enumerate() {
        for &j in &atoms[n + 1..] {
            let weight = count_pair_weight(topology.path_length[(i, j)]);
            if weight > 0.0 {
                pairs.push(WeightedPair { i, j, weight });
            }
        }
    }
    pairs
}

/// Distance between two atoms and the unit vector from `j` to `i`, or `None`
/// when either is absent or they coincide.
#[inline]
pub(crate) fn separation(
    coords: &[Point3<f64>],
    i: usize,
    j: usize,
) -> Option<(f64, Vector3<f64>)> {
    let (pi, pj) = (coords.get(i)?, coords.get(j)?);
    if !is_finite_point(pi) || !is_finite_point(pj) {
        return None;
    }
    let delta = pi - pj;
    let dist = delta.norm();
    if dist < 1e-6 {
        return None;
    }
    Some((dist, delta / dist))
}

pub(crate) fn sum_terms<T, F>(items: &[T], energy: F) -> f64
where
    T: Sync,
    F: Fn(&T) -> f64 + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let iterator = items.iter();

    #[cfg(feature = "parallel")]
    let iterator = items.par_iter();

    iterator.map(energy).sum()
}

/// Accumulates per-item gradient contributions into one vector per atom.
pub(crate) fn accumulate_gradient<T, F, const N: usize>(
    system_size: usize,
    items: &[T],
    contribution: F,
) -> Vec<Vector3<f64>>
where
    T: Sync,
    F: Fn(&T) -> Option<[(usize, Vector3<f64>); N]> + Sync + Send,
{
    #[cfg(not(feature = "parallel"))]
    let iterator = items.iter();

    #[cfg(feature = "parallel")]
    let iterator = items.par_iter();

    let contributions: Vec<[(usize, Vector3<f64>); N]> =
        iterator.filter_map(contribution).collect();

    let mut gradient = vec![Vector3::zeros(); system_size];
    for terms in contributions {
        for (atom, g) in terms {
            if let Some(slot) = gradient.get_mut(atom) {
                *slot += g;
            }
        }
    }
    gradient
}
