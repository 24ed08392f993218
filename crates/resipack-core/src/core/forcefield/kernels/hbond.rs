use super::{EnergyKernel, accumulate_gradient, separation, sum_terms};
use crate::core::forcefield::params::HBondParams;
use crate::core::forcefield::potentials::hbond_12_10;
use crate::core::topology::bonded::BondedAtomTopology;
use crate::core::topology::hbond::HBondElementAnalysis;
use nalgebra::{Point3, Vector3};
use tracing::debug;

/// Donors closer than this many bonds to an acceptor never pair with it.
const MIN_DONOR_ACCEPTOR_SEPARATION: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
struct HBondPair {
    d: usize,
    h: usize,
    a: usize,
    equilibrium_distance: f64,
    well_depth: f64,
}

/// 12-10 hydrogen-bond well between every donor hydrogen and acceptor.
#[derive(Debug, Clone)]
pub struct HBondKernel {
    system_size: usize,
    pairs: Vec<HBondPair>,
}

impl HBondKernel {
    pub fn new(
        topology: &BondedAtomTopology,
        elements: &HBondElementAnalysis,
        params: &HBondParams,
    ) -> Self {
        let mut pairs = Vec::new();
        for donor in &elements.donors {
            for (_, acceptor) in elements.all_acceptors() {
                if acceptor.a == donor.d || acceptor.a == donor.h {
                    continue;
                }
                if topology.path_length[(donor.d, acceptor.a)] < MIN_DONOR_ACCEPTOR_SEPARATION {
                    continue;
                }
                let Some(pair) = params.pair(&donor.donor_type, &acceptor.acceptor_type) else {
                    debug!(
                        donor_type = donor.donor_type.as_str(),
                        acceptor_type = acceptor.acceptor_type.as_str(),
                        "No hydrogen-bond parameters for pair."
                    );
                    continue;
                };
                pairs.push(HBondPair {
                    d: donor.d,
                    h: donor.h,
                    a: acceptor.a,
                    equilibrium_distance: pair.equilibrium_distance,
                    well_depth: pair.well_depth,
                });
            }
        }

        Self {
            system_size: topology.system_size,
            pairs,
        }
    }

    pub fn n_pairs(&self) -> usize {
        self.pairs.len()
    }
}

impl EnergyKernel for HBondKernel {
    fn forward(&self, coords: &[Point3<f64>]) -> f64 {
        sum_terms(&self.pairs, |p| match separation(coords, p.h, p.a) {
            Some((dist, _)) => hbond_12_10(dist, p.equilibrium_distance, p.well_depth).0,
            None => 0.0,
        })
    }

    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>> {
        accumulate_gradient(self.system_size, &self.pairs, |p| {
            let (dist, unit) = separation(coords, p.h, p.a)?;
            let g = unit * hbond_12_10(dist, p.equilibrium_distance, p.well_depth).1;
            Some([(p.h, g), (p.a, -g)])
        })
    }
}
