use super::{EnergyKernel, accumulate_gradient, sum_terms};
use crate::core::forcefield::params::OmegaParams;
use crate::core::forcefield::potentials::omega_cosine;
use crate::core::models::metadata::TorsionMetadata;
use crate::core::utils::geometry::{dihedral_angle, dihedral_angle_gradient, is_finite_point};
use nalgebra::{Point3, Vector3};

pub const OMEGA_TORSION: &str = "omega";

/// Peptide-bond planarity, `k (1 + cos omega)` over every resolved omega torsion.
#[derive(Debug, Clone)]
pub struct OmegaKernel {
    system_size: usize,
    k: f64,
    torsions: Vec<[usize; 4]>,
}

impl OmegaKernel {
    /// Torsions with any unresolved atom are left out.
    pub fn new(system_size: usize, torsions: &[TorsionMetadata], params: &OmegaParams) -> Self {
        let torsions = torsions
            .iter()
            .filter(|t| t.name == OMEGA_TORSION && t.is_complete())
            .filter_map(|t| {
                let [a, b, c, d] = t.atom_indices;
                Some([
                    usize::try_from(a).ok()?,
                    usize::try_from(b).ok()?,
                    usize::try_from(c).ok()?,
                    usize::try_from(d).ok()?,
                ])
            })
            .filter(|indices| indices.iter().all(|&i| i < system_size))
            .collect();

        Self {
            system_size,
            k: params.k,
            torsions,
        }
    }

    pub fn n_torsions(&self) -> usize {
        self.torsions.len()
    }

    fn points<'a>(coords: &'a [Point3<f64>], t: &[usize; 4]) -> Option<[&'a Point3<f64>; 4]> {
        let points = [coords.get(t[0])?, coords.get(t[1])?, coords.get(t[2])?, coords.get(t[3])?];
        points.iter().all(|p| is_finite_point(p)).then_some(points)
    }
}

impl EnergyKernel for OmegaKernel {
    fn forward(&self, coords: &[Point3<f64>]) -> f64 {
        sum_terms(&self.torsions, |t| match Self::points(coords, t) {
            Some([p0, p1, p2, p3]) => omega_cosine(dihedral_angle(p0, p1, p2, p3), self.k).0,
            None => 0.0,
        })
    }

    fn backward(&self, coords: &[Point3<f64>]) -> Vec<Vector3<f64>> {
        accumulate_gradient(self.system_size, &self.torsions, |t| {
            let [p0, p1, p2, p3] = Self::points(coords, t)?;
            let d_energy = omega_cosine(dihedral_angle(p0, p1, p2, p3), self.k).1;
            let [g0, g1, g2, g3] = dihedral_angle_gradient(p0, p1, p2, p3);
            Some([
                (t[0], g0 * d_energy),
                (t[1], g1 * d_energy),
                (t[2], g2 * d_energy),
                (t[3], g3 * d_energy),
            ])
        })
    }
}
