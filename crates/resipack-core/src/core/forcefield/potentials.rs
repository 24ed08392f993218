//! Pair and bonded potentials. Each returns `(energy, dE/dr)`.

use std::f64::consts::PI;

const COULOMB_CONSTANT: f64 = 332.0637; // In kcal·Å/(mol·e²)
const CLASH_ENERGY: f64 = 1e10;

#[inline]
pub fn lennard_jones_12_6(dist: f64, r_min: f64, well_depth: f64) -> (f64, f64) {
    if dist < 1e-6 {
        return (CLASH_ENERGY, 0.0);
    }
    let rho = r_min / dist;
    let rho6 = rho.powi(6);
    let rho12 = rho6 * rho6;
    let energy = well_depth * (rho12 - 2.0 * rho6);
    let d_energy = 12.0 * well_depth * (rho6 - rho12) / dist;
    (energy, d_energy)
}

#[inline]
pub fn coulomb(dist: f64, q1: f64, q2: f64, dielectric: f64) -> (f64, f64) {
    if dist < 1e-6 {
        return (q1.signum() * q2.signum() * CLASH_ENERGY, 0.0);
    }
    let energy = COULOMB_CONSTANT * q1 * q2 / (dielectric * dist);
    (energy, -energy / dist)
}

/// 12-10 hydrogen-bond well on the hydrogen-acceptor distance.
#[inline]
pub fn hbond_12_10(dist_ha: f64, r_hb: f64, d_hb: f64) -> (f64, f64) {
    if dist_ha < 1e-6 {
        return (CLASH_ENERGY, 0.0);
    }
    let rho = r_hb / dist_ha;
    let rho10 = rho.powi(10);
    let rho12 = rho10 * rho * rho;
    let energy = d_hb * (5.0 * rho12 - 6.0 * rho10);
    let d_energy = 60.0 * d_hb * (rho10 - rho12) / dist_ha;
    (energy, d_energy)
}

/// Isotropic Lazaridis-Karplus solvation density of one atom at `dist`.
///
/// Multiplied by the partner's volume it gives that atom's desolvation.
#[inline]
pub fn lk_desolvation_fraction(dist: f64, dgfree: f64, lambda: f64, radius: f64) -> (f64, f64) {
    if dist < 1e-6 || lambda <= 0.0 {
        return (0.0, 0.0);
    }
    let x = (dist - radius) / lambda;
    let f = -dgfree / (2.0 * PI.powf(1.5) * lambda * dist * dist) * (-x * x).exp();
    let df = f * (-2.0 / dist - 2.0 * (dist - radius) / (lambda * lambda));
    (f, df)
}

#[inline]
pub fn harmonic(value: f64, ideal: f64, k: f64) -> (f64, f64) {
    let delta = value - ideal;
    (0.5 * k * delta * delta, k * delta)
}

/// `k (1 + cos omega)`, zero at trans.
#[inline]
pub fn omega_cosine(omega: f64, k: f64) -> (f64, f64) {
    (k * (1.0 + omega.cos()), -k * omega.sin())
}
