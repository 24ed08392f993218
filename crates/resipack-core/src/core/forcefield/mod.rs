//! # Force Field Module
//!
//! Scoring parameters, pair and bonded potentials, and the energy kernels the
//! score engine evaluates.
//!
//! ## Overview
//!
//! Parameters are read-only reference data loaded by the caller. Kernels are
//! built from those parameters once per structure, after per-atom resolution,
//! and then evaluated for energies and coordinate gradients:
//!
//! - **Electrostatics** - Coulomb with a constant dielectric
//! - **Lennard-Jones** - 12-6 with combined radii and well depths
//! - **Lazaridis-Karplus** - isotropic Gaussian solvation
//! - **Hydrogen bonding** - 12-10 well on the hydrogen-acceptor distance
//! - **Bond lengths** - harmonic restraints per atom-type pair
//! - **Omega** - peptide-bond planarity
//!
//! Non-bonded kernels weight each pair by its bonded separation.
//!
//! ## Key Components
//!
//! - [`params`] - [`params::ParameterDatabase`] and its TOML/CSV loaders
//! - [`kernels`] - The [`kernels::EnergyKernel`] trait and its implementations
//! - [`term`] - [`term::ScoreTerm`] and per-term [`term::EnergyTerms`]
//!
//! ## Usage
//!
//! ```ignore
//! use resipack::core::forcefield::kernels::{EnergyKernel, cartbonded::CartBondedKernel};
//! use resipack::core::forcefield::params::ParameterDatabase;
//!
//! let params = ParameterDatabase::bundled()?;
//! let kernel = CartBondedKernel::new(&topology, &params.scoring.cartbonded);
//! let energy = kernel.forward(system.coords());
//! ```

pub mod kernels;
pub mod params;
pub(crate) mod potentials;
pub mod term;
