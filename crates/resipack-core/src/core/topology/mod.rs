//! # Topology Module
//!
//! Bond-graph analysis shared by every score term.
//!
//! ## Overview
//!
//! Packing produces a flat bond table over global atom indices. This module turns
//! that table into the derived inputs the energy kernels consume:
//!
//! - **Bonded path length** - dense all-pairs hop counts, `+inf` between disconnected atoms
//! - **Real-atom mask** - which buffer slots carry an atom type
//! - **Hydrogen-bond elements** - donor pairs and sp2/sp3/ring acceptor triples matched
//!   against configured atom-type patterns
//!
//! ## Key Components
//!
//! - [`bonded`] - Path lengths and [`bonded::BondedAtomTopology`]
//! - [`hbond`] - [`hbond::HBondPatterns`] and [`hbond::HBondElementAnalysis`]
//!
//! ## Usage
//!
//! ```ignore
//! use resipack::core::topology::bonded::BondedAtomTopology;
//! use resipack::core::topology::hbond::HBondElementAnalysis;
//!
//! let topology = BondedAtomTopology::new(system.atom_types(), system.bonds().to_vec());
//! let hbonds = HBondElementAnalysis::setup(&topology.atom_types, &topology.bonds, &patterns);
//! ```

pub mod bonded;
pub mod hbond;
