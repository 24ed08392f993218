//! # Core Module
//!
//! Stateless data models and algorithms: everything needed to turn structure
//! text or canonical tensors into a packed, typed, indexed system and to
//! evaluate energy kernels over it.
//!
//! ## Architecture
//!
//! - **Reference data** ([`chemical`]) - Residue-type templates keyed by name
//! - **Structure I/O** ([`io`]) - PDB parsing and writing, canonical ordering, canonical form
//! - **Packed representation** ([`models`]) - Residues and the block-aligned packed system
//! - **Bond-graph analysis** ([`topology`]) - Path lengths, real-atom mask, hydrogen-bond elements
//! - **Energy evaluation** ([`forcefield`]) - Parameters, potentials and kernels
//! - **Geometry** ([`utils`]) - NaN sentinels and dihedral angles
//!
//! ## Missing Data
//!
//! Partial structures are the normal case. Absent atoms are NaN coordinates,
//! unresolved indices are `-1`, untyped slots carry no atom type, and
//! disconnected atoms are infinitely far apart in the bond graph. Only corrupt
//! reference data and malformed input are errors.

pub mod chemical;
pub mod forcefield;
pub mod io;
pub mod models;
pub mod topology;
pub mod utils;
