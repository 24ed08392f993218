//! # resipack
//!
//! Packed residue systems, bonded topology resolution, and energy scoring for
//! protein structures.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three layers from data to procedure:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`PackedResidueSystem`,
//!   `CanonicalForm`), bond-graph analysis, scoring parameters and energy
//!   kernels, and PDB I/O.
//!
//! - **[`engine`]: The Score Graph.** Builds the modules a set of score terms
//!   depends on, in dependency order, and evaluates per-term energies and
//!   coordinate gradients for one packed system.
//!
//! - **[`workflows`]: The Public API.** Complete procedures (pack a structure,
//!   score it, convert it to canonical form) that tie `engine` and `core`
//!   together for library users and the command-line tool.

pub mod core;
pub mod engine;
pub mod workflows;
