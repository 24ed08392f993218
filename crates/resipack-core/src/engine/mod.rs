//! # Engine Module
//!
//! The score module graph: which modules a set of score terms needs, in what
//! order to build them, and how to evaluate the result.
//!
//! ## Overview
//!
//! Every score term depends on derived per-structure modules. Electrostatics
//! needs the bonded topology and resolved partial charges; hydrogen bonding
//! needs the topology and the donor/acceptor analysis; and so on. A
//! [`score_system::ScoreSystem`] takes the dependency closure of the enabled
//! terms, builds each module exactly once in dependency order, and then
//! evaluates:
//!
//! - **Forward** - unweighted per-term energies ([`crate::core::forcefield::term::EnergyTerms`])
//! - **Total** - the weighted sum over enabled terms
//! - **Backward** - the gradient of the weighted total with respect to every coordinate
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Block size, term weights and missing-atom handling
//! - **Module graph** ([`modules`]) - Module kinds, dependencies and per-term parameter resolvers
//! - **Evaluation** ([`score_system`]) - Construction and forward/backward passes
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod config;
pub mod error;
pub mod modules;
pub mod score_system;
