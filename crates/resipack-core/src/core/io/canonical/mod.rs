//! Canonical residue and atom ordering, and the canonical form built on it.
//!
//! The canonical form is a durable interchange format: residue types and atom
//! slots are stored as integers that only have meaning relative to
//! [`ordering::CANONICAL_ORDERING_VERSION`].

pub mod form;
pub mod ordering;
mod tables;
