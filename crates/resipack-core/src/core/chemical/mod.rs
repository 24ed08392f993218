//! # Chemical Module
//!
//! Residue-type templates: atom names and types, intra-residue bonds, named
//! inter-residue connections and torsion definitions.
//!
//! Templates are read from TOML by [`database::ChemicalDatabase`] and shared
//! between residues through [`std::sync::Arc`]. Bond and connection atom names
//! are resolved to local indices when the database is loaded; torsion atoms
//! stay symbolic until a packed system is built, because atoms reached across a
//! connection belong to a neighboring residue.

pub mod database;
pub mod residue_type;
