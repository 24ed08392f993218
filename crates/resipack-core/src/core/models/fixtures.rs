use super::residue::Residue;
use crate::core::chemical::database::ChemicalDatabase;
use nalgebra::Point3;

/// A free zwitterionic alanine: complete backbone, CB, and all hydrogens,
/// with no inter-residue connections.
pub const FREE_ALANINE_TOML: &str = r#"
    [[residues]]
    name = "ALA"
    atoms = [
        { name = "N", atom_type = "Nbb" },
        { name = "H1", atom_type = "HNbb" },
        { name = "H2", atom_type = "HNbb" },
        { name = "H3", atom_type = "HNbb" },
        { name = "CA", atom_type = "CAbb" },
        { name = "HA", atom_type = "Hapo" },
        { name = "CB", atom_type = "CH3" },
        { name = "HB1", atom_type = "Hapo" },
        { name = "HB2", atom_type = "Hapo" },
        { name = "HB3", atom_type = "Hapo" },
        { name = "C", atom_type = "CObb" },
        { name = "O", atom_type = "OCbb" },
        { name = "OXT", atom_type = "OCbb" },
    ]
    bonds = [
        ["N", "CA"], ["CA", "C"], ["C", "O"], ["C", "OXT"], ["CA", "CB"],
        ["N", "H1"], ["N", "H2"], ["N", "H3"], ["CA", "HA"],
        ["CB", "HB1"], ["CB", "HB2"], ["CB", "HB3"],
    ]
"#;

pub fn bundled_db() -> ChemicalDatabase {
    ChemicalDatabase::bundled().unwrap()
}

/// Places atom `k` of the residue at `offset` on a small lattice so that no
/// two atoms of a short peptide coincide.
pub fn placed_residue(db: &ChemicalDatabase, name: &str, offset: usize) -> Residue {
    let residue_type = db.get(name).unwrap().clone();
    let coords = (0..residue_type.n_atoms())
        .map(|k| {
            Point3::new(
                3.8 * offset as f64 + 0.9 * (k % 4) as f64,
                1.1 * (k / 4) as f64,
                0.37 * k as f64,
            )
        })
        .collect();
    Residue::new(residue_type, coords).unwrap()
}

pub fn peptide(db: &ChemicalDatabase, names: &[&str]) -> Vec<Residue> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| placed_residue(db, name, i))
        .collect()
}
