use super::canonical::ordering::{CanonicalOrdering, NamingConvention};
use super::pdb::AtomRecord;
use crate::core::chemical::database::ChemicalDatabase;
use crate::core::chemical::residue_type::ResidueType;
use crate::core::models::residue::Residue;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Groups parsed atom records into residues of a chemical database.
///
/// Residues are keyed by chain index, residue number and insertion code, and
/// returned in first-seen order. Only the first model is read. A residue that
/// follows a skipped residue or a gap in residue numbering starts a chain
/// break, so it is never linked to the residue before it.
pub struct ResidueReader<'a> {
    chemical_db: &'a ChemicalDatabase,
    ordering: CanonicalOrdering,
}

impl<'a> ResidueReader<'a> {
    pub fn new(chemical_db: &'a ChemicalDatabase) -> Self {
        Self {
            chemical_db,
            ordering: CanonicalOrdering::new(),
        }
    }

    pub fn read(&self, records: &[AtomRecord]) -> Vec<Residue> {
        let Some(first_model) = records.first().map(|r| r.modeli) else {
            return Vec::new();
        };

        let mut order: Vec<(usize, i64, &str)> = Vec::new();
        let mut groups: HashMap<(usize, i64, &str), Vec<&AtomRecord>> = HashMap::new();
        for record in records.iter().filter(|r| r.modeli == first_model) {
            let key = (record.chaini, record.resi, record.insert.as_str());
            groups
                .entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(record);
        }

        let mut residues = Vec::with_capacity(order.len());
        let mut previous: Option<(usize, i64)> = None;
        let mut skipped = false;
        for key in order {
            let atoms = &groups[&key];
            let resn = atoms[0].resn.as_str();
            let Some(residue_type) = self.chemical_db.get(resn) else {
                warn!(
                    residue = resn,
                    chain = key.0,
                    resi = key.1,
                    "Skipping residue of unknown type."
                );
                skipped = true;
                continue;
            };

            let chain_break = match previous {
                Some((chain, resi)) if chain == key.0 => {
                    let gap = key.1 != resi && key.1 != resi + 1;
                    if gap && !skipped {
                        debug!(
                            chain,
                            from = resi,
                            to = key.1,
                            "Residue numbering gap; breaking chain."
                        );
                    }
                    skipped || gap
                }
                _ => false,
            };
            previous = Some((key.0, key.1));
            skipped = false;

            let mut residue = Residue::unplaced(residue_type.clone())
                .with_chain_index(key.0)
                .with_chain_break(chain_break);
            for atom in atoms {
                match self.resolve_atom_name(residue_type, &atom.atomn) {
                    Some(name) => {
                        residue.set_atom_coord(name, atom.position);
                    }
                    None => debug!(
                        residue = resn,
                        resi = key.1,
                        atom = atom.atomn.as_str(),
                        "Dropping atom not present in residue type."
                    ),
                }
            }
            residues.push(residue);
        }
        residues
    }

    /// Finds the residue-type atom for a record name, translating historical
    /// hydrogen names through the canonical ordering when needed.
    fn resolve_atom_name<'t>(
        &self,
        residue_type: &'t ResidueType,
        atom_name: &str,
    ) -> Option<&'t str> {
        let atom_name = atom_name.trim();
        if let Some(i) = residue_type.atom_index(atom_name) {
            return Some(&residue_type.atoms[i].name);
        }
        let slot = self
            .ordering
            .index_of(&residue_type.name, atom_name, NamingConvention::PdbV2)
            .ok()?;
        let current = self
            .ordering
            .atom_names(&residue_type.name, NamingConvention::PdbV3)
            .ok()?
            .get(slot)?;
        residue_type
            .atom_index(current)
            .map(|i| residue_type.atoms[i].name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdb::PdbFile;
    use crate::core::models::fixtures::bundled_db;
    use crate::core::models::system::PackedResidueSystem;
    use nalgebra::Point3;

    const DIPEPTIDE: &str = "\
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  C   ALA A   1       2.009   1.420   0.000  1.00  0.00           C
ATOM      4  O   ALA A   1       1.251   2.390   0.000  1.00  0.00           O
ATOM      5 1HB  ALA A   1       1.800  -0.500   0.900  1.00  0.00           H
ATOM      6  CG  ALA A   1       9.000   9.000   9.000  1.00  0.00           C
ATOM      7  N   GLY A   2       3.332   1.536   0.000  1.00  0.00           N
ATOM      8  CA  GLY A   2       3.988   2.839   0.000  1.00  0.00           C
HETATM    9  O   HOH A 101      10.000  10.000  10.000  1.00  0.00           O
TER
ATOM     10  N   SER B   1      20.000   0.000   0.000  1.00  0.00           N
";

    #[test]
    fn read_groups_records_into_database_residues() {
        let db = bundled_db();
        let records = PdbFile::parse_str(DIPEPTIDE).unwrap();
        let residues = ResidueReader::new(&db).read(&records);

        let names: Vec<&str> = residues.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["ALA", "GLY", "SER"]);
        assert_eq!(residues[0].atom_coord("CA"), Some(&Point3::new(1.458, 0.0, 0.0)));
        assert!(residues[0].atom_coord("CB").unwrap().x.is_nan());
        assert!(residues[1].atom_coord("O").unwrap().x.is_nan());
        assert_eq!(residues[2].chain_index, 1);
        assert_eq!(residues[0].chain_index, 0);
    }

    #[test]
    fn historical_hydrogen_names_are_translated() {
        let db = bundled_db();
        let records = PdbFile::parse_str(DIPEPTIDE).unwrap();
        let residues = ResidueReader::new(&db).read(&records);
        assert_eq!(residues[0].atom_coord("HB1"), Some(&Point3::new(1.8, -0.5, 0.9)));
    }

    #[test]
    fn unknown_atoms_are_dropped_without_failing() {
        let db = bundled_db();
        let records = PdbFile::parse_str(DIPEPTIDE).unwrap();
        let residues = ResidueReader::new(&db).read(&records);
        let present = residues[0].coords().iter().filter(|p| !p.x.is_nan()).count();
        assert_eq!(present, 5);
    }

    #[test]
    fn only_first_model_is_read() {
        let db = bundled_db();
        let text = format!("MODEL 1\n{}ENDMDL\nMODEL 2\n{}ENDMDL\n", DIPEPTIDE, DIPEPTIDE);
        let records = PdbFile::parse_str(&text).unwrap();
        let residues = ResidueReader::new(&db).read(&records);
        assert_eq!(residues.len(), 3);
    }

    fn chain_with(middle: &str, last_resi: &str) -> String {
        format!(
            "\
ATOM      1  N   ALA A   1       0.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       1.458   0.000   0.000  1.00  0.00           C
ATOM      3  C   ALA A   1       2.009   1.420   0.000  1.00  0.00           C
ATOM      4  N   {middle} A   2       3.332   1.536   0.000  1.00  0.00           N
ATOM      5  CA  {middle} A   2       3.988   2.839   0.000  1.00  0.00           C
ATOM      6  N   GLY A{last_resi}     14.000   9.000   9.000  1.00  0.00           N
ATOM      7  CA  GLY A{last_resi}     15.458   9.000   9.000  1.00  0.00           C
"
        )
    }

    fn peptide_bonds(system: &PackedResidueSystem) -> Vec<(usize, usize)> {
        system
            .connection_metadata()
            .iter()
            .map(|c| (c.from_residue_index, c.to_residue_index))
            .collect()
    }

    #[test]
    fn unknown_residue_breaks_the_chain() {
        let db = bundled_db();
        let records = PdbFile::parse_str(&chain_with("MSE", "   3 ")).unwrap();
        let residues = ResidueReader::new(&db).read(&records);

        let names: Vec<&str> = residues.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["ALA", "GLY"]);
        assert!(!residues[0].chain_break);
        assert!(residues[1].chain_break);
        assert_eq!(residues[1].chain_index, 0);

        let system = PackedResidueSystem::from_residues(&residues, 8).unwrap();
        assert!(peptide_bonds(&system).is_empty());
        assert_eq!(system.bonds().len(), 9 + 6);
    }

    #[test]
    fn numbering_gap_breaks_the_chain() {
        let db = bundled_db();
        let records = PdbFile::parse_str(&chain_with("SER", "   4 ")).unwrap();
        let residues = ResidueReader::new(&db).read(&records);

        assert_eq!(residues.len(), 3);
        assert!(!residues[1].chain_break);
        assert!(residues[2].chain_break);

        let system = PackedResidueSystem::from_residues(&residues, 8).unwrap();
        assert_eq!(peptide_bonds(&system), vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn consecutive_and_inserted_residues_stay_linked() {
        let db = bundled_db();
        for last_resi in ["   3 ", "   2A"] {
            let records = PdbFile::parse_str(&chain_with("SER", last_resi)).unwrap();
            let residues = ResidueReader::new(&db).read(&records);

            assert_eq!(residues.len(), 3, "{last_resi}");
            assert!(residues.iter().all(|r| !r.chain_break), "{last_resi}");
            let system = PackedResidueSystem::from_residues(&residues, 8).unwrap();
            assert_eq!(peptide_bonds(&system).len(), 4, "{last_resi}");
        }
    }

    #[test]
    fn empty_input_gives_no_residues() {
        let db = bundled_db();
        assert!(ResidueReader::new(&db).read(&[]).is_empty());
    }
}
