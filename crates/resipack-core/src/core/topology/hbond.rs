use super::bonded::bonded_neighbors;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DonorPattern {
    pub d: String,
    pub h: String,
    pub donor_type: String,
}

/// Atom types along an acceptor, its base and the base's second neighbor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcceptorPattern {
    pub a: String,
    pub b: String,
    pub b0: String,
    pub acceptor_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HBondPatterns {
    #[serde(default)]
    pub donors: Vec<DonorPattern>,
    #[serde(default)]
    pub sp2_acceptors: Vec<AcceptorPattern>,
    #[serde(default)]
    pub sp3_acceptors: Vec<AcceptorPattern>,
    #[serde(default)]
    pub ring_acceptors: Vec<AcceptorPattern>,
}

impl HBondPatterns {
    pub fn acceptors(&self, kind: AcceptorKind) -> &[AcceptorPattern] {
        match kind {
            AcceptorKind::Sp2 => &self.sp2_acceptors,
            AcceptorKind::Sp3 => &self.sp3_acceptors,
            AcceptorKind::Ring => &self.ring_acceptors,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AcceptorKind {
    Sp2,
    Sp3,
    Ring,
}

impl AcceptorKind {
    pub const ALL: [AcceptorKind; 3] = [AcceptorKind::Sp2, AcceptorKind::Sp3, AcceptorKind::Ring];

    /// The atom whose other neighbors supply `b0`.
    ///
    /// sp2 acceptors take `b0` from the base (`a-b-b0`); sp3 and ring
    /// acceptors take it from the acceptor itself (`b-a-b0`).
    fn pivots_on_base(self) -> bool {
        matches!(self, AcceptorKind::Sp2)
    }
}

impl std::fmt::Display for AcceptorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AcceptorKind::Sp2 => "sp2",
            AcceptorKind::Sp3 => "sp3",
            AcceptorKind::Ring => "ring",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donor {
    pub d: usize,
    pub h: usize,
    pub donor_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptorGroup {
    pub a: usize,
    pub b: usize,
    pub b0: usize,
    pub acceptor_type: String,
}

/// Donors and acceptor groups found by joining bonded atom types against
/// [`HBondPatterns`].
///
/// Results are ordered by the sorted directed bond list, then by ascending
/// neighbor index, so repeated analyses of one system agree exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HBondElementAnalysis {
    pub donors: Vec<Donor>,
    pub sp2_acceptors: Vec<AcceptorGroup>,
    pub sp3_acceptors: Vec<AcceptorGroup>,
    pub ring_acceptors: Vec<AcceptorGroup>,
}

impl HBondElementAnalysis {
    pub fn setup(
        atom_types: &[Option<String>],
        bonds: &[[usize; 2]],
        patterns: &HBondPatterns,
    ) -> Self {
        let neighbors = typed_neighbors(atom_types, bonds);
        let directed = directed_bonds(&neighbors);

        let donors = match_donors(atom_types, &directed, &patterns.donors);
        let mut analysis = Self {
            donors,
            ..Self::default()
        };
        for kind in AcceptorKind::ALL {
            let groups =
                match_acceptors(kind, atom_types, &neighbors, &directed, patterns.acceptors(kind));
            *analysis.acceptors_mut(kind) = groups;
        }
        analysis
    }

    pub fn acceptors(&self, kind: AcceptorKind) -> &[AcceptorGroup] {
        match kind {
            AcceptorKind::Sp2 => &self.sp2_acceptors,
            AcceptorKind::Sp3 => &self.sp3_acceptors,
            AcceptorKind::Ring => &self.ring_acceptors,
        }
    }

    fn acceptors_mut(&mut self, kind: AcceptorKind) -> &mut Vec<AcceptorGroup> {
        match kind {
            AcceptorKind::Sp2 => &mut self.sp2_acceptors,
            AcceptorKind::Sp3 => &mut self.sp3_acceptors,
            AcceptorKind::Ring => &mut self.ring_acceptors,
        }
    }

    /// Every acceptor group with its kind, sp2 first.
    pub fn all_acceptors(&self) -> impl Iterator<Item = (AcceptorKind, &AcceptorGroup)> {
        AcceptorKind::ALL
            .into_iter()
            .flat_map(move |kind| self.acceptors(kind).iter().map(move |group| (kind, group)))
    }
}

fn type_of(atom_types: &[Option<String>], index: usize) -> Option<&str> {
    atom_types.get(index)?.as_deref()
}

// Bonds touching an untyped atom take no part in matching.
fn typed_neighbors(atom_types: &[Option<String>], bonds: &[[usize; 2]]) -> Vec<Vec<usize>> {
    let typed: Vec<[usize; 2]> = bonds
        .iter()
        .copied()
        .filter(|&[i, j]| type_of(atom_types, i).is_some() && type_of(atom_types, j).is_some())
        .collect();
    bonded_neighbors(&typed, atom_types.len())
}

fn directed_bonds(neighbors: &[Vec<usize>]) -> Vec<[usize; 2]> {
    neighbors
        .iter()
        .enumerate()
        .flat_map(|(i, list)| list.iter().map(move |&j| [i, j]))
        .collect()
}

fn match_donors(
    atom_types: &[Option<String>],
    directed: &[[usize; 2]],
    patterns: &[DonorPattern],
) -> Vec<Donor> {
    if patterns.is_empty() {
        debug!("No donor patterns configured.");
        return Vec::new();
    }

    let mut table: HashMap<(&str, &str), Vec<&str>> = HashMap::new();
    for pattern in patterns {
        table
            .entry((pattern.d.as_str(), pattern.h.as_str()))
            .or_default()
            .push(pattern.donor_type.as_str());
    }

    let mut donors = Vec::new();
    for &[d, h] in directed {
        let (Some(td), Some(th)) = (type_of(atom_types, d), type_of(atom_types, h)) else {
            continue;
        };
        if let Some(donor_types) = table.get(&(td, th)) {
            donors.extend(donor_types.iter().map(|t| Donor {
                d,
                h,
                donor_type: t.to_string(),
            }));
        }
    }
    donors
}

fn match_acceptors(
    kind: AcceptorKind,
    atom_types: &[Option<String>],
    neighbors: &[Vec<usize>],
    directed: &[[usize; 2]],
    patterns: &[AcceptorPattern],
) -> Vec<AcceptorGroup> {
    if patterns.is_empty() {
        debug!(kind = %kind, "No acceptor patterns configured.");
        return Vec::new();
    }

    let mut table: HashMap<(&str, &str, &str), Vec<&str>> = HashMap::new();
    for pattern in patterns {
        table
            .entry((pattern.a.as_str(), pattern.b.as_str(), pattern.b0.as_str()))
            .or_default()
            .push(pattern.acceptor_type.as_str());
    }

    let mut groups = Vec::new();
    for &[a, b] in directed {
        let (pivot, excluded) = if kind.pivots_on_base() { (b, a) } else { (a, b) };
        for &b0 in &neighbors[pivot] {
            if b0 == excluded {
                continue;
            }
            let key = match (
                type_of(atom_types, a),
                type_of(atom_types, b),
                type_of(atom_types, b0),
            ) {
                (Some(ta), Some(tb), Some(tb0)) => (ta, tb, tb0),
                _ => continue,
            };
            if let Some(acceptor_types) = table.get(&key) {
                groups.extend(acceptor_types.iter().map(|t| AcceptorGroup {
                    a,
                    b,
                    b0,
                    acceptor_type: t.to_string(),
                }));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(names: &[Option<&str>]) -> Vec<Option<String>> {
        names.iter().map(|n| n.map(str::to_string)).collect()
    }

    fn acceptor(a: &str, b: &str, b0: &str, acceptor_type: &str) -> AcceptorPattern {
        AcceptorPattern {
            a: a.into(),
            b: b.into(),
            b0: b0.into(),
            acceptor_type: acceptor_type.into(),
        }
    }

    fn backbone_patterns() -> HBondPatterns {
        HBondPatterns {
            donors: vec![DonorPattern {
                d: "Nbb".into(),
                h: "HNbb".into(),
                donor_type: "hbdon_PBA".into(),
            }],
            sp2_acceptors: vec![acceptor("OCbb", "CObb", "CAbb", "hbacc_PBA")],
            sp3_acceptors: vec![acceptor("OH", "CH2", "Hpol", "hbacc_AHX")],
            ring_acceptors: Vec::new(),
        }
    }

    // CA(0)-C(1)(=O(2))-N(3)(-H(4))-CA(5)
    fn peptide_bond_fixture() -> (Vec<Option<String>>, Vec<[usize; 2]>) {
        (
            types(&[
                Some("CAbb"),
                Some("CObb"),
                Some("OCbb"),
                Some("Nbb"),
                Some("HNbb"),
                Some("CAbb"),
            ]),
            vec![[0, 1], [1, 2], [1, 3], [3, 4], [3, 5]],
        )
    }

    #[test]
    fn peptide_bond_has_exactly_one_donor_and_one_sp2_acceptor() {
        let (atom_types, bonds) = peptide_bond_fixture();
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &backbone_patterns());

        assert_eq!(
            analysis.donors,
            vec![Donor {
                d: 3,
                h: 4,
                donor_type: "hbdon_PBA".into()
            }]
        );
        assert_eq!(
            analysis.sp2_acceptors,
            vec![AcceptorGroup {
                a: 2,
                b: 1,
                b0: 0,
                acceptor_type: "hbacc_PBA".into()
            }]
        );
        assert!(analysis.sp3_acceptors.is_empty());
        assert!(analysis.ring_acceptors.is_empty());
    }

    #[test]
    fn sp3_acceptors_pivot_on_the_acceptor() {
        let atom_types = types(&[Some("CH2"), Some("OH"), Some("Hpol")]);
        let bonds = vec![[0, 1], [1, 2]];
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &backbone_patterns());
        assert_eq!(
            analysis.sp3_acceptors,
            vec![AcceptorGroup {
                a: 1,
                b: 0,
                b0: 2,
                acceptor_type: "hbacc_AHX".into()
            }]
        );
    }

    #[test]
    fn ring_acceptors_match_both_ring_neighbors_as_base() {
        let atom_types = types(&[Some("CR"), Some("Nim"), Some("CR")]);
        let bonds = vec![[0, 1], [1, 2]];
        let patterns = HBondPatterns {
            ring_acceptors: vec![acceptor("Nim", "CR", "CR", "hbacc_IME")],
            ..HBondPatterns::default()
        };
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &patterns);
        let triples: Vec<(usize, usize, usize)> = analysis
            .ring_acceptors
            .iter()
            .map(|g| (g.a, g.b, g.b0))
            .collect();
        assert_eq!(triples, vec![(1, 0, 2), (1, 2, 0)]);
    }

    #[test]
    fn empty_pattern_categories_give_empty_collections() {
        let (atom_types, bonds) = peptide_bond_fixture();
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &HBondPatterns::default());
        assert_eq!(analysis, HBondElementAnalysis::default());
    }

    #[test]
    fn untyped_atoms_and_duplicate_bonds_are_ignored() {
        let mut atom_types = peptide_bond_fixture().0;
        atom_types.push(None);
        atom_types[0] = None;
        let bonds = vec![[0, 1], [1, 2], [2, 1], [1, 3], [3, 4], [4, 3], [3, 5], [5, 6]];
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &backbone_patterns());

        assert_eq!(analysis.donors.len(), 1);
        assert!(analysis.sp2_acceptors.is_empty());
    }

    #[test]
    fn one_pattern_key_may_carry_several_types() {
        let (atom_types, bonds) = peptide_bond_fixture();
        let mut patterns = backbone_patterns();
        patterns.donors.push(DonorPattern {
            d: "Nbb".into(),
            h: "HNbb".into(),
            donor_type: "hbdon_ALT".into(),
        });
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &patterns);
        let donor_types: Vec<&str> =
            analysis.donors.iter().map(|d| d.donor_type.as_str()).collect();
        assert_eq!(donor_types, vec!["hbdon_PBA", "hbdon_ALT"]);
    }

    #[test]
    fn all_acceptors_walks_kinds_in_order() {
        let atom_types = types(&[
            Some("CAbb"),
            Some("CObb"),
            Some("OCbb"),
            Some("CH2"),
            Some("OH"),
            Some("Hpol"),
        ]);
        let bonds = vec![[0, 1], [1, 2], [3, 4], [4, 5]];
        let analysis = HBondElementAnalysis::setup(&atom_types, &bonds, &backbone_patterns());
        let kinds: Vec<AcceptorKind> = analysis.all_acceptors().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![AcceptorKind::Sp2, AcceptorKind::Sp3]);
    }

    #[test]
    fn packed_dipeptide_has_exactly_one_donor_and_one_acceptor() {
        use crate::core::forcefield::params::ParameterDatabase;
        use crate::core::models::fixtures::{bundled_db, peptide};
        use crate::core::models::system::PackedResidueSystem;
        use crate::core::utils::geometry::nan_point;

        // ALA without its amide H, GLY without its carbonyl O: the only donor
        // is GLY N-H and the only acceptor is ALA O.
        let db = bundled_db();
        let mut residues = peptide(&db, &["ALA", "GLY"]);
        residues[0].set_atom_coord("H", nan_point());
        residues[1].set_atom_coord("O", nan_point());
        let system = PackedResidueSystem::from_residues(&residues, 8).unwrap();
        let global = |r: usize, atom: &str| {
            system.segments()[r].start + system.residue_types()[r].atom_index(atom).unwrap()
        };

        let params = ParameterDatabase::bundled().unwrap();
        let analysis = HBondElementAnalysis::setup(
            &system.atom_types_with_missing_dropped(),
            system.bonds(),
            &params.scoring.hbond.atom_groups,
        );

        assert_eq!(
            analysis.donors,
            vec![Donor {
                d: global(1, "N"),
                h: global(1, "H"),
                donor_type: "hbdon_PBA".into()
            }]
        );
        assert_eq!(
            analysis.sp2_acceptors,
            vec![AcceptorGroup {
                a: global(0, "O"),
                b: global(0, "C"),
                b0: global(0, "CA"),
                acceptor_type: "hbacc_PBA".into()
            }]
        );
        assert_eq!((global(1, "N"), global(1, "H")), (16, 20));
        assert_eq!((global(0, "O"), global(0, "C"), global(0, "CA")), (3, 2, 1));
        assert!(analysis.sp3_acceptors.is_empty());
        assert!(analysis.ring_acceptors.is_empty());
    }

    #[test]
    fn patterns_deserialize_with_missing_categories() {
        let patterns: HBondPatterns = toml::from_str(
            r#"
            [[donors]]
            d = "OH"
            h = "Hpol"
            donor_type = "hbdon_AHX"
            "#,
        )
        .unwrap();
        assert_eq!(patterns.donors.len(), 1);
        assert!(patterns.sp2_acceptors.is_empty());
        assert!(patterns.ring_acceptors.is_empty());
    }
}
