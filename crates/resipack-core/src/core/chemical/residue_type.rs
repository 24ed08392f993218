use super::database::ChemicalError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Connection on residue `i` that links to residue `i + 1`.
pub const UPSTREAM_CONNECTION: &str = "up";
/// Connection on residue `i + 1` that links back to residue `i`.
pub const DOWNSTREAM_CONNECTION: &str = "down";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AtomDef {
    pub name: String,
    pub atom_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConnectionDef {
    pub name: String,
    pub atom: String,
}

/// One atom of a torsion path: a local atom name, or an atom reached across
/// a named connection to the neighboring residue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TorsionAtom {
    pub atom: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
}

impl TorsionAtom {
    pub fn local(atom: &str) -> Self {
        Self {
            atom: atom.to_string(),
            connection: None,
        }
    }

    pub fn via(connection: &str, atom: &str) -> Self {
        Self {
            atom: atom.to_string(),
            connection: Some(connection.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TorsionDef {
    pub name: String,
    pub atoms: [TorsionAtom; 4],
}

/// Residue-type template as written in the chemical database file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResidueTypeDef {
    pub name: String,
    pub atoms: Vec<AtomDef>,
    #[serde(default)]
    pub bonds: Vec<[String; 2]>,
    #[serde(default)]
    pub connections: Vec<ConnectionDef>,
    #[serde(default)]
    pub torsions: Vec<TorsionDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub name: String,
    pub atom_index: usize,
}

/// A residue-type template with every atom reference resolved to a local index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidueType {
    pub name: String,
    pub atoms: Vec<AtomDef>,
    pub bonds: Vec<[usize; 2]>,
    pub connections: Vec<Connection>,
    pub torsions: Vec<TorsionDef>,
    atom_index: HashMap<String, usize>,
}

impl ResidueType {
    /// Resolves bond and connection atom names of a template.
    ///
    /// Torsion atoms are kept by name: atoms reached across a connection live in
    /// another residue, and unresolved local names become sentinels at packing.
    pub fn from_def(def: ResidueTypeDef) -> Result<Self, ChemicalError> {
        let mut atom_index = HashMap::with_capacity(def.atoms.len());
        for (i, atom) in def.atoms.iter().enumerate() {
            if atom_index.insert(atom.name.clone(), i).is_some() {
                return Err(ChemicalError::DuplicateAtom {
                    residue: def.name.clone(),
                    atom: atom.name.clone(),
                });
            }
        }

        let lookup = |atom: &str, context: &'static str| {
            atom_index
                .get(atom)
                .copied()
                .ok_or_else(|| ChemicalError::UnknownAtom {
                    residue: def.name.clone(),
                    atom: atom.to_string(),
                    context,
                })
        };

        let bonds = def
            .bonds
            .iter()
            .map(|[a, b]| Ok([lookup(a, "bond")?, lookup(b, "bond")?]))
            .collect::<Result<Vec<_>, ChemicalError>>()?;

        let connections = def
            .connections
            .iter()
            .map(|c| {
                Ok(Connection {
                    name: c.name.clone(),
                    atom_index: lookup(&c.atom, "connection")?,
                })
            })
            .collect::<Result<Vec<_>, ChemicalError>>()?;

        Ok(Self {
            name: def.name,
            atoms: def.atoms,
            bonds,
            connections,
            torsions: def.torsions,
            atom_index,
        })
    }

    #[inline]
    pub fn n_atoms(&self) -> usize {
        self.atoms.len()
    }

    pub fn atom_index(&self, atom_name: &str) -> Option<usize> {
        self.atom_index.get(atom_name).copied()
    }

    pub fn connection_atom(&self, connection_name: &str) -> Option<usize> {
        self.connections
            .iter()
            .find(|c| c.name == connection_name)
            .map(|c| c.atom_index)
    }

    pub fn has_connection(&self, connection_name: &str) -> bool {
        self.connection_atom(connection_name).is_some()
    }

    pub fn atom_names(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|a| a.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_def() -> ResidueTypeDef {
        ResidueTypeDef {
            name: "HOH".into(),
            atoms: vec![
                AtomDef {
                    name: "O".into(),
                    atom_type: "OH".into(),
                },
                AtomDef {
                    name: "H1".into(),
                    atom_type: "Hpol".into(),
                },
                AtomDef {
                    name: "H2".into(),
                    atom_type: "Hpol".into(),
                },
            ],
            bonds: vec![["O".into(), "H1".into()], ["O".into(), "H2".into()]],
            connections: vec![],
            torsions: vec![],
        }
    }

    #[test]
    fn from_def_resolves_bond_indices() {
        let rt = ResidueType::from_def(water_def()).unwrap();
        assert_eq!(rt.n_atoms(), 3);
        assert_eq!(rt.bonds, vec![[0, 1], [0, 2]]);
        assert_eq!(rt.atom_index("H2"), Some(2));
        assert_eq!(rt.atom_index("X"), None);
        assert_eq!(rt.atom_names().collect::<Vec<_>>(), vec!["O", "H1", "H2"]);
    }

    #[test]
    fn from_def_rejects_bond_to_unknown_atom() {
        let mut def = water_def();
        def.bonds.push(["O".into(), "H3".into()]);
        let err = ResidueType::from_def(def).unwrap_err();
        assert!(matches!(
            err,
            ChemicalError::UnknownAtom { ref atom, context: "bond", .. } if atom == "H3"
        ));
    }

    #[test]
    fn from_def_rejects_duplicate_atom_names() {
        let mut def = water_def();
        def.atoms.push(AtomDef {
            name: "O".into(),
            atom_type: "OH".into(),
        });
        assert!(matches!(
            ResidueType::from_def(def),
            Err(ChemicalError::DuplicateAtom { .. })
        ));
    }

    #[test]
    fn connections_resolve_to_local_atoms() {
        let mut def = water_def();
        def.connections.push(ConnectionDef {
            name: UPSTREAM_CONNECTION.into(),
            atom: "O".into(),
        });
        let rt = ResidueType::from_def(def).unwrap();
        assert!(rt.has_connection(UPSTREAM_CONNECTION));
        assert!(!rt.has_connection(DOWNSTREAM_CONNECTION));
        assert_eq!(rt.connection_atom(UPSTREAM_CONNECTION), Some(0));
    }

    #[test]
    fn from_def_rejects_connection_to_unknown_atom() {
        let mut def = water_def();
        def.connections.push(ConnectionDef {
            name: DOWNSTREAM_CONNECTION.into(),
            atom: "N".into(),
        });
        assert!(matches!(
            ResidueType::from_def(def),
            Err(ChemicalError::UnknownAtom {
                context: "connection",
                ..
            })
        ));
    }

    #[test]
    fn torsion_atom_constructors_set_connection() {
        assert_eq!(TorsionAtom::local("CA").connection, None);
        assert_eq!(
            TorsionAtom::via(UPSTREAM_CONNECTION, "N").connection.as_deref(),
            Some("up")
        );
    }
}
