use phf::{Map, phf_map};

/// Canonical amino-acid residue types. Positions are published residue-type
/// indices and must never be reordered; new types are appended.
pub static CANONICAL_RESIDUE_TYPES: [&str; 20] = [
    "ALA", "CYS", "ASP", "GLU", "PHE", "GLY", "HIS", "ILE", "LYS", "LEU",
    "MET", "ASN", "PRO", "GLN", "ARG", "SER", "THR", "VAL", "TRP", "TYR",
];

#[rustfmt::skip]
pub static RESIDUE_TYPE_INDEX: Map<&'static str, usize> = phf_map! {
    "ALA" => 0,
    "CYS" => 1,
    "ASP" => 2,
    "GLU" => 3,
    "PHE" => 4,
    "GLY" => 5,
    "HIS" => 6,
    "ILE" => 7,
    "LYS" => 8,
    "LEU" => 9,
    "MET" => 10,
    "ASN" => 11,
    "PRO" => 12,
    "GLN" => 13,
    "ARG" => 14,
    "SER" => 15,
    "THR" => 16,
    "VAL" => 17,
    "TRP" => 18,
    "TYR" => 19,
};

/// Per-residue atom slots under the PDB v3 hydrogen naming convention.
#[rustfmt::skip]
pub static PDB_V3_ATOM_NAMES: Map<&'static str, &'static [&'static str]> = phf_map! {
    "ALA" => &[
        "N", "CA", "C", "O", "OXT", "CB", "H", "H1", "H2", "H3",
        "HA", "HB1", "HB2", "HB3",
    ],
    "CYS" => &[
        "N", "CA", "C", "O", "OXT", "CB", "SG", "H", "H1", "H2",
        "H3", "HA", "HB2", "HB3", "HG",
    ],
    "ASP" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "OD1", "OD2", "H",
        "H1", "H2", "H3", "HA", "HB2", "HB3",
    ],
    "GLU" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "OE1", "OE2",
        "H", "H1", "H2", "H3", "HA", "HB2", "HB3", "HG2", "HG3",
    ],
    "PHE" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "CE1",
        "CE2", "CZ", "H", "H1", "H2", "H3", "HA", "HB2", "HB3", "HD1",
        "HD2", "HE1", "HE2", "HZ",
    ],
    "GLY" => &[
        "N", "CA", "C", "O", "OXT", "H", "H1", "H2", "H3", "HA1",
        "HA2",
    ],
    "HIS" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "ND1", "CD2", "CE1",
        "NE2", "NH", "NN", "H", "H1", "H2", "H3", "HA", "HB2", "HB3",
        "HD1", "HD2", "HE1", "HE2", "HN",
    ],
    "ILE" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG1", "CG2", "CD1", "H",
        "H1", "H2", "H3", "HA", "HB", "HG12", "HG13", "HG21", "HG22", "HG23",
        "HD11", "HD12", "HD13",
    ],
    "LYS" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "CE", "NZ",
        "H", "H1", "H2", "H3", "HA", "HB2", "HB3", "HG2", "HG3", "HD2",
        "HD3", "HE2", "HE3", "HZ1", "HZ2", "HZ3",
    ],
    "LEU" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "H",
        "H1", "H2", "H3", "HA", "HB2", "HB3", "HG", "HD11", "HD12", "HD13",
        "HD21", "HD22", "HD23",
    ],
    "MET" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "SD", "CE", "H",
        "H1", "H2", "H3", "HA", "HB2", "HB3", "HG2", "HG3", "HE1", "HE2",
        "HE3",
    ],
    "ASN" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "OD1", "ND2", "H",
        "H1", "H2", "H3", "HA", "HB2", "HB3", "HD21", "HD22",
    ],
    "PRO" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "H", "H1",
        "H2", "HA", "HB2", "HB3", "HG2", "HG3", "HD2", "HD3",
    ],
    "GLN" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "OE1", "NE2",
        "H", "H1", "H2", "H3", "HA", "HB2", "HB3", "HG2", "HG3", "HE21",
        "HE22",
    ],
    "ARG" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "NE", "CZ",
        "NH1", "NH2", "H", "H1", "H2", "H3", "HA", "HB2", "HB3", "HG2",
        "HG3", "HD2", "HD3", "HE", "HH11", "HH12", "HH21", "HH22",
    ],
    "SER" => &[
        "N", "CA", "C", "O", "OXT", "CB", "OG", "H", "H1", "H2",
        "H3", "HA", "HB2", "HB3", "HG",
    ],
    "THR" => &[
        "N", "CA", "C", "O", "OXT", "CB", "OG1", "CG2", "H", "H1",
        "H2", "H3", "HA", "HB", "HG1", "HG21", "HG22", "HG23",
    ],
    "VAL" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG1", "CG2", "H", "H1",
        "H2", "H3", "HA", "HB", "HG11", "HG12", "HG13", "HG21", "HG22", "HG23",
    ],
    "TRP" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "NE1",
        "CE2", "CE3", "CZ2", "CZ3", "CH2", "H", "H1", "H2", "H3", "HA",
        "HB2", "HB3", "HD1", "HE1", "HE3", "HZ2", "HZ3", "HH2",
    ],
    "TYR" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "CE1",
        "CE2", "CZ", "OH", "H", "H1", "H2", "H3", "HA", "HB2", "HB3",
        "HD1", "HD2", "HE1", "HE2", "HH",
    ],
};

/// The same atom slots under the historical PDB v2 naming convention, listed
/// position-for-position with [`PDB_V3_ATOM_NAMES`].
#[rustfmt::skip]
pub static PDB_V2_ATOM_NAMES: Map<&'static str, &'static [&'static str]> = phf_map! {
    "ALA" => &[
        "N", "CA", "C", "O", "OXT", "CB", "H", "1H", "2H", "3H",
        "HA", "1HB", "2HB", "3HB",
    ],
    "CYS" => &[
        "N", "CA", "C", "O", "OXT", "CB", "SG", "H", "1H", "2H",
        "3H", "HA", "1HB", "2HB", "HG",
    ],
    "ASP" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "OD1", "OD2", "H",
        "1H", "2H", "3H", "HA", "1HB", "2HB",
    ],
    "GLU" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "OE1", "OE2",
        "H", "1H", "2H", "3H", "HA", "1HB", "2HB", "1HG", "2HG",
    ],
    "PHE" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "CE1",
        "CE2", "CZ", "H", "1H", "2H", "3H", "HA", "1HB", "2HB", "HD1",
        "HD2", "HE1", "HE2", "HZ",
    ],
    "GLY" => &[
        "N", "CA", "C", "O", "OXT", "H", "1H", "2H", "3H", "1HA",
        "2HA",
    ],
    "HIS" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "ND1", "CD2", "CE1",
        "NE2", "NH", "NN", "H", "1H", "2H", "3H", "HA", "1HB", "2HB",
        "HD1", "HD2", "HE1", "HE2", "HN",
    ],
    "ILE" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG1", "CG2", "CD1", "H",
        "1H", "2H", "3H", "HA", "HB", "1HG1", "2HG1", "1HG2", "2HG2", "3HG2",
        "1HD1", "2HD1", "3HD1",
    ],
    "LYS" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "CE", "NZ",
        "H", "1H", "2H", "3H", "HA", "1HB", "2HB", "1HG", "2HG", "1HD",
        "2HD", "1HE", "2HE", "1HZ", "2HZ", "3HZ",
    ],
    "LEU" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "H",
        "1H", "2H", "3H", "HA", "1HB", "2HB", "HG", "1HD1", "2HD1", "3HD1",
        "1HD2", "2HD2", "3HD2",
    ],
    "MET" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "SD", "CE", "H",
        "1H", "2H", "3H", "HA", "1HB", "2HB", "1HG", "2HG", "1HE", "2HE",
        "3HE",
    ],
    "ASN" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "OD1", "ND2", "H",
        "1H", "2H", "3H", "HA", "1HB", "2HB", "1HD2", "2HD2",
    ],
    "PRO" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "H", "1H",
        "2H", "HA", "1HB", "2HB", "1HG", "2HG", "1HD", "2HD",
    ],
    "GLN" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "OE1", "NE2",
        "H", "1H", "2H", "3H", "HA", "1HB", "2HB", "1HG", "2HG", "1HE2",
        "2HE2",
    ],
    "ARG" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD", "NE", "CZ",
        "NH1", "NH2", "H", "1H", "2H", "3H", "HA", "1HB", "2HB", "1HG",
        "2HG", "1HD", "2HD", "HE", "1HH1", "2HH1", "1HH2", "2HH2",
    ],
    "SER" => &[
        "N", "CA", "C", "O", "OXT", "CB", "OG", "H", "1H", "2H",
        "3H", "HA", "1HB", "2HB", "HG",
    ],
    "THR" => &[
        "N", "CA", "C", "O", "OXT", "CB", "OG1", "CG2", "H", "1H",
        "2H", "3H", "HA", "HB", "HG1", "1HG2", "2HG2", "3HG2",
    ],
    "VAL" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG1", "CG2", "H", "1H",
        "2H", "3H", "HA", "HB", "1HG1", "2HG1", "3HG1", "1HG2", "2HG2", "3HG2",
    ],
    "TRP" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "NE1",
        "CE2", "CE3", "CZ2", "CZ3", "CH2", "H", "1H", "2H", "3H", "HA",
        "1HB", "2HB", "HD1", "HE1", "HE3", "HZ2", "HZ3", "HH2",
    ],
    "TYR" => &[
        "N", "CA", "C", "O", "OXT", "CB", "CG", "CD1", "CD2", "CE1",
        "CE2", "CZ", "OH", "H", "1H", "2H", "3H", "HA", "1HB", "2HB",
        "HD1", "HD2", "HE1", "HE2", "HH",
    ],
};

pub const MAX_N_CANONICAL_ATOMS: usize = 28;
