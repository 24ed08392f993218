use super::traits::StructureFile;
use nalgebra::Point3;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::trace;

/// Minimum width of an atom record; the temperature factor ends at column 66.
pub const ATOM_RECORD_WIDTH: usize = 66;

const ELEMENT_LEADING_LETTERS: [char; 5] = ['H', 'C', 'N', 'O', 'S'];

/// One atom observation from a fixed-column coordinate record.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Name of the enclosing `MODEL` block, empty if none was declared.
    pub model: String,
    /// Zero-based model index, assigned in first-seen order.
    pub modeli: usize,
    /// Zero-based chain index, incremented at every chain break.
    pub chaini: usize,
    /// Record kind without padding (`ATOM` or `HETATM`).
    pub record_name: String,
    pub atomi: i64,
    /// Atom name with surrounding whitespace removed.
    pub atomn: String,
    pub location: String,
    pub resn: String,
    pub chain: String,
    pub resi: i64,
    pub insert: String,
    pub position: Point3<f64>,
    pub occupancy: f64,
    pub b: f64,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Format error on line {line}: {kind}")]
    Format {
        line: usize,
        kind: PdbFormatErrorKind,
    },
    #[error("Atom {atomi}: {field} '{value}' does not fit its {width}-column field")]
    FieldOverflow {
        atomi: i64,
        field: &'static str,
        width: usize,
        value: String,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PdbFormatErrorKind {
    #[error("Line is too short for an atom record (requires {required} columns, found {actual})")]
    LineTooShort { required: usize, actual: usize },
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<i64, PdbFormatErrorKind> {
    let raw = slice_and_trim(line, start, end);
    raw.parse().map_err(|_| PdbFormatErrorKind::InvalidInt {
        columns,
        value: raw.into(),
    })
}

fn parse_float(
    line: &str,
    start: usize,
    end: usize,
    columns: &'static str,
) -> Result<f64, PdbFormatErrorKind> {
    let raw = slice_and_trim(line, start, end);
    raw.parse().map_err(|_| PdbFormatErrorKind::InvalidFloat {
        columns,
        value: raw.into(),
    })
}

fn is_atom_record(line: &str) -> bool {
    line.starts_with("ATOM  ") || line.starts_with("HETATM")
}

/// Parses one atom line; segmentation indices are filled in by the caller.
fn parse_atom_line(line: &str, model: &str) -> Result<AtomRecord, PdbFormatErrorKind> {
    if line.len() < ATOM_RECORD_WIDTH {
        return Err(PdbFormatErrorKind::LineTooShort {
            required: ATOM_RECORD_WIDTH,
            actual: line.len(),
        });
    }

    let atomi = parse_int(line, 6, 11, "7-11")?;
    let resi = parse_int(line, 22, 26, "23-26")?;
    let x = parse_float(line, 30, 38, "31-38")?;
    let y = parse_float(line, 38, 46, "39-46")?;
    let z = parse_float(line, 46, 54, "47-54")?;
    let occupancy = parse_float(line, 54, 60, "55-60")?;
    let b = parse_float(line, 60, 66, "61-66")?;

    Ok(AtomRecord {
        model: model.to_string(),
        modeli: 0,
        chaini: 0,
        record_name: slice_and_trim(line, 0, 6).to_string(),
        atomi,
        atomn: slice_and_trim(line, 12, 16).to_string(),
        location: slice_and_trim(line, 16, 17).to_string(),
        resn: slice_and_trim(line, 17, 20).to_string(),
        chain: slice_and_trim(line, 21, 22).to_string(),
        resi,
        insert: slice_and_trim(line, 26, 27).to_string(),
        position: Point3::new(x, y, z),
        occupancy,
        b,
    })
}

/// Formats an atom name into its 4-column field.
///
/// Names under four characters that begin with a one-letter element symbol
/// get a leading space so the element lines up in column 14.
pub fn format_atom_name(atomn: &str) -> String {
    if atomn.len() < 4 && atomn.starts_with(ELEMENT_LEADING_LETTERS) {
        format!(" {:<3}", atomn)
    } else {
        format!("{:<4}", atomn)
    }
}

/// Formats one atom record as a 66-column line without a trailing newline.
///
/// Fails with [`PdbError::FieldOverflow`] when a number is too wide for its
/// columns (coordinates outside -999.999..=9999.999, serials above 99999),
/// since a wider value would shift every later column.
pub fn format_atom_line(record: &AtomRecord) -> Result<String, PdbError> {
    let fit = |field: &'static str, width: usize, value: String| -> Result<String, PdbError> {
        if value.len() > width {
            Err(PdbError::FieldOverflow {
                atomi: record.atomi,
                field,
                width,
                value,
            })
        } else {
            Ok(value)
        }
    };
    let serial = fit("serial", 5, record.atomi.to_string())?;
    let resi = fit("residue number", 4, record.resi.to_string())?;
    let x = fit("x", 8, format!("{:.3}", record.position.x))?;
    let y = fit("y", 8, format!("{:.3}", record.position.y))?;
    let z = fit("z", 8, format!("{:.3}", record.position.z))?;
    let occupancy = fit("occupancy", 6, format!("{:.2}", record.occupancy))?;
    let b = fit("temperature factor", 6, format!("{:.2}", record.b))?;

    Ok(format!(
        "{:<6}{:>5} {}{:1}{:<3} {:1}{:>4}{:1}   {:>8}{:>8}{:>8}{:>6}{:>6}",
        record.record_name,
        serial,
        format_atom_name(&record.atomn),
        record.location,
        record.resn,
        record.chain,
        resi,
        record.insert,
        x,
        y,
        z,
        occupancy,
        b,
    ))
}

/// Reader and writer for the fixed-column PDB coordinate format.
pub struct PdbFile;

impl PdbFile {
    /// Parses atom records from a sequence of lines.
    ///
    /// Only `ATOM`/`HETATM` records are kept. `MODEL` and `TER` records close
    /// the current chain (and, for `MODEL`, the current model); a change of
    /// chain id between adjacent atoms also closes the chain.
    pub fn parse_lines<I, S>(lines: I) -> Result<Vec<AtomRecord>, PdbError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut atoms: Vec<AtomRecord> = Vec::new();
        let mut chain_ends: Vec<bool> = Vec::new();
        let mut model_ends: Vec<bool> = Vec::new();
        let mut model_name = String::new();

        for (line_num, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim_end_matches(['\r', '\n']);
            let line_num = line_num + 1;

            if line.starts_with("MODEL") {
                if let Some(last) = model_ends.last_mut() {
                    *last = true;
                }
                if let Some(last) = chain_ends.last_mut() {
                    *last = true;
                }
                model_name = line.get(6..).unwrap_or("").trim().to_string();
            } else if line.starts_with("TER") {
                if let Some(last) = chain_ends.last_mut() {
                    *last = true;
                }
            } else if is_atom_record(line) {
                let atom = parse_atom_line(line, &model_name)
                    .map_err(|kind| PdbError::Format { line: line_num, kind })?;
                atoms.push(atom);
                chain_ends.push(false);
                model_ends.push(false);
            }
        }

        for i in 1..atoms.len() {
            if atoms[i - 1].chain != atoms[i].chain {
                chain_ends[i - 1] = true;
            }
        }

        let mut chaini = 0;
        let mut modeli = 0;
        for (i, atom) in atoms.iter_mut().enumerate() {
            if i > 0 {
                if chain_ends[i - 1] {
                    chaini += 1;
                }
                if model_ends[i - 1] {
                    modeli += 1;
                }
            }
            atom.chaini = chaini;
            atom.modeli = modeli;
        }

        trace!(
            atoms = atoms.len(),
            chains = atoms.last().map_or(0, |a| a.chaini + 1),
            "Parsed PDB atom records."
        );
        Ok(atoms)
    }

    /// Parses atom records from a single string with embedded newlines.
    pub fn parse_str(content: &str) -> Result<Vec<AtomRecord>, PdbError> {
        Self::parse_lines(content.lines())
    }

    /// Serializes records into `MODEL`/atoms/`TER`/`ENDMDL` blocks, one block per
    /// distinct model name in first-seen order.
    pub fn to_pdb_string(records: &[AtomRecord]) -> Result<String, PdbError> {
        let mut order: Vec<&str> = Vec::new();
        let mut groups: HashMap<&str, Vec<&AtomRecord>> = HashMap::new();
        for record in records {
            let key = record.model.as_str();
            groups
                .entry(key)
                .or_insert_with(|| {
                    order.push(key);
                    Vec::new()
                })
                .push(record);
        }

        let mut out = String::new();
        for model in order {
            out.push_str(&format!("MODEL {model}\n"));
            for record in &groups[model] {
                out.push_str(&format_atom_line(record)?);
                out.push('\n');
            }
            out.push_str("TER\n");
            out.push_str("ENDMDL\n");
        }
        Ok(out)
    }
}

impl StructureFile for PdbFile {
    type Record = AtomRecord;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Vec<Self::Record>, Self::Error> {
        let lines = reader.lines().collect::<Result<Vec<String>, io::Error>>()?;
        Self::parse_lines(lines)
    }

    fn write_to(records: &[Self::Record], writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(Self::to_pdb_string(records)?.as_bytes())?;
        Ok(())
    }
}
