use super::load_chemical_db;
use crate::cli::PackArgs;
use crate::error::{CliError, Result};
use resipack::core::models::system::DEFAULT_BLOCK_SIZE;
use resipack::workflows::pack::{self, PackSummary};
use tracing::info;

pub fn run(args: PackArgs) -> Result<()> {
    let block_size = args.block_size.unwrap_or(DEFAULT_BLOCK_SIZE);
    if block_size == 0 {
        return Err(CliError::Argument("--block-size must be at least 1".to_string()));
    }
    let chemical_db = load_chemical_db(args.chemical_db.as_deref())?;

    info!("Packing residues from {:?}", &args.input);
    let system = pack::run_from_path(&args.input, &chemical_db, block_size)?;
    let summary = PackSummary::of(&system);
    print!("{}", format_summary(&summary, block_size));

    if let Some(output) = &args.output {
        pack::write_pdb(&system, output)?;
        println!("Packed structure written to: {}", output.display());
    }
    Ok(())
}

fn format_summary(summary: &PackSummary, block_size: usize) -> String {
    format!(
        "Residues:    {} in {} chain(s)\n\
         Atoms:       {} of {} slots (block size {})\n\
         Bonds:       {}\n\
         Connections: {}\n\
         Torsions:    {} ({} complete)\n",
        summary.n_residues,
        summary.n_chains,
        summary.n_atoms,
        summary.system_size,
        block_size,
        summary.n_bonds,
        summary.n_connections,
        summary.n_torsions,
        summary.n_complete_torsions,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::ALA_GLY;
    use resipack::workflows::WorkflowError;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(input: PathBuf, output: Option<PathBuf>, block_size: Option<usize>) -> PackArgs {
        PackArgs {
            input,
            output,
            block_size,
            chemical_db: None,
        }
    }

    #[test]
    fn packs_and_writes_the_structure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.pdb");
        let output = dir.path().join("out.pdb");
        fs::write(&input, ALA_GLY).unwrap();

        run(args(input, Some(output.clone()), Some(12))).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.lines().filter(|l| l.starts_with("ATOM")).count(), 11);
    }

    #[test]
    fn zero_block_size_is_rejected_before_reading() {
        let result = run(args(PathBuf::from("does-not-exist.pdb"), None, Some(0)));
        assert!(matches!(result, Err(CliError::Argument(_))));
    }

    #[test]
    fn missing_input_is_a_workflow_error() {
        let dir = tempdir().unwrap();
        let result = run(args(dir.path().join("absent.pdb"), None, None));
        assert!(matches!(result, Err(CliError::Workflow(WorkflowError::Pdb(_)))));
    }

    #[test]
    fn summary_lists_slot_usage() {
        let summary = PackSummary {
            n_residues: 2,
            n_chains: 1,
            system_size: 24,
            n_atoms: 11,
            n_bonds: 10,
            n_connections: 2,
            n_torsions: 6,
            n_complete_torsions: 3,
        };
        let text = format_summary(&summary, 12);
        assert!(text.contains("2 in 1 chain(s)"));
        assert!(text.contains("11 of 24 slots (block size 12)"));
        assert!(text.contains("6 (3 complete)"));
    }
}
