use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "resipack - pack residue structures into fixed-block arrays and score them.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a PDB file into residues and pack them into a block-aligned system.
    Pack(PackArgs),
    /// Score a PDB structure with the configured energy terms.
    Score(ScoreArgs),
    /// Convert a PDB file into the canonical residue form.
    Canonical(CanonicalArgs),
}

/// Arguments for the `pack` subcommand.
#[derive(Args, Debug)]
pub struct PackArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Write the packed structure back out as PDB.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Atom slots per residue block.
    #[arg(short, long, value_name = "INT")]
    pub block_size: Option<usize>,

    /// Residue type database to use instead of the bundled one.
    #[arg(long, value_name = "PATH")]
    pub chemical_db: Option<PathBuf>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a scoring configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Comma-separated score terms to evaluate, overriding the config file.
    /// Example: --terms elec,lj,hbond
    #[arg(short, long, value_name = "TERMS", value_delimiter = ',')]
    pub terms: Vec<String>,

    /// Override `block-size` from the config file.
    #[arg(short, long, value_name = "INT")]
    pub block_size: Option<usize>,

    /// Score residues with missing atoms as if those atoms were absent.
    #[arg(long)]
    pub drop_missing_atoms: bool,
}

/// Arguments for the `canonical` subcommand.
#[derive(Args, Debug)]
pub struct CanonicalArgs {
    /// Path to the input PDB file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the canonical form in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}
