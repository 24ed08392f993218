use super::{load_chemical_db, load_parameters};
use crate::cli::ScoreArgs;
use crate::config::{FileConfig, resolve_score_config};
use crate::error::Result;
use resipack::workflows::pack;
use resipack::workflows::score::{self, ScoreReport};
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    let (config, sources) = resolve_score_config(&file_config, &args)?;

    let chemical_db = load_chemical_db(sources.chemical_db.as_deref())?;
    let params = load_parameters(sources.parameters.as_ref())?;

    info!("Scoring structure from {:?}", &args.input);
    let system = pack::run_from_path(&args.input, &chemical_db, config.block_size)?;
    let report = score::run(&system, &config, &params)?;
    print!("{}", format_report(&report));
    Ok(())
}

fn format_report(report: &ScoreReport) -> String {
    let mut out = format!(
        "{:<12} {:>14} {:>8} {:>14}\n",
        "term", "energy", "weight", "weighted"
    );
    for term in &report.terms {
        out.push_str(&format!(
            "{:<12} {:>14.4} {:>8.3} {:>14.4}\n",
            term.term.name(),
            term.energy,
            term.weight,
            term.weighted()
        ));
    }
    out.push_str(&format!("{:<12} {:>38.4}\n", "total", report.total));
    out
}
