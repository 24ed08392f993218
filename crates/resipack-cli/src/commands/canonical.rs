use crate::cli::CanonicalArgs;
use crate::error::Result;
use resipack::core::io::pdb::PdbFile;
use resipack::core::io::traits::StructureFile;
use resipack::workflows::{WorkflowError, canonical};
use tracing::info;

pub fn run(args: CanonicalArgs) -> Result<()> {
    let records = PdbFile::read_from_path(&args.input).map_err(WorkflowError::from)?;
    let form = canonical::run(&records);

    info!("Writing canonical form to {:?}", &args.output);
    canonical::write_toml(&form, &args.output)?;
    println!(
        "Canonical form of {} residue(s) written to: {}",
        form.res_types.len(),
        args.output.display()
    );
    Ok(())
}
