use crate::reports;
use clap::Args;
use pfpforge::collection::CollectionDefinition;
use pfpforge::config::OutputPaths;
use pfpforge::error::{ForgeError, ForgeResult};
use pfpforge::record::RecordStore;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub paths: OutputPaths,

    /// Also write the distribution table as CSV
    #[arg(long)]
    pub csv: Option<String>,
}

pub fn run(args: InspectArgs, def: &CollectionDefinition) -> ForgeResult<()> {
    let store = RecordStore::new(&args.paths.record);
    let record = store
        .load()?
        .ok_or_else(|| ForgeError::Record(format!("no record at {}", args.paths.record)))?;
    record.validate_against(def)?;

    reports::print_distribution(def, &record);
    reports::print_top_scores(&record, 10);

    if let Some(path) = &args.csv {
        reports::write_distribution_csv(def, &record, path)?;
        println!("Wrote {}", path);
    }
    Ok(())
}
