use super::LogProgress;
use crate::reports;
use clap::Args;
use pfpforge::api::{self, PhaseOutcome};
use pfpforge::collection::CollectionDefinition;
use pfpforge::config::Config;
use pfpforge::error::ForgeResult;

#[derive(Args, Debug, Clone)]
pub struct AutoArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long, default_value_t = false)]
    pub metadata_only: bool,
}

pub fn run(args: AutoArgs, def: &CollectionDefinition) -> ForgeResult<()> {
    match api::run_auto(def, &args.config, args.metadata_only, &LogProgress)? {
        PhaseOutcome::Allocated(record) => {
            reports::print_distribution(def, &record);
            println!("Allocated {} items", record.pfps.len());
        }
        PhaseOutcome::Rendered(summary) => println!("Rendered {} items", summary.items),
    }
    Ok(())
}
