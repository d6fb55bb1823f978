use super::LogProgress;
use crate::reports;
use clap::Args;
use pfpforge::api;
use pfpforge::collection::CollectionDefinition;
use pfpforge::config::Config;
use pfpforge::error::{ForgeError, ForgeResult};
use std::path::Path;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub config: Config,

    /// Overwrite an existing record
    #[arg(short, long, default_value_t = false)]
    pub force: bool,
}

pub fn run(args: GenerateArgs, def: &CollectionDefinition) -> ForgeResult<()> {
    let record_path = &args.config.paths.record;
    if Path::new(record_path).exists() && !args.force {
        return Err(ForgeError::Config(format!(
            "record '{}' already exists (use --force to replace it)",
            record_path
        )));
    }

    let record = api::run_allocation(def, &args.config, &LogProgress)?;
    reports::print_distribution(def, &record);
    Ok(())
}
