use super::LogProgress;
use clap::Args;
use pfpforge::api;
use pfpforge::collection::CollectionDefinition;
use pfpforge::config::Config;
use pfpforge::error::ForgeResult;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub config: Config,

    /// Write metadata only, skip the layer manifests
    #[arg(long, default_value_t = false)]
    pub metadata_only: bool,
}

pub fn run(args: RenderArgs, def: &CollectionDefinition) -> ForgeResult<()> {
    let summary = api::run_render(def, &args.config, args.metadata_only, &LogProgress)?;
    println!("Rendered {} items", summary.items);
    Ok(())
}
