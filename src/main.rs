use clap::{Parser, Subcommand};
use pfpforge::collection::CollectionDefinition;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(
        global = true,
        short = 'c',
        long,
        default_value = "data/collection.json"
    )]
    collection: String,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Allocate the whole collection and save the record
    Generate(cmd::generate::GenerateArgs),
    /// Write metadata and layer manifests from a saved record
    Render(cmd::render::RenderArgs),
    /// Allocate if no record exists, otherwise render from it
    Auto(cmd::auto::AutoArgs),
    /// Compare configured and realized rarity for a saved record
    Inspect(cmd::inspect::InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚀 Initializing PfpForge...");
    info!("📂 Loading Collection: {}", cli.collection);
    let def = CollectionDefinition::load_from_file(&cli.collection).unwrap_or_else(|e| {
        error!("{}", e);
        process::exit(1);
    });

    let result = match cli.command {
        Commands::Generate(args) => cmd::generate::run(args, &def),
        Commands::Render(args) => cmd::render::run(args, &def),
        Commands::Auto(args) => cmd::auto::run(args, &def),
        Commands::Inspect(args) => cmd::inspect::run(args, &def),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
