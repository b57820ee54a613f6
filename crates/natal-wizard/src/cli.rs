use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::cmd::{self, run::RunArgs, schema::SchemaArgs};
use crate::logging;

#[derive(Parser, Debug)]
#[command(
    name = "natal-wizard",
    about = "Step-by-step natal chart questionnaire",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer the questionnaire, interactively or from an answers file
    Run(RunArgs),
    /// Print the questionnaire definition or its JSON Schema
    Schema(SchemaArgs),
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    match cli.command {
        Commands::Run(args) => cmd::run::run(args),
        Commands::Schema(args) => cmd::schema::run(args),
    }
}
