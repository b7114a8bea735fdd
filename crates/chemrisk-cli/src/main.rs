mod commands;
mod output;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chemrisk",
    version,
    about = "Environmental and health risk assessment for chemical compounds via PubChem"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess a compound by name, CID, molecular formula, InChI or InChIKey
    Assess {
        /// Compound identifier (e.g. "aspirin", "2244", "C9H8O4")
        query: String,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show full evidence lists, not just the risk summary
        #[arg(long)]
        verbose: bool,
    },
    /// Show how a query string is classified, without any network call
    Detect {
        /// Compound identifier to classify
        query: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            query,
            output,
            verbose,
        } => commands::assess::run(&query, &output, verbose),
        Commands::Detect { query } => commands::detect::run(&query),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
