mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use terras_core::config::ContextScope;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "terras",
    version,
    about = "Agricultural land price tables from government PDF reports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Document,
    Page,
}

impl From<ScopeArg> for ContextScope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Document => ContextScope::Document,
            ScopeArg::Page => ContextScope::Page,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every report (.pdf or pdftotext .txt) in a directory into the raw CSV
    Extract {
        /// Directory holding the reports
        input_dir: PathBuf,

        /// Raw CSV to write
        #[arg(short = 'O', long = "out", default_value = "data/extracted/compiled.csv")]
        out: PathBuf,

        /// JSON pipeline config
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Lifetime of table-parser state (overrides the config)
        #[arg(long, value_enum)]
        context_scope: Option<ScopeArg>,
    },
    /// Normalize raw CSV records into detailed.json and aggregated.json
    Preprocess {
        /// Raw CSV file, or a directory of them
        input: PathBuf,

        /// Directory for the JSON outputs
        #[arg(long, default_value = "dashboard/public/data")]
        out_dir: PathBuf,

        /// GeoJSON gazetteer for region enrichment (overrides the config)
        #[arg(short, long, value_name = "FILE")]
        gazetteer: Option<PathBuf>,

        /// JSON pipeline config
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Drop records without a price
        #[arg(long)]
        drop_null_prices: bool,
    },
    /// Parse a single report and print its raw records
    Parse {
        /// Path to a PDF or pdftotext .txt file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Lifetime of table-parser state
        #[arg(long, value_enum)]
        context_scope: Option<ScopeArg>,
    },
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            input_dir,
            out,
            config,
            context_scope,
        } => commands::extract::run(input_dir, out, config, context_scope.map(Into::into)),
        Commands::Preprocess {
            input,
            out_dir,
            gazetteer,
            config,
            drop_null_prices,
        } => commands::preprocess::run(input, out_dir, gazetteer, config, drop_null_prices),
        Commands::Parse {
            input_file,
            output,
            context_scope,
        } => commands::parse::run(input_file, &output, context_scope.map(Into::into)),
    };

    if let Err(e) = result {
        error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
