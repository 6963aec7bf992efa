use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tabula_cleaner::model::FillPolicy;
use tabula_cleaner::preview::{DEFAULT_PREVIEW_ROWS, render_preview};
use tabula_cleaner::sync::{self, CleanOptions, DEFAULT_FORMAT_LABEL, DEFAULT_OUTPUT_NAME};
use tabula_cleaner::{Result, ToolError};
use tracing::warn;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging().and_then(|()| run(cli)) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn init_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Clean(args) => execute_clean(args),
    }
}

fn execute_clean(args: CleanArgs) -> Result<()> {
    let options = CleanOptions {
        fill: args.fill.into(),
        output_name: args.output_name,
        format: args.format,
    };

    let outcome = sync::clean_file(&args.input, &options)?;
    println!("{}", render_preview(&outcome.table, args.preview_rows));

    match outcome.artifact {
        Some(artifact) => {
            let path = sync::write_artifact(&artifact, &args.out_dir)?;
            println!("\nwrote {} ({})", path.display(), artifact.mime);
        }
        None => warn!(format = %options.format, "no output written"),
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Normalize the headers and cells of a spreadsheet or CSV file."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Clean a table and export it.
    Clean(CleanArgs),
}

#[derive(clap::Args)]
struct CleanArgs {
    /// Input file (.xlsx, .xls or .csv).
    #[arg(long)]
    input: PathBuf,

    /// Replacement for empty cells.
    #[arg(long, value_enum, default_value_t = FillChoice::NA)]
    fill: FillChoice,

    /// Output file name, without extension.
    #[arg(long, default_value = DEFAULT_OUTPUT_NAME)]
    output_name: String,

    /// Download format: Excel, CSV or JSON.
    #[arg(long, default_value = DEFAULT_FORMAT_LABEL)]
    format: String,

    /// Directory the export is written to.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Number of cleaned rows to print.
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview_rows: usize,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum FillChoice {
    #[value(name = "n-a")]
    NA,
    Blank,
}

impl From<FillChoice> for FillPolicy {
    fn from(choice: FillChoice) -> Self {
        match choice {
            FillChoice::NA => FillPolicy::NotAvailable,
            FillChoice::Blank => FillPolicy::Blank,
        }
    }
}
