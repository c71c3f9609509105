use clap::{Parser, Subcommand};
use gdpx::cli::{self, ConvertArgs, GroupChoice};
use gdpx::error::GdpResult;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gdpx")]
#[command(about = "Convert GDP spreadsheets to a common currency basis using FX rates.")]
#[command(long_about = "gdpx - GDP to common currency converter

Reads a two-sheet Excel workbook (sheet 0: GDP, sheet 1: FX rates), divides
each GDP cell by the matching FX rate and writes the result to a new workbook.
Countries in the shared-currency group use the reference FX row (default
'Euro Area') instead of their own.

Cells that cannot be converted are left blank and listed in an error report
(Country, Year, Error). One bad cell never stops the others.

COMMANDS:
  convert     - Convert GDP to the common currency basis
  countries   - List the countries found in the GDP sheet

EXAMPLES:
  gdpx countries upload.xlsx
  gdpx convert upload.xlsx                          # default shared-currency group
  gdpx convert upload.xlsx -s France -s Germany     # explicit group
  gdpx convert upload.xlsx --no-default-group --csv out.csv")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert GDP values to the common currency basis.

SHARED CURRENCY:
  Repeat -s/--shared once per country. Names are matched exactly against the
  GDP sheet; unknown names are ignored with a warning. Without -s the default
  preset from the config is used, unless --no-default-group is given.

OUTPUT:
  <input>_output.xlsx by default: one row per country, one column per year.
  --errors-sheet adds an 'Errors' sheet with the failure report.
  --csv also writes the table as CSV.")]
    /// Convert GDP values to the common currency basis
    Convert {
        /// Path to Excel file (.xlsx)
        input: PathBuf,

        /// Output Excel file path (.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Country using the shared currency (repeatable)
        #[arg(short, long = "shared")]
        shared: Vec<String>,

        /// Use an empty shared-currency group instead of the preset
        #[arg(long)]
        no_default_group: bool,

        /// Also write the converted table as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Add an 'Errors' sheet to the output workbook
        #[arg(long)]
        errors_sheet: bool,

        /// YAML config file
        #[arg(short, long, env = "GDPX_CONFIG")]
        config: Option<PathBuf>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the countries found in the GDP sheet
    Countries {
        /// Path to Excel file (.xlsx)
        input: PathBuf,

        /// YAML config file
        #[arg(short, long, env = "GDPX_CONFIG")]
        config: Option<PathBuf>,
    },
}

fn main() -> GdpResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            shared,
            no_default_group,
            csv,
            errors_sheet,
            config,
            verbose,
        } => cli::convert(ConvertArgs {
            input,
            output,
            csv,
            group: GroupChoice::from_args(shared, no_default_group),
            errors_sheet,
            config,
            verbose,
        }),

        Commands::Countries { input, config } => cli::countries(input, config),
    }
}
