use crate::config::ConverterConfig;
use crate::core::{CurrencyGroup, MergeConverter, MergeOutcome};
use crate::error::GdpResult;
use crate::excel::{default_output_path, write_csv, ExcelExporter, ExcelImporter};
use crate::types::RawTable;
use colored::Colorize;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Which shared-currency group the user asked for
#[derive(Debug, Clone, Default, PartialEq)]
pub enum GroupChoice {
    /// The preset from the config
    #[default]
    Preset,
    /// No shared-currency countries
    Empty,
    Names(Vec<String>),
}

impl GroupChoice {
    pub fn from_args(shared: Vec<String>, no_default_group: bool) -> Self {
        if !shared.is_empty() {
            GroupChoice::Names(shared)
        } else if no_default_group {
            GroupChoice::Empty
        } else {
            GroupChoice::Preset
        }
    }

    fn resolve(&self, config: &ConverterConfig) -> CurrencyGroup {
        match self {
            GroupChoice::Preset => CurrencyGroup::from_names(&config.shared_currency),
            GroupChoice::Empty => CurrencyGroup::new(),
            GroupChoice::Names(names) => CurrencyGroup::from_names(names),
        }
    }
}

/// Everything one conversion run produced
#[derive(Debug)]
pub struct ConversionReport {
    pub outcome: MergeOutcome,
    /// Group after restriction to the GDP row keys
    pub group: CurrencyGroup,
    /// Requested members that are not GDP row keys
    pub ignored: Vec<String>,
}

/// Read the workbook and read its GDP row keys
pub fn load_countries(input: &Path, config: &ConverterConfig) -> GdpResult<RawTable> {
    let mut importer = ExcelImporter::open(input)?;
    importer.extract(&config.gdp_sheet, &config.extract)
}

/// Extract both sheets and run the merge. Structural problems abort here
/// before any output exists.
pub fn run_conversion(
    input: &Path,
    choice: &GroupChoice,
    config: &ConverterConfig,
) -> GdpResult<ConversionReport> {
    let mut importer = ExcelImporter::open(input)?;
    let gdp = importer.extract(&config.gdp_sheet, &config.extract)?;
    let fx = importer.extract(&config.fx_sheet, &config.extract)?;
    info!(
        gdp_rows = gdp.len(),
        fx_rows = fx.len(),
        "loaded {}",
        input.display()
    );

    let (group, ignored) = choice.resolve(config).restrict_to(&gdp);
    for name in &ignored {
        warn!(country = %name, "shared-currency country not in GDP sheet, ignored");
    }

    let converter = MergeConverter::new(config.reference_fx_row.as_str());
    let outcome = converter.convert(&gdp, &fx, &group);
    info!(
        converted = outcome.success_count(),
        failed = outcome.failure_count(),
        "conversion finished"
    );

    Ok(ConversionReport {
        outcome,
        group,
        ignored,
    })
}

/// Arguments of the convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub csv: Option<PathBuf>,
    pub group: GroupChoice,
    pub errors_sheet: bool,
    pub config: Option<PathBuf>,
    pub verbose: bool,
}

/// Execute the convert command
pub fn convert(args: ConvertArgs) -> GdpResult<()> {
    println!("{}", "💱 gdpx - Converting GDP to common currency".bold().green());
    println!("   Input: {}", args.input.display());

    let config = ConverterConfig::load(args.config.as_deref())?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    println!("   Output: {}\n", output.display());

    if args.verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let report = run_conversion(&args.input, &args.group, &config)?;

    if args.verbose {
        print_group(&report, &config);
    }

    ExcelExporter::new()
        .with_errors(args.errors_sheet)
        .export(&report.outcome, &output)?;

    if let Some(csv_path) = &args.csv {
        let file = File::create(csv_path)?;
        write_csv(&report.outcome, BufWriter::new(file))?;
        println!("   CSV file: {}", csv_path.display());
    }

    if args.verbose {
        print_table(&report.outcome);
    }

    println!("{}", "✅ Conversion Complete!".bold().green());
    println!("   Excel file: {}", output.display());
    println!(
        "   {} cells converted, {} failed\n",
        report.outcome.success_count(),
        report.outcome.failure_count()
    );

    print_errors(&report.outcome);
    Ok(())
}

/// Execute the countries command
pub fn countries(input: PathBuf, config: Option<PathBuf>) -> GdpResult<()> {
    let config = ConverterConfig::load(config.as_deref())?;
    let gdp = load_countries(&input, &config)?;
    let preset = CurrencyGroup::from_names(&config.shared_currency);

    println!("{}", "💱 gdpx - Countries".bold().green());
    println!("   File: {}\n", input.display());

    for key in gdp.keys() {
        if preset.contains(key) {
            println!("   {} {}", "●".bright_blue(), key.bold());
        } else {
            println!("   ○ {}", key);
        }
    }
    println!(
        "\n   {} countries, {} in the default shared-currency group ({})",
        gdp.len(),
        gdp.keys().filter(|k| preset.contains(k)).count(),
        config.reference_fx_row
    );
    Ok(())
}

fn print_group(report: &ConversionReport, config: &ConverterConfig) {
    println!(
        "   Shared currency via '{}': {} countries",
        config.reference_fx_row,
        report.group.len()
    );
    for name in report.group.iter() {
        println!("      {}", name);
    }
    for name in &report.ignored {
        println!("      {} {} (not in GDP sheet)", "⚠️".yellow(), name.yellow());
    }
    println!();
}

fn print_table(outcome: &MergeOutcome) {
    let years = outcome.years();
    println!("{}", "📊 Converted values:".cyan());
    for row in outcome.table.rows() {
        let cells: Vec<String> = years
            .iter()
            .map(|year| match row.get(year) {
                Some(Some(v)) => format!("{}={}", year, format_number(v)),
                Some(None) => format!("{}={}", year, "-".red()),
                None => String::new(),
            })
            .filter(|s| !s.is_empty())
            .collect();
        println!("   {:<30} {}", row.country.bright_blue(), cells.join("  "));
    }
    println!();
}

fn print_errors(outcome: &MergeOutcome) {
    if outcome.errors.is_empty() {
        return;
    }
    println!("{}", "⚠️  Rows that could not be computed:".yellow().bold());
    println!("   {:<30} {:<8} {}", "Country", "Year", "Error");
    for record in &outcome.errors {
        println!(
            "   {:<30} {:<8} {}",
            record.country,
            record.year,
            record.reason.to_string().red()
        );
    }
    println!();
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
