use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "aircost")]
#[command(about = "Air-shipment landed cost calculator: costing + invoice workbooks in, priced line items out.")]
#[command(long_about = "Aircost - Automated air-shipment cost calculation

Parses a costing workbook (charges, exchange rate, duty→factor table) and a
supplier invoice (line items with flexible layouts), classifies every item
into a customs duty category, interpolates its markup factor, and derives
landed cost, total value and a quarter-rounded selling price.

COMMANDS:
  process       - Run the full pipeline over a costing + invoice pair
  show          - Reload a saved shipment record and print its summary
  import-rules  - Convert a keyword/duty spreadsheet into a rules JSON file
  rules         - Print the classifier's precedence tiers

EXAMPLES:
  aircost process costing.xlsx invoice.xlsx
  aircost process costing.xlsx invoice.xlsx -w customs.xlsx --export out.xlsx
  aircost process costing.xlsx invoice.xlsx --rules rules.json --save ./shipments
  aircost import-rules duties.xlsx rules.json
  aircost show 5cf120a3-… --dir ./shipments

Set RUST_LOG=debug to trace header detection and classification decisions.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Run the full pipeline over one shipment.

Reads the first worksheet of each workbook. The costing sheet provides the
scalar charges and the duty→factor table; the invoice provides line items
(header row auto-detected, columns resolved by role). An optional customs
worksheet and an optional rules JSON extend the duty classification.

Parsing is deliberately tolerant: malformed cells degrade to zero and
unknown layouts fall back to fixed positions. The only hard failure is an
invoice with no parseable rows at all.")]
    /// Process a costing + invoice pair into priced line items
    Process {
        /// Path to the costing workbook (.xlsx)
        costing: PathBuf,

        /// Path to the supplier invoice workbook (.xlsx)
        invoice: PathBuf,

        /// Optional customs worksheet with tariff/duty rows
        #[arg(short, long)]
        worksheet: Option<PathBuf>,

        /// Optional user-declared rules JSON (see import-rules)
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Export the processed invoice to an .xlsx file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Save the shipment record into this store directory
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show verbose processing steps
        #[arg(short = 'v', long)]
        verbose: bool,
    },

    /// Reload a saved shipment record and print its summary
    Show {
        /// Record id returned by process --save
        id: String,

        /// Store directory
        #[arg(short, long, default_value = "./shipments")]
        dir: PathBuf,
    },

    #[command(long_about = "Import a keyword/duty mapping spreadsheet.

Locates the product and duty columns from the sheet's header (an optional
tariff column is picked up too) and writes a rules JSON file consumable by
'process --rules'. Duty cells may be percentages (\"15%\"), the word FREE,
or plain numbers.

This is the one import that can fail outright: a sheet without both a
product and a duty column is reported as unusable.")]
    /// Convert a keyword/duty spreadsheet into a rules JSON file
    ImportRules {
        /// Path to the mapping spreadsheet (.xlsx)
        input: PathBuf,

        /// Output rules JSON path
        output: PathBuf,
    },

    /// Print the classifier's precedence tiers (and a rules file, if given)
    Rules {
        /// Optional rules JSON to print as tier 3
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            costing,
            invoice,
            worksheet,
            rules,
            export,
            save,
            verbose,
        } => aircost::cli::process(costing, invoice, worksheet, rules, export, save, verbose)?,

        Commands::Show { id, dir } => aircost::cli::show(id, dir)?,

        Commands::ImportRules { input, output } => aircost::cli::import_rules(input, output)?,

        Commands::Rules { file } => aircost::cli::rules(file)?,
    }

    Ok(())
}
