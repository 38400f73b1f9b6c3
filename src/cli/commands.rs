use crate::core::classifier::Classifier;
use crate::error::{AircostError, AircostResult};
use crate::excel::{load_grid, ShipmentExporter};
use crate::pipeline::process_shipment;
use crate::sheets::read_duty_mappings;
use crate::store::{JsonShipmentStore, ShipmentStore};
use crate::types::{DutyRule, ShipmentRecord};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Load a user-declared rules JSON file.
fn load_rules(path: &PathBuf) -> AircostResult<Vec<DutyRule>> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json)
        .map_err(|e| AircostError::Parse(format!("Invalid rules file '{}': {e}", path.display())))
}

/// Execute the process command: parse, classify, price, aggregate.
#[allow(clippy::too_many_arguments)]
pub fn process(
    costing: PathBuf,
    invoice: PathBuf,
    worksheet: Option<PathBuf>,
    rules: Option<PathBuf>,
    export: Option<PathBuf>,
    save: Option<PathBuf>,
    verbose: bool,
) -> AircostResult<()> {
    println!("{}", "✈️  Aircost - Processing shipment".bold().green());
    println!("   Costing: {}", costing.display());
    println!("   Invoice: {}", invoice.display());
    if let Some(ref w) = worksheet {
        println!("   Customs worksheet: {}", w.display());
    }
    println!();

    if verbose {
        println!("{}", "📖 Decoding workbooks...".cyan());
    }
    let costing_grid = load_grid(&costing)?;
    let invoice_grid = load_grid(&invoice)?;
    let worksheet_grid = worksheet.map(load_grid).transpose()?;

    let user_rules = rules.as_ref().map(load_rules).transpose()?.unwrap_or_default();
    if verbose {
        println!("   Loaded {} user rule(s)", user_rules.len());
        println!("{}", "🧮 Classifying and pricing line items...".cyan());
    }

    let record = process_shipment(
        &costing_grid,
        &invoice_grid,
        worksheet_grid.as_ref(),
        &user_rules,
        &Classifier::default(),
    )?;

    print_summary(&record);

    if let Some(out) = export {
        ShipmentExporter::new(&record).export(&out)?;
        println!("\n{} Exported to {}", "💾".green(), out.display());
    }

    if let Some(dir) = save {
        let id = JsonShipmentStore::new(dir).put(&record)?;
        println!("\n{} Saved shipment record: {}", "🗂️".green(), id.bold());
    }

    Ok(())
}

/// Execute the show command: reload a saved record and print its summary.
pub fn show(id: String, dir: PathBuf) -> AircostResult<()> {
    println!("{}", "✈️  Aircost - Saved shipment".bold().green());
    println!("   Record: {}\n", id.bright_blue());

    let store = JsonShipmentStore::new(dir);
    let record = store
        .get(&id)?
        .ok_or_else(|| AircostError::Store(format!("No shipment record with id '{id}'")))?;

    println!("   Created: {}", record.created_at.format("%Y-%m-%d %H:%M UTC"));
    print_summary(&record);
    Ok(())
}

/// Execute the import-rules command: keyword/duty workbook → rules JSON.
pub fn import_rules(input: PathBuf, output: PathBuf) -> AircostResult<()> {
    println!("{}", "✈️  Aircost - Importing duty rules".bold().green());
    println!("   From: {}", input.display());
    println!("   To:   {}\n", output.display());

    let grid = load_grid(&input)?;
    let rules = read_duty_mappings(&grid)?;

    let json = serde_json::to_string_pretty(&rules)
        .map_err(|e| AircostError::Store(format!("Failed to serialize rules: {e}")))?;
    fs::write(&output, json)?;

    println!("{} Imported {} rule(s)", "✅".green(), rules.len());
    for rule in &rules {
        println!(
            "   {} → {}",
            rule.keyword.bright_blue(),
            format!("{}%", rule.duty_percent).bold()
        );
    }
    Ok(())
}

/// Execute the rules command: print classifier precedence and user rules.
pub fn rules(file: Option<PathBuf>) -> AircostResult<()> {
    println!("{}", "✈️  Aircost - Duty classification rules".bold().green());
    let classifier = Classifier::default();

    println!("\n{}", "🔢 Code shims (tier 1):".bold().cyan());
    for (code, duty) in classifier.code_shims() {
        println!("   {} → {}%", code.bright_blue(), duty);
    }

    println!("\n{}", "🏷️  Category rules (tier 2, in order):".bold().cyan());
    for category in classifier.categories() {
        println!(
            "   {} {} → {}%",
            category.name.bright_blue(),
            format!("{:?}", category.keywords).dimmed(),
            category.duty_percent
        );
    }

    if let Some(path) = file {
        let user_rules = load_rules(&path)?;
        println!("\n{}", "📋 User rules (tier 3):".bold().cyan());
        for rule in &user_rules {
            println!(
                "   {} ({}) → {}",
                rule.keyword.bright_blue(),
                rule.tariff.dimmed(),
                rule.duty_formula.bold()
            );
        }
    }

    Ok(())
}

/// Print totals and the per-duty breakdown for a processed shipment.
fn print_summary(record: &ShipmentRecord) {
    let totals = &record.totals;

    println!("{}", "✅ Shipment summary:".bold().green());
    println!(
        "   Invoice total: {} ({} items)",
        format!("${}", format_number(totals.total_invoice_amount)).bold(),
        record.processed.len()
    );
    println!(
        "   Total final cost: {}",
        format!("R{}", format_number(totals.total_final_cost)).bold().green()
    );
    println!(
        "   Effective average factor: {}",
        format_number(totals.effective_factor).bold()
    );
    if record.costing.exchange_rate > 0.0 {
        println!(
            "   Exchange rate: {}",
            format_number(record.costing.exchange_rate)
        );
    }

    println!("\n   {}", "Duty breakdown:".bold());
    for group in &totals.groups {
        println!(
            "      {} duty | {} item(s) | invoice ${} × factor {} → R{}",
            format!("{}%", group.duty_percent).bright_blue().bold(),
            group.count,
            format_number(group.invoice_amount),
            format_number(group.factor),
            format_number(group.final_cost).bold()
        );
    }
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;
