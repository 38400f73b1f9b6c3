//! Processed-invoice export - shipment record → .xlsx

use crate::error::{AircostError, AircostResult};
use crate::types::ShipmentRecord;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Ordered export columns for the processed invoice sheet. External
/// spreadsheet/CSV consumers rely on this field order.
pub const EXPORT_HEADERS: [&str; 12] = [
    "C/NO.",
    "CODE",
    "DESCRIPTION",
    "QTY",
    "UNIT",
    "UNIT PRICE",
    "AMOUNT",
    "DUTY %",
    "FACTOR",
    "LANDED",
    "VALUE",
    "SELLING PRICE",
];

/// Writes a shipment record as a two-sheet workbook: the processed invoice
/// rows plus a cost summary with the per-duty breakdown.
pub struct ShipmentExporter<'a> {
    record: &'a ShipmentRecord,
}

impl<'a> ShipmentExporter<'a> {
    pub fn new(record: &'a ShipmentRecord) -> Self {
        Self { record }
    }

    /// Export the record to an .xlsx file.
    pub fn export(&self, output_path: &Path) -> AircostResult<()> {
        let mut workbook = Workbook::new();

        self.write_invoice_sheet(workbook.add_worksheet())?;
        self.write_summary_sheet(workbook.add_worksheet())?;

        workbook
            .save(output_path)
            .map_err(|e| AircostError::Export(format!("Failed to save Excel file: {e}")))?;

        Ok(())
    }

    fn write_invoice_sheet(&self, worksheet: &mut Worksheet) -> AircostResult<()> {
        worksheet
            .set_name("Processed Invoice")
            .map_err(|e| AircostError::Export(format!("Failed to set worksheet name: {e}")))?;

        let bold = Format::new().set_bold();
        for (col, header) in EXPORT_HEADERS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *header, &bold)
                .map_err(|e| AircostError::Export(format!("Failed to write header: {e}")))?;
        }

        for (idx, item) in self.record.processed.iter().enumerate() {
            let row = (idx + 1) as u32;
            write_text(worksheet, row, 0, &item.carton_no)?;
            write_text(worksheet, row, 1, &item.code)?;
            write_text(worksheet, row, 2, &item.description)?;
            write_num(worksheet, row, 3, item.qty)?;
            write_text(worksheet, row, 4, &item.unit)?;
            write_num(worksheet, row, 5, item.unit_price)?;
            write_num(worksheet, row, 6, item.amount)?;
            write_num(worksheet, row, 7, f64::from(item.duty_percent))?;
            write_num(worksheet, row, 8, item.factor)?;
            write_num(worksheet, row, 9, item.landed_cost)?;
            write_num(worksheet, row, 10, item.final_cost)?;
            write_num(worksheet, row, 11, item.selling_price)?;
        }

        Ok(())
    }

    fn write_summary_sheet(&self, worksheet: &mut Worksheet) -> AircostResult<()> {
        worksheet
            .set_name("Summary")
            .map_err(|e| AircostError::Export(format!("Failed to set worksheet name: {e}")))?;

        let bold = Format::new().set_bold();
        let totals = &self.record.totals;

        write_text_fmt(worksheet, 0, 0, "Invoice Total (USD)", &bold)?;
        write_num(worksheet, 0, 1, totals.total_invoice_amount)?;
        write_text_fmt(worksheet, 1, 0, "Total Final Cost", &bold)?;
        write_num(worksheet, 1, 1, totals.total_final_cost)?;
        write_text_fmt(worksheet, 2, 0, "Effective Average Factor", &bold)?;
        write_num(worksheet, 2, 1, totals.effective_factor)?;
        write_text_fmt(worksheet, 3, 0, "Exchange Rate", &bold)?;
        write_num(worksheet, 3, 1, self.record.costing.exchange_rate)?;

        // Per-duty breakdown table.
        let header_row = 5;
        for (col, header) in ["DUTY %", "ITEMS", "INVOICE AMOUNT", "FACTOR", "FINAL COST"]
            .iter()
            .enumerate()
        {
            write_text_fmt(worksheet, header_row, col as u16, header, &bold)?;
        }
        for (idx, group) in totals.groups.iter().enumerate() {
            let row = header_row + 1 + idx as u32;
            write_num(worksheet, row, 0, f64::from(group.duty_percent))?;
            write_num(worksheet, row, 1, group.count as f64)?;
            write_num(worksheet, row, 2, group.invoice_amount)?;
            write_num(worksheet, row, 3, group.factor)?;
            write_num(worksheet, row, 4, group.final_cost)?;
        }

        Ok(())
    }
}

fn write_text(worksheet: &mut Worksheet, row: u32, col: u16, value: &str) -> AircostResult<()> {
    worksheet
        .write_string(row, col, value)
        .map_err(|e| AircostError::Export(format!("Failed to write text: {e}")))?;
    Ok(())
}

fn write_text_fmt(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &str,
    format: &Format,
) -> AircostResult<()> {
    worksheet
        .write_string_with_format(row, col, value, format)
        .map_err(|e| AircostError::Export(format!("Failed to write text: {e}")))?;
    Ok(())
}

fn write_num(worksheet: &mut Worksheet, row: u32, col: u16, value: f64) -> AircostResult<()> {
    worksheet
        .write_number(row, col, value)
        .map_err(|e| AircostError::Export(format!("Failed to write number: {e}")))?;
    Ok(())
}
