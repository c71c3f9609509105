//! Excel exporter - MergeOutcome → .xlsx

use crate::core::MergeOutcome;
use crate::error::{GdpError, GdpResult};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Excel's column limit
const MAX_COLUMNS: usize = 16_384;

pub const RESULT_SHEET: &str = "Sheet1";
pub const ERRORS_SHEET: &str = "Errors";
pub const ERROR_HEADERS: [&str; 3] = ["Country", "Year", "Error"];

/// Writes the converted table as a single worksheet, optionally followed by
/// the error report.
pub struct ExcelExporter {
    include_errors: bool,
    first_column_width: f64,
}

impl Default for ExcelExporter {
    fn default() -> Self {
        Self {
            include_errors: false,
            first_column_width: 40.0,
        }
    }
}

impl ExcelExporter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_errors(mut self, include_errors: bool) -> Self {
        self.include_errors = include_errors;
        self
    }

    /// Export the outcome to an .xlsx file
    pub fn export(&self, outcome: &MergeOutcome, output_path: &Path) -> GdpResult<()> {
        let mut workbook = self.build(outcome)?;
        workbook.save(output_path).map_err(|e| {
            GdpError::Export(format!(
                "Failed to save Excel file {}: {}",
                output_path.display(),
                e
            ))
        })?;
        debug!(path = %output_path.display(), "wrote workbook");
        Ok(())
    }

    /// Export to an in-memory .xlsx buffer
    pub fn export_to_buffer(&self, outcome: &MergeOutcome) -> GdpResult<Vec<u8>> {
        let mut workbook = self.build(outcome)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(&self, outcome: &MergeOutcome) -> GdpResult<Workbook> {
        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(RESULT_SHEET)?;
        self.write_results(worksheet, outcome, &header)?;

        if self.include_errors {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(ERRORS_SHEET)?;
            self.write_errors(worksheet, outcome, &header)?;
        }

        Ok(workbook)
    }

    fn write_results(
        &self,
        worksheet: &mut Worksheet,
        outcome: &MergeOutcome,
        header: &Format,
    ) -> GdpResult<()> {
        let years = outcome.years();
        if years.len() + 1 > MAX_COLUMNS {
            return Err(GdpError::Export(format!(
                "{} year columns exceed the worksheet limit",
                years.len()
            )));
        }

        worksheet.write_string_with_format(0, 0, "Country", header)?;
        for (idx, year) in years.iter().enumerate() {
            let col = (idx + 1) as u16;
            match year_number(year) {
                Some(n) => worksheet.write_number_with_format(0, col, n, header)?,
                None => worksheet.write_string_with_format(0, col, year, header)?,
            };
        }

        for (row_idx, row) in outcome.table.rows().iter().enumerate() {
            let excel_row = (row_idx + 1) as u32;
            worksheet.write_string(excel_row, 0, &row.country)?;

            for (idx, year) in years.iter().enumerate() {
                // Failed conversions stay blank
                if let Some(Some(value)) = row.get(year) {
                    worksheet.write_number(excel_row, (idx + 1) as u16, value)?;
                }
            }
        }

        worksheet.set_column_width(0, self.first_column_width)?;
        Ok(())
    }

    fn write_errors(
        &self,
        worksheet: &mut Worksheet,
        outcome: &MergeOutcome,
        header: &Format,
    ) -> GdpResult<()> {
        for (col, name) in ERROR_HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, header)?;
        }
        for (idx, record) in outcome.errors.iter().enumerate() {
            let row = (idx + 1) as u32;
            worksheet.write_string(row, 0, &record.country)?;
            worksheet.write_string(row, 1, &record.year)?;
            worksheet.write_string(row, 2, record.reason.as_str())?;
        }
        worksheet.set_column_width(0, self.first_column_width)?;
        worksheet.set_column_width(2, self.first_column_width)?;
        Ok(())
    }
}

/// Whole-number year labels go back out as numbers, like the source headers.
fn year_number(label: &str) -> Option<f64> {
    label.parse::<i64>().ok().map(|n| n as f64)
}

/// `<stem>_output.xlsx` next to the input file
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "gdp".to_string());
    input.with_file_name(format!("{}_output.xlsx", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/tmp/data/gdp_2023.xlsx")),
            PathBuf::from("/tmp/data/gdp_2023_output.xlsx")
        );
        assert_eq!(
            default_output_path(Path::new("upload.xlsx")),
            PathBuf::from("upload_output.xlsx")
        );
    }

    #[test]
    fn test_year_number() {
        assert_eq!(year_number("2020"), Some(2020.0));
        assert_eq!(year_number("2020Q1"), None);
        assert_eq!(year_number("2020.5"), None);
        assert_eq!(year_number(""), None);
    }

    #[test]
    fn test_export_to_buffer_is_zip() {
        let outcome = MergeOutcome::default();
        let bytes = ExcelExporter::new()
            .with_errors(true)
            .export_to_buffer(&outcome)
            .unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }
}
