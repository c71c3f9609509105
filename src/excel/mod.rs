//! Spreadsheet I/O
//!
//! - Import: GDP/FX worksheets (.xlsx) → RawTable
//! - Export: converted table → .xlsx or CSV

mod csv_writer;
mod exporter;
mod importer;

pub use csv_writer::{write_csv, write_errors_csv};
pub use exporter::{default_output_path, ExcelExporter, ERRORS_SHEET, ERROR_HEADERS, RESULT_SHEET};
pub use importer::{extract_range, ExcelImporter, ExtractOptions, SheetSelector};
