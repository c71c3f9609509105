//! gdpx - GDP to common currency converter
//!
//! Reads GDP and FX rate sheets from an Excel workbook, divides each GDP cell
//! by the matching FX rate, and reports the cells that could not be converted.
//! Countries in a shared-currency group read their rate from one reference
//! row (e.g. "Euro Area") instead of their own.
//!
//! # Example
//!
//! ```no_run
//! use gdpx::core::{CurrencyGroup, MergeConverter};
//! use gdpx::excel::{ExcelImporter, ExtractOptions, SheetSelector};
//!
//! let options = ExtractOptions::default();
//! let mut importer = ExcelImporter::open("upload.xlsx")?;
//! let gdp = importer.extract(&SheetSelector::Index(0), &options)?;
//! let fx = importer.extract(&SheetSelector::Index(1), &options)?;
//!
//! let group = CurrencyGroup::from_names(["France", "Germany"]);
//! let outcome = MergeConverter::new("Euro Area").convert(&gdp, &fx, &group);
//!
//! for err in &outcome.errors {
//!     println!("{} {}: {}", err.country, err.year, err.reason);
//! }
//! # Ok::<(), gdpx::error::GdpError>(())
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{GdpError, GdpResult};
pub use types::{ConvertedTable, ErrorRecord, FailureReason, RawCell, RawTable};
