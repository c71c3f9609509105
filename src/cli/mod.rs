//! CLI command handlers

pub mod commands;

pub use commands::{convert, countries, load_countries, run_conversion, ConversionReport, ConvertArgs, GroupChoice};
