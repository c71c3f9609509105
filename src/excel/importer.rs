//! Excel importer - worksheet (.xlsx) → RawTable

use crate::error::{GdpError, GdpResult};
use crate::types::{RawCell, RawRow, RawTable, DEFAULT_PLACEHOLDER};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Which worksheet to read: by zero-based position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SheetSelector {
    Index(usize),
    Name(String),
}

impl fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetSelector::Index(i) => write!(f, "sheet #{}", i),
            SheetSelector::Name(n) => write!(f, "sheet '{}'", n),
        }
    }
}

/// Layout of the statistics sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractOptions {
    /// Metadata rows above the header row
    pub skip_rows: usize,
    /// Header of the row-key column
    pub key_column: String,
    /// Non-data columns that must be present and are discarded
    pub drop_columns: Vec<String>,
    /// "No data" token
    pub placeholder: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            skip_rows: 6,
            key_column: "Country".to_string(),
            drop_columns: vec!["Base Year".to_string(), "Scale".to_string()],
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

/// Reads GDP/FX worksheets from an .xlsx workbook
pub struct ExcelImporter {
    workbook: Xlsx<BufReader<File>>,
}

impl ExcelImporter {
    /// Open a workbook. A file that is not a readable .xlsx is a data format error.
    pub fn open<P: AsRef<Path>>(path: P) -> GdpResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GdpError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }
        let workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
            GdpError::DataFormat(format!("Failed to open Excel file {}: {}", path.display(), e))
        })?;
        Ok(Self { workbook })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names().to_vec()
    }

    /// Extract one sheet into a RawTable.
    pub fn extract(
        &mut self,
        selector: &SheetSelector,
        options: &ExtractOptions,
    ) -> GdpResult<RawTable> {
        let range = self.resolve(selector)?;
        let table = extract_range(&range, options)
            .map_err(|e| match e {
                GdpError::DataFormat(msg) => GdpError::DataFormat(format!("{}: {}", selector, msg)),
                other => other,
            })?;
        debug!(sheet = %selector, rows = table.len(), "extracted sheet");
        Ok(table)
    }

    fn resolve(&mut self, selector: &SheetSelector) -> GdpResult<Range<Data>> {
        let sheet_count = self.workbook.sheet_names().len();
        let result = match selector {
            SheetSelector::Index(i) => self.workbook.worksheet_range_at(*i).ok_or_else(|| {
                GdpError::DataFormat(format!(
                    "{} not found, workbook has {} sheet(s)",
                    selector, sheet_count
                ))
            })?,
            SheetSelector::Name(name) => {
                if !self.workbook.sheet_names().iter().any(|n| n == name) {
                    return Err(GdpError::DataFormat(format!("{} not found", selector)));
                }
                self.workbook.worksheet_range(name)
            }
        };
        result.map_err(|e| GdpError::DataFormat(format!("Failed to read {}: {}", selector, e)))
    }
}

/// Build a RawTable from a worksheet range.
///
/// Positions are absolute, so leading blank rows still count towards
/// `skip_rows`. Columns with a blank header are index artifacts and dropped.
pub fn extract_range(range: &Range<Data>, options: &ExtractOptions) -> GdpResult<RawTable> {
    let (Some(start), Some(end)) = (range.start(), range.end()) else {
        return Err(GdpError::DataFormat("sheet is empty".to_string()));
    };

    let header_row = u32::try_from(options.skip_rows).map_err(|_| {
        GdpError::Config(format!(
            "skip_rows {} exceeds the worksheet row limit",
            options.skip_rows
        ))
    })?;
    if end.0 < header_row {
        return Err(GdpError::DataFormat(format!(
            "expected header at row {}, sheet has {} row(s)",
            options.skip_rows + 1,
            end.0 + 1
        )));
    }

    let mut key_col: Option<u32> = None;
    let mut found_drops: Vec<&str> = Vec::new();
    let mut data_cols: Vec<(u32, String)> = Vec::new();

    for col in start.1..=end.1 {
        let label = range
            .get_value((header_row, col))
            .map(header_label)
            .unwrap_or_default();

        if label.is_empty() {
            continue;
        }
        if let Some(drop) = options.drop_columns.iter().find(|d| **d == label) {
            found_drops.push(drop.as_str());
            continue;
        }
        if label == options.key_column && key_col.is_none() {
            key_col = Some(col);
            continue;
        }
        if data_cols.iter().any(|(_, l)| *l == label) {
            return Err(GdpError::DataFormat(format!("duplicate column '{}'", label)));
        }
        data_cols.push((col, label));
    }

    let key_col = key_col.ok_or_else(|| {
        GdpError::DataFormat(format!("missing key column '{}'", options.key_column))
    })?;
    let missing: Vec<&str> = options
        .drop_columns
        .iter()
        .map(String::as_str)
        .filter(|d| !found_drops.contains(d))
        .collect();
    if !missing.is_empty() {
        return Err(GdpError::DataFormat(format!(
            "missing expected column(s): {}",
            missing.join(", ")
        )));
    }

    let mut table = RawTable::new();
    for row_idx in (header_row + 1)..=end.0 {
        let key = match range.get_value((row_idx, key_col)).map(header_label) {
            Some(k) if !k.is_empty() => k,
            _ => continue,
        };
        if table.contains_key(&key) {
            return Err(GdpError::DataFormat(format!("duplicate row key '{}'", key)));
        }

        let mut row = RawRow::new(key);
        for (col, label) in &data_cols {
            let cell = range
                .get_value((row_idx, *col))
                .map(|d| to_raw_cell(d, &options.placeholder))
                .unwrap_or(RawCell::Empty);
            row.set(label.clone(), cell);
        }
        table.insert_row(row);
    }

    Ok(table)
}

/// Header and key cells as text. Whole floats lose their ".0" so a year
/// stored as a number reads "2020".
fn header_label(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

fn to_raw_cell(cell: &Data, placeholder: &str) -> RawCell {
    match cell {
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::String(s) => RawCell::from_text(s, placeholder),
        Data::Empty => RawCell::Empty,
        other => RawCell::from_text(&other.to_string(), placeholder),
    }
}
