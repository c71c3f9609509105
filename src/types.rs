use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

//==============================================================================
// Raw cells
//==============================================================================

/// Token used by the statistics workbooks for "no data".
pub const DEFAULT_PLACEHOLDER: &str = "...";

/// A single cell as read from a worksheet, before any coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RawCell {
    Number(f64),
    Text(String),
    /// The "no data" token
    Placeholder,
    Empty,
}

impl RawCell {
    /// Classify a text cell. The placeholder and blank strings are not data.
    pub fn from_text(text: &str, placeholder: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            RawCell::Empty
        } else if trimmed == placeholder {
            RawCell::Placeholder
        } else {
            RawCell::Text(text.to_string())
        }
    }

    /// Coerce to a float. Numeric text ("12.5") converts; anything else is None.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            RawCell::Number(n) => Some(*n),
            RawCell::Text(s) => s.trim().parse::<f64>().ok(),
            RawCell::Placeholder | RawCell::Empty => None,
        }
    }

    /// Placeholder or blank: the cell carries no data at all.
    pub fn is_missing(&self) -> bool {
        matches!(self, RawCell::Placeholder | RawCell::Empty)
    }
}

impl From<f64> for RawCell {
    fn from(n: f64) -> Self {
        RawCell::Number(n)
    }
}

impl From<&str> for RawCell {
    fn from(s: &str) -> Self {
        RawCell::from_text(s, DEFAULT_PLACEHOLDER)
    }
}

//==============================================================================
// Raw tables
//==============================================================================

/// One country row: year label → cell, in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    pub key: String,
    cells: Vec<(String, RawCell)>,
}

impl RawRow {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            cells: Vec::new(),
        }
    }

    /// Set a cell. A repeated column keeps its first position.
    pub fn set(&mut self, column: impl Into<String>, cell: RawCell) {
        let column = column.into();
        match self.cells.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = cell,
            None => self.cells.push((column, cell)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&RawCell> {
        self.cells
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, cell)| cell)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &RawCell)> {
        self.cells.iter().map(|(c, cell)| (c.as_str(), cell))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Country → year → cell, keeping sheet order at both levels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    rows: Vec<RawRow>,
    index: HashMap<String, usize>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. A duplicate key replaces the earlier row in place.
    pub fn insert_row(&mut self, row: RawRow) {
        match self.index.get(&row.key) {
            Some(&pos) => self.rows[pos] = row,
            None => {
                self.index.insert(row.key.clone(), self.rows.len());
                self.rows.push(row);
            }
        }
    }

    /// Convenience for building tables in code and tests.
    pub fn with_row<K, C, I>(mut self, key: K, cells: I) -> Self
    where
        K: Into<String>,
        C: Into<String>,
        I: IntoIterator<Item = (C, RawCell)>,
    {
        let mut row = RawRow::new(key);
        for (column, cell) in cells {
            row.set(column, cell);
        }
        self.insert_row(row);
        self
    }

    pub fn row(&self, key: &str) -> Option<&RawRow> {
        self.index.get(key).map(|&pos| &self.rows[pos])
    }

    pub fn cell(&self, key: &str, column: &str) -> Option<&RawCell> {
        self.row(key).and_then(|r| r.get(column))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn rows(&self) -> impl Iterator<Item = &RawRow> {
        self.rows.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//==============================================================================
// Conversion results
//==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedCell {
    pub year: String,
    /// None when the conversion for this cell failed
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertedRow {
    pub country: String,
    pub values: Vec<ConvertedCell>,
}

impl ConvertedRow {
    pub fn get(&self, year: &str) -> Option<Option<f64>> {
        self.values
            .iter()
            .find(|c| c.year == year)
            .map(|c| c.value)
    }
}

/// Country → year → converted value. Has an entry for every GDP pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConvertedTable {
    rows: Vec<ConvertedRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ConvertedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, country: &str, year: &str, value: Option<f64>) {
        let pos = match self.index.get(country) {
            Some(&pos) => pos,
            None => {
                self.rows.push(ConvertedRow {
                    country: country.to_string(),
                    values: Vec::new(),
                });
                self.index.insert(country.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        let row = &mut self.rows[pos];
        match row.values.iter_mut().find(|c| c.year == year) {
            Some(cell) => cell.value = value,
            None => row.values.push(ConvertedCell {
                year: year.to_string(),
                value,
            }),
        }
    }

    /// `Some(Some(v))` converted, `Some(None)` failed, `None` not a GDP pair.
    pub fn get(&self, country: &str, year: &str) -> Option<Option<f64>> {
        self.index
            .get(country)
            .and_then(|&pos| self.rows[pos].get(year))
    }

    /// The converted value, if the conversion succeeded.
    pub fn value(&self, country: &str, year: &str) -> Option<f64> {
        self.get(country, year).flatten()
    }

    pub fn rows(&self) -> &[ConvertedRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

//==============================================================================
// Error records
//==============================================================================

/// Why a single (country, year) cell could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    CurrencyInfoMissing,
    InvalidGdpData,
    ConversionFailed,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::CurrencyInfoMissing => "Country currency information missing",
            FailureReason::InvalidGdpData => "Invalid GDP data",
            FailureReason::ConversionFailed => "Conversion failed",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FailureReason {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub country: String,
    pub year: String,
    pub reason: FailureReason,
}

impl ErrorRecord {
    pub fn new(country: &str, year: &str, reason: FailureReason) -> Self {
        Self {
            country: country.to_string(),
            year: year.to_string(),
            reason,
        }
    }
}
