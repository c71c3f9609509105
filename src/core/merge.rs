use crate::core::currency::CurrencyGroup;
use crate::types::{ConvertedTable, ErrorRecord, FailureReason, RawCell, RawTable};
use serde::Serialize;
use tracing::debug;

/// FX row used for countries in the shared-currency group.
pub const DEFAULT_REFERENCE_FX_ROW: &str = "Euro Area";

/// Converted values plus the cells that could not be converted.
///
/// Every (country, year) pair of the GDP table appears in `table`; the pairs
/// holding `None` are exactly the ones listed in `errors`, in GDP order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeOutcome {
    pub table: ConvertedTable,
    pub errors: Vec<ErrorRecord>,
}

impl MergeOutcome {
    pub fn success_count(&self) -> usize {
        self.table
            .rows()
            .iter()
            .flat_map(|r| r.values.iter())
            .filter(|c| c.value.is_some())
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.errors.len()
    }

    /// Union of year labels across all rows, in first-seen order.
    pub fn years(&self) -> Vec<String> {
        let mut years: Vec<String> = Vec::new();
        for row in self.table.rows() {
            for cell in &row.values {
                if !years.contains(&cell.year) {
                    years.push(cell.year.clone());
                }
            }
        }
        years
    }

    pub fn into_parts(self) -> (ConvertedTable, Vec<ErrorRecord>) {
        (self.table, self.errors)
    }
}

/// Joins a GDP table with an FX table, dividing GDP by the FX rate per cell.
pub struct MergeConverter {
    reference_fx_row: String,
}

impl Default for MergeConverter {
    fn default() -> Self {
        Self::new(DEFAULT_REFERENCE_FX_ROW)
    }
}

impl MergeConverter {
    #[must_use]
    pub fn new(reference_fx_row: impl Into<String>) -> Self {
        Self {
            reference_fx_row: reference_fx_row.into(),
        }
    }

    pub fn reference_fx_row(&self) -> &str {
        &self.reference_fx_row
    }

    /// FX row a country reads its rates from.
    pub fn lookup_row<'a>(&'a self, country: &'a str, group: &CurrencyGroup) -> &'a str {
        if group.contains(country) {
            &self.reference_fx_row
        } else {
            country
        }
    }

    /// Convert every GDP cell. Per-cell failures are recorded, never raised.
    pub fn convert(&self, gdp: &RawTable, fx: &RawTable, group: &CurrencyGroup) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for row in gdp.rows() {
            let lookup = self.lookup_row(&row.key, group);
            let fx_row = fx.row(lookup);

            for (year, gdp_cell) in row.cells() {
                let fx_cell = fx_row.and_then(|r| r.get(year));
                match convert_cell(Some(gdp_cell), fx_cell) {
                    Ok(value) => outcome.table.insert(&row.key, year, Some(value)),
                    Err(reason) => {
                        debug!(country = %row.key, year, fx_row = lookup, %reason, "cell not converted");
                        outcome.table.insert(&row.key, year, None);
                        outcome.errors.push(ErrorRecord::new(&row.key, year, reason));
                    }
                }
            }
        }

        debug!(
            converted = outcome.success_count(),
            failed = outcome.failure_count(),
            "merge complete"
        );
        outcome
    }
}

/// Free-function form of [`MergeConverter::convert`].
pub fn merge_convert(
    gdp: &RawTable,
    fx: &RawTable,
    group: &CurrencyGroup,
    reference_fx_row: &str,
) -> (ConvertedTable, Vec<ErrorRecord>) {
    MergeConverter::new(reference_fx_row)
        .convert(gdp, fx, group)
        .into_parts()
}

/// Divide one GDP cell by its FX rate.
///
/// The FX side is checked first, so a cell that is bad on both sides reports
/// missing currency information.
fn convert_cell(gdp: Option<&RawCell>, fx: Option<&RawCell>) -> Result<f64, FailureReason> {
    let fx = match fx {
        Some(cell) if !cell.is_missing() => cell,
        _ => return Err(FailureReason::CurrencyInfoMissing),
    };
    let gdp = match gdp {
        Some(cell) if !cell.is_missing() => cell,
        _ => return Err(FailureReason::InvalidGdpData),
    };

    let (Some(amount), Some(rate)) = (gdp.as_number(), fx.as_number()) else {
        return Err(FailureReason::ConversionFailed);
    };
    if rate == 0.0 || !rate.is_finite() {
        return Err(FailureReason::ConversionFailed);
    }

    let value = amount / rate;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FailureReason::ConversionFailed)
    }
}
