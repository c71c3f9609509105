//! CSV rendering of the converted table and the error report

use super::exporter::ERROR_HEADERS;
use crate::core::MergeOutcome;
use crate::error::GdpResult;
use csv::Writer;
use std::io::Write;

/// Write `Country,<year>,...` rows. Failed cells are left blank.
pub fn write_csv<W: Write>(outcome: &MergeOutcome, out: W) -> GdpResult<()> {
    let years = outcome.years();
    let mut wtr = Writer::from_writer(out);

    let mut header = Vec::with_capacity(years.len() + 1);
    header.push("Country".to_string());
    header.extend(years.iter().cloned());
    wtr.write_record(&header)?;

    for row in outcome.table.rows() {
        let mut record = Vec::with_capacity(years.len() + 1);
        record.push(row.country.clone());
        for year in &years {
            record.push(match row.get(year) {
                Some(Some(value)) => value.to_string(),
                _ => String::new(),
            });
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the `Country,Year,Error` report in engine order.
pub fn write_errors_csv<W: Write>(outcome: &MergeOutcome, out: W) -> GdpResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(ERROR_HEADERS)?;
    for record in &outcome.errors {
        wtr.write_record([
            record.country.as_str(),
            record.year.as_str(),
            record.reason.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
