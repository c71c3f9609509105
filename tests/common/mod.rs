//! Workbook fixtures shared by the integration tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};

pub enum Cell {
    Num(f64),
    Text(&'static str),
    Blank,
}

pub struct SheetSpec {
    pub name: &'static str,
    pub years: Vec<&'static str>,
    pub rows: Vec<(&'static str, Vec<Cell>)>,
}

/// Write a sheet the way the statistics exports look: six metadata rows, a
/// header with an unnamed index column, Country, the years, Base Year, Scale.
pub fn write_workbook(path: &Path, sheets: &[SheetSpec]) -> PathBuf {
    let mut workbook = Workbook::new();

    for spec in sheets {
        let sheet = workbook.add_worksheet();
        sheet.set_name(spec.name).unwrap();
        sheet.write_string(0, 0, spec.name).unwrap();
        sheet.write_string(1, 0, "Source: fixture").unwrap();

        let header = 6;
        sheet.write_string(header, 1, "Country").unwrap();
        for (idx, year) in spec.years.iter().enumerate() {
            let col = 2 + idx as u16;
            match year.parse::<f64>() {
                Ok(n) => sheet.write_number(header, col, n).unwrap(),
                Err(_) => sheet.write_string(header, col, *year).unwrap(),
            };
        }
        let base_col = 2 + spec.years.len() as u16;
        sheet.write_string(header, base_col, "Base Year").unwrap();
        sheet.write_string(header, base_col + 1, "Scale").unwrap();

        for (idx, (country, cells)) in spec.rows.iter().enumerate() {
            let row = header + 1 + idx as u32;
            sheet.write_number(row, 0, idx as f64).unwrap();
            sheet.write_string(row, 1, *country).unwrap();
            for (offset, cell) in cells.iter().enumerate() {
                let col = 2 + offset as u16;
                match cell {
                    Cell::Num(n) => {
                        sheet.write_number(row, col, *n).unwrap();
                    }
                    Cell::Text(t) => {
                        sheet.write_string(row, col, *t).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
            sheet.write_number(row, base_col, 2015).unwrap();
            sheet.write_string(row, base_col + 1, "Units").unwrap();
        }
    }

    workbook.save(path).unwrap();
    path.to_path_buf()
}

/// GDP + FX workbook covering every failure reason.
pub fn standard_workbook(dir: &Path) -> PathBuf {
    write_workbook(
        &dir.join("gdp.xlsx"),
        &[
            SheetSpec {
                name: "GDP",
                years: vec!["2020", "2021"],
                rows: vec![
                    ("France", vec![Cell::Num(100.0), Cell::Num(120.0)]),
                    ("Germany", vec![Cell::Num(300.0), Cell::Text("...")]),
                    ("Japan", vec![Cell::Num(500.0), Cell::Num(550.0)]),
                    ("Chad", vec![Cell::Num(7.0), Cell::Num(8.0)]),
                    ("Peru", vec![Cell::Text("n/a"), Cell::Num(9.0)]),
                ],
            },
            SheetSpec {
                name: "FX",
                years: vec!["2020", "2021"],
                rows: vec![
                    ("Euro Area", vec![Cell::Num(10.0), Cell::Num(12.0)]),
                    ("France", vec![Cell::Num(999.0), Cell::Num(999.0)]),
                    ("Japan", vec![Cell::Num(100.0), Cell::Text("...")]),
                    ("Peru", vec![Cell::Num(3.0), Cell::Num(0.0)]),
                ],
            },
        ],
    )
}
