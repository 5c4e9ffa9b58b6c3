//! CSV export for production projections and cash-flow ledgers.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::engine::{LedgerRow, ProductionProjection};

/// Column header for the production CSV.
const PRODUCTION_HEADER: &str = "year,production_kwh";

/// Column header for the ledger CSV.
const LEDGER_HEADER: &str = "year,grid_price_per_kwh,yearly_savings,cumulative_cash_flow";

/// Exports yearly production to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_production_csv(production: &ProductionProjection, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_production_csv(production, io::BufWriter::new(file))
}

/// Writes yearly production as CSV to any writer.
///
/// One row per year, kWh rounded to 2 decimals.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_production_csv(
    production: &ProductionProjection,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(PRODUCTION_HEADER.split(','))?;
    for (year, kwh) in production.years() {
        wtr.write_record(&[year.to_string(), format!("{kwh:.2}")])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Exports the cash-flow ledger to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ledger_csv(ledger: &[LedgerRow], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_ledger_csv(ledger, io::BufWriter::new(file))
}

/// Writes the cash-flow ledger as CSV to any writer.
///
/// Prices keep 4 decimals, money columns 2. Produces deterministic output
/// for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ledger_csv(ledger: &[LedgerRow], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(LEDGER_HEADER.split(','))?;
    for r in ledger {
        wtr.write_record(&[
            r.year.to_string(),
            format!("{:.4}", r.grid_price_per_kwh),
            format!("{:.2}", r.yearly_savings),
            format!("{:.2}", r.cumulative_cash_flow),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{FinancialSpec, SystemSpec, project_production, project_roi};

    fn ledger() -> Vec<LedgerRow> {
        let spec = FinancialSpec {
            initial_investment: 10_000.0,
            grid_price_per_kwh: 0.25,
            yearly_production_kwh: 5_000.0,
            price_inflation: 0.02,
            yearly_maintenance: 200.0,
            lifetime_years: 30,
        };
        project_roi(&spec).map(|r| r.ledger).unwrap_or_default()
    }

    fn ledger_text(rows: &[LedgerRow]) -> String {
        let mut buf = Vec::new();
        write_ledger_csv(rows, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn ledger_header_and_first_row() {
        let text = ledger_text(&ledger());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(LEDGER_HEADER));
        assert_eq!(lines.next(), Some("1,0.2500,716.67,-9483.33"));
    }

    #[test]
    fn ledger_row_count_matches_lifetime() {
        let text = ledger_text(&ledger());
        // 1 header + 30 data rows
        assert_eq!(text.lines().count(), 31);
    }

    #[test]
    fn ledger_output_is_deterministic() {
        let rows = ledger();
        assert_eq!(ledger_text(&rows), ledger_text(&rows));
    }

    #[test]
    fn production_csv_rows() {
        let proj = project_production(&SystemSpec::new(15.0, 35.0, 0.0, 80.0, 0.5, 3));
        let mut buf = Vec::new();
        if let Ok(p) = &proj {
            write_production_csv(p, &mut buf).ok();
        }
        let text = String::from_utf8(buf).unwrap_or_default();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "year,production_kwh",
                "1,10800.00",
                "2,10746.00",
                "3,10692.27"
            ]
        );
    }

    #[test]
    fn ledger_round_trip_parseable() {
        let text = ledger_text(&ledger());
        let mut rdr = csv::ReaderBuilder::new().from_reader(text.as_bytes());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(4));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            for i in 1..4 {
                let val: Result<f64, _> = rec.map_or("", |r| &r[i]).parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 30);
    }

    #[test]
    fn export_writes_file() {
        let dir = tempfile::tempdir().ok();
        let path = dir.as_ref().map(|d| d.path().join("ledger.csv"));
        let Some(path) = path else {
            return;
        };
        assert!(export_ledger_csv(&ledger(), &path).is_ok());
        let text = std::fs::read_to_string(&path).unwrap_or_default();
        assert!(text.starts_with(LEDGER_HEADER));
    }
}
