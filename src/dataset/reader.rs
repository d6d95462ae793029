use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::*;
use crate::company::{split_list, CompanyRow};
use crate::error::ScoreError;

/// Date layouts accepted in Last Financing Date, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// A parsed input table: its header row plus one typed row per company.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub companies: Vec<CompanyRow>,
}

impl Dataset {
    pub fn has_column(&self, name: &str) -> bool {
        find_column(&self.headers, name).is_some()
    }

    /// Fail with a schema error if a column is absent.
    pub fn require_column(&self, name: &str) -> Result<(), ScoreError> {
        if self.has_column(name) {
            Ok(())
        } else {
            Err(ScoreError::MissingColumn(name.to_string()))
        }
    }
}

/// Header positions of the columns the scoring engine reads.
struct Columns {
    name: Option<usize>,
    employee_history: Option<usize>,
    active_investors: Option<usize>,
    former_investors: Option<usize>,
    last_known_valuation: Option<usize>,
    total_raised: Option<usize>,
    last_financing_date: Option<usize>,
    last_financing_size: Option<usize>,
    year_founded: Option<usize>,
    verticals: Option<usize>,
    emerging_spaces: Option<usize>,
}

impl Columns {
    fn resolve(headers: &[String]) -> Self {
        for column in REQUIRED_COLUMNS {
            // Employee History is checked by the pipeline, which aborts on it
            if column != EMPLOYEE_HISTORY && find_column(headers, column).is_none() {
                tracing::warn!("Input has no '{}' column; treating it as empty", column);
            }
        }

        Self {
            name: NAME_COLUMNS.iter().find_map(|c| find_column(headers, c)),
            employee_history: find_column(headers, EMPLOYEE_HISTORY),
            active_investors: find_column(headers, ACTIVE_INVESTORS),
            former_investors: find_column(headers, FORMER_INVESTORS),
            last_known_valuation: find_column(headers, LAST_KNOWN_VALUATION),
            total_raised: find_column(headers, TOTAL_RAISED),
            last_financing_date: find_column(headers, LAST_FINANCING_DATE),
            last_financing_size: find_column(headers, LAST_FINANCING_SIZE),
            year_founded: find_column(headers, YEAR_FOUNDED),
            verticals: find_column(headers, VERTICALS),
            emerging_spaces: find_column(headers, EMERGING_SPACES),
        }
    }
}

/// One input row during conversion, for cell lookups with row-aware warnings.
struct Cells<'a> {
    record: &'a csv::StringRecord,
    row: usize,
}

impl Cells<'_> {
    fn text(&self, index: Option<usize>) -> Option<String> {
        let cell = self.record.get(index?)?.trim();
        if cell.is_empty() {
            None
        } else {
            Some(cell.to_string())
        }
    }

    fn list(&self, index: Option<usize>) -> Vec<String> {
        self.text(index).map(|s| split_list(&s)).unwrap_or_default()
    }

    fn number(&self, index: Option<usize>, column: &str) -> Option<f64> {
        let raw = self.text(index)?;
        let parsed = parse_number(&raw);
        if parsed.is_none() {
            tracing::warn!("Row {}: ignoring unparsable {} '{}'", self.row, column, raw);
        }
        parsed
    }

    fn year(&self, index: Option<usize>) -> Option<i32> {
        let raw = self.text(index)?;
        let parsed = parse_year(&raw);
        if parsed.is_none() {
            tracing::warn!("Row {}: ignoring unparsable {} '{}'", self.row, YEAR_FOUNDED, raw);
        }
        parsed
    }

    fn date(&self, index: Option<usize>) -> Option<NaiveDate> {
        let raw = self.text(index)?;
        let parsed = parse_date_cell(&raw);
        if parsed.is_none() {
            tracing::warn!(
                "Row {}: ignoring unparsable {} '{}'",
                self.row,
                LAST_FINANCING_DATE,
                raw
            );
        }
        parsed
    }
}

/// Read companies from CSV with a header row.
pub fn read_companies<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header row")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    let columns = Columns::resolve(&headers);

    let mut companies = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.with_context(|| format!("Failed to read CSV row {}", row))?;
        let cells = Cells {
            record: &record,
            row,
        };

        companies.push(CompanyRow {
            name: cells.text(columns.name).unwrap_or_else(|| format!("Row {}", row)),
            active_investors: cells.list(columns.active_investors),
            former_investors: cells.list(columns.former_investors),
            last_known_valuation: cells.number(columns.last_known_valuation, LAST_KNOWN_VALUATION),
            total_raised: cells.number(columns.total_raised, TOTAL_RAISED),
            last_financing_date: cells.date(columns.last_financing_date),
            last_financing_size: cells.number(columns.last_financing_size, LAST_FINANCING_SIZE),
            year_founded: cells.year(columns.year_founded),
            employee_history: cells.text(columns.employee_history),
            verticals: cells.list(columns.verticals),
            emerging_spaces: cells.text(columns.emerging_spaces),
            record: record.iter().map(str::to_string).collect(),
        });
    }

    tracing::debug!("Read {} companies ({} columns)", companies.len(), headers.len());
    Ok(Dataset { headers, companies })
}

/// Read companies from a CSV file on disk.
pub fn read_companies_from_path(path: &Path) -> Result<Dataset> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file at {}", path.display()))?;
    read_companies(file).with_context(|| format!("Failed to read {}", path.display()))
}

/// Parse a numeric cell, accepting `$` and thousands separators.
/// Non-finite values (e.g. `NaN` from spreadsheet exports) count as missing.
fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a year, accepting the `2018.0` form spreadsheets export.
fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    if let Ok(year) = raw.parse::<i32>() {
        return Some(year);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i32::MAX as f64 {
        Some(value as i32)
    } else {
        None
    }
}

fn parse_date_cell(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Companies,Employee History,Active Investors,Former Investors,Last Known Valuation,Total Raised,Last Financing Date,Last Financing Size,Year Founded,Verticals,Emerging Spaces
Acme,\"2020: 100, 2021: 150\",\"Accel, Greylock\",Benchmark,\"1,200\",$300,2024-06-01,600,2018,\"FinTech, Cybersecurity\",
Globex,,,,,,not a date,,2019.0,,Quantum sensing
";

    #[test]
    fn test_read_typed_rows() {
        let dataset = read_companies(SAMPLE.as_bytes()).unwrap();
        assert_eq!(dataset.headers.len(), 11);
        assert_eq!(dataset.companies.len(), 2);

        let acme = &dataset.companies[0];
        assert_eq!(acme.name, "Acme");
        assert_eq!(acme.employee_history.as_deref(), Some("2020: 100, 2021: 150"));
        assert_eq!(acme.active_investors, vec!["Accel", "Greylock"]);
        assert_eq!(acme.former_investors, vec!["Benchmark"]);
        assert_eq!(acme.last_known_valuation, Some(1200.0));
        assert_eq!(acme.total_raised, Some(300.0));
        assert_eq!(acme.last_financing_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(acme.last_financing_size, Some(600.0));
        assert_eq!(acme.year_founded, Some(2018));
        assert_eq!(acme.verticals, vec!["FinTech", "Cybersecurity"]);
        assert_eq!(acme.emerging_spaces, None);
        assert_eq!(acme.record.len(), 11);
    }

    #[test]
    fn test_read_blank_and_bad_cells_are_missing() {
        let dataset = read_companies(SAMPLE.as_bytes()).unwrap();
        let globex = &dataset.companies[1];
        assert_eq!(globex.employee_history, None);
        assert!(globex.active_investors.is_empty());
        assert_eq!(globex.last_known_valuation, None);
        assert_eq!(globex.last_financing_date, None);
        assert_eq!(globex.year_founded, Some(2019));
        assert_eq!(globex.emerging_spaces.as_deref(), Some("Quantum sensing"));
    }

    #[test]
    fn test_missing_optional_columns_read_as_empty() {
        let csv = "Employee History,Total Raised\n\"2020: 5, 2021: 10\",75\n";
        let dataset = read_companies(csv.as_bytes()).unwrap();
        let company = &dataset.companies[0];
        assert_eq!(company.name, "Row 1");
        assert_eq!(company.total_raised, Some(75.0));
        assert_eq!(company.last_known_valuation, None);
        assert!(company.verticals.is_empty());
    }

    #[test]
    fn test_require_column() {
        let csv = "Companies,Total Raised\nAcme,75\n";
        let dataset = read_companies(csv.as_bytes()).unwrap();
        let err = dataset.require_column(EMPLOYEE_HISTORY).unwrap_err();
        assert!(matches!(err, ScoreError::MissingColumn(ref c) if c == EMPLOYEE_HISTORY));
        assert!(dataset.require_column(TOTAL_RAISED).is_ok());
    }

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("1,250.5"), Some(1250.5));
        assert_eq!(parse_number("$40"), Some(40.0));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("n/a"), None);
    }

    #[test]
    fn test_parse_year_forms() {
        assert_eq!(parse_year("2018"), Some(2018));
        assert_eq!(parse_year("2018.0"), Some(2018));
        assert_eq!(parse_year("2018.5"), None);
        assert_eq!(parse_year("early"), None);
    }

    #[test]
    fn test_parse_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 11, 18);
        assert_eq!(parse_date_cell("2024-11-18"), expected);
        assert_eq!(parse_date_cell("2024/11/18"), expected);
        assert_eq!(parse_date_cell("11/18/2024"), expected);
        assert_eq!(parse_date_cell("18-Nov-2024"), expected);
        assert_eq!(parse_date_cell("2024-11-18 00:00:00"), expected);
        assert_eq!(parse_date_cell("someday"), None);
    }
}
