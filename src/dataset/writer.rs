use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::{
    find_column, GROWTH_PERCENTAGE, LAST_KNOWN_VALUATION, OVERALL_SCORE, PARSED_HISTORY,
    TOTAL_RAISED,
};
use crate::history::format_history;
use crate::pipeline::{Ranking, ScoredCompany};
use crate::scoring::SubScoreKind;

/// Header row of the scored output: input columns, then derived columns.
pub fn output_headers(input_headers: &[String]) -> Vec<String> {
    let mut headers = input_headers.to_vec();
    headers.push(PARSED_HISTORY.to_string());
    headers.push(GROWTH_PERCENTAGE.to_string());
    headers.extend(SubScoreKind::ALL.iter().map(|k| k.column().to_string()));
    headers.push(OVERALL_SCORE.to_string());
    headers
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Output cells for one company. Imputed financials replace blank input cells.
fn output_record(input_headers: &[String], scored: &ScoredCompany) -> Vec<String> {
    let mut record = scored.company.record.clone();
    record.resize(input_headers.len(), String::new());

    let imputed = [
        (LAST_KNOWN_VALUATION, scored.company.last_known_valuation),
        (TOTAL_RAISED, scored.company.total_raised),
    ];
    for (column, value) in imputed {
        if let (Some(index), Some(value)) = (find_column(input_headers, column), value) {
            if record[index].trim().is_empty() {
                record[index] = value.to_string();
            }
        }
    }

    record.push(format_history(&scored.history));
    record.push(optional_cell(scored.growth));
    record.extend(SubScoreKind::ALL.iter().map(|k| optional_cell(scored.scores.get(*k))));
    record.push(scored.result.score.to_string());
    record
}

/// Write the ranking as CSV to any writer.
pub fn write_ranking_to<W: Write>(output: W, ranking: &Ranking) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    writer
        .write_record(output_headers(&ranking.headers))
        .context("Failed to write CSV header row")?;
    for scored in &ranking.companies {
        writer
            .write_record(output_record(&ranking.headers, scored))
            .with_context(|| format!("Failed to write row for {}", scored.company.name))?;
    }
    writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the ranking to a CSV file atomically.
pub fn write_ranking(path: &Path, ranking: &Ranking) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    write_ranking_to(&mut file, ranking)?;
    file.commit()
        .with_context(|| format!("Failed to save scored output to {}", path.display()))?;
    Ok(())
}
