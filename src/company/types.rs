use chrono::NaiveDate;

/// One company record, typed at the ingestion boundary.
///
/// Every scoring input is optional; absence is decided once here instead of
/// being re-checked inside each sub-score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompanyRow {
    pub name: String,
    pub active_investors: Vec<String>,
    pub former_investors: Vec<String>,
    pub last_known_valuation: Option<f64>,
    pub total_raised: Option<f64>,
    pub last_financing_date: Option<NaiveDate>,
    pub last_financing_size: Option<f64>,
    pub year_founded: Option<i32>,
    pub employee_history: Option<String>,
    pub verticals: Vec<String>,
    pub emerging_spaces: Option<String>,
    /// Raw input cells in header order, written back out untouched.
    pub record: Vec<String>,
}

impl CompanyRow {
    /// All investors, active first, then former.
    pub fn investors(&self) -> impl Iterator<Item = &str> {
        self.active_investors
            .iter()
            .chain(self.former_investors.iter())
            .map(String::as_str)
    }

    /// Fill gaps in the financial fields from each other.
    ///
    /// Total Raised is filled from a quarter of the valuation first; the
    /// valuation is then filled from four times Total Raised. A row missing
    /// both stays missing both.
    pub fn impute_financials(&mut self) {
        if self.total_raised.is_none() {
            self.total_raised = self.last_known_valuation.map(|v| v / 4.0);
        }
        if self.last_known_valuation.is_none() {
            self.last_known_valuation = self.total_raised.map(|r| r * 4.0);
        }
    }
}

/// Split a comma-separated cell into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
