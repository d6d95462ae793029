use std::collections::BTreeMap;

/// Headcount per year, ordered by year.
pub type EmployeeHistory = BTreeMap<i32, i64>;

/// Parse an Employee History cell such as `"2021: 40, 2022: 55"`.
///
/// Anything that is not a well-formed list of `year: count` pairs yields an
/// empty map. An empty map means "no history", not an error.
pub fn parse_employee_history(raw: Option<&str>) -> EmployeeHistory {
    let Some(raw) = raw else {
        return EmployeeHistory::new();
    };

    let mut history = EmployeeHistory::new();
    for entry in raw.split(',') {
        let Some((year, count)) = entry.split_once(':') else {
            return EmployeeHistory::new();
        };
        match (year.trim().parse::<i32>(), count.trim().parse::<i64>()) {
            (Ok(year), Ok(count)) => {
                history.insert(year, count);
            }
            _ => return EmployeeHistory::new(),
        }
    }
    history
}

/// Render a parsed history back into the `year: count` text form.
pub fn format_history(history: &EmployeeHistory) -> String {
    history
        .iter()
        .map(|(year, count)| format!("{}: {}", year, count))
        .collect::<Vec<_>>()
        .join(", ")
}
