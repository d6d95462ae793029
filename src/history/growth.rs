use super::parse::EmployeeHistory;

/// Maximum number of recent years considered when measuring growth.
pub const GROWTH_WINDOW_YEARS: usize = 5;

/// Select the growth window: up to the five most recent years at or before
/// `starting_year`, newest first.
pub fn growth_window(history: &EmployeeHistory, starting_year: i32) -> Vec<(i32, i64)> {
    history
        .range(..=starting_year)
        .rev()
        .take(GROWTH_WINDOW_YEARS)
        .map(|(year, count)| (*year, *count))
        .collect()
}

/// Percentage headcount change from the oldest to the newest year of the
/// growth window.
///
/// Returns `None` when fewer than two years qualify, or when the oldest
/// headcount is zero or negative (the ratio has no meaningful value).
pub fn growth_percentage(history: &EmployeeHistory, starting_year: i32) -> Option<f64> {
    let window = growth_window(history, starting_year);
    if window.len() < 2 {
        return None;
    }

    let (_, latest) = window[0];
    let (_, earliest) = window[window.len() - 1];
    if earliest <= 0 {
        return None;
    }

    let (latest, earliest) = (latest as f64, earliest as f64);
    Some((latest - earliest) / earliest * 100.0)
}
