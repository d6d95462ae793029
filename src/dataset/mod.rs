pub mod reader;
pub mod writer;

pub use reader::{read_companies, read_companies_from_path, Dataset};
pub use writer::{write_ranking, write_ranking_to};

pub const EMPLOYEE_HISTORY: &str = "Employee History";
pub const ACTIVE_INVESTORS: &str = "Active Investors";
pub const FORMER_INVESTORS: &str = "Former Investors";
pub const LAST_KNOWN_VALUATION: &str = "Last Known Valuation";
pub const TOTAL_RAISED: &str = "Total Raised";
pub const LAST_FINANCING_DATE: &str = "Last Financing Date";
pub const LAST_FINANCING_SIZE: &str = "Last Financing Size";
pub const YEAR_FOUNDED: &str = "Year Founded";
pub const VERTICALS: &str = "Verticals";
pub const EMERGING_SPACES: &str = "Emerging Spaces";

/// Columns the scoring engine reads. Only Employee History is mandatory;
/// the others are treated as empty when absent.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    EMPLOYEE_HISTORY,
    ACTIVE_INVESTORS,
    FORMER_INVESTORS,
    LAST_KNOWN_VALUATION,
    TOTAL_RAISED,
    LAST_FINANCING_DATE,
    LAST_FINANCING_SIZE,
    YEAR_FOUNDED,
    VERTICALS,
    EMERGING_SPACES,
];

/// Columns that may hold the company's display name, in preference order.
pub const NAME_COLUMNS: [&str; 3] = ["Companies", "Company Name", "Company"];

/// Columns appended to the scored output, after the input columns and
/// before the sub-score columns.
pub const PARSED_HISTORY: &str = "Parsed History";
pub const GROWTH_PERCENTAGE: &str = "Growth Percentage";
pub const OVERALL_SCORE: &str = "Overall Score";

/// Find a header by name, ignoring case and surrounding whitespace.
pub fn find_column(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}
