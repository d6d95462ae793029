pub mod growth;
pub mod parse;

pub use growth::{growth_percentage, growth_window, GROWTH_WINDOW_YEARS};
pub use parse::{format_history, parse_employee_history, EmployeeHistory};
