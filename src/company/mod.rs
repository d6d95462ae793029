pub mod types;

pub use types::{split_list, CompanyRow};
