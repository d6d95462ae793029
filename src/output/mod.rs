pub mod formatter;

pub use formatter::{
    format_breakdown, format_json, format_ranking_table, format_score, format_summary,
    format_tsv, format_weights, should_use_colors,
};
