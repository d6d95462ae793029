use serde::{Deserialize, Serialize};

use crate::scoring::WeightConfig;

/// Config file contents.
///
/// Example YAML:
/// ```yaml
/// top_vcs: VCtop_latest.txt
/// reference_date: "2024-11-18"
/// weights:
///   vc: 0.15
///   funding_valuation: 0.3
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the top VC list, one investor per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_vcs: Option<String>,

    /// Anchor for the trailing financing window (YYYY-MM-DD, default: today)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<String>,

    /// Year used for the growth window and company age (default: reference year)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_year: Option<i32>,

    /// Sub-score weights (default: built-in weights)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<WeightConfig>,
}
