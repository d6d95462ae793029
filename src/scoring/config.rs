use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six sub-scores that feed the overall score, in aggregation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SubScoreKind {
    Vc,
    FundingValuation,
    Raised,
    RecentFinancing,
    CompanyGrowth,
    EmergingVerticals,
}

impl SubScoreKind {
    pub const ALL: [SubScoreKind; 6] = [
        SubScoreKind::Vc,
        SubScoreKind::FundingValuation,
        SubScoreKind::Raised,
        SubScoreKind::RecentFinancing,
        SubScoreKind::CompanyGrowth,
        SubScoreKind::EmergingVerticals,
    ];

    /// Column header used in the scored output.
    pub fn column(&self) -> &'static str {
        match self {
            SubScoreKind::Vc => "VC Score",
            SubScoreKind::FundingValuation => "Funding Valuation Score",
            SubScoreKind::Raised => "Raised Score",
            SubScoreKind::RecentFinancing => "Recent Financing Score",
            SubScoreKind::CompanyGrowth => "Company Growth Score",
            SubScoreKind::EmergingVerticals => "Emerging and Verticals Score",
        }
    }

    /// Key used in the config file and on the command line.
    pub fn key(&self) -> &'static str {
        match self {
            SubScoreKind::Vc => "vc",
            SubScoreKind::FundingValuation => "funding_valuation",
            SubScoreKind::Raised => "raised",
            SubScoreKind::RecentFinancing => "recent_financing",
            SubScoreKind::CompanyGrowth => "company_growth",
            SubScoreKind::EmergingVerticals => "emerging_verticals",
        }
    }
}

impl fmt::Display for SubScoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for SubScoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        SubScoreKind::ALL
            .into_iter()
            .find(|kind| kind.key() == s || kind.column().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let keys: Vec<_> = SubScoreKind::ALL.iter().map(|k| k.key()).collect();
                format!("unknown sub-score '{}' (expected one of: {})", s, keys.join(", "))
            })
    }
}

/// Weight per sub-score.
///
/// Weights lie in [0, 1] and need not sum to 1; the aggregator renormalizes
/// per row. A weight left unset is not configured and that sub-score never
/// contributes.
///
/// Example YAML:
/// ```yaml
/// weights:
///   vc: 0.15
///   funding_valuation: 0.3
///   raised: 0.2
///   recent_financing: 0.1
///   company_growth: 0.1
///   emerging_verticals: 0.1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WeightConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funding_valuation: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raised: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recent_financing: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_growth: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emerging_verticals: Option<f64>,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            vc: Some(0.15),
            funding_valuation: Some(0.3),
            raised: Some(0.2),
            recent_financing: Some(0.1),
            company_growth: Some(0.1),
            emerging_verticals: Some(0.1),
        }
    }
}

impl WeightConfig {
    /// A configuration with no weights set.
    pub fn empty() -> Self {
        Self {
            vc: None,
            funding_valuation: None,
            raised: None,
            recent_financing: None,
            company_growth: None,
            emerging_verticals: None,
        }
    }

    pub fn get(&self, kind: SubScoreKind) -> Option<f64> {
        match kind {
            SubScoreKind::Vc => self.vc,
            SubScoreKind::FundingValuation => self.funding_valuation,
            SubScoreKind::Raised => self.raised,
            SubScoreKind::RecentFinancing => self.recent_financing,
            SubScoreKind::CompanyGrowth => self.company_growth,
            SubScoreKind::EmergingVerticals => self.emerging_verticals,
        }
    }

    pub fn set(&mut self, kind: SubScoreKind, weight: Option<f64>) {
        let slot = match kind {
            SubScoreKind::Vc => &mut self.vc,
            SubScoreKind::FundingValuation => &mut self.funding_valuation,
            SubScoreKind::Raised => &mut self.raised,
            SubScoreKind::RecentFinancing => &mut self.recent_financing,
            SubScoreKind::CompanyGrowth => &mut self.company_growth,
            SubScoreKind::EmergingVerticals => &mut self.emerging_verticals,
        };
        *slot = weight;
    }

    /// Configured weights in aggregation order.
    pub fn configured(&self) -> impl Iterator<Item = (SubScoreKind, f64)> + '_ {
        SubScoreKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|w| (kind, w)))
    }

    /// Sub-scores with no configured weight.
    pub fn unconfigured(&self) -> Vec<SubScoreKind> {
        SubScoreKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    /// Apply a `name=value` override, e.g. `raised=0.25`.
    pub fn apply_override(&mut self, assignment: &str) -> Result<(), String> {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("weight override '{}' must look like name=value", assignment))?;
        let kind: SubScoreKind = name.parse()?;
        let weight: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("weight '{}' for {} is not a number", value.trim(), kind.key()))?;
        self.set(kind, Some(weight));
        Ok(())
    }
}

/// Dates that anchor a scoring run.
///
/// `current_year` drives the growth window and company age;
/// `reference_date` anchors the trailing financing window. Fixing both makes
/// a run fully deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringContext {
    pub current_year: i32,
    pub reference_date: NaiveDate,
}

impl ScoringContext {
    pub fn for_date(reference_date: NaiveDate) -> Self {
        Self {
            current_year: reference_date.year(),
            reference_date,
        }
    }
}
