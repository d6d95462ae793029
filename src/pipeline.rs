use crate::company::CompanyRow;
use crate::dataset::{Dataset, EMPLOYEE_HISTORY};
use crate::error::ScoreError;
use crate::history::{growth_percentage, parse_employee_history, EmployeeHistory};
use crate::registry::TopVcRegistry;
use crate::scoring::{
    calculate_score, ScoreResult, ScoringContext, SubScoreKind, SubScores, WeightConfig,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A company with everything derived from it.
#[derive(Debug, Clone)]
pub struct ScoredCompany {
    /// The row after financial imputation
    pub company: CompanyRow,
    pub history: EmployeeHistory,
    pub growth: Option<f64>,
    pub scores: SubScores,
    pub result: ScoreResult,
}

impl ScoredCompany {
    pub fn score(&self) -> f64 {
        self.result.score
    }
}

/// Dataset-wide statistics over the overall score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub count: usize,
    /// Rows where at least one configured sub-score was missing
    pub incomplete: usize,
    pub median: Option<f64>,
    pub mean: Option<f64>,
}

/// Scored companies, best first, plus summary statistics.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub headers: Vec<String>,
    pub companies: Vec<ScoredCompany>,
    pub summary: Summary,
}

/// Score one company. Depends only on the row and the shared, read-only inputs.
pub fn score_company(
    mut company: CompanyRow,
    registry: &TopVcRegistry,
    weights: &WeightConfig,
    context: &ScoringContext,
) -> ScoredCompany {
    company.impute_financials();

    let history = parse_employee_history(company.employee_history.as_deref());
    let growth = growth_percentage(&history, context.current_year);
    let scores = SubScores::evaluate(&company, growth, registry, context);
    let result = calculate_score(&scores, weights);

    if result.incomplete {
        tracing::debug!(
            "{}: scored without {}",
            company.name,
            result
                .breakdown
                .skipped
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    ScoredCompany {
        company,
        history,
        growth,
        scores,
        result,
    }
}

/// Score, sort, and summarize a whole dataset.
///
/// Fails before scoring anything if the dataset has no Employee History
/// column. Rows are sorted by overall score descending; ties keep their
/// input order so identical inputs always rank identically.
pub fn rank_companies(
    dataset: Dataset,
    registry: &TopVcRegistry,
    weights: &WeightConfig,
    context: &ScoringContext,
) -> Result<Ranking, ScoreError> {
    dataset.require_column(EMPLOYEE_HISTORY)?;

    for kind in weights.unconfigured() {
        tracing::warn!("No weight configured for '{}'; it will not count", kind);
    }

    let Dataset { headers, companies } = dataset;
    let mut scored: Vec<ScoredCompany> = companies
        .into_iter()
        .map(|company| score_company(company, registry, weights, context))
        .collect();

    for (kind, rows) in skipped_counts(&scored) {
        tracing::warn!(
            "Missing score column: '{}' skipped in {} of {} rows",
            kind,
            rows,
            scored.len()
        );
    }

    // Stable sort: equal scores keep input order
    scored.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(Ordering::Equal));

    let scores: Vec<f64> = scored.iter().map(ScoredCompany::score).collect();
    let summary = Summary {
        count: scored.len(),
        incomplete: scored.iter().filter(|s| s.result.incomplete).count(),
        median: median(&scores),
        mean: mean(&scores),
    };

    tracing::info!(
        "Scored {} companies ({} with missing sub-scores)",
        summary.count,
        summary.incomplete
    );

    Ok(Ranking {
        headers,
        companies: scored,
        summary,
    })
}

/// How many rows skipped each configured sub-score.
pub fn skipped_counts(companies: &[ScoredCompany]) -> BTreeMap<SubScoreKind, usize> {
    let mut counts = BTreeMap::new();
    for kind in companies
        .iter()
        .flat_map(|scored| &scored.result.breakdown.skipped)
    {
        *counts.entry(*kind).or_insert(0) += 1;
    }
    counts
}

/// Median, averaging the middle pair for an even count.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}
