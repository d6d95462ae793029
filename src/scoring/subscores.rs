//! The six sub-score evaluators.
//!
//! Each evaluator is a pure function of a company row plus whatever shared,
//! read-only input it needs. A `None` result means the sub-score could not
//! be computed and must stay distinct from an earned 0.

use chrono::{Duration, NaiveDate};

use super::config::{ScoringContext, SubScoreKind};
use super::factors::{
    MATURE_GROWTH_RUBRIC, RAISED_RUBRIC, VALUATION_RUBRIC, VC_RUBRIC, YOUNG_GROWTH_RUBRIC,
};
use crate::company::CompanyRow;
use crate::registry::TopVcRegistry;

/// Verticals that mark a company as working in an emerging technology.
pub const EMERGING_KEYWORDS: [&str; 9] = [
    "artificial intelligence & machine learning",
    "robotics & drones",
    "cybersecurity",
    "space technology",
    "life sciences",
    "nanotechnology",
    "quantum computing",
    "autonomous cars",
    "fusion energy",
];

/// Companies at least this many years old are scored on the mature growth scale.
pub const MATURE_COMPANY_AGE: i32 = 4;

/// Length of the trailing financing window, in days.
pub const RECENT_FINANCING_DAYS: i64 = 365;

/// Financing rounds above this size earn the large-round bonus.
pub const LARGE_FINANCING_SIZE: f64 = 500.0;

const RECENT_FINANCING_POINTS: u8 = 5;
const LARGE_FINANCING_POINTS: u8 = 5;
const EMERGING_POINTS: u8 = 10;

/// All six sub-scores for one row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubScores {
    pub vc: Option<u8>,
    pub funding_valuation: Option<u8>,
    pub raised: Option<u8>,
    pub recent_financing: Option<u8>,
    pub company_growth: Option<u8>,
    pub emerging_verticals: Option<u8>,
}

impl SubScores {
    pub fn get(&self, kind: SubScoreKind) -> Option<u8> {
        match kind {
            SubScoreKind::Vc => self.vc,
            SubScoreKind::FundingValuation => self.funding_valuation,
            SubScoreKind::Raised => self.raised,
            SubScoreKind::RecentFinancing => self.recent_financing,
            SubScoreKind::CompanyGrowth => self.company_growth,
            SubScoreKind::EmergingVerticals => self.emerging_verticals,
        }
    }

    /// Evaluate every sub-score for a row whose financials are already imputed
    /// and whose growth has already been derived.
    pub fn evaluate(
        company: &CompanyRow,
        growth: Option<f64>,
        registry: &TopVcRegistry,
        context: &ScoringContext,
    ) -> Self {
        Self {
            vc: Some(score_vc(company.investors(), registry)),
            funding_valuation: company.last_known_valuation.map(score_funding_valuation),
            raised: company.total_raised.map(score_raised),
            recent_financing: score_recent_financing(
                company.last_financing_date,
                company.last_financing_size,
                context.reference_date,
            ),
            company_growth: score_company_growth(
                company.year_founded,
                growth,
                context.current_year,
            ),
            emerging_verticals: Some(score_emerging_and_verticals(
                company.emerging_spaces.as_deref(),
                &company.verticals,
            )),
        }
    }
}

/// Score a company's backing by top VCs, counting distinct matches across
/// active and former investors.
pub fn score_vc<'a, I>(investors: I, registry: &TopVcRegistry) -> u8
where
    I: IntoIterator<Item = &'a str>,
{
    VC_RUBRIC.evaluate(registry.count_matches(investors) as f64)
}

pub fn score_funding_valuation(valuation: f64) -> u8 {
    VALUATION_RUBRIC.evaluate(valuation)
}

pub fn score_raised(raised: f64) -> u8 {
    RAISED_RUBRIC.evaluate(raised)
}

/// Five points for financing inside the trailing window, five more when that
/// round was also large. Missing when no financing date is known.
pub fn score_recent_financing(
    date: Option<NaiveDate>,
    size: Option<f64>,
    reference_date: NaiveDate,
) -> Option<u8> {
    let date = date?;
    let window_start = reference_date - Duration::days(RECENT_FINANCING_DAYS);
    if date <= window_start {
        return Some(0);
    }

    let mut score = RECENT_FINANCING_POINTS;
    if size.is_some_and(|s| s > LARGE_FINANCING_SIZE) {
        score += LARGE_FINANCING_POINTS;
    }
    Some(score)
}

/// Headcount growth scored on a scale chosen by company age. Missing when
/// the founding year or the growth figure is unknown, or when the age does
/// not fit in a year count.
pub fn score_company_growth(
    year_founded: Option<i32>,
    growth: Option<f64>,
    current_year: i32,
) -> Option<u8> {
    let year_founded = year_founded?;
    let growth = growth?;
    let years_in_operation = current_year.checked_sub(year_founded)?;

    let rubric = if years_in_operation >= MATURE_COMPANY_AGE {
        &MATURE_GROWTH_RUBRIC
    } else {
        &YOUNG_GROWTH_RUBRIC
    };
    Some(rubric.evaluate(growth))
}

/// Ten points for any listed emerging space or any emerging-technology vertical.
pub fn score_emerging_and_verticals(emerging_spaces: Option<&str>, verticals: &[String]) -> u8 {
    let has_emerging_space = emerging_spaces.is_some_and(|s| !s.trim().is_empty());
    let has_emerging_vertical = verticals.iter().any(|vertical| {
        let normalized = vertical.trim().to_lowercase();
        EMERGING_KEYWORDS.contains(&normalized.as_str())
    });

    if has_emerging_space || has_emerging_vertical {
        EMERGING_POINTS
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::factors::Rubric;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn registry() -> TopVcRegistry {
        TopVcRegistry::from_names([
            "Accel",
            "Sequoia Capital",
            "Greylock",
            "Index Ventures",
            "Benchmark",
            "Lightspeed",
        ])
    }

    #[test]
    fn test_vc_score_tiers() {
        let registry = registry();
        assert_eq!(score_vc(Vec::<&str>::new(), &registry), 0);
        assert_eq!(score_vc(["Unknown Fund"], &registry), 0);
        assert_eq!(score_vc(["accel"], &registry), 3);
        assert_eq!(score_vc(["Accel", "Greylock"], &registry), 5);
        assert_eq!(score_vc(["Accel", "Greylock", "Benchmark"], &registry), 8);
        assert_eq!(score_vc(["Accel", "Greylock", "Benchmark", "Lightspeed"], &registry), 8);
        assert_eq!(
            score_vc(["Accel", "Greylock", "Benchmark", "Lightspeed", "Index Ventures"], &registry),
            10
        );
    }

    #[test]
    fn test_vc_score_counts_active_and_former_once() {
        let registry = registry();
        let company = CompanyRow {
            active_investors: vec!["Accel".to_string(), " SEQUOIA CAPITAL ".to_string()],
            former_investors: vec!["accel".to_string()],
            ..Default::default()
        };
        assert_eq!(score_vc(company.investors(), &registry), 5);
    }

    #[test]
    fn test_funding_valuation_examples() {
        assert_eq!(score_funding_valuation(9500.0), 8);
        assert_eq!(score_funding_valuation(950.0), 5);
        assert_eq!(score_funding_valuation(100.0), 0);
    }

    #[test]
    fn test_funding_valuation_boundaries() {
        assert_eq!(score_funding_valuation(10000.0), 10);
        assert_eq!(score_funding_valuation(5000.0), 9);
        assert_eq!(score_funding_valuation(1000.0), 8);
        assert_eq!(score_funding_valuation(900.0), 4);
        assert_eq!(score_funding_valuation(800.0), 3);
        assert_eq!(score_funding_valuation(700.0), 2);
        assert_eq!(score_funding_valuation(500.0), 1);
        assert_eq!(score_funding_valuation(250.0), 1);
        assert_eq!(score_funding_valuation(249.9), 0);
    }

    #[test]
    fn test_raised_examples() {
        assert_eq!(score_raised(1000.0), 10);
        assert_eq!(score_raised(50.0), 1);
        assert_eq!(score_raised(49.0), 0);
    }

    #[test]
    fn test_raised_boundaries() {
        assert_eq!(score_raised(500.0), 6);
        assert_eq!(score_raised(500.5), 8);
        assert_eq!(score_raised(300.0), 4);
        assert_eq!(score_raised(200.0), 2);
        assert_eq!(score_raised(100.0), 1);
    }

    #[test]
    fn test_recent_financing_within_window() {
        let reference = date(2024, 11, 18);
        let june = Some(date(2024, 6, 1));
        assert_eq!(score_recent_financing(june, Some(100.0), reference), Some(5));
        assert_eq!(score_recent_financing(june, Some(750.0), reference), Some(10));
        assert_eq!(score_recent_financing(june, None, reference), Some(5));
    }

    #[test]
    fn test_recent_financing_outside_window() {
        let reference = date(2024, 11, 18);
        // Large rounds only count when the round was recent
        assert_eq!(score_recent_financing(Some(date(2022, 1, 1)), Some(900.0), reference), Some(0));
        // The window start itself is excluded
        assert_eq!(score_recent_financing(Some(date(2023, 11, 19)), None, reference), Some(0));
        assert_eq!(score_recent_financing(Some(date(2023, 11, 20)), None, reference), Some(5));
    }

    #[test]
    fn test_recent_financing_missing_date() {
        let reference = date(2024, 11, 18);
        assert_eq!(score_recent_financing(None, Some(900.0), reference), None);
    }

    #[test]
    fn test_company_growth_mature() {
        assert_eq!(score_company_growth(Some(2018), Some(650.0), 2025), Some(6));
        assert_eq!(score_company_growth(Some(2018), Some(1000.0), 2025), Some(10));
        assert_eq!(score_company_growth(Some(2018), Some(300.0), 2025), Some(1));
        assert_eq!(score_company_growth(Some(2018), Some(0.0), 2025), Some(0));
        assert_eq!(score_company_growth(Some(2021), Some(250.0), 2025), Some(1));
    }

    #[test]
    fn test_company_growth_young() {
        assert_eq!(score_company_growth(Some(2023), Some(250.0), 2025), Some(10));
        assert_eq!(score_company_growth(Some(2023), Some(150.0), 2025), Some(6));
        assert_eq!(score_company_growth(Some(2023), Some(60.0), 2025), Some(3));
        assert_eq!(score_company_growth(Some(2023), Some(50.0), 2025), Some(0));
    }

    #[test]
    fn test_company_growth_missing_inputs() {
        assert_eq!(score_company_growth(None, Some(650.0), 2025), None);
        assert_eq!(score_company_growth(Some(2018), None, 2025), None);
    }

    #[test]
    fn test_company_growth_out_of_range_age_is_missing() {
        assert_eq!(score_company_growth(Some(i32::MIN), Some(100.0), 2025), None);
        assert_eq!(score_company_growth(Some(2020), Some(100.0), i32::MIN), None);
    }

    #[test]
    fn test_emerging_space_text() {
        assert_eq!(score_emerging_and_verticals(Some("Generative AI"), &[]), 10);
        assert_eq!(score_emerging_and_verticals(Some("   "), &[]), 0);
        assert_eq!(score_emerging_and_verticals(None, &[]), 0);
    }

    #[test]
    fn test_emerging_vertical_keywords() {
        let verticals = vec!["FinTech".to_string(), " Quantum Computing ".to_string()];
        assert_eq!(score_emerging_and_verticals(None, &verticals), 10);

        // Each keyword stands alone; run-together text does not match
        let verticals = vec!["quantum computingautonomous cars".to_string()];
        assert_eq!(score_emerging_and_verticals(None, &verticals), 0);

        let verticals = vec!["Fusion Energy".to_string()];
        assert_eq!(score_emerging_and_verticals(None, &verticals), 10);
    }

    #[test]
    fn test_evaluate_row() {
        let company = CompanyRow {
            active_investors: vec!["Accel".to_string()],
            last_known_valuation: Some(1200.0),
            total_raised: Some(300.0),
            last_financing_date: Some(date(2025, 3, 1)),
            last_financing_size: Some(600.0),
            year_founded: Some(2018),
            verticals: vec!["Cybersecurity".to_string()],
            ..Default::default()
        };
        let context = ScoringContext::for_date(date(2025, 6, 30));
        let scores = SubScores::evaluate(&company, Some(650.0), &registry(), &context);

        assert_eq!(scores.vc, Some(3));
        assert_eq!(scores.funding_valuation, Some(8));
        assert_eq!(scores.raised, Some(4));
        assert_eq!(scores.recent_financing, Some(10));
        assert_eq!(scores.company_growth, Some(6));
        assert_eq!(scores.emerging_verticals, Some(10));
    }

    #[test]
    fn test_evaluate_row_with_gaps() {
        let context = ScoringContext::for_date(date(2025, 6, 30));
        let scores = SubScores::evaluate(&CompanyRow::default(), None, &registry(), &context);

        assert_eq!(scores.vc, Some(0));
        assert_eq!(scores.funding_valuation, None);
        assert_eq!(scores.raised, None);
        assert_eq!(scores.recent_financing, None);
        assert_eq!(scores.company_growth, None);
        assert_eq!(scores.emerging_verticals, Some(0));
    }

    #[test]
    fn test_scores_stay_within_rubric_bounds() {
        let check = |rubric: &Rubric, score: u8| assert!(rubric.possible_scores().contains(&score));
        for value in [-10.0, 0.0, 49.0, 50.0, 101.0, 250.0, 501.0, 901.0, 1000.0, 5000.0, 20000.0] {
            check(&VALUATION_RUBRIC, score_funding_valuation(value));
            check(&RAISED_RUBRIC, score_raised(value));
            let mature = score_company_growth(Some(2000), Some(value), 2025).unwrap();
            check(&MATURE_GROWTH_RUBRIC, mature);
            let young = score_company_growth(Some(2024), Some(value), 2025).unwrap();
            check(&YOUNG_GROWTH_RUBRIC, young);
        }
    }
}
