use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::pipeline::{Ranking, ScoredCompany, Summary};
use crate::scoring::{SubScoreKind, WeightConfig};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format an overall score with two decimals.
/// If incomplete is true, appends asterisk to indicate some sub-scores were missing
pub fn format_score(score: f64, incomplete: bool) -> String {
    if incomplete {
        format!("{:.2}*", score)
    } else {
        format!("{:.2}", score)
    }
}

fn format_sub_score(value: Option<u8>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a name to fit available width, accounting for Unicode
fn truncate_name(name: &str, max_width: usize) -> String {
    let chars: Vec<char> = name.chars().collect();
    if chars.len() <= max_width {
        name.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Compact sub-score strip in aggregation order, e.g. "8 10 10 10 1 10".
fn format_sub_scores(scored: &ScoredCompany) -> String {
    SubScoreKind::ALL
        .iter()
        .map(|k| format!("{:>2}", format_sub_score(scored.scores.get(*k))))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format companies as a ranked table with columns: Index, Score, Sub-scores, Name
/// No headers
/// Index column: 4 chars (fits "999."), right-aligned
/// Score column is right-aligned, 6 chars wide (fits "10.00*")
pub fn format_ranking_table(companies: &[ScoredCompany], use_colors: bool) -> String {
    if companies.is_empty() {
        return "No companies found.".to_string();
    }

    let term_width = get_terminal_width();

    let index_width = 4;
    let score_width = 6;
    let separator = "  ";

    companies
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            // 1-based index, right-aligned with trailing dot
            let index_str = format!("{:>3}.", idx + 1);
            let score_str = format_score(scored.score(), scored.result.incomplete);
            let score_padded = format!("{:>width$}", score_str, width = score_width);
            let subs = format_sub_scores(scored);

            let fixed_width = index_width + 1 + score_width + separator.len() * 2 + subs.len();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_name(&scored.company.name, width - fixed_width)
                }
                // Very narrow terminal, show truncated
                Some(_) => truncate_name(&scored.company.name, 20),
                // No terminal (pipe), don't truncate
                None => scored.company.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_padded.bold(),
                    separator,
                    subs.dimmed(),
                    separator,
                    name
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_padded, separator, subs, separator, name
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format companies as tab-separated values for scripting
/// Columns: score, name, then the six sub-scores (empty when missing)
pub fn format_tsv(companies: &[ScoredCompany]) -> String {
    companies
        .iter()
        .map(|scored| {
            let mut fields = vec![format!("{:.4}", scored.score()), scored.company.name.clone()];
            fields.extend(SubScoreKind::ALL.iter().map(|k| {
                scored
                    .scores
                    .get(*k)
                    .map(|v| v.to_string())
                    .unwrap_or_default()
            }));
            fields.join("\t")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the per-sub-score breakdown for one company (for --breakdown)
pub fn format_breakdown(scored: &ScoredCompany, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let title = if use_colors {
        scored.company.name.bold().to_string()
    } else {
        scored.company.name.clone()
    };
    lines.push(title);

    let growth = scored
        .growth
        .map(|g| format!("{:.1}%", g))
        .unwrap_or_else(|| "n/a".to_string());
    lines.push(format!("  Growth: {}", growth));

    for factor in &scored.result.breakdown.factors {
        lines.push(format!(
            "  {}: {} x {} = {:.2}",
            factor.kind,
            factor.value,
            factor.weight,
            factor.weighted()
        ));
    }
    for kind in &scored.result.breakdown.skipped {
        let line = format!("  {}: missing, skipped", kind);
        if use_colors {
            lines.push(line.yellow().to_string());
        } else {
            lines.push(line);
        }
    }
    lines.push(format!(
        "  Overall: {} (weight used {:.2})",
        format_score(scored.score(), scored.result.incomplete),
        scored.result.breakdown.weight_used
    ));
    lines.join("\n")
}

/// Format the two summary scalars.
pub fn format_summary(summary: &Summary) -> String {
    let fmt = |v: Option<f64>| v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "n/a".to_string());
    let mut lines = vec![
        format!("Median Overall Score: {}", fmt(summary.median)),
        format!("Average Overall Score: {}", fmt(summary.mean)),
    ];
    if summary.incomplete > 0 {
        lines.push(format!(
            "{} of {} companies scored with missing sub-scores (*)",
            summary.incomplete, summary.count
        ));
    }
    lines.join("\n")
}

/// Format the effective weights, one per line.
pub fn format_weights(weights: &WeightConfig) -> String {
    SubScoreKind::ALL
        .iter()
        .map(|kind| {
            let weight = weights
                .get(*kind)
                .map(|w| format!("{:.2}", w))
                .unwrap_or_else(|| "not configured".to_string());
            format!("{:<30} {:<20} {}", kind.column(), kind.key(), weight)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonCompany<'a> {
    rank: usize,
    name: &'a str,
    overall_score: f64,
    incomplete: bool,
    growth_percentage: Option<f64>,
    sub_scores: BTreeMap<&'static str, Option<u8>>,
}

#[derive(Serialize)]
struct JsonRanking<'a> {
    median: Option<f64>,
    mean: Option<f64>,
    companies: Vec<JsonCompany<'a>>,
}

/// Format the ranking and summary as pretty JSON.
pub fn format_json(ranking: &Ranking) -> serde_json::Result<String> {
    let companies = ranking
        .companies
        .iter()
        .enumerate()
        .map(|(idx, scored)| JsonCompany {
            rank: idx + 1,
            name: &scored.company.name,
            overall_score: scored.score(),
            incomplete: scored.result.incomplete,
            growth_percentage: scored.growth,
            sub_scores: SubScoreKind::ALL
                .iter()
                .map(|k| (k.key(), scored.scores.get(*k)))
                .collect(),
        })
        .collect();

    serde_json::to_string_pretty(&JsonRanking {
        median: ranking.summary.median,
        mean: ranking.summary.mean,
        companies,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::CompanyRow;
    use crate::history::EmployeeHistory;
    use crate::scoring::{calculate_score, SubScores};

    fn sample(name: &str, scores: SubScores) -> ScoredCompany {
        ScoredCompany {
            company: CompanyRow {
                name: name.to_string(),
                ..Default::default()
            },
            history: EmployeeHistory::new(),
            growth: Some(50.0),
            scores,
            result: calculate_score(&scores, &WeightConfig::default()),
        }
    }

    fn full() -> SubScores {
        SubScores {
            vc: Some(8),
            funding_valuation: Some(10),
            raised: Some(10),
            recent_financing: Some(10),
            company_growth: Some(1),
            emerging_verticals: Some(10),
        }
    }

    fn partial() -> SubScores {
        SubScores {
            vc: Some(3),
            emerging_verticals: Some(0),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(8.736842, false), "8.74");
        assert_eq!(format_score(0.0, true), "0.00*");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("Acme", 10), "Acme");
        assert_eq!(truncate_name("Acme Robotics International", 10), "Acme Ro...");
        assert_eq!(truncate_name("Acme", 3), "Acm");
    }

    #[test]
    fn test_ranking_table_empty() {
        assert_eq!(format_ranking_table(&[], false), "No companies found.");
    }

    #[test]
    fn test_ranking_table_rows() {
        let companies = vec![sample("Rocket", full()), sample("Ghost", partial())];
        let result = format_ranking_table(&companies, false);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("  1."));
        assert!(lines[0].contains("Rocket"));
        assert!(lines[1].starts_with("  2."));
        // Missing sub-scores show as dashes and the score is flagged
        assert!(lines[1].contains(" -"));
        assert!(lines[1].contains('*'));
    }

    #[test]
    fn test_tsv() {
        let companies = vec![sample("Ghost", partial())];
        let result = format_tsv(&companies);
        let fields: Vec<&str> = result.split('\t').collect();
        assert_eq!(fields.len(), 8);
        assert_eq!(fields[1], "Ghost");
        assert_eq!(fields[2], "3");
        assert_eq!(fields[3], "");
        assert_eq!(fields[7], "0");
    }

    #[test]
    fn test_breakdown_lists_skipped() {
        let result = format_breakdown(&sample("Ghost", partial()), false);
        assert!(result.starts_with("Ghost"));
        assert!(result.contains("Growth: 50.0%"));
        assert!(result.contains("VC Score: 3 x 0.15 = 0.45"));
        assert!(result.contains("Raised Score: missing, skipped"));
        assert!(result.contains("weight used 0.25"));
    }

    #[test]
    fn test_summary() {
        let summary = Summary {
            count: 4,
            incomplete: 1,
            median: Some(2.5),
            mean: Some(3.0),
        };
        let result = format_summary(&summary);
        assert!(result.contains("Median Overall Score: 2.50"));
        assert!(result.contains("Average Overall Score: 3.00"));
        assert!(result.contains("1 of 4"));

        let empty = format_summary(&Summary::default());
        assert!(empty.contains("Median Overall Score: n/a"));
        assert!(!empty.contains("missing"));
    }

    #[test]
    fn test_weights_listing() {
        let mut weights = WeightConfig::default();
        weights.set(SubScoreKind::CompanyGrowth, None);
        let result = format_weights(&weights);
        assert_eq!(result.lines().count(), 6);
        assert!(result.contains("0.30"));
        assert!(result.contains("not configured"));
    }

    #[test]
    fn test_json() {
        let ranking = Ranking {
            headers: vec![],
            companies: vec![sample("Rocket", full())],
            summary: Summary {
                count: 1,
                incomplete: 0,
                median: Some(8.0),
                mean: Some(8.0),
            },
        };
        let json = format_json(&ranking).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["median"], 8.0);
        assert_eq!(value["companies"][0]["rank"], 1);
        assert_eq!(value["companies"][0]["name"], "Rocket");
        assert_eq!(value["companies"][0]["sub_scores"]["vc"], 8);
    }
}
