use super::config::{SubScoreKind, WeightConfig};
use super::subscores::SubScores;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub kind: SubScoreKind,
    pub value: u8,
    pub weight: f64,
}

impl FactorContribution {
    pub fn weighted(&self) -> f64 {
        self.weight * self.value as f64
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub factors: Vec<FactorContribution>,
    /// Configured sub-scores that were missing for this row.
    pub skipped: Vec<SubScoreKind>,
    /// Sum of the weights actually used.
    pub weight_used: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub incomplete: bool,
    pub breakdown: ScoreBreakdown,
}

/// Combine the present sub-scores into one overall score.
///
/// Only configured weights take part. A configured sub-score that is missing
/// for this row is skipped and its weight left out of the denominator, so
/// gaps do not drag the score down. With nothing to divide by the score is 0.
pub fn calculate_score(scores: &SubScores, weights: &WeightConfig) -> ScoreResult {
    let mut total = 0.0;
    let mut weight_used = 0.0;
    let mut factors = Vec::new();
    let mut skipped = Vec::new();

    for (kind, weight) in weights.configured() {
        match scores.get(kind) {
            Some(value) => {
                total += weight * value as f64;
                weight_used += weight;
                factors.push(FactorContribution {
                    kind,
                    value,
                    weight,
                });
            }
            None => {
                tracing::debug!("Missing score column: '{}', skipping it in calculation", kind);
                skipped.push(kind);
            }
        }
    }

    let score = if weight_used > 0.0 {
        total / weight_used
    } else {
        0.0
    };

    ScoreResult {
        score,
        incomplete: !skipped.is_empty(),
        breakdown: ScoreBreakdown {
            factors,
            skipped,
            weight_used,
        },
    }
}
