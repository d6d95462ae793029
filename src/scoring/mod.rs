pub mod config;
pub mod engine;
pub mod factors;
pub mod subscores;
pub mod validation;

pub use config::*;
pub use engine::{calculate_score, FactorContribution, ScoreBreakdown, ScoreResult};
pub use factors::{Bound, Rubric};
pub use subscores::{
    score_company_growth, score_emerging_and_verticals, score_funding_valuation, score_raised,
    score_recent_financing, score_vc, SubScores,
};
pub use validation::validate_weights;
