//! Composite community scoring for company datasets.
//!
//! Each company row is scored on six rubric-based sub-scores which are then
//! combined with user-adjustable weights. Missing sub-scores are left out and
//! the remaining weights renormalized.

pub mod company;
pub mod config;
pub mod dataset;
pub mod error;
pub mod history;
pub mod output;
pub mod pipeline;
pub mod registry;
pub mod scoring;

pub use error::ScoreError;
pub use pipeline::{rank_companies, Ranking, ScoredCompany, Summary};
pub use registry::TopVcRegistry;
