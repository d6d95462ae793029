//! Fatal error taxonomy for a scoring run.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole run. Per-row data problems never surface here;
/// they are absorbed into missing sub-scores instead.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("Could not read the top VC list at {}: {source}", path.display())]
    TopVcsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The input file must contain an '{0}' column")]
    MissingColumn(String),
}
