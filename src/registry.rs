use crate::error::ScoreError;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default top VC list file, looked up in the working directory.
pub const DEFAULT_TOP_VCS_FILE: &str = "VCtop_latest.txt";

/// Canonical set of top investor names.
///
/// Names are stored trimmed and lowercased so lookups are case-insensitive.
/// The registry is built once per process and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TopVcRegistry {
    names: HashSet<String>,
}

impl TopVcRegistry {
    /// Build a registry from any list of names. Blank names are dropped.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .filter_map(|name| normalize_investor(name.as_ref()))
            .collect();
        Self { names }
    }

    /// Load the registry from a line-oriented text file, one investor per line.
    pub fn load(path: &Path) -> Result<Self, ScoreError> {
        let content = fs::read_to_string(path).map_err(|source| ScoreError::TopVcsUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_names(content.lines());
        tracing::debug!("Loaded {} top VCs from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Whether a (raw, unnormalized) investor name is a top VC.
    pub fn contains(&self, investor: &str) -> bool {
        normalize_investor(investor).is_some_and(|name| self.names.contains(&name))
    }

    /// Count distinct top VCs among the given investor names.
    pub fn count_matches<'a, I>(&self, investors: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        investors
            .into_iter()
            .filter(|investor| self.contains(investor))
            .filter_map(normalize_investor)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Resolve the registry path: explicit flag, then config, then the default file.
pub fn resolve_top_vcs_path(cli: Option<PathBuf>, config: Option<&str>) -> PathBuf {
    cli.or_else(|| config.map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TOP_VCS_FILE))
}

fn normalize_investor(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}
