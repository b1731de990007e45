//! Engine configuration.

use crate::anneal::AnnealConfig;
use crate::enumeration::{HARD_CAP, SOFT_CAP};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How the candidate space is searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Capped swap-order enumeration. Exact while `n!` fits the hard cap.
    #[default]
    Exhaustive,
    /// Seeded simulated annealing. Never certified, always flagged limited.
    Annealing,
    /// Exhaustive when `n!` fits the hard cap, annealing otherwise.
    Auto,
}

/// Configuration of a consensus run.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_consensus::consensus::{EngineConfig, SearchStrategy};
///
/// let config = EngineConfig::default()
///     .with_timeout(Duration::from_secs(5))
///     .with_strategy(SearchStrategy::Auto)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of candidates enumerated.
    pub hard_cap: u64,

    /// Above this many permutations the result is flagged limited.
    pub soft_cap: u64,

    /// Wall-clock budget for the search. `None` = run to completion.
    pub timeout: Option<Duration>,

    /// Score enumeration slices on the rayon thread pool.
    pub parallel: bool,

    /// Target number of candidates per parallel slice.
    pub slice_size: u64,

    /// How many tied candidates are kept in the result. `tie_count` is
    /// always exact.
    pub max_retained_ties: usize,

    /// Reject unknown method names instead of falling back.
    pub strict_method: bool,

    pub strategy: SearchStrategy,

    /// Used by [`SearchStrategy::Annealing`] and [`SearchStrategy::Auto`].
    pub anneal: AnnealConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hard_cap: HARD_CAP,
            soft_cap: SOFT_CAP,
            timeout: None,
            parallel: true,
            slice_size: 50_000,
            max_retained_ties: 1024,
            strict_method: false,
            strategy: SearchStrategy::default(),
            anneal: AnnealConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn with_hard_cap(mut self, cap: u64) -> Self {
        self.hard_cap = cap;
        self
    }

    pub fn with_soft_cap(mut self, cap: u64) -> Self {
        self.soft_cap = cap;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_slice_size(mut self, size: u64) -> Self {
        self.slice_size = size;
        self
    }

    pub fn with_max_retained_ties(mut self, n: usize) -> Self {
        self.max_retained_ties = n;
        self
    }

    pub fn with_strict_method(mut self, strict: bool) -> Self {
        self.strict_method = strict;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_anneal(mut self, anneal: AnnealConfig) -> Self {
        self.anneal = anneal;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.hard_cap == 0 {
            return Err("hard_cap must be at least 1".into());
        }
        if self.soft_cap > self.hard_cap {
            return Err(format!(
                "soft_cap ({}) must not exceed hard_cap ({})",
                self.soft_cap, self.hard_cap
            ));
        }
        if self.slice_size == 0 {
            return Err("slice_size must be at least 1".into());
        }
        if self.max_retained_ties == 0 {
            return Err("max_retained_ties must be at least 1".into());
        }
        if matches!(self.strategy, SearchStrategy::Annealing | SearchStrategy::Auto) {
            self.anneal.validate().map_err(|e| format!("anneal: {e}"))?;
        }
        Ok(())
    }
}
