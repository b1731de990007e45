//! Method presets and the (metric, criterion) objective they select.

use crate::distance::Metric;
use crate::error::{ConsensusError, Warning};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How per-expert distances are reduced to one candidate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Criterion {
    /// Additive: sum of distances.
    Sum,
    /// Minimax: largest distance.
    Max,
}

impl Criterion {
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Sum => "sum",
            Criterion::Max => "max",
        }
    }

    /// The aggregate not used for selection; orders tie rows for display.
    pub fn other(self) -> Criterion {
        match self {
            Criterion::Sum => Criterion::Max,
            Criterion::Max => Criterion::Sum,
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What the search minimizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub metric: Metric,
    pub criterion: Criterion,
}

impl Objective {
    pub fn new(metric: Metric, criterion: Criterion) -> Self {
        Self { metric, criterion }
    }

    /// Picks the aggregate this objective minimizes.
    #[inline]
    pub fn score(self, sum: u64, max: u64) -> u64 {
        match self.criterion {
            Criterion::Sum => sum,
            Criterion::Max => max,
        }
    }
}

/// Named consensus methods.
///
/// | method | metric | criterion |
/// |---|---|---|
/// | `kemeny-snell` | pairwise-preference | sum |
/// | `cook-seiford` | rank-displacement | sum |
/// | `minimax` | pairwise-preference | max |
/// | `gv-median` | pairwise-preference | max |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    #[default]
    KemenySnell,
    CookSeiford,
    Minimax,
    GvMedian,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::KemenySnell,
        Method::CookSeiford,
        Method::Minimax,
        Method::GvMedian,
    ];

    /// Canonical method name.
    pub fn name(self) -> &'static str {
        match self {
            Method::KemenySnell => "kemeny-snell",
            Method::CookSeiford => "cook-seiford",
            Method::Minimax => "minimax",
            Method::GvMedian => "gv-median",
        }
    }

    pub fn objective(self) -> Objective {
        match self {
            Method::KemenySnell => Objective::new(Metric::PairwisePreference, Criterion::Sum),
            Method::CookSeiford => Objective::new(Metric::RankDisplacement, Criterion::Sum),
            Method::Minimax | Method::GvMedian => {
                Objective::new(Metric::PairwisePreference, Criterion::Max)
            }
        }
    }

    /// Looks a method up by name.
    ///
    /// Case-insensitive; surrounding whitespace is ignored and `_` or a
    /// space may stand for `-`.
    pub fn parse(name: &str) -> Option<Method> {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '_' | ' ' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        Method::ALL.into_iter().find(|m| m.name() == normalized)
    }

    /// Resolves a requested name, falling back to [`Method::KemenySnell`].
    ///
    /// The fallback is never silent: it comes with a
    /// [`Warning::UnknownMethod`] naming both methods.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_consensus::consensus::Method;
    ///
    /// let (method, warning) = Method::resolve("Cook_Seiford");
    /// assert_eq!(method, Method::CookSeiford);
    /// assert!(warning.is_none());
    ///
    /// let (method, warning) = Method::resolve("borda");
    /// assert_eq!(method, Method::KemenySnell);
    /// assert!(warning.is_some());
    /// ```
    pub fn resolve(name: &str) -> (Method, Option<Warning>) {
        match Method::parse(name) {
            Some(m) => (m, None),
            None => {
                let fallback = Method::default();
                (
                    fallback,
                    Some(Warning::UnknownMethod {
                        requested: name.to_string(),
                        fallback: fallback.name().to_string(),
                    }),
                )
            }
        }
    }
}

impl FromStr for Method {
    type Err = ConsensusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::parse(s).ok_or_else(|| ConsensusError::UnknownMethod(s.to_string()))
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
