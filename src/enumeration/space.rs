//! Capped candidate space and its partition into independent slices.

use super::permutations::SwapPermutations;

/// Default hard cap on enumerated candidates.
pub const HARD_CAP: u64 = 40_000_000;

/// Default soft cap; above it a search is flagged as limited.
pub const SOFT_CAP: u64 = 10_000;

/// `n!`, saturating at `u64::MAX`.
pub fn factorial(n: usize) -> u64 {
    (2..=n as u64).fold(1u64, |acc, k| acc.saturating_mul(k))
}

/// The permutations of a universe of `n` items that a search will visit.
///
/// Candidates are permutations of the dense indices `0..n`, produced in
/// swap-backtracking order starting from the identity (catalog order).
///
/// # Examples
///
/// ```
/// use u_consensus::enumeration::CandidateSpace;
///
/// let space = CandidateSpace::new(8, 40_000_000, 10_000);
/// assert_eq!(space.total(), 40_320);
/// assert_eq!(space.emitted(), 40_320);
/// assert!(space.limited());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateSpace {
    n: usize,
    total: u64,
    emitted: u64,
    limited: bool,
}

impl CandidateSpace {
    pub fn new(n: usize, hard_cap: u64, soft_cap: u64) -> Self {
        let total = factorial(n);
        Self {
            n,
            total,
            emitted: total.min(hard_cap),
            limited: total > soft_cap,
        }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// `n!` (saturating).
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of candidates the enumeration produces: `min(n!, hard cap)`.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Whether `n!` exceeds the soft cap. A limited search is best-effort,
    /// not a certified optimum.
    pub fn limited(&self) -> bool {
        self.limited
    }

    /// Sequential enumeration of all emitted candidates.
    pub fn iter(&self) -> SwapPermutations<usize> {
        SwapPermutations::new((0..self.n).collect()).with_limit(self.emitted)
    }

    /// Splits the emitted range into contiguous slices of at most `chunk`
    /// candidates (larger only at the leaves of a tiny universe).
    ///
    /// Slices are returned in enumeration order and together cover indices
    /// `0..emitted()` exactly once.
    pub fn slices(&self, chunk: u64) -> Vec<Slice> {
        let mut out = Vec::new();
        let mut state: Vec<usize> = (0..self.n).collect();
        split(&mut state, 0, 0, self.emitted, chunk.max(1), &mut out);
        out
    }
}

/// A contiguous run of the enumeration: one subtree of the backtracking tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slice {
    /// Enumeration index of the first candidate in this slice.
    pub base: u64,
    /// Number of candidates in this slice.
    pub len: u64,
    prefix: Vec<usize>,
    level: usize,
}

impl Slice {
    /// Enumerates this slice's candidates in order.
    pub fn iter(&self) -> SwapPermutations<usize> {
        SwapPermutations::subtree(self.prefix.clone(), self.level, self.len)
    }
}

fn split(state: &mut Vec<usize>, level: usize, base: u64, cap: u64, chunk: u64, out: &mut Vec<Slice>) {
    if base >= cap {
        return;
    }
    let n = state.len();
    let size = factorial(n - level);
    if level + 1 >= n || size <= chunk {
        out.push(Slice {
            base,
            len: size.min(cap - base),
            prefix: state.clone(),
            level,
        });
        return;
    }

    let child_size = factorial(n - level - 1);
    for (k, i) in (level..n).enumerate() {
        let child_base = base.saturating_add((k as u64).saturating_mul(child_size));
        if child_base >= cap {
            break;
        }
        state.swap(level, i);
        split(state, level + 1, child_base, cap, chunk, out);
        state.swap(level, i);
    }
}
