//! Swap-backtracking permutation generator.
//!
//! Produces permutations in the order of the classic recursive scheme
//!
//! ```text
//! visit(a, l):
//!     if l == n: emit a
//!     for i in l..n: swap(a[l], a[i]); visit(a, l + 1); swap(a[l], a[i])
//! ```
//!
//! without recursion and without allocating per permutation. The first
//! permutation is the input order itself.

/// Iterative swap-order permutation generator.
///
/// Use [`advance`](Self::advance) in hot loops (borrows the current
/// permutation, no allocation) or the [`Iterator`] impl, which clones.
///
/// # Examples
///
/// ```
/// use u_consensus::enumeration::SwapPermutations;
///
/// let perms: Vec<Vec<char>> = SwapPermutations::new(vec!['A', 'B', 'C']).collect();
/// let words: Vec<String> = perms.iter().map(|p| p.iter().collect()).collect();
/// assert_eq!(words, ["ABC", "ACB", "BAC", "BCA", "CBA", "CAB"]);
/// ```
#[derive(Debug, Clone)]
pub struct SwapPermutations<T> {
    items: Vec<T>,
    /// `counters[l]` is the index currently swapped into position `l`.
    counters: Vec<usize>,
    /// Levels below this are fixed (subtree enumeration).
    start_level: usize,
    remaining: u64,
    started: bool,
}

impl<T> SwapPermutations<T> {
    /// All permutations of `items`, starting with `items` itself.
    pub fn new(items: Vec<T>) -> Self {
        Self::subtree(items, 0, u64::MAX)
    }

    /// Permutations of `items[start_level..]` with the prefix held fixed,
    /// stopping after `limit` permutations.
    pub(crate) fn subtree(items: Vec<T>, start_level: usize, limit: u64) -> Self {
        let counters = (0..items.len()).collect();
        Self {
            items,
            counters,
            start_level,
            remaining: limit,
            started: false,
        }
    }

    /// Caps the number of permutations still to be produced.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.remaining = limit;
        self
    }

    /// Moves to the next permutation and borrows it.
    pub fn advance(&mut self) -> Option<&[T]> {
        if self.remaining == 0 {
            return None;
        }
        if self.started {
            if !self.step() {
                self.remaining = 0;
                return None;
            }
        } else {
            self.started = true;
        }
        self.remaining -= 1;
        Some(&self.items)
    }

    /// Backtracks to the deepest level with an unexplored choice.
    fn step(&mut self) -> bool {
        let n = self.items.len();
        for l in (self.start_level..n.saturating_sub(1)).rev() {
            self.items.swap(l, self.counters[l]);
            if self.counters[l] + 1 < n {
                self.counters[l] += 1;
                self.items.swap(l, self.counters[l]);
                for m in (l + 1)..n {
                    self.counters[m] = m;
                }
                return true;
            }
        }
        false
    }
}

impl<T: Clone> Iterator for SwapPermutations<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        self.advance().map(<[T]>::to_vec)
    }
}
