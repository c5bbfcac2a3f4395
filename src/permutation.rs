//! Permutation validity, pairwise-swap moves, and the swap neighborhood.
//!
//! A permutation of size `n` is a sequence holding every index of `0..n`
//! exactly once. All helpers here borrow their input and hand back fresh
//! vectors, so a permutation held by one driver is never modified through
//! another.

use rand::Rng;

use crate::error::{Result, SearchError};
use crate::random::distinct_pair;

/// Returns `true` if `seq` holds every index of `0..n` exactly once.
pub fn is_valid_permutation(seq: &[usize], n: usize) -> bool {
    if seq.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in seq {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

/// Checks that `seq` is a permutation of `0..n`.
///
/// # Errors
/// [`SearchError::InvalidInput`] naming the first problem found: a length
/// mismatch, an out-of-range index, or a repeated index.
pub fn validate_permutation(seq: &[usize], n: usize) -> Result<()> {
    if seq.len() != n {
        return Err(SearchError::invalid(format!(
            "expected a permutation of length {n}, got length {}",
            seq.len()
        )));
    }
    let mut seen = vec![false; n];
    for (pos, &v) in seq.iter().enumerate() {
        if v >= n {
            return Err(SearchError::invalid(format!(
                "index {v} at position {pos} is out of range 0..{n}"
            )));
        }
        if seen[v] {
            return Err(SearchError::invalid(format!(
                "index {v} repeated at position {pos}"
            )));
        }
        seen[v] = true;
    }
    Ok(())
}

/// A pairwise swap of two positions.
///
/// Moves are unordered: `Move::new(3, 7)` and `Move::new(7, 3)` are the same
/// move and compare equal, which is what tabu membership relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "(usize, usize)", into = "(usize, usize)")
)]
pub struct Move {
    i: usize,
    j: usize,
}

impl Move {
    /// Creates the move swapping positions `a` and `b`.
    ///
    /// # Panics
    /// Panics if `a == b`.
    pub fn new(a: usize, b: usize) -> Self {
        assert_ne!(a, b, "a move must swap two distinct positions");
        Self {
            i: a.min(b),
            j: a.max(b),
        }
    }

    /// The lower position.
    pub fn i(&self) -> usize {
        self.i
    }

    /// The higher position.
    pub fn j(&self) -> usize {
        self.j
    }

    /// Returns a copy of `perm` with this move applied.
    pub fn apply(&self, perm: &[usize]) -> Vec<usize> {
        swapped(perm, self.i, self.j)
    }
}

impl TryFrom<(usize, usize)> for Move {
    type Error = SearchError;

    /// Normalises the pair like [`Move::new`], rejecting equal positions.
    fn try_from((a, b): (usize, usize)) -> Result<Self> {
        if a == b {
            return Err(SearchError::invalid(format!(
                "a move must swap two distinct positions, got ({a}, {b})"
            )));
        }
        Ok(Move::new(a, b))
    }
}

impl From<Move> for (usize, usize) {
    fn from(mv: Move) -> Self {
        (mv.i, mv.j)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "swap({}, {})", self.i, self.j)
    }
}

/// Returns a copy of `perm` with positions `i` and `j` exchanged.
pub fn swapped(perm: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut out = perm.to_vec();
    out.swap(i, j);
    out
}

/// Draws a uniformly random move over positions `0..n`.
///
/// # Panics
/// Panics if `n < 2`.
pub fn random_move<R: Rng>(n: usize, rng: &mut R) -> Move {
    let (a, b) = distinct_pair(n, rng);
    Move::new(a, b)
}

/// Number of swap moves on a sequence of length `n`: `n(n-1)/2`.
pub fn move_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Enumerates the full swap neighborhood of `perm`.
///
/// Yields one `(neighbor, move)` pair per `i < j`, in ascending
/// lexicographic `(i, j)` order. Tabu search relies on this order for its
/// first-found tie-break.
pub fn neighbors(perm: &[usize]) -> Vec<(Vec<usize>, Move)> {
    let n = perm.len();
    let mut out = Vec::with_capacity(move_count(n));
    for i in 0..n {
        for j in (i + 1)..n {
            let mv = Move { i, j };
            out.push((mv.apply(perm), mv));
        }
    }
    out
}
