//! Recombination and mutation operators for permutation chromosomes.
//!
//! Every operator borrows its parents and returns a fresh child. Operators
//! differ in whether the child is guaranteed to be a permutation, and that
//! difference is part of their contract:
//!
//! | Operator | Always a permutation? |
//! |---|---|
//! | [`ordered_crossover`] | yes |
//! | [`single_point_crossover`] | no |
//! | [`two_point_crossover`] | no |
//! | [`uniform_crossover`] | yes, when both parents are permutations |
//! | [`ordered_single_point_crossover`] | yes |
//! | [`ordered_two_point_crossover`] | yes |
//! | [`swap_mutation`] | yes |
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::SearchError;
use crate::random::distinct_pair;

/// Recombination strategy used by the genetic driver.
///
/// ```
/// use u_permsearch::ga::Crossover;
///
/// let c: Crossover = "two-point".parse().unwrap();
/// assert_eq!(c, Crossover::TwoPoint);
/// assert!(!c.preserves_permutation());
/// assert!("pmx".parse::<Crossover>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum Crossover {
    /// Segment copy from the first parent, remaining genes filled in the
    /// second parent's order. See [`ordered_crossover`].
    #[default]
    Ordered,
    /// Prefix of one parent, suffix of the other. See
    /// [`single_point_crossover`].
    SinglePoint,
    /// Middle segment swapped between parents. See [`two_point_crossover`].
    TwoPoint,
    /// Per-gene coin flip followed by duplicate repair. See
    /// [`uniform_crossover`].
    Uniform,
    /// Prefix of one parent, rest in the other's order. See
    /// [`ordered_single_point_crossover`].
    OrderedSinglePoint,
    /// Segment kept at its position, rest in the other's order. See
    /// [`ordered_two_point_crossover`].
    OrderedTwoPoint,
}

const CROSSOVER_NAMES: &str =
    "ordered, single-point, two-point, uniform, ordered-single-point, ordered-two-point";

impl Crossover {
    /// Every strategy, in declaration order.
    pub const ALL: [Crossover; 6] = [
        Crossover::Ordered,
        Crossover::SinglePoint,
        Crossover::TwoPoint,
        Crossover::Uniform,
        Crossover::OrderedSinglePoint,
        Crossover::OrderedTwoPoint,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Crossover::Ordered => "ordered",
            Crossover::SinglePoint => "single-point",
            Crossover::TwoPoint => "two-point",
            Crossover::Uniform => "uniform",
            Crossover::OrderedSinglePoint => "ordered-single-point",
            Crossover::OrderedTwoPoint => "ordered-two-point",
        }
    }

    /// Whether two permutation parents always yield a permutation child.
    pub fn preserves_permutation(self) -> bool {
        match self {
            Crossover::Ordered
            | Crossover::Uniform
            | Crossover::OrderedSinglePoint
            | Crossover::OrderedTwoPoint => true,
            Crossover::SinglePoint | Crossover::TwoPoint => false,
        }
    }

    /// Produces one child from two parents of equal length.
    ///
    /// # Panics
    /// Panics if the parents have different lengths.
    pub fn apply<R: Rng>(self, parent_a: &[usize], parent_b: &[usize], rng: &mut R) -> Vec<usize> {
        match self {
            Crossover::Ordered => ordered_crossover(parent_a, parent_b, rng),
            Crossover::SinglePoint => single_point_crossover(parent_a, parent_b, rng),
            Crossover::TwoPoint => two_point_crossover(parent_a, parent_b, rng),
            Crossover::Uniform => uniform_crossover(parent_a, parent_b, rng),
            Crossover::OrderedSinglePoint => ordered_single_point_crossover(parent_a, parent_b, rng),
            Crossover::OrderedTwoPoint => ordered_two_point_crossover(parent_a, parent_b, rng),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Crossover {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "ordered" | "permutation" => Ok(Crossover::Ordered),
            "single-point" => Ok(Crossover::SinglePoint),
            "two-point" => Ok(Crossover::TwoPoint),
            "uniform" => Ok(Crossover::Uniform),
            "ordered-single-point" => Ok(Crossover::OrderedSinglePoint),
            "ordered-two-point" => Ok(Crossover::OrderedTwoPoint),
            _ => Err(SearchError::UnrecognizedStrategy {
                name: s.to_string(),
                expected: CROSSOVER_NAMES,
            }),
        }
    }
}

// ============================================================================
// Crossover operators
// ============================================================================

/// Ordered segment crossover.
///
/// 1. Draw two distinct cut points `start < end` from `0..n`
/// 2. Copy `parent_a[start..end]` into the same positions of the child
/// 3. Scan `parent_b` in order; place each gene not yet in the child at the
///    next free position, starting at `end` and wrapping to 0
///
/// Both parents must be permutations of `0..n`; the child then is one too.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn ordered_crossover<R: Rng>(parent_a: &[usize], parent_b: &[usize], rng: &mut R) -> Vec<usize> {
    let n = check_parents(parent_a, parent_b);
    if n < 2 {
        return parent_a.to_vec();
    }

    let (start, end) = sorted_cuts(n, rng);
    ordered_child(parent_a, parent_b, start, end)
}

/// Builds one ordered child: `template[start..end]` in place, the rest of
/// `donor` in order from `end` onward, wrapping around.
fn ordered_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut present = vec![false; n];

    for i in start..end {
        child[i] = template[i];
        present[template[i]] = true;
    }

    let mut pos = end;
    for &gene in donor {
        if present[gene] {
            continue;
        }
        if pos >= n {
            pos = 0;
        }
        child[pos] = gene;
        present[gene] = true;
        pos += 1;
    }

    child
}

/// Single-point crossover: `parent_a[..c] ++ parent_b[c..]` with `c` drawn
/// from `1..n-1`, so each parent contributes at least one gene and the
/// last gene always comes from `parent_b`.
///
/// No validity guarantee: the child repeats or drops genes whenever the
/// parents disagree on the genes on either side of the cut. Unsuitable for
/// permutation problems; kept for comparison.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn single_point_crossover<R: Rng>(
    parent_a: &[usize],
    parent_b: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = check_parents(parent_a, parent_b);
    if n < 3 {
        return parent_a.to_vec();
    }
    let cut = rng.random_range(1..n - 1);
    let mut child = parent_a[..cut].to_vec();
    child.extend_from_slice(&parent_b[cut..]);
    child
}

/// Two-point crossover: `parent_a[..p1] ++ parent_b[p1..p2] ++ parent_a[p2..]`
/// with distinct cuts `p1 < p2` drawn from `1..n`.
///
/// Same lack of validity guarantee as [`single_point_crossover`].
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn two_point_crossover<R: Rng>(parent_a: &[usize], parent_b: &[usize], rng: &mut R) -> Vec<usize> {
    let n = check_parents(parent_a, parent_b);
    if n < 3 {
        return parent_a.to_vec();
    }
    let (p1, p2) = sorted_cuts(n - 1, rng);
    let (p1, p2) = (p1 + 1, p2 + 1);

    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&parent_a[..p1]);
    child.extend_from_slice(&parent_b[p1..p2]);
    child.extend_from_slice(&parent_a[p2..]);
    child
}

/// Uniform crossover with duplicate repair.
///
/// Each position independently takes the gene of `parent_a` or `parent_b`
/// with probability 0.5; the result then goes through
/// [`repair_duplicates`]. With two permutation parents the child is always
/// a permutation.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_crossover<R: Rng>(parent_a: &[usize], parent_b: &[usize], rng: &mut R) -> Vec<usize> {
    check_parents(parent_a, parent_b);
    let child: Vec<usize> = parent_a
        .iter()
        .zip(parent_b)
        .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
        .collect();
    repair_duplicates(child)
}

/// Replaces repeated genes with the genes missing from `0..n`.
///
/// The rule, applied to a sequence of length `n`:
///
/// 1. Count occurrences. The duplicate positions are the positions whose
///    gene occurs more than once, fixed once from the input, visited left
///    to right.
/// 2. The missing genes are the values of `0..n` absent from the input, used
///    in ascending order.
/// 3. At each duplicate position whose gene is *still* repeated, and while
///    missing genes remain, write the next missing gene there and update
///    both counts.
///
/// The last occurrence of each repeated gene therefore survives. If missing
/// genes run out, the remaining duplicates are left as they are. Genes
/// outside `0..n` are never rewritten unless repeated, so the output is a
/// permutation whenever every input gene is in range.
pub fn repair_duplicates(mut child: Vec<usize>) -> Vec<usize> {
    let n = child.len();
    let mut counts: HashMap<usize, usize> = HashMap::with_capacity(n);
    for &gene in &child {
        *counts.entry(gene).or_insert(0) += 1;
    }

    let duplicate_positions: Vec<usize> = (0..n).filter(|&i| counts[&child[i]] > 1).collect();
    let missing: Vec<usize> = (0..n).filter(|g| !counts.contains_key(g)).collect();
    let mut missing = missing.into_iter();

    for pos in duplicate_positions {
        let gene = child[pos];
        let Some(count) = counts.get_mut(&gene) else {
            continue;
        };
        if *count <= 1 {
            continue;
        }
        let Some(replacement) = missing.next() else {
            break;
        };
        *count -= 1;
        child[pos] = replacement;
        counts.insert(replacement, 1);
    }

    child
}

/// Order-preserving single-point crossover.
///
/// Keeps `parent_a[..c]` for a cut `c` drawn from `1..n-1`, then appends the
/// genes of `parent_b` that are not in that prefix, in `parent_b`'s order.
/// Both parents must be permutations; the child then is one too.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn ordered_single_point_crossover<R: Rng>(
    parent_a: &[usize],
    parent_b: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = check_parents(parent_a, parent_b);
    if n < 3 {
        return parent_a.to_vec();
    }
    let cut = rng.random_range(1..n - 1);

    let mut taken = vec![false; n];
    let mut child = Vec::with_capacity(n);
    for &gene in &parent_a[..cut] {
        taken[gene] = true;
        child.push(gene);
    }
    child.extend(parent_b.iter().copied().filter(|&g| !taken[g]));
    child
}

/// Order-preserving two-point crossover.
///
/// Draws distinct cuts `x < y` from `0..n` and keeps `segment =
/// parent_a[x..y]` at positions `x..y`. The remaining genes of `parent_b`,
/// in `parent_b`'s order, fill the positions before and after it.
/// Both parents must be permutations; the child then is one too.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn ordered_two_point_crossover<R: Rng>(
    parent_a: &[usize],
    parent_b: &[usize],
    rng: &mut R,
) -> Vec<usize> {
    let n = check_parents(parent_a, parent_b);
    if n < 2 {
        return parent_a.to_vec();
    }
    let (x, y) = sorted_cuts(n, rng);
    let segment = &parent_a[x..y];

    let mut in_segment = vec![false; n];
    for &gene in segment {
        in_segment[gene] = true;
    }
    let rest: Vec<usize> = parent_b.iter().copied().filter(|&g| !in_segment[g]).collect();

    let mut child = Vec::with_capacity(n);
    child.extend_from_slice(&rest[..x]);
    child.extend_from_slice(segment);
    child.extend_from_slice(&rest[x..]);
    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation.
///
/// With probability `rate`, exchanges two distinct uniformly chosen
/// positions; otherwise returns an unchanged copy. Sequences shorter than two
/// are returned unchanged.
pub fn swap_mutation<R: Rng>(perm: &[usize], rate: f64, rng: &mut R) -> Vec<usize> {
    let mut out = perm.to_vec();
    if rng.random::<f64>() < rate && out.len() >= 2 {
        let (i, j) = distinct_pair(out.len(), rng);
        out.swap(i, j);
    }
    out
}

// ============================================================================
// Helpers
// ============================================================================

fn check_parents(parent_a: &[usize], parent_b: &[usize]) -> usize {
    assert_eq!(
        parent_a.len(),
        parent_b.len(),
        "parents must have equal length"
    );
    parent_a.len()
}

/// Two distinct cut points `a < b` drawn from `0..n`.
fn sorted_cuts<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let (a, b) = distinct_pair(n, rng);
    (a.min(b), a.max(b))
}

// ============================================================================
// Tests
// ============================================================================
