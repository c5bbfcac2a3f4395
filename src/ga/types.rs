//! Population members of the genetic driver.

use crate::objective::Objective;
use crate::permutation::is_valid_permutation;

/// A candidate ordering together with its cost.
///
/// Genes are fixed once a chromosome is built, so the cost is computed once
/// at construction and cached. Children of the non-preserving crossovers
/// may hold repeated genes; [`is_valid`](Chromosome::is_valid) tells them
/// apart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    /// Gene sequence (city or task indices).
    pub genes: Vec<usize>,
    /// Cost under the objective that built this chromosome.
    pub cost: f64,
}

impl Chromosome {
    /// Evaluates `genes` under `objective`.
    pub fn evaluated<O: Objective + ?Sized>(objective: &O, genes: Vec<usize>) -> Self {
        let cost = objective.evaluate(&genes);
        Self { genes, cost }
    }

    /// Whether the genes form a permutation of `0..genes.len()`.
    pub fn is_valid(&self) -> bool {
        is_valid_permutation(&self.genes, self.genes.len())
    }
}

/// Index of the lowest-cost chromosome; the first one wins ties.
///
/// Returns `None` for an empty slice.
pub(crate) fn best_index(population: &[Chromosome]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, c) in population.iter().enumerate() {
        match best {
            Some(b) if population[b].cost <= c.cost => {}
            _ => best = Some(i),
        }
    }
    best
}
