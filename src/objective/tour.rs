//! Closed-tour distance (Traveling Salesman Problem).

use super::{check_non_negative, Objective};
use crate::error::{Result, SearchError};

/// Length of the closed tour visiting cities in permutation order.
///
/// Cost = Σ `d[p[k]][p[(k + 1) mod n]]`, so the edge back to the start city
/// is included. The distance table must be square with a zero diagonal;
/// symmetry is not required.
///
/// ```
/// use u_permsearch::objective::{Objective, TourLength};
///
/// let tsp = TourLength::new(vec![
///     vec![0.0, 1.0, 4.0],
///     vec![1.0, 0.0, 2.0],
///     vec![4.0, 2.0, 0.0],
/// ]).unwrap();
/// assert_eq!(tsp.cost(&[0, 1, 2]).unwrap(), 7.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TourLength {
    n: usize,
    /// Row-major `n * n` distances.
    distances: Vec<f64>,
}

impl TourLength {
    /// Builds the objective from the rows of a distance table.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if the table is empty or not square, a
    /// diagonal entry is non-zero, or any distance is negative or not finite.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(SearchError::invalid("distance matrix must not be empty"));
        }
        let mut distances = Vec::with_capacity(n * n);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(SearchError::invalid(format!(
                    "distance matrix must be square: row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            for (j, &d) in row.iter().enumerate() {
                check_non_negative(d, &format!("distance[{i}][{j}]"))?;
                if i == j && d != 0.0 {
                    return Err(SearchError::invalid(format!(
                        "distance[{i}][{i}] must be 0, got {d}"
                    )));
                }
            }
            distances.extend(row);
        }
        Ok(Self { n, distances })
    }

    /// Convenience constructor for integer tables.
    pub fn from_integers<T: Copy + Into<f64>>(rows: &[Vec<T>]) -> Result<Self> {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|&d| d.into()).collect())
                .collect(),
        )
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.n
    }

    /// Always `false`: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Distance from city `from` to city `to`.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        assert!(from < self.n && to < self.n, "city index out of range");
        self.distances[from * self.n + to]
    }

    /// Whether `d[i][j] == d[j][i]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.distance(i, j) == self.distance(j, i)))
    }
}

impl Objective for TourLength {
    fn dimension(&self) -> usize {
        self.n
    }

    fn evaluate(&self, order: &[usize]) -> f64 {
        let n = order.len();
        (0..n)
            .map(|k| self.distances[order[k] * self.n + order[(k + 1) % n]])
            .sum()
    }
}
