//! Single-machine task sequencing objectives.
//!
//! Tasks run back to back in permutation order starting at time 0. The
//! completion time of a task is the sum of the durations of every task up to
//! and including it.

use super::{check_non_negative, Objective};
use crate::error::{Result, SearchError};

/// A task to be sequenced on a single machine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    /// Processing time.
    pub duration: f64,
    /// Due date; finishing later than this incurs tardiness.
    pub due_date: f64,
    /// Penalty per unit of tardiness.
    pub weight: f64,
}

impl Task {
    /// Creates a task.
    pub fn new(duration: f64, due_date: f64, weight: f64) -> Self {
        Self {
            duration,
            due_date,
            weight,
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        check_non_negative(self.duration, &format!("task {index} duration"))?;
        check_non_negative(self.due_date, &format!("task {index} due date"))?;
        check_non_negative(self.weight, &format!("task {index} weight"))
    }
}

/// Per-task outcome of a sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTask {
    /// Index of the task in the problem data.
    pub task: usize,
    /// Time at which the task finishes.
    pub completion: f64,
    /// `max(0, completion - due_date)`; always 0 for flow time.
    pub tardiness: f64,
    /// Contribution of this task to the objective.
    pub penalty: f64,
}

/// Running completion times of `order` under `duration`.
fn completions<'a>(
    order: &'a [usize],
    duration: impl Fn(usize) -> f64 + 'a,
) -> impl Iterator<Item = (usize, f64)> + 'a {
    order.iter().scan(0.0, move |clock, &task| {
        *clock += duration(task);
        Some((task, *clock))
    })
}

/// Total flow time: the sum of all completion times.
///
/// Minimising flow time is equivalent to minimising mean completion time;
/// the Shortest Processing Time rule is optimal.
///
/// ```
/// use u_permsearch::objective::{FlowTime, Objective};
///
/// let flow = FlowTime::new(vec![3.0, 1.0, 2.0]).unwrap();
/// // completions 1, 3, 6
/// assert_eq!(flow.cost(&[1, 2, 0]).unwrap(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FlowTime {
    durations: Vec<f64>,
}

impl FlowTime {
    /// Builds the objective from task durations.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if `durations` is empty or holds a
    /// negative or non-finite value.
    pub fn new(durations: Vec<f64>) -> Result<Self> {
        if durations.is_empty() {
            return Err(SearchError::invalid("at least one task is required"));
        }
        for (i, &d) in durations.iter().enumerate() {
            check_non_negative(d, &format!("task {i} duration"))?;
        }
        Ok(Self { durations })
    }

    /// Builds the objective from the durations of a task table, ignoring due
    /// dates and weights.
    pub fn from_tasks(tasks: &[Task]) -> Result<Self> {
        Self::new(tasks.iter().map(|t| t.duration).collect())
    }

    /// Task durations.
    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    /// Per-task completion times for `order`.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if `order` is not a permutation of the
    /// tasks.
    pub fn schedule(&self, order: &[usize]) -> Result<Vec<ScheduledTask>> {
        crate::permutation::validate_permutation(order, self.durations.len())?;
        Ok(completions(order, |t| self.durations[t])
            .map(|(task, completion)| ScheduledTask {
                task,
                completion,
                tardiness: 0.0,
                penalty: completion,
            })
            .collect())
    }
}

impl Objective for FlowTime {
    fn dimension(&self) -> usize {
        self.durations.len()
    }

    fn evaluate(&self, order: &[usize]) -> f64 {
        completions(order, |t| self.durations[t]).map(|(_, c)| c).sum()
    }
}

/// Total Weighted Tardiness (TWT).
///
/// Cost = Σ `weight × max(0, completion − due_date)`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTardiness {
    tasks: Vec<Task>,
}

impl WeightedTardiness {
    /// Builds the objective from a task table.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if `tasks` is empty or any field is
    /// negative or non-finite.
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        if tasks.is_empty() {
            return Err(SearchError::invalid("at least one task is required"));
        }
        for (i, task) in tasks.iter().enumerate() {
            task.validate(i)?;
        }
        Ok(Self { tasks })
    }

    /// The task table.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Completion, tardiness and weighted penalty of each task in `order`.
    ///
    /// # Errors
    /// [`SearchError::InvalidInput`] if `order` is not a permutation of the
    /// tasks.
    pub fn schedule(&self, order: &[usize]) -> Result<Vec<ScheduledTask>> {
        crate::permutation::validate_permutation(order, self.tasks.len())?;
        Ok(completions(order, |t| self.tasks[t].duration)
            .map(|(task, completion)| {
                let tardiness = (completion - self.tasks[task].due_date).max(0.0);
                ScheduledTask {
                    task,
                    completion,
                    tardiness,
                    penalty: self.tasks[task].weight * tardiness,
                }
            })
            .collect())
    }
}

impl Objective for WeightedTardiness {
    fn dimension(&self) -> usize {
        self.tasks.len()
    }

    fn evaluate(&self, order: &[usize]) -> f64 {
        completions(order, |t| self.tasks[t].duration)
            .map(|(task, completion)| {
                let t = &self.tasks[task];
                t.weight * (completion - t.due_date).max(0.0)
            })
            .sum()
    }
}
