//! Tabu memory and termination outcomes.

use std::collections::{HashSet, VecDeque};

use crate::permutation::Move;

/// Bounded FIFO of recently applied moves.
///
/// A queue keeps insertion order for eviction and a set answers membership
/// in O(1). At most `tenure` moves are held; pushing beyond that evicts the
/// oldest.
///
/// # Examples
///
/// ```
/// use u_permsearch::permutation::Move;
/// use u_permsearch::tabu::TabuList;
///
/// let mut tabu = TabuList::new(2);
/// tabu.push(Move::new(0, 1));
/// tabu.push(Move::new(1, 2));
/// tabu.push(Move::new(0, 2));
/// assert!(!tabu.contains(&Move::new(0, 1)));
/// assert!(tabu.contains(&Move::new(2, 1)));
/// assert_eq!(tabu.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TabuList {
    tenure: usize,
    queue: VecDeque<Move>,
    members: HashSet<Move>,
}

impl TabuList {
    /// Creates an empty list holding at most `tenure` moves.
    pub fn new(tenure: usize) -> Self {
        Self {
            tenure,
            queue: VecDeque::with_capacity(tenure),
            members: HashSet::with_capacity(tenure),
        }
    }

    /// Maximum number of moves held.
    pub fn tenure(&self) -> usize {
        self.tenure
    }

    /// Whether `mv` is currently forbidden.
    pub fn contains(&self, mv: &Move) -> bool {
        self.members.contains(mv)
    }

    /// Records `mv` as the newest entry, evicting the oldest beyond tenure.
    ///
    /// Pushing a move that is already held moves it to the newest slot.
    pub fn push(&mut self, mv: Move) {
        if self.tenure == 0 {
            return;
        }
        if !self.members.insert(mv) {
            self.queue.retain(|m| *m != mv);
        }
        self.queue.push_back(mv);
        while self.queue.len() > self.tenure {
            if let Some(old) = self.queue.pop_front() {
                self.members.remove(&old);
            }
        }
    }

    /// Number of moves held.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no move is held.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Held moves, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Move> + '_ {
        self.queue.iter()
    }
}

/// Why a tabu run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum TabuTermination {
    /// The iteration budget was used up.
    Completed,
    /// Every move of the current neighborhood was tabu.
    Exhausted,
    /// The cancellation flag was raised.
    Cancelled,
}
