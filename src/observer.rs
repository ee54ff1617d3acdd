//! Passive per-generation hooks.

use crate::score::Scores;

/// A hook notified with the objective scores of the whole population once
/// for the initial population (generation `0`) and once after every
/// completed generation.
///
/// Observers never influence the run.
///
/// # Examples
/// ```
/// # use induction_moga::observer::GenerationObserver;
/// let mut best_wear = Vec::new();
/// let mut observer = |_generation: usize, scores: &[[f64; 2]]| {
///   best_wear.push(scores.iter().map(|s| s[0]).fold(f64::MAX, f64::min));
/// };
/// observer.observe(0, &[[3.0, 1.0], [2.0, 5.0]]);
/// assert_eq!(best_wear, vec![2.0]);
/// ```
pub trait GenerationObserver<const N: usize> {
  /// Receives objective scores of the population after `generation`.
  fn observe(&mut self, generation: usize, objectives: &[Scores<N>]);
}

impl<const N: usize, F> GenerationObserver<N> for F
where
  F: FnMut(usize, &[Scores<N>]),
{
  fn observe(&mut self, generation: usize, objectives: &[Scores<N>]) {
    self(generation, objectives)
  }
}

/// Observer that ignores every notification.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct NoopObserver;

impl<const N: usize> GenerationObserver<N> for NoopObserver {
  fn observe(&mut self, _: usize, _: &[Scores<N>]) {}
}

/// Observer that stores every snapshot it is notified with, for plotting how
/// the population moves across the objective space.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct History<const N: usize> {
  snapshots: Vec<(usize, Vec<Scores<N>>)>,
}

impl<const N: usize> History<N> {
  /// Creates an empty history.
  pub fn new() -> Self {
    Self {
      snapshots: Vec::new(),
    }
  }

  /// Returns the number of stored snapshots.
  pub fn len(&self) -> usize {
    self.snapshots.len()
  }

  /// Returns `true` if nothing has been recorded yet.
  pub fn is_empty(&self) -> bool {
    self.snapshots.is_empty()
  }

  /// Returns `(generation, objectives)` snapshots in notification order.
  pub fn snapshots(&self) -> &[(usize, Vec<Scores<N>>)] {
    &self.snapshots
  }

  /// Returns the last snapshot.
  pub fn last(&self) -> Option<&(usize, Vec<Scores<N>>)> {
    self.snapshots.last()
  }
}

impl<const N: usize> GenerationObserver<N> for History<N> {
  fn observe(&mut self, generation: usize, objectives: &[Scores<N>]) {
    self.snapshots.push((generation, objectives.to_vec()));
  }
}
