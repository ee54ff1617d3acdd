//! Scored candidates and populations.

use crate::{
  candidate::Candidate,
  constraining::{is_feasible, total_violation},
  score::{Score, Scores, Violations},
};

/// A candidate together with its scores, its front index and its crowding
/// distance.
///
/// Rank and crowding distance only make sense relative to the population the
/// candidate was ranked in, they are recomputed every generation.
#[derive(Clone, PartialEq, Debug)]
pub struct ScoredCandidate<const N: usize> {
  candidate: Candidate,
  objectives: Scores<N>,
  violations: Violations,
  rank: usize,
  crowding_distance: f64,
}

impl<const N: usize> ScoredCandidate<N> {
  /// Creates an unranked scored candidate.
  pub fn new(
    candidate: Candidate,
    objectives: Scores<N>,
    violations: Violations,
  ) -> Self {
    debug_assert!(
      violations.iter().all(|&v| v >= 0.0),
      "violation scores must be non-negative"
    );
    Self {
      candidate,
      objectives,
      violations,
      rank: usize::MAX,
      crowding_distance: 0.0,
    }
  }

  /// Returns a copy ranked into front `rank` with given crowding distance.
  pub(crate) fn ranked(self, rank: usize, crowding_distance: f64) -> Self {
    Self {
      rank,
      crowding_distance,
      ..self
    }
  }

  /// Returns the candidate.
  pub fn candidate(&self) -> &Candidate {
    &self.candidate
  }

  /// Returns the objective scores.
  pub fn objectives(&self) -> &Scores<N> {
    &self.objectives
  }

  /// Returns the constraint violation scores.
  pub fn violations(&self) -> &Violations {
    &self.violations
  }

  /// Returns the front index. `0` is the best front, `usize::MAX` means the
  /// candidate has not been ranked yet.
  pub fn rank(&self) -> usize {
    self.rank
  }

  /// Returns the crowding distance within the candidate's front.
  pub fn crowding_distance(&self) -> f64 {
    self.crowding_distance
  }

  /// Returns `true` if every constraint is satisfied.
  pub fn is_feasible(&self) -> bool {
    is_feasible(&self.violations)
  }

  /// Returns the sum of constraint violations.
  pub fn total_violation(&self) -> Score {
    total_violation(&self.violations)
  }
}

/// A generation of ranked candidates.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Population<const N: usize> {
  members: Vec<ScoredCandidate<N>>,
}

impl<const N: usize> Population<N> {
  pub(crate) fn from_ranked(members: Vec<ScoredCandidate<N>>) -> Self {
    debug_assert!(
      members.iter().all(|m| m.rank != usize::MAX),
      "population members must be ranked"
    );
    Self { members }
  }

  /// Returns the number of members.
  pub fn len(&self) -> usize {
    self.members.len()
  }

  /// Returns `true` if there are no members.
  pub fn is_empty(&self) -> bool {
    self.members.is_empty()
  }

  /// Returns the members.
  pub fn members(&self) -> &[ScoredCandidate<N>] {
    &self.members
  }

  /// Moves the members out.
  pub fn into_members(self) -> Vec<ScoredCandidate<N>> {
    self.members
  }

  /// Returns an iterator over members of the first front.
  pub fn first_front(&self) -> impl Iterator<Item = &ScoredCandidate<N>> {
    self.members.iter().filter(|m| m.rank == 0)
  }

  /// Returns objective scores of every member, in member order.
  pub fn objectives(&self) -> Vec<Scores<N>> {
    self.members.iter().map(|m| m.objectives).collect()
  }
}
