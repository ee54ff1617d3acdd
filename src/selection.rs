//! Parent selection.

use std::cmp::Ordering;

use rand::Rng;

use crate::population::ScoredCandidate;

/// Compares two ranked candidates by the crowded-comparison order: the lower
/// rank is better, and on equal rank the larger crowding distance is better.
/// Returns `Less` if `a` is better.
pub fn crowded_comparison<const N: usize>(
  a: &ScoredCandidate<N>,
  b: &ScoredCandidate<N>,
) -> Ordering {
  a.rank()
    .cmp(&b.rank())
    .then_with(|| b.crowding_distance().total_cmp(&a.crowding_distance()))
}

/// Samples `k` candidates uniformly at random, with replacement, and picks
/// the best of them by [`crowded_comparison`]. On a full tie the first
/// sampled candidate wins.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TournamentSelector(pub usize);

impl TournamentSelector {
  /// Binary tournament, the NSGA-II mating selection.
  pub const BINARY: Self = Self(2);

  /// Selects a parent from `population`.
  ///
  /// # Panics
  ///
  /// Panics if `population` is empty.
  pub fn select<'a, const N: usize, R: Rng + ?Sized>(
    &self,
    population: &'a [ScoredCandidate<N>],
    rng: &mut R,
  ) -> &'a ScoredCandidate<N> {
    assert!(
      !population.is_empty(),
      "cannot select from empty population"
    );
    let mut best = &population[rng.gen_range(0..population.len())];
    for _ in 1..self.0.max(1) {
      let challenger = &population[rng.gen_range(0..population.len())];
      if crowded_comparison(challenger, best) == Ordering::Less {
        best = challenger;
      }
    }
    best
  }
}

impl Default for TournamentSelector {
  fn default() -> Self {
    Self::BINARY
  }
}
