//! Constraint-domination and fast non-dominated sorting.
//!
//! Candidate `a` constraint-dominates candidate `b` if
//! - `a` is feasible and `b` is not, or
//! - both are infeasible and `a` has the smaller total violation, or
//! - both are feasible and `a` Pareto-dominates `b`: it is no worse in every
//!   objective and strictly better in at least one.
//!
//! Candidates with equal objectives, or infeasible candidates with equal
//! total violation, do not dominate each other and end up in the same front.

use std::cmp::Ordering;

use crate::{population::ScoredCandidate, score::ParetoDominance};

// index of a candidate in the sorted slice
type CandidateIndex = usize;
// number of candidates dominating a candidate
type DominanceCounter = u32;
// dominated by each candidate candidates' indices
type DominanceList = Vec<CandidateIndex>;
// indices of candidates of a front
type Front = Vec<CandidateIndex>;

/// Returns `Less` if `a` constraint-dominates `b`, `Greater` if `b`
/// constraint-dominates `a`, otherwise `Equal`.
pub fn constrained_dominance<const N: usize>(
  a: &ScoredCandidate<N>,
  b: &ScoredCandidate<N>,
) -> Ordering {
  match (a.is_feasible(), b.is_feasible()) {
    (true, true) => a.objectives()[..].dominance(&b.objectives()[..]),
    (true, false) => Ordering::Less,
    (false, true) => Ordering::Greater,
    (false, false) => a.total_violation().total_cmp(&b.total_violation()),
  }
}

/// Fronts of a sorted population.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Fronts {
  ranks: Vec<usize>,
  fronts: Vec<Front>,
}

impl Fronts {
  /// Returns the front index of each candidate, in input order.
  pub fn ranks(&self) -> &[usize] {
    &self.ranks
  }

  /// Returns candidate indices grouped by front, best front first.
  pub fn fronts(&self) -> &[Vec<usize>] {
    &self.fronts
  }

  /// Moves fronts out.
  pub fn into_fronts(self) -> Vec<Vec<usize>> {
    self.fronts
  }
}

/// Partitions candidates into fronts by constraint-domination.
///
/// Front `0` holds every candidate no other candidate dominates. Front `k`
/// holds candidates dominated only by candidates of fronts `0..k`.
///
/// Runs in `O(P² · N)` for `P` candidates and `N` objectives.
pub fn non_dominated_sort<const N: usize>(
  candidates: &[ScoredCandidate<N>],
) -> Fronts {
  let mut dominance_lists: Vec<DominanceList> =
    vec![Vec::new(); candidates.len()];
  let mut dominance_counters: Vec<DominanceCounter> =
    vec![0; candidates.len()];
  let mut first_front: Front = Vec::new();

  // fill dominance lists and counters
  for p_idx in 0..candidates.len() {
    // for each unique pair of candidates `p`...
    let p = &candidates[p_idx];
    // and `q`...
    for (i, q) in candidates[p_idx + 1..].iter().enumerate() {
      let q_idx = p_idx + i + 1;
      match constrained_dominance(p, q) {
        // if `p` dominates `q`...
        Ordering::Less => {
          dominance_lists[p_idx].push(q_idx);
          dominance_counters[q_idx] += 1;
        }
        // if `q` dominates `p`...
        Ordering::Greater => {
          dominance_lists[q_idx].push(p_idx);
          dominance_counters[p_idx] += 1;
        }
        Ordering::Equal => {}
      }
    }
    // every pair involving `p` has been compared by now
    if dominance_counters[p_idx] == 0 {
      first_front.push(p_idx);
    }
  }

  debug_assert!(
    candidates.is_empty() || !first_front.is_empty(),
    "first front must have at least 1 candidate"
  );

  let mut ranks = vec![0; candidates.len()];
  let mut fronts: Vec<Front> = Vec::new();
  let mut last_front = first_front;
  while !last_front.is_empty() {
    let mut next_front = Vec::new();
    // for each candidate `p` in last front...
    for &p_idx in &last_front {
      // for each candidate `q` dominated by `p`...
      for &q_idx in &dominance_lists[p_idx] {
        dominance_counters[q_idx] -= 1;
        // if no more candidates dominate `q`...
        if dominance_counters[q_idx] == 0 {
          ranks[q_idx] = fronts.len() + 1;
          next_front.push(q_idx);
        }
      }
    }
    fronts.push(last_front);
    last_front = next_front;
  }

  debug_assert_eq!(
    fronts.iter().map(Vec::len).sum::<usize>(),
    candidates.len(),
    "every candidate must belong to exactly one front"
  );

  Fronts { ranks, fronts }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::candidate::Candidate;

  fn scored(objectives: [f64; 2], violations: [f64; 3]) -> ScoredCandidate<2> {
    ScoredCandidate::new(Candidate::selecting(1, &[]), objectives, violations)
  }

  fn feasible(objectives: [f64; 2]) -> ScoredCandidate<2> {
    scored(objectives, [0.0; 3])
  }

  #[test]
  fn test_constrained_dominance() {
    let good = feasible([10.0, 10.0]);
    let bad = feasible([20.0, 10.0]);
    let trade_off = feasible([5.0, 30.0]);
    let slightly_infeasible = scored([0.0, 0.0], [1.0, 0.0, 0.0]);
    let very_infeasible = scored([0.0, 0.0], [4.0, 1.0, 0.0]);
    let equally_infeasible = scored([9.0, 9.0], [0.0, 0.0, 1.0]);

    assert_eq!(constrained_dominance(&good, &bad), Ordering::Less);
    assert_eq!(constrained_dominance(&bad, &good), Ordering::Greater);
    assert_eq!(constrained_dominance(&good, &trade_off), Ordering::Equal);
    assert_eq!(constrained_dominance(&good, &good), Ordering::Equal);

    assert_eq!(
      constrained_dominance(&bad, &slightly_infeasible),
      Ordering::Less
    );
    assert_eq!(
      constrained_dominance(&slightly_infeasible, &very_infeasible),
      Ordering::Less
    );
    assert_eq!(
      constrained_dominance(&slightly_infeasible, &equally_infeasible),
      Ordering::Equal
    );
  }

  #[test]
  fn test_sort_feasible() {
    let candidates = vec![
      feasible([1.0, 5.0]),
      feasible([3.0, 3.0]),
      feasible([5.0, 1.0]),
      feasible([4.0, 4.0]),
      feasible([6.0, 6.0]),
    ];
    let fronts = non_dominated_sort(&candidates);
    assert_eq!(fronts.ranks(), &[0, 0, 0, 1, 2]);
    assert_eq!(fronts.fronts(), &[vec![0, 1, 2], vec![3], vec![4]]);
  }

  #[test]
  fn test_sort_infeasible_after_feasible() {
    let candidates = vec![
      scored([0.0, 0.0], [1.0, 0.0, 0.0]),
      feasible([100.0, 100.0]),
      scored([0.0, 0.0], [0.0, 2.0, 0.0]),
      feasible([1.0, 200.0]),
    ];
    let fronts = non_dominated_sort(&candidates);
    assert_eq!(fronts.ranks(), &[1, 0, 2, 0]);
    assert_eq!(fronts.fronts(), &[vec![1, 3], vec![0], vec![2]]);
  }

  #[test]
  fn test_ties_share_front() {
    let candidates = vec![feasible([2.0, 2.0]), feasible([2.0, 2.0])];
    let fronts = non_dominated_sort(&candidates);
    assert_eq!(fronts.ranks(), &[0, 0]);
    assert_eq!(fronts.fronts().len(), 1);
  }

  #[test]
  fn test_empty() {
    let fronts = non_dominated_sort::<2>(&[]);
    assert!(fronts.ranks().is_empty());
    assert!(fronts.fronts().is_empty());
  }
}
