//! Constraint violation scores evaluation operators.

use crate::score::{Score, Scores};

/// An operator that constrains a solution, evaluating an array of its
/// violation scores.
///
/// A violation score of `0` means the respective constraint is satisfied, a
/// positive score is the magnitude of the violation. Scores must never be
/// negative.
///
/// The way this framework handles constraints is *constraint-domination*: a
/// feasible solution always dominates an infeasible one, and of two
/// infeasible solutions the one with the smaller total violation dominates.
/// Objective scores are only compared between feasible solutions. See
/// [`ranking`] for details.
///
/// # Examples
/// ```
/// # use induction_moga::{constraining::Constraint, *};
/// let table = FleetTable::new(vec![
///   FleetUnit::new("A", 100.0, 90.0).with_open_ticket(),
///   FleetUnit::new("B", 50.0, 80.0),
/// ])?;
/// let evaluator = FleetEvaluator::new(&table, 1);
/// // one unit too many, one of them with an open ticket
/// let plan = Candidate::selecting(2, &[0, 1]);
/// assert_eq!(evaluator.constrain(&plan), [1.0, 1.0, 0.0]);
/// # Ok::<(), induction_moga::Error>(())
/// ```
///
/// [`ranking`]: crate::ranking
pub trait Constraint<S, const N: usize> {
  /// Returns an array of violation scores for given solution.
  fn constrain(&self, solution: &S) -> Scores<N>;
}

/// Returns `true` if every violation score is zero.
pub fn is_feasible(violations: &[Score]) -> bool {
  violations.iter().all(|&v| v == 0.0)
}

/// Returns the sum of violation scores.
pub fn total_violation(violations: &[Score]) -> Score {
  violations.iter().sum()
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Interval;

  // requires the value to be in [0, 1]
  impl Constraint<f64, 2> for Interval {
    fn constrain(&self, v: &f64) -> Scores<2> {
      [(-v).max(0.0), (v - 1.0).max(0.0)]
    }
  }

  #[test]
  fn test_custom_constraint() {
    assert_eq!(Interval.constrain(&0.5), [0.0, 0.0]);
    assert_eq!(Interval.constrain(&-2.0), [2.0, 0.0]);
    assert_eq!(Interval.constrain(&3.0), [0.0, 2.0]);
  }

  #[test]
  fn test_feasibility() {
    assert!(is_feasible(&[0.0, 0.0, 0.0]));
    assert!(!is_feasible(&[0.0, 1.0, 0.0]));
    assert!(is_feasible(&[]));
    assert_eq!(total_violation(&[4.0, 1.0, 2.0]), 7.0);
  }
}
