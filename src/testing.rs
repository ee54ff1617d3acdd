//! Objective scores evaluation operators.

use crate::score::Scores;

/// An operator that tests solution's fitness, evaluating an array of its
/// objective scores.
///
/// All objectives are minimized. If an objective should be maximized,
/// negate it or subtract it from its upper bound.
///
/// This crate's purpose is *multi-objective* optimization, that's why tests
/// must return an *array* of values.
///
/// # Examples
/// ```
/// # use induction_moga::{testing::Test, *};
/// let table = FleetTable::new(vec![
///   FleetUnit::new("A", 100.0, 90.0),
///   FleetUnit::new("B", 50.0, 80.0).with_branding_priority(4.0),
/// ])?;
/// let evaluator = FleetEvaluator::new(&table, 1);
/// let plan = Candidate::selecting(2, &[1]);
/// let scores: [f64; 2] = evaluator.test(&plan);
/// assert_eq!(scores, [50.0, 20.0]);
/// let scores: [f64; 3] = evaluator.test(&plan);
/// assert_eq!(scores, [50.0, 20.0, -4.0]);
/// # Ok::<(), induction_moga::Error>(())
/// ```
pub trait Test<S, const N: usize> {
  /// Returns an array of objective scores for given solution.
  /// The lower a score is - the better.
  fn test(&self, solution: &S) -> Scores<N>;
}
