//! Objectives and eligibility constraints of fleet selection.
//!
//! Objectives, all minimized:
//! 1. total wear of selected units
//! 2. `100 - mean punctuality` of selected units (`100` for an empty
//!    selection, whose mean punctuality is taken as `0`)
//! 3. negated sum of branding priorities of selected units (3-objective
//!    runs only)
//!
//! Constraints, satisfied at `0`:
//! 1. squared deviation of the selected count from the target count
//! 2. number of selected units with an open maintenance ticket
//! 3. number of selected units with an invalid certificate

use crate::{
  candidate::Candidate,
  constraining::Constraint,
  error::Result,
  fleet::FleetTable,
  score::{Score, Scores, Violations},
  testing::Test,
};

/// Highest punctuality score, the reference objective 2 is measured from.
pub const MAX_PUNCTUALITY: Score = 100.0;

/// Evaluates candidates against a fleet table. Pure and deterministic: the
/// same candidate always yields the same scores, so it is safe to share
/// between threads.
#[derive(Clone, Copy, Debug)]
pub struct FleetEvaluator<'a> {
  table: &'a FleetTable,
  target_selected: usize,
}

/// Sums over the selected units, gathered in a single pass.
#[derive(Default)]
struct Tally {
  selected: usize,
  wear: Score,
  punctuality: Score,
  branding: Score,
  open_tickets: usize,
  invalid_certificates: usize,
}

impl<'a> FleetEvaluator<'a> {
  /// Creates an evaluator for `table` that expects `target_selected` units
  /// to be selected.
  pub fn new(table: &'a FleetTable, target_selected: usize) -> Self {
    Self {
      table,
      target_selected,
    }
  }

  /// Returns the fleet table.
  pub fn table(&self) -> &'a FleetTable {
    self.table
  }

  /// Evaluates objectives and violations of `candidate` after checking its
  /// length.
  ///
  /// # Errors
  ///
  /// Fails if `candidate` does not have one bit per fleet unit.
  pub fn evaluate<const N: usize>(
    &self,
    candidate: &Candidate,
  ) -> Result<(Scores<N>, Violations)>
  where
    Self: Test<Candidate, N>,
  {
    self.table.check(candidate)?;
    Ok(self.scores(candidate))
  }

  // objectives and violations from one tally of the selected units
  pub(crate) fn scores<const N: usize>(
    &self,
    candidate: &Candidate,
  ) -> (Scores<N>, Violations)
  where
    Self: Test<Candidate, N>,
  {
    let t = self.tally(candidate);
    (t.objectives(), t.violations(self.target_selected))
  }

  fn tally(&self, candidate: &Candidate) -> Tally {
    debug_assert_eq!(candidate.len(), self.table.len());
    self
      .table
      .selected(candidate)
      .fold(Tally::default(), |mut t, unit| {
        t.selected += 1;
        t.wear += unit.wear;
        t.punctuality += unit.punctuality;
        t.branding += unit.branding_priority;
        t.open_tickets += usize::from(unit.open_ticket);
        t.invalid_certificates += usize::from(!unit.certificate_valid);
        t
      })
  }
}

impl Tally {
  fn punctuality_gap(&self) -> Score {
    let mean = match self.selected {
      0 => 0.0,
      n => self.punctuality / n as Score,
    };
    MAX_PUNCTUALITY - mean
  }

  // leading `N` of wear, punctuality gap and negated branding
  fn objectives<const N: usize>(&self) -> Scores<N> {
    let all = [self.wear, self.punctuality_gap(), -self.branding];
    std::array::from_fn(|i| all[i])
  }

  fn violations(&self, target_selected: usize) -> Violations {
    let deviation = self.selected.abs_diff(target_selected) as Score;
    [
      deviation * deviation,
      self.open_tickets as Score,
      self.invalid_certificates as Score,
    ]
  }
}

impl Test<Candidate, 2> for FleetEvaluator<'_> {
  fn test(&self, candidate: &Candidate) -> Scores<2> {
    self.tally(candidate).objectives()
  }
}

impl Test<Candidate, 3> for FleetEvaluator<'_> {
  fn test(&self, candidate: &Candidate) -> Scores<3> {
    self.tally(candidate).objectives()
  }
}

impl Constraint<Candidate, 3> for FleetEvaluator<'_> {
  fn constrain(&self, candidate: &Candidate) -> Violations {
    self.tally(candidate).violations(self.target_selected)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{error::Error, fleet::FleetUnit};

  fn table() -> FleetTable {
    FleetTable::new(vec![
      FleetUnit::new("A", 100.0, 90.0),
      FleetUnit::new("B", 50.0, 80.0).with_branding_priority(4.0),
      FleetUnit::new("C", 10.0, 99.0).with_open_ticket(),
      FleetUnit::new("D", 20.0, 95.0).with_invalid_certificate(),
      FleetUnit::new("E", 30.0, 70.0)
        .with_open_ticket()
        .with_invalid_certificate()
        .with_branding_priority(1.5),
    ])
    .unwrap()
  }

  #[test]
  fn test_feasible_selection() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 2);
    let (objectives, violations) = evaluator
      .evaluate::<3>(&Candidate::selecting(5, &[0, 1]))
      .unwrap();
    assert_eq!(objectives, [150.0, 15.0, -4.0]);
    assert_eq!(violations, [0.0, 0.0, 0.0]);
  }

  #[test]
  fn test_two_objectives_omit_branding() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 2);
    let (objectives, _) = evaluator
      .evaluate::<2>(&Candidate::selecting(5, &[0, 1]))
      .unwrap();
    assert_eq!(objectives, [150.0, 15.0]);
  }

  #[test]
  fn test_violations() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 1);
    let (_, violations) = evaluator
      .evaluate::<3>(&Candidate::selecting(5, &[2, 3, 4]))
      .unwrap();
    assert_eq!(violations, [4.0, 2.0, 2.0]);
  }

  #[test]
  fn test_empty_selection() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 0);
    let (objectives, violations) = evaluator
      .evaluate::<3>(&Candidate::selecting(5, &[]))
      .unwrap();
    assert_eq!(objectives, [0.0, MAX_PUNCTUALITY, 0.0]);
    assert_eq!(violations, [0.0, 0.0, 0.0]);
  }

  #[test]
  fn test_target_above_fleet_size() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 8);
    let (_, violations) = evaluator
      .evaluate::<2>(&Candidate::selecting(5, &[0, 1, 2, 3, 4]))
      .unwrap();
    assert_eq!(violations[0], 9.0);
  }

  #[test]
  fn test_length_mismatch() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 2);
    assert_eq!(
      evaluator.evaluate::<2>(&Candidate::selecting(3, &[0])),
      Err(Error::CandidateLength {
        expected: 5,
        actual: 3
      })
    );
  }

  #[test]
  fn test_scores_match_separate_operators() {
    let table = table();
    let evaluator = FleetEvaluator::new(&table, 2);
    for indices in [&[][..], &[0, 1], &[1, 2, 4], &[0, 1, 2, 3, 4]] {
      let candidate = Candidate::selecting(5, indices);
      let (objectives, violations) = evaluator.scores::<3>(&candidate);
      let test: Scores<3> = evaluator.test(&candidate);
      assert_eq!(objectives, test);
      assert_eq!(violations, evaluator.constrain(&candidate));
      let (objectives, _) = evaluator.scores::<2>(&candidate);
      let test: Scores<2> = evaluator.test(&candidate);
      assert_eq!(objectives, test);
    }
  }
}
