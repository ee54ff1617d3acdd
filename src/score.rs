//! Type aliases for a more convenient representation of objective and
//! violation scores used throughout the library.

use std::cmp::Ordering;

/// An alias for an objective or violation score.
///
/// Lower is always better. Objectives that are naturally maximized are
/// negated or inverted before they are stored.
pub type Score = f64;

/// An alias for an array of `N` values of `Score` type.
pub type Scores<const N: usize> = [Score; N];

/// Number of eligibility constraints every candidate is checked against.
pub const CONSTRAINT_NUM: usize = 3;

/// Constraint violation magnitudes. `0` means a constraint is satisfied.
pub type Violations = Scores<CONSTRAINT_NUM>;

/// Describes pareto dominance for arrays of `Score`s.
pub(crate) trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. `self` dominates `other` if no
  /// `self` value is greater than its respective `other` value and at least
  /// one is lower.
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      match (ord, a.total_cmp(b)) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}
