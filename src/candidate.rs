//! Bit-string representation of a fleet selection plan.

use rand::Rng;

/// A proposed fleet selection plan: one bit per fleet unit, in table order.
/// A set bit means the unit is selected for induction.
///
/// Candidates are immutable. Operators consume or borrow them and return
/// new ones, so a candidate that has been scored never changes.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Candidate {
  bits: Box<[bool]>,
}

impl Candidate {
  /// Creates a candidate from its bits.
  pub fn from_bits(bits: impl Into<Box<[bool]>>) -> Self {
    Self { bits: bits.into() }
  }

  /// Creates a candidate of `len` bits where every bit is set independently
  /// with given `probability`.
  pub fn random<R: Rng + ?Sized>(
    len: usize,
    probability: f64,
    rng: &mut R,
  ) -> Self {
    (0..len).map(|_| rng.gen_bool(probability)).collect()
  }

  /// Creates a candidate of `len` bits that selects exactly the units at
  /// given indices. Indices out of range are ignored.
  pub fn selecting(len: usize, indices: &[usize]) -> Self {
    let mut bits = vec![false; len];
    indices
      .iter()
      .filter(|&&i| i < len)
      .for_each(|&i| bits[i] = true);
    Self::from_bits(bits)
  }

  /// Returns the number of bits.
  pub fn len(&self) -> usize {
    self.bits.len()
  }

  /// Returns `true` if the candidate has no bits.
  pub fn is_empty(&self) -> bool {
    self.bits.is_empty()
  }

  /// Returns the bits.
  pub fn bits(&self) -> &[bool] {
    &self.bits
  }

  /// Returns the number of selected units.
  pub fn selected_count(&self) -> usize {
    self.bits.iter().filter(|&&b| b).count()
  }

  /// Returns an iterator over indices of selected units.
  pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
    self
      .bits
      .iter()
      .enumerate()
      .filter_map(|(i, &b)| b.then_some(i))
  }
}

impl FromIterator<bool> for Candidate {
  fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
    Self::from_bits(iter.into_iter().collect::<Vec<_>>())
  }
}
