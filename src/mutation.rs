//! Mutation operators.

use rand::Rng;

use crate::candidate::Candidate;

/// An operator that derives a new candidate from a single one.
///
/// Candidates are immutable, so a mutation consumes its input and returns
/// the mutated copy. The returned candidate must have as many bits as the
/// input.
pub trait Mutation {
  /// Mutates given candidate.
  fn mutate<R: Rng + ?Sized>(
    &self,
    candidate: Candidate,
    rng: &mut R,
  ) -> Candidate;
}

/// Flips each bit independently with probability `rate`.
///
/// # Examples
/// ```
/// # use induction_moga::{candidate::Candidate, mutation::*};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let mut rng = StdRng::seed_from_u64(0);
/// let flipped = BitFlipMutation::new(1.0)
///   .mutate(Candidate::selecting(3, &[1]), &mut rng);
/// assert_eq!(flipped.bits(), &[true, false, true]);
/// ```
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct BitFlipMutation {
  rate: f64,
}

impl BitFlipMutation {
  /// Creates a mutation with per-bit flip probability `rate`.
  ///
  /// # Panics
  ///
  /// Panics if `rate` is not within `[0, 1]`.
  pub fn new(rate: f64) -> Self {
    assert!(
      (0.0..=1.0).contains(&rate),
      "mutation rate must be within [0, 1]"
    );
    Self { rate }
  }

  /// Creates a mutation that flips one bit out of `len` on average.
  pub fn one_per(len: usize) -> Self {
    Self::new(1.0 / len.max(1) as f64)
  }

  /// Returns the per-bit flip probability.
  pub fn rate(&self) -> f64 {
    self.rate
  }
}

impl Mutation for BitFlipMutation {
  fn mutate<R: Rng + ?Sized>(
    &self,
    candidate: Candidate,
    rng: &mut R,
  ) -> Candidate {
    if self.rate == 0.0 {
      return candidate;
    }
    candidate
      .bits()
      .iter()
      .map(|&bit| bit ^ rng.gen_bool(self.rate))
      .collect()
  }
}
