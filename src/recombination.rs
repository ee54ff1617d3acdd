//! Recombination operators.

use rand::Rng;

use crate::candidate::Candidate;

/// An operator that creates offspring from a pair of parents. Offspring
/// always have as many bits as their parents.
pub trait Recombination {
  /// Takes references to two parents of equal length and returns one or
  /// more offspring.
  fn recombine<R: Rng + ?Sized>(
    &self,
    a: &Candidate,
    b: &Candidate,
    rng: &mut R,
  ) -> Vec<Candidate>;
}

/// Takes each bit from either parent with equal probability, producing one
/// offspring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct UniformCrossover;

impl Recombination for UniformCrossover {
  fn recombine<R: Rng + ?Sized>(
    &self,
    a: &Candidate,
    b: &Candidate,
    rng: &mut R,
  ) -> Vec<Candidate> {
    debug_assert_eq!(a.len(), b.len(), "parents must have equal length");
    let child = a
      .bits()
      .iter()
      .zip(b.bits())
      .map(|(&x, &y)| if rng.gen_bool(0.5) { x } else { y })
      .collect();
    vec![child]
  }
}

/// Cuts both parents at one random point and swaps their tails, producing
/// two offspring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SinglePointCrossover;

impl Recombination for SinglePointCrossover {
  fn recombine<R: Rng + ?Sized>(
    &self,
    a: &Candidate,
    b: &Candidate,
    rng: &mut R,
  ) -> Vec<Candidate> {
    debug_assert_eq!(a.len(), b.len(), "parents must have equal length");
    let point = rng.gen_range(0..=a.len());
    let (a, b) = (a.bits(), b.bits());
    let c = a[..point].iter().chain(&b[point..]).copied().collect();
    let d = b[..point].iter().chain(&a[point..]).copied().collect();
    vec![c, d]
  }
}

/// Crossover operator selectable at run time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
  /// See [`UniformCrossover`].
  #[default]
  Uniform,
  /// See [`SinglePointCrossover`].
  SinglePoint,
}

impl Recombination for CrossoverKind {
  fn recombine<R: Rng + ?Sized>(
    &self,
    a: &Candidate,
    b: &Candidate,
    rng: &mut R,
  ) -> Vec<Candidate> {
    match self {
      CrossoverKind::Uniform => UniformCrossover.recombine(a, b, rng),
      CrossoverKind::SinglePoint => SinglePointCrossover.recombine(a, b, rng),
    }
  }
}
