//! Run configuration.

use typed_builder::TypedBuilder;

use crate::{
  error::{Error, Result},
  execution::Execution,
  mutation::BitFlipMutation,
  recombination::CrossoverKind,
};

/// Which objectives a run optimizes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectiveSet {
  /// Total wear and punctuality.
  WearPunctuality,
  /// Total wear, punctuality and branding exposure.
  #[default]
  WearPunctualityBranding,
}

impl ObjectiveSet {
  /// Returns the number of objectives.
  pub fn objective_num(self) -> usize {
    match self {
      ObjectiveSet::WearPunctuality => 2,
      ObjectiveSet::WearPunctualityBranding => 3,
    }
  }
}

/// Parameters of an optimization run.
///
/// Only the target count of selected units is required, everything else has
/// a default.
///
/// # Examples
/// ```
/// # use induction_moga::config::{ObjectiveSet, RunConfig};
/// let config = RunConfig::builder()
///   .target_selected(15)
///   .population_size(100)
///   .objectives(ObjectiveSet::WearPunctuality)
///   .seed(1)
///   .build();
/// assert_eq!(config.max_generations, 400);
/// assert!(config.validate().is_ok());
/// ```
#[derive(TypedBuilder, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
  /// Number of candidates kept between generations.
  #[builder(default = 200)]
  pub population_size: usize,
  /// Number of units a feasible plan selects.
  pub target_selected: usize,
  /// Number of generations to run. `0` returns the initial population.
  #[builder(default = 400)]
  pub max_generations: usize,
  /// Per-bit flip probability. `None` means `1 / n` for a fleet of `n` units.
  #[builder(default, setter(strip_option))]
  pub mutation_rate: Option<f64>,
  /// Objectives to optimize.
  #[builder(default)]
  pub objectives: ObjectiveSet,
  /// Crossover operator.
  #[builder(default)]
  pub crossover: CrossoverKind,
  /// Probability of each bit being set in the random initial population.
  #[builder(default = 0.5)]
  pub initial_selection_probability: f64,
  /// Seed of the random number generator. `None` draws a random seed, which
  /// is logged and reported so the run can be reproduced.
  #[builder(default, setter(strip_option))]
  pub seed: Option<u64>,
  /// Evaluation strategy.
  #[builder(default)]
  pub execution: Execution,
  /// Redraws offspring identical to a parent or to another offspring.
  #[builder(default = false)]
  pub eliminate_duplicates: bool,
}

impl RunConfig {
  /// Checks that every parameter is within its domain.
  pub fn validate(&self) -> Result<()> {
    if self.population_size == 0 {
      return Err(Error::EmptyPopulation);
    }
    if let Some(rate) = self.mutation_rate {
      if !(0.0..=1.0).contains(&rate) {
        return Err(Error::InvalidMutationRate(rate));
      }
    }
    if !(0.0..=1.0).contains(&self.initial_selection_probability) {
      return Err(Error::InvalidSelectionProbability(
        self.initial_selection_probability,
      ));
    }
    Ok(())
  }

  /// Returns the per-bit mutation rate for a fleet of `unit_num` units.
  pub fn mutation_rate_for(&self, unit_num: usize) -> f64 {
    self
      .mutation_rate
      .unwrap_or_else(|| BitFlipMutation::one_per(unit_num).rate())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = RunConfig::builder().target_selected(15).build();
    assert_eq!(config.population_size, 200);
    assert_eq!(config.max_generations, 400);
    assert_eq!(config.mutation_rate, None);
    assert_eq!(config.objectives, ObjectiveSet::WearPunctualityBranding);
    assert_eq!(config.crossover, CrossoverKind::Uniform);
    assert_eq!(config.execution, Execution::Sequential);
    assert_eq!(config.seed, None);
    assert!(!config.eliminate_duplicates);
    assert!(config.validate().is_ok());
  }

  #[test]
  fn test_mutation_rate_for() {
    let config = RunConfig::builder().target_selected(2).build();
    assert_eq!(config.mutation_rate_for(4), 0.25);
    let config = RunConfig::builder()
      .target_selected(2)
      .mutation_rate(0.1)
      .build();
    assert_eq!(config.mutation_rate_for(4), 0.1);
  }

  #[test]
  fn test_validate() {
    let config = RunConfig::builder()
      .target_selected(2)
      .population_size(0)
      .build();
    assert_eq!(config.validate(), Err(Error::EmptyPopulation));

    let config = RunConfig::builder()
      .target_selected(2)
      .mutation_rate(1.5)
      .build();
    assert_eq!(config.validate(), Err(Error::InvalidMutationRate(1.5)));

    let config = RunConfig::builder()
      .target_selected(2)
      .initial_selection_probability(-0.1)
      .build();
    assert_eq!(
      config.validate(),
      Err(Error::InvalidSelectionProbability(-0.1))
    );
  }

  #[test]
  fn test_objective_num() {
    assert_eq!(ObjectiveSet::WearPunctuality.objective_num(), 2);
    assert_eq!(ObjectiveSet::WearPunctualityBranding.objective_num(), 3);
  }
}
