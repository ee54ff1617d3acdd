//! Abstract optimizer and the top-level entry point.

pub mod nsga;

use tracing::info;

use crate::{
  candidate::Candidate,
  config::{ObjectiveSet, RunConfig},
  error::Result,
  evaluator::FleetEvaluator,
  fleet::FleetTable,
  observer::NoopObserver,
  plan::{extract_plans, Extraction},
  population::Population,
  testing::Test,
};

/// State of an optimizer's generational loop.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum State {
  /// More generations remain.
  Running,
  /// The generation budget is spent. Stepping has no further effect.
  Terminated,
}

/// Represents an abstract optimizer.
pub trait Optimizer<const N: usize>: Sized {
  /// What a finished run yields.
  type Outcome;

  /// Returns the current state.
  fn state(&self) -> State;

  /// Runs a single generation, unless already terminated, and returns the
  /// new state.
  fn step(&mut self) -> State;

  /// Consumes the optimizer and returns the outcome of the generations run
  /// so far.
  fn finish(self) -> Self::Outcome;

  /// Runs until the termination condition is met, then returns the outcome.
  fn optimize(mut self) -> Self::Outcome {
    while self.step() == State::Running {}
    self.finish()
  }
}

/// Summary of a population, recorded for the initial population and after
/// every generation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationStats {
  /// Generation index, `0` for the initial population.
  pub generation: usize,
  /// Number of candidate evaluations since the run started.
  pub evaluations: usize,
  /// Smallest total constraint violation in the population.
  pub min_violation: f64,
  /// Mean total constraint violation of the population.
  pub mean_violation: f64,
  /// Number of feasible members.
  pub feasible: usize,
  /// Number of members of the first front.
  pub non_dominated: usize,
}

impl GenerationStats {
  pub(crate) fn collect<const N: usize>(
    generation: usize,
    evaluations: usize,
    population: &Population<N>,
  ) -> Self {
    let members = population.members();
    let (total, min) = members
      .iter()
      .map(|m| m.total_violation())
      .fold((0.0, f64::INFINITY), |(total, min), v| (total + v, min.min(v)));
    Self {
      generation,
      evaluations,
      min_violation: if members.is_empty() { 0.0 } else { min },
      mean_violation: total / members.len().max(1) as f64,
      feasible: members.iter().filter(|m| m.is_feasible()).count(),
      non_dominated: population.first_front().count(),
    }
  }
}

/// Final state of a finished run.
#[derive(Clone, Debug)]
pub struct Outcome<const N: usize, O = NoopObserver> {
  /// The terminal population, ranked.
  pub population: Population<N>,
  /// Number of generations run.
  pub generations: usize,
  /// Statistics of the initial population and of every generation.
  pub stats: Vec<GenerationStats>,
  /// Seed the random number generator was created with.
  pub seed: u64,
  /// The observer, handed back with whatever it has gathered.
  pub observer: O,
}

/// Result of [`optimize`].
#[derive(Clone, PartialEq, Debug)]
pub struct Report {
  /// Feasible non-dominated plans, or the infeasibility indication.
  pub extraction: Extraction,
  /// Number of generations run.
  pub generations: usize,
  /// Statistics of the initial population and of every generation.
  pub stats: Vec<GenerationStats>,
  /// Seed of the run. Passing it back in [`RunConfig::seed`] reproduces the
  /// run.
  pub seed: u64,
}

/// Runs NSGA-II over `table` with the objectives `config` names and
/// extracts the feasible non-dominated plans.
///
/// # Errors
///
/// Fails if `config` is invalid. An unreachable selection target is not an
/// error, it yields [`Extraction::Infeasible`].
///
/// # Examples
/// ```
/// # use induction_moga::{config::*, fleet::*, optimizer::optimize};
/// let table = FleetTable::new(vec![
///   FleetUnit::new("A", 100.0, 90.0),
///   FleetUnit::new("B", 50.0, 80.0),
///   FleetUnit::new("C", 10.0, 99.0).with_open_ticket(),
/// ])?;
/// let config = RunConfig::builder()
///   .target_selected(1)
///   .population_size(20)
///   .max_generations(30)
///   .objectives(ObjectiveSet::WearPunctuality)
///   .seed(7)
///   .build();
/// let report = optimize(&table, &config)?;
/// assert!(!report.extraction.is_infeasible());
/// for plan in report.extraction.plans() {
///   assert_eq!(plan.unit_ids.len(), 1);
///   assert_ne!(plan.unit_ids[0], "C");
/// }
/// # Ok::<(), induction_moga::Error>(())
/// ```
#[tracing::instrument(
  skip_all,
  fields(objectives = config.objectives.objective_num())
)]
pub fn optimize(table: &FleetTable, config: &RunConfig) -> Result<Report> {
  match config.objectives {
    ObjectiveSet::WearPunctuality => run::<2>(table, config),
    ObjectiveSet::WearPunctualityBranding => run::<3>(table, config),
  }
}

fn run<const N: usize>(table: &FleetTable, config: &RunConfig) -> Result<Report>
where
  for<'a> FleetEvaluator<'a>: Test<Candidate, N>,
{
  let engine: nsga::Nsga2<'_, N> = nsga::Nsga2::new(table, config)?;
  let outcome = engine.optimize();
  let extraction = extract_plans(table, &outcome.population);
  info!(
    generations = outcome.generations,
    plans = extraction.plans().len(),
    infeasible = extraction.is_infeasible(),
    "optimization finished"
  );
  Ok(Report {
    extraction,
    generations: outcome.generations,
    stats: outcome.stats,
    seed: outcome.seed,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::population::ScoredCandidate;

  #[test]
  fn test_generation_stats() {
    let member = |violations, rank| {
      ScoredCandidate::new(Candidate::selecting(2, &[]), [0.0], violations)
        .ranked(rank, 0.0)
    };
    let population = Population::from_ranked(vec![
      member([0.0; 3], 0),
      member([1.0, 1.0, 0.0], 1),
      member([4.0, 0.0, 0.0], 2),
      member([0.0; 3], 0),
    ]);
    let stats = GenerationStats::collect(3, 40, &population);
    assert_eq!(
      stats,
      GenerationStats {
        generation: 3,
        evaluations: 40,
        min_violation: 0.0,
        mean_violation: 1.5,
        feasible: 2,
        non_dominated: 2,
      }
    );
  }

  #[test]
  fn test_optimize_dispatches_on_objective_set() {
    let table = FleetTable::new(vec![
      crate::fleet::FleetUnit::new("A", 1.0, 50.0),
      crate::fleet::FleetUnit::new("B", 2.0, 60.0)
        .with_branding_priority(3.0),
    ])
    .unwrap();
    for objectives in [
      ObjectiveSet::WearPunctuality,
      ObjectiveSet::WearPunctualityBranding,
    ] {
      let config = RunConfig::builder()
        .target_selected(1)
        .population_size(8)
        .max_generations(5)
        .objectives(objectives)
        .seed(11)
        .build();
      let report = optimize(&table, &config).unwrap();
      assert_eq!(report.generations, 5);
      assert_eq!(report.stats.len(), 6);
      assert_eq!(report.seed, 11);
      assert!(!report.extraction.is_infeasible());
      let branding_reported = report
        .extraction
        .plans()
        .iter()
        .all(|p| p.objectives.branding.is_some());
      assert_eq!(
        branding_reported,
        objectives == ObjectiveSet::WearPunctualityBranding
      );
    }
  }
}
