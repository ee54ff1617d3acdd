//! **induction-moga** selects which fleet units go into service. It runs a
//! constrained multi-objective genetic algorithm, [NSGA-II], over bit-string
//! selection plans and returns the feasible Pareto-optimal ones.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! # Problem
//!
//! A fleet is a [`FleetTable`] of [`FleetUnit`]s. A plan, or [`Candidate`],
//! holds one bit per unit: a set bit selects the unit. Every plan is scored
//! against objectives, all of them minimized:
//! 1. total wear of the selected units
//! 2. `100 - mean punctuality` of the selected units
//! 3. negated aggregated branding priority, when [`ObjectiveSet`] asks for it
//!
//! and against constraints, each satisfied at `0`:
//! 1. squared deviation of the selected count from the target count
//! 2. number of selected units with an open maintenance ticket
//! 3. number of selected units with an invalid certificate
//!
//! A feasible plan always beats an infeasible one. Infeasible plans compete
//! on their total violation, feasible ones by Pareto dominance.
//!
//! # Operators
//!
//! The engine is assembled from small operators, one module each. Most of
//! them are usable on their own:
//!
//! | Step                  | Module               | Operator                      |
//! |:----------------------|:---------------------|:------------------------------|
//! | **Test**              | [`testing`]          | [`Test`], [`FleetEvaluator`]  |
//! | **Constrain**         | [`constraining`]     | [`Constraint`]                |
//! | **Rank**              | [`ranking`]          | [`non_dominated_sort`]        |
//! | **Estimate diversity**| [`crowding`]         | [`crowding_distance`]         |
//! | **Select**            | [`selection`]        | [`TournamentSelector`]        |
//! | **Recombine**         | [`recombination`]    | [`Recombination`]             |
//! | **Mutate**            | [`mutation`]         | [`Mutation`]                  |
//!
//! [`FleetEvaluator`] implements both [`Test`] and [`Constraint`]. The
//! engine scores each candidate with a single pass over its selected units.
//!
//! # Optimizer
//!
//! [`Nsga2`] drives the generational loop through the [`Optimizer`] trait.
//! Each [`step`](Optimizer::step) breeds as many offspring as there are
//! parents, evaluates them, merges both generations and keeps the best half
//! front by front. The run ends after a fixed number of generations.
//!
//! Most callers only need [`optimize`], which picks the engine matching the
//! configured [`ObjectiveSet`] and turns the terminal population into
//! [`InductionPlan`]s. When no plan satisfies every constraint, the result is
//! [`Extraction::Infeasible`], never a best-effort infeasible plan.
//!
//! # Reproducibility
//!
//! All randomness comes from a single seeded generator. A run with a fixed
//! [`RunConfig::seed`] always produces the same populations, whatever the
//! [`Execution`] strategy. A run without a seed draws one, logs it and
//! reports it in [`Report::seed`].
//!
//! # Parallelization
//!
//! Evaluation of one candidate never depends on another, so it can be spread
//! over threads with [`Execution::ParallelEach`] or
//! [`Execution::ParallelBatch`]. For fleets of a few dozen units the overhead
//! usually outweighs the gain. Benchmark, if in doubt.
//!
//! # Logging
//!
//! The crate logs through [tracing] and never installs a subscriber. Run
//! start and end are logged at `INFO`, every generation at `DEBUG`.
//!
//! # Example
//!
//! ```
//! use induction_moga::*;
//!
//! let table = FleetTable::new(vec![
//!   FleetUnit::new("TS-01", 120_000.0, 96.0),
//!   FleetUnit::new("TS-02", 80_000.0, 91.5).with_branding_priority(4.0),
//!   FleetUnit::new("TS-03", 60_000.0, 88.0).with_open_ticket(),
//!   FleetUnit::new("TS-04", 95_000.0, 97.0).with_branding_priority(1.5),
//!   FleetUnit::new("TS-05", 40_000.0, 79.0).with_invalid_certificate(),
//!   FleetUnit::new("TS-06", 70_000.0, 93.0),
//! ])?;
//!
//! let config = RunConfig::builder()
//!   .target_selected(3)
//!   .population_size(40)
//!   .max_generations(60)
//!   .seed(42)
//!   .build();
//!
//! let report = optimize(&table, &config)?;
//! for plan in report.extraction.plans() {
//!   assert_eq!(plan.unit_ids.len(), 3);
//!   assert!(!plan.unit_ids.iter().any(|id| id == "TS-03" || id == "TS-05"));
//!   println!("{plan}");
//! }
//! # Ok::<(), induction_moga::Error>(())
//! ```
//!
//! [NSGA-II]: https://sci2s.ugr.es/sites/default/files/files/Teaching/OtherPostGraduateCourses/Metaheuristicas/Deb_NSGAII.pdf
//! [`Test`]: crate::testing::Test
//! [`Constraint`]: crate::constraining::Constraint
//! [`non_dominated_sort`]: crate::ranking::non_dominated_sort
//! [`crowding_distance`]: crate::crowding::crowding_distance
//! [`TournamentSelector`]: crate::selection::TournamentSelector
//! [`Recombination`]: crate::recombination::Recombination
//! [`Mutation`]: crate::mutation::Mutation
//! [tracing]: https://docs.rs/tracing

#![warn(missing_docs)]

pub mod candidate;
pub mod config;
pub mod constraining;
pub mod crowding;
pub mod error;
pub mod evaluator;
pub mod execution;
pub mod fleet;
pub mod mutation;
pub mod observer;
pub mod optimizer;
pub mod plan;
pub mod population;
pub mod ranking;
pub mod recombination;
pub mod score;
pub mod selection;
pub mod testing;

pub use candidate::Candidate;
pub use config::{ObjectiveSet, RunConfig};
pub use error::{Error, Result};
pub use evaluator::FleetEvaluator;
pub use execution::Execution;
pub use fleet::{FleetTable, FleetUnit};
pub use observer::{GenerationObserver, History, NoopObserver};
pub use optimizer::{
  nsga::Nsga2,
  optimize,
  GenerationStats,
  Optimizer,
  Outcome,
  Report,
  State,
};
pub use plan::{Extraction, InductionPlan, PlanObjectives};
pub use population::{Population, ScoredCandidate};
pub use recombination::CrossoverKind;
