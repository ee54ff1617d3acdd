//! NSGA-II generational engine with constraint-domination.

use std::collections::HashSet;

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use super::{GenerationStats, Optimizer, Outcome, State};
use crate::{
  candidate::Candidate,
  config::RunConfig,
  crowding::crowding_distance,
  error::{Error, Result},
  evaluator::FleetEvaluator,
  execution::Execution,
  fleet::FleetTable,
  mutation::{BitFlipMutation, Mutation},
  observer::{GenerationObserver, NoopObserver},
  population::{Population, ScoredCandidate},
  ranking::non_dominated_sort,
  recombination::{CrossoverKind, Recombination},
  selection::TournamentSelector,
  testing::Test,
};

/// Number of times an offspring slot is redrawn while its offspring
/// duplicates an existing candidate.
pub const MAX_DUPLICATE_RETRIES: usize = 32;

// index of a candidate in the merged pool
type PoolIndex = usize;

/// NSGA-II over fleet selection candidates with `N` objectives.
///
/// Every generation produces as many offspring as there are parents, merges
/// both into a pool of twice the population size, re-ranks the pool and
/// keeps the best candidates front by front. The last front that does not
/// fit entirely is truncated by descending crowding distance.
///
/// The objective count is decided by `N`. [`RunConfig::objectives`] is only
/// read by [`optimize`](crate::optimizer::optimize).
///
/// # Examples
/// ```
/// # use induction_moga::{
/// #   config::RunConfig, fleet::*, observer::History, optimizer::*,
/// #   optimizer::nsga::Nsga2,
/// # };
/// let table = FleetTable::new(vec![
///   FleetUnit::new("A", 100.0, 90.0),
///   FleetUnit::new("B", 50.0, 80.0),
///   FleetUnit::new("C", 70.0, 95.0).with_branding_priority(3.0),
/// ])?;
/// let config = RunConfig::builder()
///   .target_selected(2)
///   .population_size(16)
///   .max_generations(10)
///   .seed(3)
///   .build();
/// let outcome = Nsga2::<3>::new(&table, &config)?
///   .with_observer(History::<3>::new())
///   .optimize();
/// assert_eq!(outcome.population.len(), 16);
/// assert_eq!(outcome.observer.len(), 11);
/// # Ok::<(), induction_moga::Error>(())
/// ```
pub struct Nsga2<'a, const N: usize, O = NoopObserver> {
  evaluator: FleetEvaluator<'a>,
  population_size: usize,
  max_generations: usize,
  selector: TournamentSelector,
  crossover: CrossoverKind,
  mutation: BitFlipMutation,
  execution: Execution,
  eliminate_duplicates: bool,
  rng: StdRng,
  seed: u64,
  // candidates waiting to be evaluated as generation 0
  initial: Option<Vec<Candidate>>,
  population: Population<N>,
  generation: usize,
  evaluations: usize,
  stats: Vec<GenerationStats>,
  observer: O,
  state: State,
}

impl<'a, const N: usize> Nsga2<'a, N>
where
  FleetEvaluator<'a>: Test<Candidate, N>,
{
  /// Creates an engine over `table` with a random initial population.
  ///
  /// If `config` carries no seed, a random one is drawn and logged. It is
  /// reported back in the outcome so the run can be reproduced.
  ///
  /// # Errors
  ///
  /// Fails if `config` is invalid.
  #[tracing::instrument(skip_all, fields(units = table.len()))]
  pub fn new(table: &'a FleetTable, config: &RunConfig) -> Result<Self> {
    config.validate()?;
    let seed = match config.seed {
      Some(seed) => seed,
      None => {
        let seed = rand::random();
        info!(seed, "no seed configured, drew a random one");
        seed
      }
    };
    let mut rng = StdRng::seed_from_u64(seed);
    let initial = (0..config.population_size)
      .map(|_| {
        Candidate::random(
          table.len(),
          config.initial_selection_probability,
          &mut rng,
        )
      })
      .collect();

    Ok(Self {
      evaluator: FleetEvaluator::new(table, config.target_selected),
      population_size: config.population_size,
      max_generations: config.max_generations,
      selector: TournamentSelector::BINARY,
      crossover: config.crossover,
      mutation: BitFlipMutation::new(config.mutation_rate_for(table.len())),
      execution: config.execution,
      eliminate_duplicates: config.eliminate_duplicates,
      rng,
      seed,
      initial: Some(initial),
      population: Population::from_ranked(Vec::new()),
      generation: 0,
      evaluations: 0,
      stats: Vec::new(),
      observer: NoopObserver,
      state: if config.max_generations == 0 {
        State::Terminated
      } else {
        State::Running
      },
    })
  }
}

impl<'a, const N: usize, O> Nsga2<'a, N, O>
where
  FleetEvaluator<'a>: Test<Candidate, N>,
  O: GenerationObserver<N>,
{
  /// Replaces the random initial population with `candidates`. Has no
  /// effect once the first generation has run.
  ///
  /// # Errors
  ///
  /// Fails unless there are exactly as many candidates as the configured
  /// population size, each with one bit per fleet unit.
  pub fn with_initial_population(
    mut self,
    candidates: Vec<Candidate>,
  ) -> Result<Self> {
    if candidates.len() != self.population_size {
      return Err(Error::PopulationSize {
        expected: self.population_size,
        actual: candidates.len(),
      });
    }
    for candidate in &candidates {
      self.evaluator.table().check(candidate)?;
    }
    if self.initial.is_some() {
      self.initial = Some(candidates);
    }
    Ok(self)
  }

  /// Sets the observer notified after each generation.
  pub fn with_observer<P: GenerationObserver<N>>(
    self,
    observer: P,
  ) -> Nsga2<'a, N, P> {
    Nsga2 {
      evaluator: self.evaluator,
      population_size: self.population_size,
      max_generations: self.max_generations,
      selector: self.selector,
      crossover: self.crossover,
      mutation: self.mutation,
      execution: self.execution,
      eliminate_duplicates: self.eliminate_duplicates,
      rng: self.rng,
      seed: self.seed,
      initial: self.initial,
      population: self.population,
      generation: self.generation,
      evaluations: self.evaluations,
      stats: self.stats,
      observer,
      state: self.state,
    }
  }

  /// Returns the current population. Empty until the initial population has
  /// been evaluated by the first [`step`](Optimizer::step).
  pub fn population(&self) -> &Population<N> {
    &self.population
  }

  /// Returns the number of completed generations.
  pub fn generation(&self) -> usize {
    self.generation
  }

  /// Returns the seed the random number generator was created with.
  pub fn seed(&self) -> u64 {
    self.seed
  }

  // evaluates, ranks and records the initial population
  fn start(&mut self) {
    let Some(initial) = self.initial.take() else {
      return;
    };
    info!(
      units = self.evaluator.table().len(),
      eligible = self.evaluator.table().eligible_count(),
      population_size = self.population_size,
      max_generations = self.max_generations,
      objectives = N,
      seed = self.seed,
      "starting optimization"
    );
    let scored = self.evaluate(initial);
    let size = scored.len();
    self.population = select_survivors(scored, size);
    self.record();
  }

  fn evaluate(
    &mut self,
    candidates: Vec<Candidate>,
  ) -> Vec<ScoredCandidate<N>> {
    let evaluator = self.evaluator;
    let scores = self
      .execution
      .map(&candidates, |candidate| evaluator.scores::<N>(candidate));
    self.evaluations += candidates.len();
    candidates
      .into_iter()
      .zip(scores)
      .map(|(candidate, (objectives, violations))| {
        ScoredCandidate::new(candidate, objectives, violations)
      })
      .collect()
  }

  // produces exactly `population_size` offspring
  fn offspring(&mut self) -> Vec<Candidate> {
    let Self {
      population,
      selector,
      crossover,
      mutation,
      rng,
      population_size,
      eliminate_duplicates,
      ..
    } = self;
    let parents = population.members();
    let mut breed = || -> Vec<Candidate> {
      let a = selector.select(parents, rng).candidate();
      let b = selector.select(parents, rng).candidate();
      let mut children = crossover.recombine(a, b, rng);
      // pop from the back yields children in creation order
      children.reverse();
      children
        .into_iter()
        .map(|child| mutation.mutate(child, rng))
        .collect()
    };

    let mut offspring = Vec::with_capacity(*population_size);
    let mut pending: Vec<Candidate> = Vec::new();
    let mut next = |pending: &mut Vec<Candidate>| loop {
      if let Some(child) = pending.pop() {
        break child;
      }
      *pending = breed();
    };

    if !*eliminate_duplicates {
      while offspring.len() < *population_size {
        offspring.push(next(&mut pending));
      }
      return offspring;
    }

    let mut seen: HashSet<Candidate> =
      parents.iter().map(|p| p.candidate().clone()).collect();
    while offspring.len() < *population_size {
      let mut child = next(&mut pending);
      for _ in 0..MAX_DUPLICATE_RETRIES {
        if !seen.contains(&child) {
          break;
        }
        child = next(&mut pending);
      }
      seen.insert(child.clone());
      offspring.push(child);
    }
    offspring
  }

  fn record(&mut self) {
    let stats = GenerationStats::collect(
      self.generation,
      self.evaluations,
      &self.population,
    );
    debug!(
      generation = stats.generation,
      evaluations = stats.evaluations,
      min_violation = stats.min_violation,
      mean_violation = stats.mean_violation,
      feasible = stats.feasible,
      non_dominated = stats.non_dominated,
      "generation complete"
    );
    self.stats.push(stats);
    self
      .observer
      .observe(self.generation, &self.population.objectives());
  }
}

impl<'a, const N: usize, O> Optimizer<N> for Nsga2<'a, N, O>
where
  FleetEvaluator<'a>: Test<Candidate, N>,
  O: GenerationObserver<N>,
{
  type Outcome = Outcome<N, O>;

  fn state(&self) -> State {
    self.state
  }

  fn step(&mut self) -> State {
    self.start();
    if self.state == State::Terminated {
      return self.state;
    }

    let offspring = self.offspring();
    let mut pool = std::mem::take(&mut self.population).into_members();
    pool.append(&mut self.evaluate(offspring));
    self.population = select_survivors(pool, self.population_size);
    self.generation += 1;
    self.record();

    if self.generation >= self.max_generations {
      self.state = State::Terminated;
    }
    self.state
  }

  fn finish(mut self) -> Outcome<N, O> {
    self.start();
    debug!(
      generations = self.generation,
      non_dominated = self.population.first_front().count(),
      "engine terminated"
    );
    Outcome {
      population: self.population,
      generations: self.generation,
      stats: self.stats,
      seed: self.seed,
      observer: self.observer,
    }
  }
}

/// Ranks `pool` and keeps `size` of its members: whole fronts in increasing
/// rank order, then the members of the first front that does not fit, by
/// descending crowding distance. Equal distances keep pool order.
///
/// Survivors carry the rank and crowding distance computed over the whole
/// pool.
pub(crate) fn select_survivors<const N: usize>(
  pool: Vec<ScoredCandidate<N>>,
  size: usize,
) -> Population<N> {
  let fronts = non_dominated_sort(&pool).into_fronts();
  let mut crowding_distances = vec![0.0; pool.len()];
  let mut survivors: Vec<(PoolIndex, usize)> = Vec::with_capacity(size);

  for (rank, mut front) in fronts.into_iter().enumerate() {
    if survivors.len() >= size {
      break;
    }
    let scores: Vec<_> = front.iter().map(|&i| pool[i].objectives()).collect();
    for (&i, d) in front.iter().zip(crowding_distance(&scores)) {
      crowding_distances[i] = d;
    }
    let room = size - survivors.len();
    if front.len() > room {
      front.sort_by(|&a, &b| {
        crowding_distances[b].total_cmp(&crowding_distances[a])
      });
      front.truncate(room);
    }
    survivors.extend(front.into_iter().map(|i| (i, rank)));
  }

  let mut pool: Vec<Option<ScoredCandidate<N>>> =
    pool.into_iter().map(Some).collect();
  let members: Vec<_> = survivors
    .into_iter()
    .filter_map(|(i, rank)| {
      let d = crowding_distances[i];
      pool[i].take().map(|m| m.ranked(rank, d))
    })
    .collect();

  debug_assert_eq!(
    members.len(),
    size.min(pool.len()),
    "survivor count must match population size"
  );

  Population::from_ranked(members)
}
