use induction_moga::{ranking::non_dominated_sort, *};
use itertools::Itertools;

fn five_units() -> FleetTable {
  FleetTable::new(vec![
    FleetUnit::new("A", 100.0, 90.0),
    FleetUnit::new("B", 50.0, 80.0),
    FleetUnit::new("C", 10.0, 99.0).with_open_ticket(),
    FleetUnit::new("D", 75.0, 85.0).with_branding_priority(2.0),
    FleetUnit::new("E", 60.0, 70.0).with_invalid_certificate(),
  ])
  .unwrap()
}

fn config(target_selected: usize) -> RunConfig {
  RunConfig::builder()
    .target_selected(target_selected)
    .population_size(30)
    .max_generations(60)
    .seed(2024)
    .build()
}

#[test]
fn seeded_population_reports_its_plan() {
  let table = five_units();
  let config = RunConfig::builder()
    .target_selected(2)
    .population_size(10)
    .max_generations(0)
    .objectives(ObjectiveSet::WearPunctuality)
    .seed(1)
    .build();
  let seeded = vec![Candidate::selecting(5, &[0, 1]); 10];
  let outcome = Nsga2::<2>::new(&table, &config)
    .unwrap()
    .with_initial_population(seeded)
    .unwrap()
    .optimize();

  for member in outcome.population.members() {
    assert_eq!(member.violations(), &[0.0, 0.0, 0.0]);
    assert_eq!(member.objectives()[0], 150.0);
    assert_eq!(member.rank(), 0);
  }
  let plans = plan::extract_plans(&table, &outcome.population).into_plans();
  assert_eq!(plans.len(), 1);
  assert_eq!(plans[0].unit_ids, vec!["A", "B"]);
  assert_eq!(plans[0].objectives.total_wear, 150.0);
  assert_eq!(plans[0].objectives.punctuality, 85.0);
  assert_eq!(plans[0].objectives.branding, None);
}

#[test]
fn seeded_population_evolves_within_constraints() {
  let table = five_units();
  let outcome = Nsga2::<3>::new(&table, &config(2))
    .unwrap()
    .with_initial_population(vec![Candidate::selecting(5, &[0, 1]); 30])
    .unwrap()
    .optimize();
  // elitism never loses the feasible seed front
  let plans = plan::extract_plans(&table, &outcome.population).into_plans();
  assert!(!plans.is_empty());
  for plan in &plans {
    assert_eq!(plan.unit_ids.len(), 2);
    assert!(plan.unit_ids.iter().all(|id| id != "C" && id != "E"));
  }
}

#[test]
fn zero_target_yields_empty_selection() {
  let table = five_units();
  let report = optimize(&table, &config(0)).unwrap();
  let plans = report.extraction.plans();
  assert_eq!(plans.len(), 1);
  assert!(plans[0].unit_ids.is_empty());
  assert_eq!(plans[0].objectives.total_wear, 0.0);
  assert_eq!(plans[0].objectives.punctuality, 0.0);
}

#[test]
fn open_tickets_everywhere_is_infeasible() {
  let table = FleetTable::new(
    (0..6)
      .map(|i| FleetUnit::new(format!("U{i}"), 10.0 * i as f64, 90.0))
      .map(FleetUnit::with_open_ticket)
      .collect(),
  )
  .unwrap();
  let report = optimize(&table, &config(2)).unwrap();
  assert_eq!(report.extraction, Extraction::Infeasible);
  assert!(report.extraction.plans().is_empty());
  assert_eq!(report.generations, 60);
}

#[test]
fn unreachable_target_is_infeasible_not_an_error() {
  let table = five_units();
  let report = optimize(&table, &config(8)).unwrap();
  assert!(report.extraction.is_infeasible());
}

#[test]
fn tied_units_share_first_front() {
  let table = FleetTable::new(vec![
    FleetUnit::new("X", 40.0, 90.0),
    FleetUnit::new("Y", 40.0, 90.0),
    FleetUnit::new("Z", 90.0, 50.0),
  ])
  .unwrap();
  let evaluator = FleetEvaluator::new(&table, 1);
  let members: Vec<ScoredCandidate<2>> = [&[0][..], &[1], &[2]]
    .into_iter()
    .map(|indices| {
      let candidate = Candidate::selecting(3, indices);
      let (objectives, violations) =
        evaluator.evaluate::<2>(&candidate).unwrap();
      ScoredCandidate::new(candidate, objectives, violations)
    })
    .collect();
  let fronts = non_dominated_sort(&members);
  assert_eq!(fronts.ranks(), &[0, 0, 1]);
}

#[test]
fn seeded_runs_are_deterministic() {
  let table = five_units();
  let first = optimize(&table, &config(2)).unwrap();
  let second = optimize(&table, &config(2)).unwrap();
  assert_eq!(first, second);

  let parallel = RunConfig {
    execution: Execution::ParallelBatch,
    ..config(2)
  };
  assert_eq!(first, optimize(&table, &parallel).unwrap());
}

#[test]
fn unseeded_run_reports_reproducible_seed() {
  let table = five_units();
  let config = RunConfig::builder()
    .target_selected(2)
    .population_size(20)
    .max_generations(15)
    .build();
  let report = optimize(&table, &config).unwrap();
  let replay = RunConfig {
    seed: Some(report.seed),
    ..config
  };
  assert_eq!(report, optimize(&table, &replay).unwrap());
}

#[test]
fn population_size_is_constant_across_generations() {
  let table = five_units();
  let outcome = Nsga2::<3>::new(&table, &config(2))
    .unwrap()
    .with_observer(History::<3>::new())
    .optimize();
  assert_eq!(outcome.observer.len(), 61);
  assert!(outcome
    .observer
    .snapshots()
    .iter()
    .all(|(_, scores)| scores.len() == 30));
  assert_eq!(outcome.stats.len(), 61);
  assert_eq!(outcome.stats[60].evaluations, 30 * 61);
}

#[test]
fn single_point_crossover_with_duplicate_elimination() {
  let table = five_units();
  let config = RunConfig {
    crossover: CrossoverKind::SinglePoint,
    eliminate_duplicates: true,
    ..config(2)
  };
  let report = optimize(&table, &config).unwrap();
  let plans = report.extraction.plans();
  assert!(!plans.is_empty());
  assert!(plans.iter().map(|p| &p.unit_ids).all_unique());
}

#[test]
fn plans_are_ordered_by_wear() {
  let table = five_units();
  let report = optimize(&table, &config(2)).unwrap();
  let wear: Vec<_> = report
    .extraction
    .plans()
    .iter()
    .map(|p| p.objectives.total_wear)
    .collect();
  assert!(wear.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn invalid_inputs_fail_fast() {
  assert_eq!(FleetTable::new(vec![]).err(), Some(Error::EmptyFleet));

  let table = five_units();
  let config = RunConfig::builder()
    .target_selected(2)
    .mutation_rate(2.0)
    .build();
  assert_eq!(
    optimize(&table, &config).err(),
    Some(Error::InvalidMutationRate(2.0))
  );
}
