use induction_moga::*;
use rand::prelude::*;
use rand_distr::Normal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
  // RUST_LOG=induction_moga=debug shows every generation
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  // synthetic fleet of 25 trainsets
  let mut rng = StdRng::seed_from_u64(2025);
  let wear: Normal<f64> =
    Normal::new(90_000.0, 25_000.0).expect("wear deviation is positive");
  let punctuality: Normal<f64> =
    Normal::new(92.0, 4.0).expect("punctuality deviation is positive");
  let units = (1..=25)
    .map(|i| {
      let mut unit = FleetUnit::new(
        format!("TS-{i:02}"),
        wear.sample(&mut rng).max(0.0),
        punctuality.sample(&mut rng).clamp(0.0, 100.0),
      );
      unit.open_ticket = rng.gen_bool(0.15);
      unit.certificate_valid = rng.gen_bool(0.9);
      if rng.gen_bool(0.3) {
        unit.branding_priority = rng.gen_range(1.0..10.0);
      }
      unit
    })
    .collect();
  let table = FleetTable::new(units)?;

  for objectives in [
    ObjectiveSet::WearPunctuality,
    ObjectiveSet::WearPunctualityBranding,
  ] {
    let config = RunConfig::builder()
      .target_selected(15)
      .objectives(objectives)
      .execution(Execution::ParallelBatch)
      .eliminate_duplicates(true)
      .seed(7)
      .build();
    let report = optimize(&table, &config)?;

    println!("\n{objectives:?} (seed {})", report.seed);
    if let Some(last) = report.stats.last() {
      println!(
        "  {} generations, {} evaluations, {} feasible in final population",
        report.generations, last.evaluations, last.feasible
      );
    }
    match &report.extraction {
      Extraction::Plans(plans) => {
        for plan in plans.iter().take(10) {
          println!("  {plan}");
        }
        if plans.len() > 10 {
          println!("  ... {} plans in total", plans.len());
        }
      }
      Extraction::Infeasible => println!("  no feasible plan found"),
    }
  }

  Ok(())
}
