//! Result extraction: turns the terminal population into induction plans.

use std::fmt;

use itertools::Itertools;
use tracing::warn;

use crate::{
  evaluator::MAX_PUNCTUALITY,
  fleet::FleetTable,
  population::{Population, ScoredCandidate},
  score::Scores,
};

/// Objective values of a plan in human-facing units.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanObjectives {
  /// Total wear of the selected units.
  pub total_wear: f64,
  /// Mean punctuality of the selected units, as a percentage.
  pub punctuality: f64,
  /// Aggregated branding priority of the selected units. `None` when
  /// branding was not optimized.
  pub branding: Option<f64>,
}

impl PlanObjectives {
  /// Converts minimized objective scores back to human-facing units.
  pub fn from_scores<const N: usize>(scores: &Scores<N>) -> Self {
    Self {
      total_wear: scores.first().copied().unwrap_or_default(),
      punctuality: MAX_PUNCTUALITY
        - scores.get(1).copied().unwrap_or(MAX_PUNCTUALITY),
      branding: scores.get(2).map(|b| -b),
    }
  }
}

/// A feasible, non-dominated fleet selection.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InductionPlan {
  /// Identifiers of the selected units, in table order.
  pub unit_ids: Vec<String>,
  /// Objective values of the selection.
  pub objectives: PlanObjectives,
}

impl fmt::Display for InductionPlan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "wear {:.1}, punctuality {:.1}%",
      self.objectives.total_wear, self.objectives.punctuality
    )?;
    if let Some(branding) = self.objectives.branding {
      write!(f, ", branding {branding:.1}")?;
    }
    write!(f, ": [{}]", self.unit_ids.iter().join(", "))
  }
}

/// Outcome of result extraction.
#[derive(Clone, PartialEq, Debug)]
pub enum Extraction {
  /// Feasible non-dominated plans, by ascending total wear. Never empty.
  Plans(Vec<InductionPlan>),
  /// No member of the first front satisfies every constraint.
  Infeasible,
}

impl Extraction {
  /// Returns the plans, empty if infeasible.
  pub fn plans(&self) -> &[InductionPlan] {
    match self {
      Extraction::Plans(plans) => plans,
      Extraction::Infeasible => &[],
    }
  }

  /// Moves the plans out, empty if infeasible.
  pub fn into_plans(self) -> Vec<InductionPlan> {
    match self {
      Extraction::Plans(plans) => plans,
      Extraction::Infeasible => Vec::new(),
    }
  }

  /// Returns `true` if no feasible plan was found.
  pub fn is_infeasible(&self) -> bool {
    matches!(self, Extraction::Infeasible)
  }
}

/// Extracts plans from the feasible members of the first front of
/// `population`.
///
/// Members with identical selections yield a single plan. An empty result
/// is reported as [`Extraction::Infeasible`], never replaced by the least
/// infeasible member.
pub fn extract_plans<const N: usize>(
  table: &FleetTable,
  population: &Population<N>,
) -> Extraction {
  let plans: Vec<_> = population
    .first_front()
    .filter(|m| m.is_feasible())
    .unique_by(|m| m.candidate().clone())
    .map(|m| to_plan(table, m))
    .sorted_by(|a, b| {
      a.objectives.total_wear.total_cmp(&b.objectives.total_wear)
    })
    .collect();

  if plans.is_empty() {
    warn!(
      population_size = population.len(),
      "no feasible non-dominated plan found"
    );
    Extraction::Infeasible
  } else {
    Extraction::Plans(plans)
  }
}

fn to_plan<const N: usize>(
  table: &FleetTable,
  member: &ScoredCandidate<N>,
) -> InductionPlan {
  InductionPlan {
    unit_ids: table
      .selected(member.candidate())
      .map(|unit| unit.id.clone())
      .collect(),
    objectives: PlanObjectives::from_scores(member.objectives()),
  }
}
