//! Errors reported before an optimization run starts.

/// An error raised while validating a fleet table, a run configuration or
/// caller-supplied candidates.
///
/// Every variant is reported before the first generation runs. An
/// unreachable selection target is not an error: it shows up as an
/// infeasible [`Extraction`] once the run is over.
///
/// [`Extraction`]: crate::plan::Extraction
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
  /// The fleet table has no rows.
  #[error("fleet table is empty")]
  EmptyFleet,

  /// A fleet unit has an empty identifier.
  #[error("fleet unit at row {row} has an empty identifier")]
  EmptyIdentifier {
    /// Row of the offending unit.
    row: usize,
  },

  /// Two fleet units share the same identifier.
  #[error("fleet unit identifier `{id}` appears more than once")]
  DuplicateIdentifier {
    /// The repeated identifier.
    id: String,
  },

  /// A numeric field of a fleet unit is out of its domain.
  #[error("fleet unit `{id}` has invalid {field}: {value}")]
  InvalidField {
    /// Identifier of the offending unit.
    id: String,
    /// Name of the offending field.
    field: &'static str,
    /// The rejected value.
    value: f64,
  },

  /// Population size is zero.
  #[error("population size must be at least 1")]
  EmptyPopulation,

  /// Mutation rate is not a probability.
  #[error("mutation rate must be within [0, 1], got {0}")]
  InvalidMutationRate(f64),

  /// Initial selection probability is not a probability.
  #[error("initial selection probability must be within [0, 1], got {0}")]
  InvalidSelectionProbability(f64),

  /// A candidate does not have one bit per fleet unit.
  #[error("candidate has {actual} bits but the fleet has {expected} units")]
  CandidateLength {
    /// Number of fleet units.
    expected: usize,
    /// Number of bits in the candidate.
    actual: usize,
  },

  /// A seeded population does not match the configured population size.
  #[error("seeded population has {actual} candidates, expected {expected}")]
  PopulationSize {
    /// Configured population size.
    expected: usize,
    /// Number of supplied candidates.
    actual: usize,
  },
}

/// An alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_messages() {
    assert_eq!(Error::EmptyFleet.to_string(), "fleet table is empty");
    assert_eq!(
      Error::InvalidField {
        id: "TS-01".into(),
        field: "punctuality",
        value: 120.0,
      }
      .to_string(),
      "fleet unit `TS-01` has invalid punctuality: 120"
    );
    assert_eq!(
      Error::CandidateLength {
        expected: 5,
        actual: 4
      }
      .to_string(),
      "candidate has 4 bits but the fleet has 5 units"
    );
  }
}
