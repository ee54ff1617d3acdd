//! Fleet units and the validated table the optimizer reads from.

use std::collections::HashSet;

use crate::{candidate::Candidate, error::{Error, Result}};

/// A single fleet unit with the scores the optimizer weighs.
///
/// # Examples
/// ```
/// # use induction_moga::fleet::FleetUnit;
/// let unit = FleetUnit::new("TS-07", 48_200.0, 97.5)
///   .with_open_ticket()
///   .with_branding_priority(12.5);
/// assert!(!unit.is_eligible());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetUnit {
  /// Unique identifier.
  pub id: String,
  /// Cumulative wear, e.g. mileage. Non-negative.
  pub wear: f64,
  /// Punctuality score in `[0, 100]`.
  pub punctuality: f64,
  /// Whether the unit has an open maintenance ticket.
  pub open_ticket: bool,
  /// Whether the unit's safety certificate is valid.
  pub certificate_valid: bool,
  /// Branding exposure priority. `0` when the unit carries no contract.
  pub branding_priority: f64,
}

impl FleetUnit {
  /// Creates an eligible unit without a branding contract.
  pub fn new(id: impl Into<String>, wear: f64, punctuality: f64) -> Self {
    Self {
      id: id.into(),
      wear,
      punctuality,
      open_ticket: false,
      certificate_valid: true,
      branding_priority: 0.0,
    }
  }

  /// Marks the unit as having an open maintenance ticket.
  pub fn with_open_ticket(mut self) -> Self {
    self.open_ticket = true;
    self
  }

  /// Marks the unit's certificate as invalid.
  pub fn with_invalid_certificate(mut self) -> Self {
    self.certificate_valid = false;
    self
  }

  /// Sets the branding exposure priority.
  pub fn with_branding_priority(mut self, priority: f64) -> Self {
    self.branding_priority = priority;
    self
  }

  /// Returns `true` if the unit may be selected without violating any
  /// eligibility rule.
  pub fn is_eligible(&self) -> bool {
    !self.open_ticket && self.certificate_valid
  }

  fn validate(&self, row: usize) -> Result<()> {
    if self.id.trim().is_empty() {
      return Err(Error::EmptyIdentifier { row });
    }
    let invalid = |field, value| Error::InvalidField {
      id: self.id.clone(),
      field,
      value,
    };
    if !self.wear.is_finite() || self.wear < 0.0 {
      return Err(invalid("wear", self.wear));
    }
    if !(0.0..=100.0).contains(&self.punctuality) {
      return Err(invalid("punctuality", self.punctuality));
    }
    if !self.branding_priority.is_finite() || self.branding_priority < 0.0 {
      return Err(invalid("branding priority", self.branding_priority));
    }
    Ok(())
  }
}

/// A non-empty table of fleet units with unique identifiers. The order of
/// units is the bit order of every [`Candidate`] evaluated against it.
#[derive(Clone, Debug, PartialEq)]
pub struct FleetTable {
  units: Vec<FleetUnit>,
}

impl FleetTable {
  /// Validates given units and builds a table from them.
  ///
  /// # Errors
  ///
  /// Fails if there are no units, an identifier is empty or repeated, or a
  /// numeric field is out of its domain.
  pub fn new(units: Vec<FleetUnit>) -> Result<Self> {
    if units.is_empty() {
      return Err(Error::EmptyFleet);
    }
    let mut ids = HashSet::with_capacity(units.len());
    for (row, unit) in units.iter().enumerate() {
      unit.validate(row)?;
      if !ids.insert(unit.id.as_str()) {
        return Err(Error::DuplicateIdentifier {
          id: unit.id.clone(),
        });
      }
    }
    Ok(Self { units })
  }

  /// Returns the number of units. Never zero.
  pub fn len(&self) -> usize {
    self.units.len()
  }

  /// Always `false`; a table cannot be built without units.
  pub fn is_empty(&self) -> bool {
    self.units.is_empty()
  }

  /// Returns the units in table order.
  pub fn units(&self) -> &[FleetUnit] {
    &self.units
  }

  /// Returns the number of units that have no open ticket and a valid
  /// certificate.
  pub fn eligible_count(&self) -> usize {
    self.units.iter().filter(|u| u.is_eligible()).count()
  }

  /// Returns an iterator over units selected by `candidate`.
  pub fn selected<'a>(
    &'a self,
    candidate: &'a Candidate,
  ) -> impl Iterator<Item = &'a FleetUnit> + 'a {
    candidate
      .selected_indices()
      .filter_map(move |i| self.units.get(i))
  }

  /// Checks that `candidate` has exactly one bit per unit.
  pub fn check(&self, candidate: &Candidate) -> Result<()> {
    if candidate.len() != self.len() {
      return Err(Error::CandidateLength {
        expected: self.len(),
        actual: candidate.len(),
      });
    }
    Ok(())
  }
}
