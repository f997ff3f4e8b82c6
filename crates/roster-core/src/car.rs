//! Car records. A car optionally belongs to one person through `person_id`;
//! the reference is weak and the car never owns the person's lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, fields::FieldMap, person::overwrite};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
  pub id:         i64,
  pub year:       Option<i64>,
  pub make:       Option<String>,
  pub model:      Option<String>,
  pub colour:     Option<String>,
  pub license:    Option<String>,
  /// The owning person, if any.
  pub person_id:  Option<i64>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Car {
  /// Fields that may be set from bulk input. `person_id` is deliberately
  /// absent: ownership changes go through
  /// [`crate::store::RosterStore::associate_owner`].
  pub const FILLABLE: &'static [&'static str] =
    &["year", "make", "model", "colour", "license"];

  pub fn apply(&mut self, patch: &CarPatch) -> bool {
    let mut dirty = false;
    dirty |= overwrite(&mut self.year, &patch.year);
    dirty |= overwrite(&mut self.make, &patch.make);
    dirty |= overwrite(&mut self.model, &patch.model);
    dirty |= overwrite(&mut self.colour, &patch.colour);
    dirty |= overwrite(&mut self.license, &patch.license);
    dirty
  }
}

/// Input to [`crate::store::RosterStore::create_car`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCar {
  pub year:      Option<i64>,
  pub make:      Option<String>,
  pub model:     Option<String>,
  pub colour:    Option<String>,
  pub license:   Option<String>,
  pub person_id: Option<i64>,
}

impl NewCar {
  /// Mass-assign from bulk input. The result never has an owner, even if
  /// the input carries a `person_id`.
  pub fn from_input(input: &FieldMap) -> Result<Self> {
    let input = input.only(Car::FILLABLE);
    Ok(Self {
      year:      input.integer("year")?,
      make:      input.text("make")?,
      model:     input.text("model")?,
      colour:    input.text("colour")?,
      license:   input.text("license")?,
      person_id: None,
    })
  }

  pub fn owned_by(mut self, person_id: i64) -> Self {
    self.person_id = Some(person_id);
    self
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarPatch {
  pub year:    Option<i64>,
  pub make:    Option<String>,
  pub model:   Option<String>,
  pub colour:  Option<String>,
  pub license: Option<String>,
}

impl CarPatch {
  pub fn from_input(input: &FieldMap) -> Result<Self> {
    let input = input.only(Car::FILLABLE);
    let mut patch = Self::default();
    if input.is_filled("year") {
      patch.year = input.integer("year")?;
    }
    for (key, slot) in [
      ("make", &mut patch.make),
      ("model", &mut patch.model),
      ("colour", &mut patch.colour),
      ("license", &mut patch.license),
    ] {
      if input.is_filled(key) {
        *slot = input.text(key)?;
      }
    }
    Ok(patch)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_car_never_takes_owner_from_input() {
    let input = FieldMap::new()
      .with("year", 1987)
      .with("make", "Volvo")
      .with("model", "240")
      .with("colour", "red")
      .with("license", "ABC123")
      .with("person_id", 5);

    let car = NewCar::from_input(&input).unwrap();
    assert_eq!(car.person_id, None);
    assert_eq!(car.year, Some(1987));
    assert_eq!(car.license.as_deref(), Some("ABC123"));

    assert_eq!(car.owned_by(5).person_id, Some(5));
  }

  #[test]
  fn car_patch_keeps_only_filled_fields() {
    let input = FieldMap::new()
      .with("colour", "blue")
      .with("make", "")
      .with("year", "0")
      .with("person_id", 9);

    let patch = CarPatch::from_input(&input).unwrap();
    assert_eq!(patch, CarPatch {
      colour: Some("blue".into()),
      ..Default::default()
    });
  }
}
