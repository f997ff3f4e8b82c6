//! Person records, the parent side of the person → car relation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, fields::FieldMap};

/// A stored person. `id` and both timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:         i64,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub age:        Option<i64>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl Person {
  /// Fields that may be set from bulk input.
  pub const FILLABLE: &'static [&'static str] =
    &["first_name", "last_name", "age"];

  /// Overwrite every field the patch carries. Returns `true` if any stored
  /// value actually changed.
  pub fn apply(&mut self, patch: &PersonPatch) -> bool {
    let mut dirty = false;
    dirty |= overwrite(&mut self.first_name, &patch.first_name);
    dirty |= overwrite(&mut self.last_name, &patch.last_name);
    dirty |= overwrite(&mut self.age, &patch.age);
    dirty
  }
}

/// Input to [`crate::store::RosterStore::create_person`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewPerson {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub age:        Option<i64>,
}

impl NewPerson {
  /// Mass-assign from bulk input; keys outside [`Person::FILLABLE`] are
  /// ignored.
  pub fn from_input(input: &FieldMap) -> Result<Self> {
    let input = input.only(Person::FILLABLE);
    Ok(Self {
      first_name: input.text("first_name")?,
      last_name:  input.text("last_name")?,
      age:        input.integer("age")?,
    })
  }
}

/// A partial update: `None` means "leave the stored value alone".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonPatch {
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub age:        Option<i64>,
}

impl PersonPatch {
  /// Only fields that are present and non-empty make it into the patch.
  pub fn from_input(input: &FieldMap) -> Result<Self> {
    let input = input.only(Person::FILLABLE);
    let mut patch = Self::default();
    if input.is_filled("first_name") {
      patch.first_name = input.text("first_name")?;
    }
    if input.is_filled("last_name") {
      patch.last_name = input.text("last_name")?;
    }
    if input.is_filled("age") {
      patch.age = input.integer("age")?;
    }
    Ok(patch)
  }

  pub fn is_empty(&self) -> bool { self == &Self::default() }
}

/// Assign `value` into `slot` when set; report whether `slot` changed.
pub(crate) fn overwrite<T: Clone + PartialEq>(
  slot: &mut Option<T>,
  value: &Option<T>,
) -> bool {
  match value {
    Some(v) if slot.as_ref() != Some(v) => {
      *slot = Some(v.clone());
      true
    }
    _ => false,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn stored() -> Person {
    let now = Utc::now();
    Person {
      id:         1,
      first_name: Some("Ada".into()),
      last_name:  Some("Lovelace".into()),
      age:        Some(36),
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn new_person_ignores_unlisted_fields() {
    let input = FieldMap::new()
      .with("first_name", "A")
      .with("last_name", "B")
      .with("age", 30)
      .with("id", 7)
      .with("created_at", "1970-01-01T00:00:00Z");

    let new = NewPerson::from_input(&input).unwrap();
    assert_eq!(new, NewPerson {
      first_name: Some("A".into()),
      last_name:  Some("B".into()),
      age:        Some(30),
    });
  }

  #[test]
  fn new_person_tolerates_missing_fields() {
    let new = NewPerson::from_input(&FieldMap::new()).unwrap();
    assert_eq!(new, NewPerson::default());
  }

  #[test]
  fn patch_skips_empty_fields() {
    let input = FieldMap::new()
      .with("first_name", "")
      .with("last_name", "0")
      .with("age", 31);

    let patch = PersonPatch::from_input(&input).unwrap();
    assert_eq!(patch, PersonPatch { age: Some(31), ..Default::default() });
  }

  #[test]
  fn patch_of_zero_age_is_dropped() {
    let patch = PersonPatch::from_input(&FieldMap::new().with("age", 0)).unwrap();
    assert!(patch.is_empty());
  }

  #[test]
  fn apply_reports_changes() {
    let mut person = stored();
    let patch = PersonPatch { age: Some(37), ..Default::default() };
    assert!(person.apply(&patch));
    assert_eq!(person.age, Some(37));
    assert_eq!(person.first_name.as_deref(), Some("Ada"));
  }

  #[test]
  fn apply_with_same_values_is_clean() {
    let mut person = stored();
    let patch = PersonPatch {
      first_name: Some("Ada".into()),
      ..Default::default()
    };
    assert!(!person.apply(&patch));
    assert!(!person.apply(&PersonPatch::default()));
    assert_eq!(person.first_name.as_deref(), Some("Ada"));
    assert_eq!(person.age, Some(36));
  }
}
