//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Ids, names and numbers map
//! onto native SQLite types and need no conversion.

use chrono::{DateTime, Utc};
use roster_core::{car::Car, person::Person};

use crate::{Error, Result};

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Raw rows ─────────────────────────────────────────────────────────────────

pub const PERSON_COLUMNS: &str =
  "id, first_name, last_name, age, created_at, updated_at";

pub const CAR_COLUMNS: &str =
  "id, year, make, model, colour, license, person_id, created_at, updated_at";

/// A `people` row as read from SQLite, before timestamp parsing.
pub struct RawPerson {
  pub id:         i64,
  pub first_name: Option<String>,
  pub last_name:  Option<String>,
  pub age:        Option<i64>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawPerson {
  /// Map a row selected with [`PERSON_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      first_name: row.get(1)?,
      last_name:  row.get(2)?,
      age:        row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:         self.id,
      first_name: self.first_name,
      last_name:  self.last_name,
      age:        self.age,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// A `cars` row as read from SQLite, before timestamp parsing.
pub struct RawCar {
  pub id:         i64,
  pub year:       Option<i64>,
  pub make:       Option<String>,
  pub model:      Option<String>,
  pub colour:     Option<String>,
  pub license:    Option<String>,
  pub person_id:  Option<i64>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawCar {
  /// Map a row selected with [`CAR_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      year:       row.get(1)?,
      make:       row.get(2)?,
      model:      row.get(3)?,
      colour:     row.get(4)?,
      license:    row.get(5)?,
      person_id:  row.get(6)?,
      created_at: row.get(7)?,
      updated_at: row.get(8)?,
    })
  }

  pub fn into_car(self) -> Result<Car> {
    Ok(Car {
      id:         self.id,
      year:       self.year,
      make:       self.make,
      model:      self.model,
      colour:     self.colour,
      license:    self.license,
      person_id:  self.person_id,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
