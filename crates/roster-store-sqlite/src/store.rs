//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  car::{Car, NewCar},
  page::{Page, PageRequest},
  person::{NewPerson, Person},
  store::RosterStore,
};

use crate::{
  encode::{CAR_COLUMNS, PERSON_COLUMNS, RawCar, RawPerson, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Count `table` and read one page of it in ascending id order.
  async fn fetch_page<R, T>(
    &self,
    table:    &'static str,
    columns:  &'static str,
    request:  PageRequest,
    from_row: fn(&rusqlite::Row<'_>) -> rusqlite::Result<R>,
    convert:  fn(R) -> Result<T>,
  ) -> Result<Page<T>>
  where
    R: Send + 'static,
  {
    let limit  = i64::try_from(request.per_page).unwrap_or(i64::MAX);
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);

    let (total, raws): (i64, Vec<R>) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM {table}"),
          [],
          |r| r.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {columns} FROM {table} ORDER BY id LIMIT ?1 OFFSET ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let items = raws.into_iter().map(convert).collect::<Result<_>>()?;
    Ok(Page::new(items, total.unsigned_abs(), request))
  }

  async fn delete_row(&self, table: &'static str, id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {table} WHERE id = ?1"),
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn list_people(&self, page: PageRequest) -> Result<Page<Person>> {
    self
      .fetch_page("people", PERSON_COLUMNS, page, RawPerson::from_row, RawPerson::into_person)
      .await
  }

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let at_str = encode_dt(Utc::now());

    let raw: RawPerson = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO people (first_name, last_name, age, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING {PERSON_COLUMNS}"
          ),
          rusqlite::params![input.first_name, input.last_name, input.age, at_str],
          RawPerson::from_row,
        )?)
      })
      .await?;

    raw.into_person()
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM people WHERE id = ?1"),
            rusqlite::params![id],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn save_person(&self, person: &Person) -> Result<Person> {
    let id         = person.id;
    let first_name = person.first_name.clone();
    let last_name  = person.last_name.clone();
    let age        = person.age;
    let at_str     = encode_dt(Utc::now());

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE people
               SET first_name = ?1, last_name = ?2, age = ?3, updated_at = ?4
               WHERE id = ?5
               RETURNING {PERSON_COLUMNS}"
            ),
            rusqlite::params![first_name, last_name, age, at_str, id],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .ok_or(roster_core::Error::PersonNotFound(id))?
      .into_person()
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    self.delete_row("people", id).await
  }

  // ── Cars ──────────────────────────────────────────────────────────────────

  async fn list_cars(&self, page: PageRequest) -> Result<Page<Car>> {
    self
      .fetch_page("cars", CAR_COLUMNS, page, RawCar::from_row, RawCar::into_car)
      .await
  }

  async fn create_car(&self, input: NewCar) -> Result<Car> {
    let at_str = encode_dt(Utc::now());

    let raw: RawCar = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO cars (
               year, make, model, colour, license, person_id, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
             RETURNING {CAR_COLUMNS}"
          ),
          rusqlite::params![
            input.year,
            input.make,
            input.model,
            input.colour,
            input.license,
            input.person_id,
            at_str,
          ],
          RawCar::from_row,
        )?)
      })
      .await?;

    raw.into_car()
  }

  async fn get_car(&self, id: i64) -> Result<Option<Car>> {
    let raw: Option<RawCar> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {CAR_COLUMNS} FROM cars WHERE id = ?1"),
            rusqlite::params![id],
            RawCar::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCar::into_car).transpose()
  }

  async fn save_car(&self, car: &Car) -> Result<Car> {
    let id      = car.id;
    let year    = car.year;
    let make    = car.make.clone();
    let model   = car.model.clone();
    let colour  = car.colour.clone();
    let license = car.license.clone();
    let at_str  = encode_dt(Utc::now());

    let raw: Option<RawCar> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE cars
               SET year = ?1, make = ?2, model = ?3, colour = ?4, license = ?5,
                   updated_at = ?6
               WHERE id = ?7
               RETURNING {CAR_COLUMNS}"
            ),
            rusqlite::params![year, make, model, colour, license, at_str, id],
            RawCar::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.ok_or(roster_core::Error::CarNotFound(id))?.into_car()
  }

  async fn delete_car(&self, id: i64) -> Result<bool> {
    self.delete_row("cars", id).await
  }

  // ── Relation ──────────────────────────────────────────────────────────────

  async fn owner_of(&self, car: &Car) -> Result<Option<Person>> {
    match car.person_id {
      Some(person_id) => self.get_person(person_id).await,
      None            => Ok(None),
    }
  }

  async fn cars_of(&self, person_id: i64) -> Result<Vec<Car>> {
    let raws: Vec<RawCar> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {CAR_COLUMNS} FROM cars WHERE person_id = ?1 ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![person_id], RawCar::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCar::into_car).collect()
  }

  async fn associate_owner(
    &self,
    car_id:    i64,
    person_id: Option<i64>,
  ) -> Result<Car> {
    let at_str = encode_dt(Utc::now());

    let raw: Option<RawCar> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!(
              "UPDATE cars SET person_id = ?1, updated_at = ?2
               WHERE id = ?3
               RETURNING {CAR_COLUMNS}"
            ),
            rusqlite::params![person_id, at_str, car_id],
            RawCar::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.ok_or(roster_core::Error::CarNotFound(car_id))?.into_car()
  }
}
