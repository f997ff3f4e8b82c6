//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend;
//! the backend handle is passed in explicitly rather than reached through
//! global state.

use std::future::Future;

use crate::{
  car::{Car, NewCar},
  page::{Page, PageRequest},
  person::{NewPerson, Person},
};

/// Abstraction over a Roster store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`). There is no locking between
/// concurrent writers: the last save wins.
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// One page of people in ascending id order.
  fn list_people(
    &self,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Person>, Self::Error>> + Send + '_;

  /// Insert a person. The store assigns the id and both timestamps.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Write the fillable columns of `person` back and stamp `updated_at`.
  /// Returns the stored row; fails if the row no longer exists.
  fn save_person<'a>(
    &'a self,
    person: &'a Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + 'a;

  /// Returns `false` if there was nothing to delete.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Cars ──────────────────────────────────────────────────────────────

  fn list_cars(
    &self,
    page: PageRequest,
  ) -> impl Future<Output = Result<Page<Car>, Self::Error>> + Send + '_;

  /// Insert a car. A set `person_id` must reference an existing person.
  fn create_car(
    &self,
    input: NewCar,
  ) -> impl Future<Output = Result<Car, Self::Error>> + Send + '_;

  fn get_car(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Car>, Self::Error>> + Send + '_;

  /// Write the fillable columns of `car` back and stamp `updated_at`.
  /// Ownership is not touched; see [`RosterStore::associate_owner`].
  fn save_car<'a>(
    &'a self,
    car: &'a Car,
  ) -> impl Future<Output = Result<Car, Self::Error>> + Send + 'a;

  fn delete_car(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Relation ──────────────────────────────────────────────────────────

  /// The person a car belongs to, or `None` when `person_id` is unset or
  /// points at nobody.
  fn owner_of<'a>(
    &'a self,
    car: &'a Car,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// All cars owned by `person_id`, in ascending id order.
  fn cars_of(
    &self,
    person_id: i64,
  ) -> impl Future<Output = Result<Vec<Car>, Self::Error>> + Send + '_;

  /// Set (or clear, with `None`) the owner of a car.
  fn associate_owner(
    &self,
    car_id: i64,
    person_id: Option<i64>,
  ) -> impl Future<Output = Result<Car, Self::Error>> + Send + '_;
}
