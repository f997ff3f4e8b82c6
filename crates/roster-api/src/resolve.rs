//! Path-parameter resolution.
//!
//! Every handler that names a record in its path calls one of these first.
//! An id that does not parse, or that matches no row, ends the request with
//! 404 before any handler logic runs.

use roster_core::{person::Person, store::RosterStore};

use crate::error::ApiError;

/// Load the person named by the raw `{person}` path segment.
pub async fn person<S>(store: &S, raw_id: &str) -> Result<Person, ApiError>
where
  S: RosterStore,
{
  let not_found = || ApiError::NotFound(format!("person {raw_id} not found"));

  let id: i64 = raw_id.parse().map_err(|_| not_found())?;
  store
    .get_person(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(not_found)
}
