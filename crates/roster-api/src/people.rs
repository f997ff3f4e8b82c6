//! Handlers for `/people` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/people` | 10 per page; `?page=N` |
//! | `POST` | `/people` | Body: `first_name`, `last_name`, `age`; returns 201 + stored person |
//! | `GET`  | `/people/:person` | 404 if not found |
//! | `PUT`/`PATCH` | `/people/:person` | Any of the body fields; returns [`Envelope`] |
//! | `DELETE` | `/people/:person` | Returns [`Envelope`] holding the deleted person |

use std::sync::Arc;

use axum::{
  Json,
  extract::{OriginalUri, Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  page::PageRequest,
  person::{NewPerson, Person, PersonPatch},
  store::RosterStore,
};
use serde::Deserialize;

use crate::{
  error::ApiError,
  input::Input,
  resolve,
  response::{Envelope, Paginated},
};

/// Page size of `GET /people`.
pub const PER_PAGE: u64 = 10;

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Kept as text so that junk falls back to the first page instead of
  /// failing the request.
  pub page: Option<String>,
}

impl ListParams {
  fn page(&self) -> u64 {
    self
      .page
      .as_deref()
      .and_then(|p| p.trim().parse().ok())
      .unwrap_or(1)
  }
}

/// `GET /people[?page=N]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  OriginalUri(uri): OriginalUri,
  Query(params): Query<ListParams>,
) -> Result<Json<Paginated<Person>>, ApiError>
where
  S: RosterStore,
{
  let page = store
    .list_people(PageRequest::new(params.page(), PER_PAGE))
    .await
    .map_err(ApiError::store)?;
  Ok(Json(Paginated::new(page, uri.path())))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people` — returns 201 + the stored [`Person`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Input(input): Input,
) -> Result<impl IntoResponse, ApiError>
where
  S: RosterStore,
{
  let person = store
    .create_person(NewPerson::from_input(&input)?)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id = person.id, "created person");
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/:person`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Person>, ApiError>
where
  S: RosterStore,
{
  let person = resolve::person(&*store, &raw_id).await?;
  Ok(Json(person))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT|PATCH /people/:person`
///
/// Only non-empty fields are applied. The row is written, and `updated_at`
/// moves, only if a value actually changed.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
  Input(input): Input,
) -> Result<Json<Envelope<Person>>, ApiError>
where
  S: RosterStore,
{
  let mut person = resolve::person(&*store, &raw_id).await?;
  let patch = PersonPatch::from_input(&input)?;

  if person.apply(&patch) {
    person = store.save_person(&person).await.map_err(ApiError::store)?;
    tracing::info!(id = person.id, "updated person");
  } else {
    tracing::debug!(id = person.id, "update changed nothing");
  }

  Ok(Json(Envelope::ok(person)))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/:person` — the response carries the row as it was before
/// deletion.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(raw_id): Path<String>,
) -> Result<Json<Envelope<Person>>, ApiError>
where
  S: RosterStore,
{
  let person = resolve::person(&*store, &raw_id).await?;

  let deleted = store
    .delete_person(person.id)
    .await
    .map_err(ApiError::store)?;
  if !deleted {
    // Lost a race with another delete.
    return Err(ApiError::NotFound(format!("person {raw_id} not found")));
  }

  tracing::info!(id = person.id, "deleted person");
  Ok(Json(Envelope::ok(person)))
}
