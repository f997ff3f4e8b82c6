//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  PersonNotFound(i64),

  #[error("car not found: {0}")]
  CarNotFound(i64),

  /// A submitted field could not be read as the column's type.
  #[error("invalid value for `{field}`: {reason}")]
  InvalidField {
    field:  &'static str,
    reason: String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
