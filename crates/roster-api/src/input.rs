//! The [`Input`] extractor: named body fields, from a form or a JSON object.

use axum::{
  Form,
  body::Bytes,
  extract::{FromRequest, Request},
  http::header,
};
use roster_core::fields::FieldMap;
use serde_json::Value;

use crate::error::ApiError;

/// Request body fields, whatever encoding the client chose.
///
/// - `application/x-www-form-urlencoded` → every value is a string.
/// - anything else → the body must be a JSON object.
/// - an empty body → no fields.
#[derive(Debug, Clone, Default)]
pub struct Input(pub FieldMap);

impl<S> FromRequest<S> for Input
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let is_form = req
      .headers()
      .get(header::CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

    if is_form {
      let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      return Ok(Self(FieldMap::from_strings(pairs)));
    }

    let body = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if body.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self::default());
    }

    match serde_json::from_slice::<Value>(&body) {
      Ok(Value::Object(map)) => Ok(Self(FieldMap::from(map))),
      Ok(_) => Err(ApiError::BadRequest("body must be a JSON object".into())),
      Err(e) => Err(ApiError::BadRequest(format!("malformed JSON body: {e}"))),
    }
  }
}
