//! Bulk field input and the mass-assignment allow-list.
//!
//! A [`FieldMap`] is whatever a client submitted, keyed by field name. Record
//! constructors never read it directly; they first narrow it with
//! [`FieldMap::only`] so that a field outside a record's `FILLABLE` list can
//! never reach a column.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

/// Named input fields from a request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, Value>);

impl FieldMap {
  pub fn new() -> Self { Self::default() }

  /// Builds a map from form-style string pairs.
  pub fn from_strings<I, K, V>(pairs: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    Self(
      pairs
        .into_iter()
        .map(|(k, v)| (k.into(), Value::String(v.into())))
        .collect(),
    )
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
    self.0.insert(key.into(), value.into());
  }

  /// Builder-style [`FieldMap::insert`].
  pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
    self.insert(key, value);
    self
  }

  pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

  pub fn contains(&self, key: &str) -> bool { self.0.contains_key(key) }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  /// Keep only the keys in `allow`; everything else is dropped silently.
  pub fn only(&self, allow: &[&str]) -> Self {
    Self(
      self
        .0
        .iter()
        .filter(|(k, _)| allow.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect(),
    )
  }

  /// True when `key` is present and its value is not empty.
  ///
  /// Empty follows the loose rule the record API has always used: `null`,
  /// `false`, zero, `""`, `"0"`, `[]` and `{}` all count as "not supplied".
  /// A consequence is that an update can never set a field to zero or to the
  /// empty string.
  pub fn is_filled(&self, key: &str) -> bool {
    self.0.get(key).is_some_and(|v| !is_empty_value(v))
  }

  /// Read `key` as text. Numbers are rendered in decimal.
  pub fn text(&self, key: &'static str) -> Result<Option<String>> {
    match self.0.get(key) {
      None | Some(Value::Null) => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.clone())),
      Some(Value::Number(n)) => Ok(Some(n.to_string())),
      Some(other) => Err(Error::InvalidField {
        field:  key,
        reason: format!("expected text, got {}", kind_of(other)),
      }),
    }
  }

  /// Read `key` as an integer. Numeric strings are accepted, so form input
  /// and JSON input behave the same.
  pub fn integer(&self, key: &'static str) -> Result<Option<i64>> {
    let invalid = |reason: String| Error::InvalidField { field: key, reason };
    match self.0.get(key) {
      None | Some(Value::Null) => Ok(None),
      Some(Value::Number(n)) => n
        .as_i64()
        .map(Some)
        .ok_or_else(|| invalid(format!("{n} is not an integer"))),
      Some(Value::String(s)) => s
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| invalid(format!("{s:?} is not an integer"))),
      Some(other) => {
        Err(invalid(format!("expected an integer, got {}", kind_of(other))))
      }
    }
  }
}

impl From<serde_json::Map<String, Value>> for FieldMap {
  fn from(map: serde_json::Map<String, Value>) -> Self {
    Self(map.into_iter().collect())
  }
}

fn is_empty_value(value: &Value) -> bool {
  match value {
    Value::Null => true,
    Value::Bool(b) => !b,
    Value::Number(n) => n.as_f64() == Some(0.0),
    Value::String(s) => s.is_empty() || s == "0",
    Value::Array(a) => a.is_empty(),
    Value::Object(o) => o.is_empty(),
  }
}

fn kind_of(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn only_drops_keys_outside_the_allow_list() {
    let input = FieldMap::new()
      .with("first_name", "Ada")
      .with("id", 99)
      .with("is_admin", true);

    let kept = input.only(&["first_name", "last_name"]);
    assert_eq!(kept.len(), 1);
    assert!(kept.contains("first_name"));
    assert!(!kept.contains("id"));
    assert!(!kept.contains("is_admin"));
  }

  #[test]
  fn empty_values_are_not_filled() {
    let input = FieldMap::new()
      .with("null", Value::Null)
      .with("false", false)
      .with("zero", 0)
      .with("zero_float", 0.0)
      .with("blank", "")
      .with("zero_str", "0")
      .with("array", json!([]))
      .with("object", json!({}));

    for key in ["null", "false", "zero", "zero_float", "blank", "zero_str", "array", "object", "absent"] {
      assert!(!input.is_filled(key), "{key} should count as empty");
    }
  }

  #[test]
  fn non_empty_values_are_filled() {
    let input = FieldMap::new()
      .with("name", "Ada")
      .with("space", " ")
      .with("age", 31)
      .with("age_str", "31")
      .with("yes", true);

    for key in ["name", "space", "age", "age_str", "yes"] {
      assert!(input.is_filled(key), "{key} should count as filled");
    }
  }

  #[test]
  fn integer_accepts_numbers_and_numeric_strings() {
    let input = FieldMap::from_strings([("age", " 42 ")]).with("year", 1999);
    assert_eq!(input.integer("age").unwrap(), Some(42));
    assert_eq!(input.integer("year").unwrap(), Some(1999));
    assert_eq!(input.integer("missing").unwrap(), None);
  }

  #[test]
  fn integer_rejects_garbage() {
    let input = FieldMap::new()
      .with("age", "forty")
      .with("year", 19.5)
      .with("flag", true);

    assert!(matches!(
      input.integer("age"),
      Err(Error::InvalidField { field: "age", .. })
    ));
    assert!(input.integer("year").is_err());
    assert!(input.integer("flag").is_err());
  }

  #[test]
  fn text_renders_numbers_and_rejects_structures() {
    let input = FieldMap::new()
      .with("license", 1234)
      .with("make", "Volvo")
      .with("model", json!(["240"]));

    assert_eq!(input.text("license").unwrap().as_deref(), Some("1234"));
    assert_eq!(input.text("make").unwrap().as_deref(), Some("Volvo"));
    assert!(input.text("model").is_err());
    assert_eq!(input.text("colour").unwrap(), None);
  }

  #[test]
  fn builds_from_json_object() {
    let json = json!({ "first_name": "Ada", "age": 36 });
    let Value::Object(map) = json else { unreachable!() };
    let input = FieldMap::from(map);
    assert_eq!(input.get("age"), Some(&json!(36)));
  }
}
