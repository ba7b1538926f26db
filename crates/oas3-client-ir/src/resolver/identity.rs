use std::{cmp::Ordering, hash::Hash};

use anyhow::Context;
use json_canon::to_string as to_canonical_json;
use oas3::spec::ObjectSchema;
use serde_json::Value;

/// Identity of a schema for memoization: either the component name it was
/// registered under, or the canonical form of an anonymous inline schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum SchemaKey {
  Component(String),
  Canonical(CanonicalSchema),
}

impl SchemaKey {
  pub(crate) fn component(name: &str) -> Self {
    Self::Component(name.to_string())
  }

  pub(crate) fn canonical(schema: &ObjectSchema) -> anyhow::Result<Self> {
    Ok(Self::Canonical(CanonicalSchema::from_schema(schema)?))
  }

  pub(crate) fn component_name(&self) -> Option<&str> {
    match self {
      Self::Component(name) => Some(name),
      Self::Canonical(_) => None,
    }
  }
}

/// Opaque representation of a schema's canonical form.
///
/// Normalizes order-independent arrays (`required`, `type`, `enum`) so two
/// semantically identical inline schemas produce the same identity and are
/// never resolved into two distinct classes.
#[derive(Debug, Clone, Eq)]
pub(crate) struct CanonicalSchema(String);

impl CanonicalSchema {
  /// Serializes the schema to JSON, sorts order-independent string arrays,
  /// then converts to RFC 8785 canonical JSON.
  pub(crate) fn from_schema(schema: &ObjectSchema) -> anyhow::Result<Self> {
    let mut value = serde_json::to_value(schema).context("Failed to serialize schema for canonicalization")?;

    normalize_schema_semantics(&mut value);

    let canonical_json = to_canonical_json(&value).context("Failed to create canonical JSON string")?;

    Ok(CanonicalSchema(canonical_json))
  }
}

impl PartialEq for CanonicalSchema {
  fn eq(&self, other: &Self) -> bool {
    self.0 == other.0
  }
}

impl PartialOrd for CanonicalSchema {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for CanonicalSchema {
  fn cmp(&self, other: &Self) -> Ordering {
    self.0.cmp(&other.0)
  }
}

impl Hash for CanonicalSchema {
  /// Hashes the BLAKE3 digest of the canonical JSON rather than the full
  /// string, since inline schemas can be large.
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    let hash = blake3::hash(self.0.as_bytes());
    hash.as_bytes().hash(state);
  }
}

/// Sorts order-independent JSON Schema arrays in-place for canonical
/// comparison. Arrays containing non-string elements are left untouched to
/// avoid corrupting `oneOf`/`anyOf` structures.
fn normalize_schema_semantics(value: &mut Value) {
  match value {
    Value::Object(map) => {
      for field in ["required", "type", "enum"] {
        if let Some(Value::Array(arr)) = map.get_mut(field) {
          sort_string_array_in_place(arr);
        }
      }

      for value in map.values_mut() {
        normalize_schema_semantics(value);
      }
    }
    Value::Array(arr) => {
      for item in arr {
        normalize_schema_semantics(item);
      }
    }
    _ => {}
  }
}

fn sort_string_array_in_place(arr: &mut Vec<Value>) {
  let mut strings: Vec<String> = arr.iter().filter_map(|v| v.as_str().map(String::from)).collect();

  if strings.len() == arr.len() {
    strings.sort_unstable();
    *arr = strings.into_iter().map(Value::String).collect();
  }
}
