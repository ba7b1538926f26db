//! Error-contract mapping: non-2xx responses to error types.

use std::collections::BTreeMap;

use super::{
  IrBuilder,
  responses::{is_error_code, negotiate_content},
};
use crate::{
  ConversionResult,
  ir::{ClassKind, IrArena, Primitive, TypeReference},
  resolver::NameHint,
  uri::PathOperation,
};

/// Registers an error-code to type entry for every non-2xx response carrying
/// a schema.
///
/// Explicit codes are kept as declared. A `default` entry expands into
/// synthetic `4XX` and `5XX` entries wherever no explicit wildcard exists.
/// A response declaring a media type with no schema is skipped silently.
/// Synthetic error types are suffixed with the path segment and status code
/// only when the error schema is not already a named component.
pub(crate) fn build_error_mappings(
  builder: &mut IrBuilder<'_>,
  arena: &mut IrArena,
  segment_hint: &str,
  operation: &PathOperation,
) -> ConversionResult<BTreeMap<String, TypeReference>> {
  let mut mappings = BTreeMap::new();
  let Some(ref responses) = operation.operation.responses else {
    return Ok(mappings);
  };

  let has_explicit_4xx = responses.keys().any(|code| code.eq_ignore_ascii_case("4XX"));
  let has_explicit_5xx = responses.keys().any(|code| code.eq_ignore_ascii_case("5XX"));

  for (code, response_ref) in responses {
    if !is_error_code(code) {
      continue;
    }
    let Ok(response) = response_ref.resolve(builder.spec) else {
      continue;
    };
    let Some(negotiated) = negotiate_content(builder, &response) else {
      continue;
    };
    let Some(schema_ref) = negotiated.schema else {
      continue;
    };

    let normalized = code.to_ascii_uppercase();
    let error_type = if negotiated.binary {
      TypeReference::primitive(Primitive::Binary)
    } else {
      let synthetic_name = if normalized == "DEFAULT" {
        format!("{segment_hint}Error")
      } else {
        format!("{segment_hint}{normalized}Error")
      };
      let hint = NameHint::new(builder.resolver.models_namespace(), synthetic_name);
      builder.resolver.resolve(arena, &hint, &schema_ref)?
    };

    if let Some(class_id) = error_type.as_class() {
      let class = arena.class_mut(class_id);
      if class.kind == ClassKind::Model {
        class.kind = ClassKind::ErrorDefinition;
      }
    }

    if normalized == "DEFAULT" {
      if !has_explicit_4xx {
        mappings.insert("4XX".to_string(), error_type.clone());
      }
      if !has_explicit_5xx {
        mappings.insert("5XX".to_string(), error_type.clone());
      }
    } else {
      mappings.insert(normalized, error_type);
    }
  }

  Ok(mappings)
}
