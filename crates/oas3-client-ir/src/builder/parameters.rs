//! Path and query parameter handling for request-builder methods.

use oas3::spec::{ObjectOrReference, Parameter, ParameterIn};

use super::IrBuilder;
use crate::{
  ConversionResult,
  ir::{CollectionKind, IrArena, Primitive, TypeReference},
  resolver::NameHint,
  uri::PathOperation,
};

/// Operation parameters grouped by location, after merging path-item level
/// declarations (operation-level wins on name+location conflicts).
#[derive(Debug, Clone, Default)]
pub(crate) struct CollectedParameters {
  pub(crate) path: Vec<Parameter>,
  pub(crate) query: Vec<Parameter>,
}

pub(crate) fn collect(builder: &IrBuilder<'_>, operation: &PathOperation) -> CollectedParameters {
  let spec = builder.spec;
  let mut resolved: Vec<Parameter> = Vec::new();

  for param_ref in operation
    .operation
    .parameters
    .iter()
    .chain(operation.path_parameters.iter())
  {
    let Ok(param) = param_ref.resolve(spec) else {
      continue;
    };
    let duplicate = resolved
      .iter()
      .any(|existing| existing.name == param.name && existing.location == param.location);
    if !duplicate {
      resolved.push(param);
    }
  }

  let mut collected = CollectedParameters::default();
  for param in resolved {
    match param.location {
      ParameterIn::Path => collected.path.push(param),
      ParameterIn::Query => collected.query.push(param),
      ParameterIn::Header | ParameterIn::Cookie => {}
    }
  }
  collected
}

/// Resolves a parameter's type.
///
/// A parameter with a `content` map (and no `schema`) takes its type from the
/// sole media type's schema, collapsed to scalar when the schema is an array
/// wrapped by the transport convention. A parameter with neither defaults to
/// string.
pub(crate) fn parameter_type(
  builder: &mut IrBuilder<'_>,
  arena: &mut IrArena,
  param: &Parameter,
) -> ConversionResult<TypeReference> {
  let models_namespace = builder.resolver.models_namespace();
  let hint = NameHint::new(models_namespace, trimmed_parameter_name(&param.name));

  if let Some(ref schema_ref) = param.schema {
    return builder.resolver.resolve(arena, &hint, schema_ref);
  }

  if let Some(ref content) = param.content
    && let Some((_, media_type)) = content.iter().next()
    && let Some(ref schema_ref) = media_type.schema
  {
    let resolved = builder.resolver.resolve(arena, &hint, schema_ref)?;
    // transport-convention array wrapper collapses to its scalar element
    if resolved.collection != CollectionKind::None {
      return Ok(resolved.with_collection(CollectionKind::None));
    }
    return Ok(resolved);
  }

  Ok(TypeReference::primitive(Primitive::String))
}

/// Query parameter names often carry an OData-style `$` prefix; the symbol is
/// built from the trimmed form while the wire name keeps the prefix.
pub(crate) fn trimmed_parameter_name(raw: &str) -> String {
  raw.trim_start_matches('$').to_string()
}

/// True when a path parameter opts into reserved (unencoded) expansion, so
/// its template placeholder uses the `+` operator.
pub(crate) fn allows_reserved_expansion(param: &Parameter) -> bool {
  if param.allow_reserved == Some(true) {
    return true;
  }
  matches!(
    param.schema.as_ref(),
    Some(ObjectOrReference::Object(schema)) if schema.format.as_deref() == Some("uri")
  )
}
