//! Response return-type selection and content negotiation.

use oas3::spec::{ObjectOrReference, ObjectSchema, Response};

use super::IrBuilder;
use crate::{
  ConversionResult,
  ir::{CollectionKind, IrArena, Primitive, TypeReference},
  resolver::NameHint,
  uri::PathOperation,
  utils::media,
};

/// The content entry chosen for a response after applying the configured
/// structured mime-type priorities.
#[derive(Debug, Clone)]
pub(crate) struct NegotiatedContent {
  pub(crate) schema: Option<ObjectOrReference<ObjectSchema>>,
  /// Structured-but-undeserializable content (xml/yaml) degrades to binary.
  pub(crate) binary: bool,
}

/// Picks the best content entry of a response.
///
/// Configured structured mime types are tried in priority order; vendor
/// (`application/vnd...+json`) and parameterized (`;charset=`) declarations
/// match by stripping parameters and suffix comparison. Schema-bearing
/// entries that match nothing configured degrade to a binary payload.
pub(crate) fn negotiate_content(builder: &IrBuilder<'_>, response: &Response) -> Option<NegotiatedContent> {
  for configured in &builder.config.structured_mime_types {
    for (content_type, media_type) in &response.content {
      if media_type.schema.is_some() && media::matches_structured(content_type, configured) {
        return Some(NegotiatedContent {
          schema: media_type.schema.clone(),
          binary: media::is_structured_non_json(content_type),
        });
      }
    }
  }

  response
    .content
    .iter()
    .find(|(_, media_type)| media_type.schema.is_some())
    .map(|(content_type, media_type)| NegotiatedContent {
      schema: media_type.schema.clone(),
      binary: !media::is_json(content_type) && !media::is_plain_text(content_type),
    })
}

/// Selects the executor's return type over the operation's responses.
///
/// Precedence: exact `200` with schema, then explicit 2xx codes ascending,
/// then the `2XX` wildcard, then any other explicit code, then other
/// wildcards, then `default`; no schema anywhere yields a void return. A
/// structurally no-content code (204, 301-304, 307) never forces void while a
/// schema-bearing response exists on another code.
pub(crate) fn select_return_type(
  builder: &mut IrBuilder<'_>,
  arena: &mut IrArena,
  hint_base: &str,
  operation: &PathOperation,
) -> ConversionResult<Option<TypeReference>> {
  let Some(ref responses) = operation.operation.responses else {
    return Ok(None);
  };

  let mut candidates: Vec<(u8, u16, NegotiatedContent)> = Vec::new();
  for (code, response_ref) in responses {
    let Ok(response) = response_ref.resolve(builder.spec) else {
      continue;
    };
    let Some(negotiated) = negotiate_content(builder, &response) else {
      continue;
    };
    let (tier, numeric) = response_rank(&code.to_ascii_uppercase());
    candidates.push((tier, numeric, negotiated));
  }

  // stable sort keeps document order as the last-resort tie-breaker
  candidates.sort_by_key(|(tier, numeric, _)| (*tier, *numeric));
  let Some((_, _, negotiated)) = candidates.into_iter().next() else {
    return Ok(None);
  };

  if negotiated.binary {
    return Ok(Some(TypeReference::primitive(Primitive::Binary)));
  }
  let Some(schema_ref) = negotiated.schema else {
    return Ok(None);
  };

  let hint = NameHint::new(builder.resolver.models_namespace(), format!("{hint_base}Response"));
  let resolved = builder.resolver.resolve(arena, &hint, &schema_ref)?;

  // executor collections deserialize element-wise
  let resolved = if resolved.collection == CollectionKind::None {
    resolved
  } else {
    resolved.with_collection(CollectionKind::Complex)
  };

  Ok(Some(resolved))
}

fn response_rank(code: &str) -> (u8, u16) {
  if code == "200" {
    return (0, 200);
  }
  if let Ok(numeric) = code.parse::<u16>() {
    if (200..300).contains(&numeric) {
      return (1, numeric);
    }
    return (3, numeric);
  }
  match code {
    "2XX" => (2, 0),
    "DEFAULT" => (5, 0),
    _ => (4, 0),
  }
}

/// Builds the ordered accept list for the request generator: configured
/// structured mime types intersected with the media types actually declared,
/// always including error-response content types (except `*/*`).
pub(crate) fn build_accept_list(builder: &IrBuilder<'_>, operation: &PathOperation) -> Vec<String> {
  let Some(ref responses) = operation.operation.responses else {
    return Vec::new();
  };

  let mut present: Vec<String> = Vec::new();
  let mut error_types: Vec<String> = Vec::new();
  for (code, response_ref) in responses {
    let Ok(response) = response_ref.resolve(builder.spec) else {
      continue;
    };
    for content_type in response.content.keys() {
      present.push(content_type.clone());
      if is_error_code(code) {
        error_types.push(content_type.clone());
      }
    }
  }

  let mut accepted: Vec<String> = builder
    .config
    .structured_mime_types
    .iter()
    .filter(|configured| present.iter().any(|declared| media::matches_structured(declared, configured)))
    .cloned()
    .collect();

  for raw in error_types {
    let stripped = media::strip_parameters(&raw);
    if stripped == media::WILDCARD {
      continue;
    }
    let covered = accepted
      .iter()
      .any(|existing| *existing == stripped || media::matches_structured(&raw, existing));
    if !covered {
      accepted.push(stripped);
    }
  }

  accepted
}

pub(crate) fn is_error_code(code: &str) -> bool {
  let upper = code.to_ascii_uppercase();
  upper == "DEFAULT" || upper.starts_with('4') || upper.starts_with('5')
}
