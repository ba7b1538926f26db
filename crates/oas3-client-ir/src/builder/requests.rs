//! Request body content-type selection and body parameter typing.

use super::IrBuilder;
use crate::{
  ConversionResult,
  ir::{IrArena, ParameterDef, Primitive, TypeReference},
  resolver::NameHint,
  uri::PathOperation,
  utils::media,
};

#[derive(Debug, Clone)]
pub(crate) struct RequestBodyInfo {
  pub(crate) parameter: ParameterDef,
  pub(crate) content_type: String,
}

/// Selects the request body's content type and builds the body parameter.
///
/// Among multiple declared content types, `multipart/form-data` is preferred
/// whenever the configured mime priorities bless multipart at all; otherwise
/// the declared type with the best priority wins. A multipart body collapses
/// to the dedicated multipart primitive regardless of the declared schema.
pub(crate) fn select_request_body(
  builder: &mut IrBuilder<'_>,
  arena: &mut IrArena,
  hint_base: &str,
  operation: &PathOperation,
) -> ConversionResult<Option<RequestBodyInfo>> {
  let Some(body_ref) = operation.operation.request_body.as_ref() else {
    return Ok(None);
  };
  let Ok(body) = body_ref.resolve(builder.spec) else {
    return Ok(None);
  };
  if body.content.is_empty() {
    return Ok(None);
  }

  let declared: Vec<&String> = body.content.keys().collect();
  let chosen = choose_content_type(builder, &declared).clone();

  let type_ref = if media::is_multipart(&chosen) {
    TypeReference::primitive(Primitive::MultipartBody)
  } else {
    let media_type = &body.content[&chosen];
    match media_type.schema {
      Some(ref schema_ref) => {
        let hint = NameHint::new(builder.resolver.models_namespace(), format!("{hint_base}RequestBody"));
        builder.resolver.resolve(arena, &hint, schema_ref)?
      }
      // content declared without a schema degrades to a raw payload
      None => TypeReference::primitive(Primitive::Binary),
    }
  };

  let parameter = ParameterDef::builder()
    .name("body")
    .wire_name("body")
    .type_ref(type_ref)
    .optional(!body.required.unwrap_or(false))
    .maybe_description(body.description.clone())
    .build();

  Ok(Some(RequestBodyInfo {
    parameter,
    content_type: media::strip_parameters(&chosen),
  }))
}

fn choose_content_type<'k>(builder: &IrBuilder<'_>, declared: &[&'k String]) -> &'k String {
  if declared.len() == 1 {
    return declared[0];
  }

  let multipart_declared = declared.iter().find(|ct| media::is_multipart(ct));
  let multipart_blessed = builder.config.mime_priority(media::MULTIPART_FORM_DATA).is_some();
  if let Some(multipart) = multipart_declared
    && multipart_blessed
  {
    return multipart;
  }

  declared
    .iter()
    .min_by_key(|ct| builder.config.mime_priority(ct).unwrap_or(usize::MAX))
    .copied()
    .unwrap_or(declared[0])
}
