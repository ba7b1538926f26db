//! Per-operation method construction: executors, generators and the
//! parameter-set classes backing them.

use http::Method;
use oas3::spec::Parameter;

use super::{IrBuilder, errors, parameters, requests, responses};
use crate::{
  ConversionResult,
  ir::{ClassDef, ClassId, ClassKind, IrArena, MethodDef, MethodKind, NamespaceId, ParameterDef, PropertyDef,
       PropertyKind, TypeReference},
  naming::{NameScope, escape_reserved_member, to_member_symbol, to_type_symbol},
  uri::{PathOperation, UriNode},
  utils::extensions::paging_link,
};

/// `GET` -> `Get`, `POST` -> `Post`.
pub(crate) fn method_symbol(method: &Method) -> String {
  let lower = method.as_str().to_ascii_lowercase();
  let mut chars = lower.chars();
  match chars.next() {
    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
    None => String::new(),
  }
}

/// Builds the executor and generator pair for one HTTP operation, together
/// with its query-parameter and request-configuration classes.
pub(crate) fn build_operation_methods(
  builder: &mut IrBuilder<'_>,
  arena: &mut IrArena,
  namespace: NamespaceId,
  class_id: ClassId,
  node: &UriNode,
  operation: &PathOperation,
) -> ConversionResult<()> {
  let builder_class_name = arena.class(class_id).name.clone();
  let method_name = method_symbol(&operation.method);
  let hint_base = format!(
    "{}{}",
    builder_class_name.trim_end_matches("RequestBuilder"),
    method_name
  );

  let collected = parameters::collect(builder, operation);

  let mut method_params: Vec<ParameterDef> = Vec::new();

  let body = requests::select_request_body(builder, arena, &hint_base, operation)?;
  if let Some(ref info) = body {
    method_params.push(info.parameter.clone());
  }

  if !collected.query.is_empty() {
    let query_class = build_query_parameter_class(builder, arena, namespace, &hint_base, &collected.query)?;
    let config_class = build_request_configuration_class(arena, namespace, &hint_base, query_class);
    method_params.push(
      ParameterDef::builder()
        .name("requestConfiguration")
        .wire_name("requestConfiguration")
        .type_ref(TypeReference::class(config_class))
        .optional(true)
        .build(),
    );
  }

  let return_type = responses::select_return_type(builder, arena, &hint_base, operation)?;
  let accept_list = responses::build_accept_list(builder, operation);
  let segment_hint = segment_error_hint(node, &builder_class_name);
  let error_mappings = errors::build_error_mappings(builder, arena, &segment_hint, operation)?;
  let paging = paging_link(&operation.operation.extensions);
  let content_type = body.as_ref().map(|info| info.content_type.clone());
  let description = operation
    .operation
    .summary
    .clone()
    .or_else(|| operation.operation.description.clone());
  let deprecated = operation.operation.deprecated.unwrap_or(false);

  let executor = MethodDef::builder()
    .name(method_name.clone())
    .kind(MethodKind::RequestExecutor)
    .http_method(operation.method.clone())
    .parameters(method_params.clone())
    .maybe_return_type(return_type)
    .error_mappings(error_mappings)
    .maybe_paging_link(paging)
    .acceptable_media_types(accept_list.clone())
    .maybe_request_content_type(content_type.clone())
    .maybe_description(description)
    .deprecated(deprecated)
    .build();

  let generator = MethodDef::builder()
    .name(format!("To{method_name}RequestInformation"))
    .kind(MethodKind::RequestGenerator)
    .http_method(operation.method.clone())
    .parameters(method_params)
    .acceptable_media_types(accept_list)
    .maybe_request_content_type(content_type)
    .deprecated(deprecated)
    .build();

  let class = arena.class_mut(class_id);
  class.methods.push(executor);
  class.methods.push(generator);
  builder.stats.record_operation();
  Ok(())
}

/// Synthetic error types are named after the deepest literal path segment;
/// the builder name stands in at the root.
fn segment_error_hint(node: &UriNode, builder_class_name: &str) -> String {
  let cleaned = node.cleaned_segment();
  if cleaned.is_empty() {
    builder_class_name.trim_end_matches("RequestBuilder").to_string()
  } else {
    to_type_symbol(&cleaned)
  }
}

fn build_query_parameter_class(
  builder: &mut IrBuilder<'_>,
  arena: &mut IrArena,
  namespace: NamespaceId,
  hint_base: &str,
  query: &[Parameter],
) -> ConversionResult<ClassId> {
  let name = arena.claim_type_name(namespace, &format!("{hint_base}QueryParameters"));
  let id = arena.add_class(ClassDef::new(name, ClassKind::QueryParameterSet, namespace));

  let mut scope = NameScope::new();
  let mut properties = Vec::new();
  for param in query {
    let type_ref = parameters::parameter_type(builder, arena, param)?;
    let trimmed = parameters::trimmed_parameter_name(&param.name);
    let symbol = scope.claim(&escape_reserved_member(&to_member_symbol(&trimmed)));

    properties.push(
      PropertyDef::builder()
        .name(symbol)
        .wire_name(param.name.clone())
        .kind(PropertyKind::Custom)
        .type_ref(type_ref.with_nullable(!param.required.unwrap_or(false)))
        .maybe_description(param.description.clone())
        .build(),
    );
  }

  arena.class_mut(id).properties = properties;
  Ok(id)
}

fn build_request_configuration_class(
  arena: &mut IrArena,
  namespace: NamespaceId,
  hint_base: &str,
  query_class: ClassId,
) -> ClassId {
  let name = arena.claim_type_name(namespace, &format!("{hint_base}RequestConfiguration"));
  let id = arena.add_class(ClassDef::new(name, ClassKind::ParameterSet, namespace));

  arena.class_mut(id).properties.push(
    PropertyDef::builder()
      .name("QueryParameters")
      .wire_name("queryParameters")
      .kind(PropertyKind::Custom)
      .type_ref(TypeReference::class(query_class))
      .build(),
  );

  id
}
