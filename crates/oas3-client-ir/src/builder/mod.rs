//! The IR builder: walks the URI tree crossed with the document's operations
//! and produces namespaces, request-builder classes, indexers, parameter-set
//! classes and per-operation methods.

pub(crate) mod errors;
pub(crate) mod operations;
pub(crate) mod parameters;
pub(crate) mod requests;
pub(crate) mod responses;

use itertools::Itertools;
use oas3::Spec;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};

use crate::{
  ConversionResult,
  config::GenerationConfiguration,
  ir::{
    ClassDef, ClassId, ClassKind, Indexer, IrArena, MethodDef, MethodKind, NamespaceId, ParameterDef, Primitive,
    PropertyDef, PropertyKind, TypeReference,
  },
  metrics::{GenerationStats, GenerationWarning},
  naming::{NameScope, to_member_symbol, to_parameter_symbol, to_type_symbol},
  resolver::SchemaTypeResolver,
  uri::{PathFilterSet, UriNode, build_uri_tree},
};

pub(crate) struct IrBuilder<'a> {
  pub(crate) spec: &'a Spec,
  pub(crate) config: &'a GenerationConfiguration,
  pub(crate) resolver: SchemaTypeResolver<'a>,
  pub(crate) stats: GenerationStats,
}

pub(crate) struct BuildOutput {
  pub(crate) root_namespace: NamespaceId,
  pub(crate) models_namespace: NamespaceId,
  pub(crate) root_class: ClassId,
  pub(crate) stats: GenerationStats,
}

/// Builds the IR for one document. Even a structurally empty document yields
/// a minimal valid IR holding the single root client class.
pub(crate) fn build(spec: &Spec, config: &GenerationConfiguration, arena: &mut IrArena) -> ConversionResult<BuildOutput> {
  let (filters, filter_warnings) = PathFilterSet::new(&config.include_patterns, &config.exclude_patterns);
  let tree = build_uri_tree(spec, &filters);

  let root_namespace = arena.add_root_namespace(&config.client_namespace_name);
  let resolver = SchemaTypeResolver::new(spec, config, arena, root_namespace);
  let models_namespace = resolver.models_namespace();

  let mut builder = IrBuilder {
    spec,
    config,
    resolver,
    stats: GenerationStats::default(),
  };
  builder.stats.record_warnings(filter_warnings);

  // materialize every component schema first, as the linker verifies
  // discriminator mappings against the full set; unused ones are swept away
  // by the reachability pass
  if let Some(ref components) = spec.components {
    for name in components.schemas.keys() {
      if let Err(error) = builder.resolver.resolve_component(arena, name) {
        builder.stats.record_warning(GenerationWarning::SchemaConversionFailed {
          schema_name: name.clone(),
          error: error.to_string(),
        });
      }
    }
  }

  let root_class = builder.create_client_class(arena, root_namespace)?;
  for operation in &tree.operations {
    operations::build_operation_methods(&mut builder, arena, root_namespace, root_class, &tree, operation)?;
  }
  builder.build_child_builders(arena, root_namespace, root_class, &tree)?;

  let resolver_warnings = builder.resolver.take_warnings();
  builder.stats.record_warnings(resolver_warnings);

  Ok(BuildOutput {
    root_namespace,
    models_namespace,
    root_class,
    stats: builder.stats,
  })
}

impl<'a> IrBuilder<'a> {
  fn create_client_class(&mut self, arena: &mut IrArena, namespace: NamespaceId) -> ConversionResult<ClassId> {
    let name = arena.claim_type_name(namespace, &to_type_symbol(&self.config.client_class_name));
    let id = arena.add_class(ClassDef::new(name, ClassKind::RequestBuilder, namespace));
    self.stats.record_request_builder();

    let class = arena.class_mut(id);
    class.properties.push(
      PropertyDef::builder()
        .name("UrlTemplate")
        .wire_name("urlTemplate")
        .kind(PropertyKind::UrlTemplate)
        .type_ref(TypeReference::primitive(Primitive::String))
        .read_only(true)
        .default_value(serde_json::Value::String("{+baseurl}".to_string()))
        .build(),
    );
    class.methods.push(
      MethodDef::builder()
        .name("constructor")
        .kind(MethodKind::ClientConstructor)
        .parameters(vec![
          ParameterDef::builder()
            .name("baseUrl")
            .wire_name("baseurl")
            .type_ref(TypeReference::primitive(Primitive::String))
            .build(),
        ])
        .build(),
    );

    Ok(id)
  }

  /// Recursively materializes the builders below `node`, linking each one to
  /// its parent. A node whose only child is a single bracketed path
  /// parameter becomes an indexer instead of a link.
  fn build_child_builders(
    &mut self,
    arena: &mut IrArena,
    namespace: NamespaceId,
    class_id: ClassId,
    node: &UriNode,
  ) -> ConversionResult<()> {
    if let Some(param_child) = node.single_parameter_child() {
      let param_child = param_child.clone();
      let item_namespace = arena.ensure_namespace(namespace, "item");
      let item_base = item_builder_base_name(node);
      let item_class = self.create_request_builder(arena, item_namespace, &param_child, &item_base)?;

      let parameter_name = param_child.parameter_name().unwrap_or_default().to_string();
      let parameter_type = self.declared_path_parameter_type(arena, &param_child, &parameter_name)?;
      arena.class_mut(class_id).indexer = Some(Indexer {
        parameter_name: to_parameter_symbol(&parameter_name),
        parameter_type,
        description: None,
        nullable: false,
        return_class: item_class,
      });
      self.stats.record_indexer();

      return self.build_child_builders(arena, item_namespace, item_class, &param_child);
    }

    let children: Vec<UriNode> = node.children.values().cloned().collect();
    for child in children {
      let segment_namespace = child.cleaned_segment().to_ascii_lowercase();
      let child_namespace = arena.ensure_namespace(namespace, &segment_namespace);
      let base_name = builder_base_name(&child);
      let child_class = self.create_request_builder(arena, child_namespace, &child, &base_name)?;

      let link_name = claim_property_name(arena, class_id, &to_member_symbol(&child.cleaned_segment()));
      arena.class_mut(class_id).properties.push(
        PropertyDef::builder()
          .name(link_name)
          .wire_name(child.segment.clone())
          .kind(PropertyKind::RequestBuilderLink)
          .type_ref(TypeReference::class(child_class))
          .read_only(true)
          .build(),
      );

      self.build_child_builders(arena, child_namespace, child_class, &child)?;
    }

    Ok(())
  }

  /// Creates one request-builder class: URL template, path-parameter
  /// properties, a constructor, and one executor/generator pair per
  /// operation.
  fn create_request_builder(
    &mut self,
    arena: &mut IrArena,
    namespace: NamespaceId,
    node: &UriNode,
    base_name: &str,
  ) -> ConversionResult<ClassId> {
    let name = arena.claim_type_name(namespace, &format!("{}RequestBuilder", to_type_symbol(base_name)));
    let id = arena.add_class(ClassDef::new(name, ClassKind::RequestBuilder, namespace));
    self.stats.record_request_builder();

    let template = self.build_url_template(node);
    let mut scope = NameScope::new();
    let mut properties = vec![
      PropertyDef::builder()
        .name(scope.claim("UrlTemplate"))
        .wire_name("urlTemplate")
        .kind(PropertyKind::UrlTemplate)
        .type_ref(TypeReference::primitive(Primitive::String))
        .read_only(true)
        .default_value(serde_json::Value::String(template))
        .build(),
    ];

    // one constructor parameter per template variable; undeclared variables
    // synthesize a string parameter
    let mut constructor_params = Vec::new();
    for variable in template_variables(&node.path) {
      let parameter_type = self.declared_path_parameter_type(arena, node, &variable)?;
      properties.push(
        PropertyDef::builder()
          .name(scope.claim(&to_member_symbol(&variable)))
          .wire_name(variable.clone())
          .kind(PropertyKind::PathParameter)
          .type_ref(parameter_type.clone())
          .build(),
      );
      constructor_params.push(
        ParameterDef::builder()
          .name(to_parameter_symbol(&variable))
          .wire_name(variable)
          .type_ref(parameter_type)
          .build(),
      );
    }

    let class = arena.class_mut(id);
    class.properties = properties;
    class.methods.push(
      MethodDef::builder()
        .name("constructor")
        .kind(MethodKind::Constructor)
        .parameters(constructor_params)
        .build(),
    );

    for operation in &node.operations {
      operations::build_operation_methods(self, arena, namespace, id, node, operation)?;
    }

    Ok(id)
  }

  /// The type of a declared path parameter, string when undeclared.
  fn declared_path_parameter_type(
    &mut self,
    arena: &mut IrArena,
    node: &UriNode,
    variable: &str,
  ) -> ConversionResult<TypeReference> {
    for operation in &node.operations {
      let collected = parameters::collect(self, operation);
      if let Some(param) = collected.path.iter().find(|p| p.name == variable) {
        return parameters::parameter_type(self, arena, param);
      }
    }
    Ok(TypeReference::primitive(Primitive::String))
  }

  /// Renders the node's RFC 6570 template: `{+baseurl}` plus each path
  /// segment, with reserved parameters using the unencoded expansion operator
  /// and a trailing query-parameter expression when any operation declares
  /// query parameters.
  fn build_url_template(&self, node: &UriNode) -> String {
    let mut template = String::from("{+baseurl}");

    for segment in node.path.split('/').filter(|s| !s.is_empty()) {
      template.push('/');
      if segment.starts_with('{') && segment.ends_with('}') {
        let variable = segment.trim_start_matches('{').trim_end_matches('}');
        template.push('{');
        if self.is_reserved_path_parameter(node, variable) {
          template.push('+');
        }
        template.push_str(&encode_template_variable(variable));
        template.push('}');
      } else {
        template.push_str(segment);
      }
    }

    let query_names: Vec<String> = node
      .operations
      .iter()
      .flat_map(|operation| parameters::collect(self, operation).query)
      .map(|param| param.name)
      .sorted()
      .dedup()
      .collect();
    if !query_names.is_empty() {
      template.push_str(&format!("{{?{}}}", query_names.join(",")));
    }

    template
  }

  fn is_reserved_path_parameter(&self, node: &UriNode, variable: &str) -> bool {
    node.operations.iter().any(|operation| {
      parameters::collect(self, operation)
        .path
        .iter()
        .any(|param| param.name == variable && parameters::allows_reserved_expansion(param))
    })
  }
}

/// `tasks` -> `Tasks`; a bracketed segment outside the indexer shape gets a
/// `With` prefix (`{id}` -> `WithId`).
fn builder_base_name(node: &UriNode) -> String {
  let cleaned = node.cleaned_segment();
  if node.is_parameter_segment() {
    format!("With{}", to_type_symbol(&cleaned))
  } else {
    to_type_symbol(&cleaned)
  }
}

/// The item-builder name for an indexer below `node`: `tasks` -> `TaskItem`.
fn item_builder_base_name(node: &UriNode) -> String {
  let cleaned = node.cleaned_segment();
  if cleaned.is_empty() {
    "Item".to_string()
  } else {
    format!("{}Item", to_type_symbol(&cruet::to_singular(&cleaned)))
  }
}

/// Template variables in path order, deduplicated.
fn template_variables(path: &str) -> Vec<String> {
  let mut variables = Vec::new();
  for segment in path.split('/') {
    if segment.starts_with('{') && segment.ends_with('}') {
      let variable = segment.trim_start_matches('{').trim_end_matches('}').to_string();
      if !variables.contains(&variable) {
        variables.push(variable);
      }
    }
  }
  variables
}

/// Percent-encodes a template variable name so symbol-invalid characters
/// survive inside the template (`task-id` -> `task%2Did`).
fn encode_template_variable(variable: &str) -> String {
  utf8_percent_encode(variable, NON_ALPHANUMERIC).to_string()
}

/// Claims a property symbol against the names a class already uses.
fn claim_property_name(arena: &IrArena, class_id: ClassId, candidate: &str) -> String {
  let mut scope = NameScope::new();
  for property in &arena.class(class_id).properties {
    scope.claim(&property.name);
  }
  scope.claim(candidate)
}

#[cfg(test)]
mod tests;
