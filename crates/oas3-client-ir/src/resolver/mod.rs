//! The schema type resolver: given a schema node, returns (or reuses) a
//! language-neutral type reference. Resolution is memoized by schema identity
//! for the lifetime of one generation invocation, so the same schema never
//! produces two distinct classes.

pub(crate) mod composition;
pub(crate) mod identity;
pub(crate) mod primitives;

use std::collections::{BTreeMap, BTreeSet};

pub(crate) use identity::SchemaKey;
use oas3::{
  Spec,
  spec::{ObjectOrReference, ObjectSchema, Schema, SchemaType, SchemaTypeSet},
};

use crate::{
  ConversionResult,
  config::GenerationConfiguration,
  ir::{
    Capability, ClassDef, ClassId, ClassKind, CollectionKind, EnumOption, EnumerationDef, IrArena, MethodDef,
    MethodKind, NamespaceId, ParameterDef, PropertyDef, PropertyKind, RawDiscriminator, TypeKind, TypeReference,
  },
  metrics::GenerationWarning,
  naming::{NameScope, common_namespace_prefix, escape_reserved_member, prefix::strip_prefix, to_member_symbol, to_type_symbol},
  utils::{
    SchemaExt,
    extensions::{EXT_FLAGS_ENUM, EXT_PRIMARY_ERROR_MESSAGE, bool_extension},
    extract_schema_ref_name, parse_schema_ref_path,
  },
};

/// Where a synthesized type should live and what to call it, when the schema
/// has no component name of its own.
#[derive(Debug, Clone)]
pub(crate) struct NameHint {
  pub(crate) namespace: NamespaceId,
  pub(crate) base_name: String,
}

impl NameHint {
  pub(crate) fn new(namespace: NamespaceId, base_name: impl Into<String>) -> Self {
    Self {
      namespace,
      base_name: base_name.into(),
    }
  }

  /// A hint for a member of this hint's owner (`TaskDetails` -> property
  /// `settings` -> `TaskDetailsSettings`).
  pub(crate) fn member(&self, member: &str) -> Self {
    Self {
      namespace: self.namespace,
      base_name: format!("{}{}", self.base_name, to_member_symbol(member)),
    }
  }
}

pub(crate) struct SchemaTypeResolver<'a> {
  spec: &'a Spec,
  config: &'a GenerationConfiguration,
  models_namespace: NamespaceId,
  common_prefix: String,
  cache: BTreeMap<SchemaKey, TypeReference>,
  in_progress: BTreeSet<SchemaKey>,
  enum_value_cache: BTreeMap<Vec<String>, crate::ir::EnumId>,
  /// base component name -> components that list it in their `allOf`.
  derived_index: BTreeMap<String, Vec<String>>,
  pub(crate) warnings: Vec<GenerationWarning>,
}

impl<'a> SchemaTypeResolver<'a> {
  pub(crate) fn new(
    spec: &'a Spec,
    config: &'a GenerationConfiguration,
    arena: &mut IrArena,
    root: NamespaceId,
  ) -> Self {
    let common_prefix = match spec.components.as_ref() {
      Some(components) => common_namespace_prefix(components.schemas.keys().map(String::as_str)),
      None => String::new(),
    };
    let models_namespace = arena.ensure_namespace(root, "models");

    Self {
      spec,
      config,
      models_namespace,
      common_prefix,
      cache: BTreeMap::new(),
      in_progress: BTreeSet::new(),
      enum_value_cache: BTreeMap::new(),
      derived_index: build_derived_index(spec),
      warnings: Vec::new(),
    }
  }

  pub(crate) fn models_namespace(&self) -> NamespaceId {
    self.models_namespace
  }

  pub(crate) fn common_prefix(&self) -> &str {
    &self.common_prefix
  }

  pub(crate) fn take_warnings(&mut self) -> Vec<GenerationWarning> {
    std::mem::take(&mut self.warnings)
  }

  /// Resolves a schema node that may be a `$ref` or an inline schema.
  pub(crate) fn resolve(
    &mut self,
    arena: &mut IrArena,
    hint: &NameHint,
    schema_ref: &ObjectOrReference<ObjectSchema>,
  ) -> ConversionResult<TypeReference> {
    if let Some(name) = extract_schema_ref_name(schema_ref) {
      return self.resolve_component(arena, &name);
    }

    match schema_ref {
      ObjectOrReference::Object(schema) => self.resolve_inline(arena, hint, schema),
      ObjectOrReference::Ref { .. } => match schema_ref.resolve(self.spec) {
        Ok(schema) => self.resolve_inline(arena, hint, &schema),
        Err(_) => Ok(TypeReference::untyped()),
      },
    }
  }

  /// Resolves a named component schema, memoized by component identity.
  pub(crate) fn resolve_component(&mut self, arena: &mut IrArena, name: &str) -> ConversionResult<TypeReference> {
    let key = SchemaKey::component(name);
    if let Some(cached) = self.cache.get(&key) {
      return Ok(cached.clone());
    }

    let Some(schema) = self.component_schema(name) else {
      anyhow::bail!("unknown schema reference '{name}'");
    };

    let hint = self.component_hint(arena, name);
    self.resolve_schema(arena, Some(key), &hint, &schema)
  }

  /// Resolves an inline schema, memoized by canonical identity when the shape
  /// can produce a named type.
  pub(crate) fn resolve_inline(
    &mut self,
    arena: &mut IrArena,
    hint: &NameHint,
    schema: &ObjectSchema,
  ) -> ConversionResult<TypeReference> {
    let key = if schema.has_object_shape() || schema.has_composition() || schema.has_enum_values() {
      SchemaKey::canonical(schema).ok()
    } else {
      None
    };
    self.resolve_schema(arena, key, hint, schema)
  }

  fn resolve_schema(
    &mut self,
    arena: &mut IrArena,
    key: Option<SchemaKey>,
    hint: &NameHint,
    schema: &ObjectSchema,
  ) -> ConversionResult<TypeReference> {
    if let Some(ref k) = key
      && let Some(cached) = self.cache.get(k)
    {
      return Ok(cached.clone());
    }

    // A composition cycle that re-enters before a class shell exists cannot
    // be typed; degrade instead of recursing forever.
    if let Some(ref k) = key
      && !self.in_progress.insert(k.clone())
    {
      return Ok(TypeReference::untyped());
    }

    let result = self.resolve_schema_uncached(arena, key.clone(), hint, schema);

    if let Some(ref k) = key {
      self.in_progress.remove(k);
      if let Ok(ref type_ref) = result
        && !self.cache.contains_key(k)
      {
        self.cache.insert(k.clone(), type_ref.clone());
      }
    }

    result
  }

  fn resolve_schema_uncached(
    &mut self,
    arena: &mut IrArena,
    key: Option<SchemaKey>,
    hint: &NameHint,
    schema: &ObjectSchema,
  ) -> ConversionResult<TypeReference> {
    let nullable = matches!(
      &schema.schema_type,
      Some(SchemaTypeSet::Multiple(types)) if types.contains(&SchemaType::Null)
    );

    if !schema.all_of.is_empty() {
      return composition::resolve_all_of(self, arena, key, hint, schema);
    }
    if !schema.one_of.is_empty() {
      return composition::resolve_composite(self, arena, key, hint, schema, composition::Exclusivity::Union);
    }
    if !schema.any_of.is_empty() {
      return composition::resolve_composite(self, arena, key, hint, schema, composition::Exclusivity::Intersection);
    }
    if schema.has_enum_values() {
      return self.resolve_enumeration(arena, key, hint, schema, nullable);
    }
    if schema.is_array() {
      return self.resolve_array(arena, hint, schema, nullable);
    }
    if !schema.properties.is_empty() || schema.additional_properties.is_some() {
      return Ok(
        self
          .create_model_class(arena, key, hint, schema, ClassKind::Model)?
          .with_nullable(nullable),
      );
    }

    if let Some(single) = schema.single_type().or_else(|| schema.non_null_type()) {
      if let Some(primitive) = primitives::primitive_for(single, schema.format.as_deref()) {
        return Ok(TypeReference::primitive(primitive).with_nullable(nullable));
      }
      if single == SchemaType::Null {
        return Ok(TypeReference::untyped().with_nullable(true));
      }
    }

    // schema-less or shape-less: the untyped-node sentinel, never an error
    Ok(TypeReference::untyped().with_nullable(nullable))
  }

  fn resolve_enumeration(
    &mut self,
    arena: &mut IrArena,
    key: Option<SchemaKey>,
    hint: &NameHint,
    schema: &ObjectSchema,
    nullable: bool,
  ) -> ConversionResult<TypeReference> {
    let values: Vec<String> = schema
      .enum_values
      .iter()
      .filter_map(|v| v.as_str().map(String::from))
      .collect();

    if values.is_empty() {
      // non-string enums degrade to their primitive shape
      if let Some(single) = schema.single_type().or_else(|| schema.non_null_type())
        && let Some(primitive) = primitives::primitive_for(single, schema.format.as_deref())
      {
        return Ok(TypeReference::primitive(primitive).with_nullable(nullable));
      }
      return Ok(TypeReference::untyped().with_nullable(nullable));
    }

    // Anonymous enums with identical values are shared; named components stay
    // distinct even when their values coincide.
    let reusable = key.as_ref().and_then(SchemaKey::component_name).is_none();
    if reusable && let Some(id) = self.enum_value_cache.get(&values) {
      return Ok(TypeReference::enumeration(*id).with_nullable(nullable));
    }

    let base_name = schema.title.clone().unwrap_or_else(|| hint.base_name.clone());
    let name = arena.claim_type_name(hint.namespace, &to_type_symbol(&base_name));

    let mut option_scope = NameScope::new();
    let mut seen_values = BTreeSet::new();
    let options: Vec<EnumOption> = values
      .iter()
      .filter(|value| seen_values.insert((*value).clone()))
      .map(|value| EnumOption {
        name: option_scope.claim(&to_member_symbol(value)),
        wire_value: value.clone(),
        description: None,
      })
      .collect();

    let id = arena.add_enum(EnumerationDef {
      name,
      namespace: hint.namespace,
      options,
      flags: bool_extension(&schema.extensions, EXT_FLAGS_ENUM),
      description: schema.description.clone(),
      deprecated: schema.deprecated.unwrap_or(false),
    });

    if reusable {
      self.enum_value_cache.insert(values, id);
    }

    Ok(TypeReference::enumeration(id).with_nullable(nullable))
  }

  fn resolve_array(
    &mut self,
    arena: &mut IrArena,
    hint: &NameHint,
    schema: &ObjectSchema,
    nullable: bool,
  ) -> ConversionResult<TypeReference> {
    let Some(items_ref) = schema.items.as_ref().and_then(|boxed| match boxed.as_ref() {
      Schema::Object(object_ref) => Some(object_ref),
      Schema::Boolean(_) => None,
    }) else {
      // `items: true`, `items: {}` or missing items
      return Ok(
        TypeReference::untyped()
          .with_collection(CollectionKind::Array)
          .with_nullable(nullable),
      );
    };

    // nesting depth > 1 is not modeled structurally
    if let Ok(items_schema) = items_ref.resolve(self.spec)
      && items_schema.is_array()
    {
      return Ok(
        TypeReference::untyped()
          .with_collection(CollectionKind::Array)
          .with_nullable(nullable),
      );
    }

    let element = self.resolve(arena, hint, items_ref)?;
    let collection = match element.kind {
      TypeKind::Enumeration(_) => CollectionKind::Complex,
      _ => CollectionKind::Array,
    };

    Ok(TypeReference {
      nullable: nullable || element.nullable,
      kind: element.kind,
      collection,
    })
  }

  /// Creates a model class for an object schema, pre-registering its identity
  /// so self-referential properties resolve to the same class.
  pub(crate) fn create_model_class(
    &mut self,
    arena: &mut IrArena,
    key: Option<SchemaKey>,
    hint: &NameHint,
    schema: &ObjectSchema,
    kind: ClassKind,
  ) -> ConversionResult<TypeReference> {
    let name = arena.claim_type_name(hint.namespace, &to_type_symbol(&hint.base_name));
    let mut class = ClassDef::new(name, kind, hint.namespace);
    class.schema_key = key.clone();
    class.description = schema.description.clone();
    class.deprecated = schema.deprecated.unwrap_or(false);
    let id = arena.add_class(class);

    if let Some(k) = key {
      self.cache.insert(k, TypeReference::class(id));
    }

    let entries: Vec<(String, ObjectOrReference<ObjectSchema>)> = schema
      .properties
      .iter()
      .map(|(wire_name, prop_ref)| (wire_name.clone(), prop_ref.clone()))
      .collect();
    self.attach_model_members(
      arena,
      id,
      entries,
      schema.additional_properties.is_some(),
      &schema.required,
    )?;
    self.record_discriminator(arena, id, schema);

    Ok(TypeReference::class(id))
  }

  /// Populates a model class with properties, capability markers and the
  /// serialization method pair.
  pub(crate) fn attach_model_members(
    &mut self,
    arena: &mut IrArena,
    id: ClassId,
    entries: Vec<(String, ObjectOrReference<ObjectSchema>)>,
    has_additional_properties: bool,
    required: &[String],
  ) -> ConversionResult<()> {
    let owner_name = arena.class(id).name.clone();
    let owner_namespace = arena.class(id).namespace;
    let base_class = arena.class(id).base_class;
    let mut scope = NameScope::new();
    let mut properties = Vec::new();

    for (wire_name, prop_ref) in entries {
      let hint = NameHint::new(owner_namespace, format!("{owner_name}{}", to_member_symbol(&wire_name)));

      let type_ref = match self.resolve(arena, &hint, &prop_ref) {
        Ok(type_ref) => type_ref,
        Err(error) => {
          self.warnings.push(GenerationWarning::SchemaConversionFailed {
            schema_name: format!("{owner_name}.{wire_name}"),
            error: error.to_string(),
          });
          TypeReference::untyped()
        }
      };

      let prop_schema = prop_ref.resolve(self.spec).unwrap_or_default();
      let default_value = extract_default_value(&prop_schema);
      let exists_in_base = self.base_chain_has_property(arena, base_class, &wire_name);
      if exists_in_base && default_value.is_none() {
        // plain duplicate of an inherited property
        continue;
      }

      let kind = if bool_extension(&prop_schema.extensions, EXT_PRIMARY_ERROR_MESSAGE) {
        PropertyKind::PrimaryErrorMessage
      } else {
        PropertyKind::Custom
      };

      let is_required = required.iter().any(|r| r == &wire_name);
      let symbol = scope.claim(&escape_reserved_member(&to_member_symbol(&wire_name)));

      properties.push(
        PropertyDef::builder()
          .name(symbol)
          .wire_name(wire_name)
          .kind(kind)
          .type_ref(type_ref.with_nullable(!is_required))
          .read_only(prop_schema.read_only.unwrap_or(false))
          .maybe_default_value(default_value)
          .exists_in_base(exists_in_base)
          .deprecated(prop_schema.deprecated.unwrap_or(false))
          .maybe_description(prop_schema.description.clone())
          .build(),
      );
    }

    let mut capabilities = vec![Capability::Parsable];
    if has_additional_properties || self.config.include_additional_data {
      properties.push(
        PropertyDef::builder()
          .name(scope.claim("AdditionalData"))
          .wire_name("additionalData")
          .kind(PropertyKind::AdditionalData)
          .type_ref(TypeReference::untyped())
          .build(),
      );
      capabilities.push(Capability::AdditionalDataHolder);
    }

    let methods = vec![
      MethodDef::builder()
        .name("GetFieldDeserializers")
        .kind(MethodKind::Deserializer)
        .build(),
      MethodDef::builder()
        .name("Serialize")
        .kind(MethodKind::Serializer)
        .parameters(vec![
          ParameterDef::builder()
            .name("writer")
            .wire_name("writer")
            .type_ref(TypeReference::untyped())
            .build(),
        ])
        .build(),
    ];

    let class = arena.class_mut(id);
    class.properties.extend(properties);
    class.capabilities = capabilities;
    class.methods.extend(methods);
    Ok(())
  }

  /// Records a schema's discriminator data verbatim. Verifying which mapping
  /// entries are real derivations requires the completed inheritance graph,
  /// so attachment of the final block happens in the linker.
  pub(crate) fn record_discriminator(&mut self, arena: &mut IrArena, id: ClassId, schema: &ObjectSchema) {
    let Some(ref discriminator) = schema.discriminator else {
      return;
    };

    let mut mapping: Vec<(String, String)> = discriminator
      .mapping
      .as_ref()
      .map(|entries| {
        entries
          .iter()
          .filter_map(|(value, ref_path)| parse_schema_ref_path(ref_path).map(|name| (value.clone(), name)))
          .collect()
      })
      .unwrap_or_default();

    if mapping.is_empty() {
      // implicit mapping: oneOf siblings, else schemas known to derive from
      // this component via allOf
      mapping = schema
        .one_of
        .iter()
        .filter_map(extract_schema_ref_name)
        .map(|name| (name.clone(), name))
        .collect();
    }
    if mapping.is_empty()
      && let Some(component_name) = arena.class(id).schema_key.as_ref().and_then(SchemaKey::component_name)
      && let Some(derived) = self.derived_index.get(component_name)
    {
      mapping = derived.iter().map(|name| (name.clone(), name.clone())).collect();
    }

    arena.class_mut(id).raw_discriminator = Some(RawDiscriminator {
      property_name: discriminator.property_name.clone(),
      mapping,
    });
  }

  pub(crate) fn component_schema(&self, name: &str) -> Option<ObjectSchema> {
    self
      .spec
      .components
      .as_ref()?
      .schemas
      .get(name)?
      .resolve(self.spec)
      .ok()
  }

  fn component_hint(&self, arena: &mut IrArena, name: &str) -> NameHint {
    let stripped = strip_prefix(name, &self.common_prefix).to_string();
    let (namespace_path, base_name) = match stripped.rsplit_once('.') {
      Some((path, base)) => (path.to_ascii_lowercase(), base.to_string()),
      None => (String::new(), stripped),
    };
    let namespace = arena.ensure_namespace_path(self.models_namespace, &namespace_path);
    NameHint::new(namespace, base_name)
  }

  fn base_chain_has_property(&self, arena: &IrArena, base: Option<ClassId>, wire_name: &str) -> bool {
    let mut current = base;
    while let Some(id) = current {
      let class = arena.class(id);
      if class.properties.iter().any(|p| p.wire_name == wire_name) {
        return true;
      }
      current = class.base_class;
    }
    false
  }

  /// True when `candidate` transitively derives from `ancestor` through the
  /// document's `allOf` references.
  pub(crate) fn derives_transitively(&self, ancestor: &str, candidate: &str) -> bool {
    if ancestor == candidate {
      return true;
    }
    let mut queue = vec![ancestor];
    let mut seen = BTreeSet::new();
    while let Some(current) = queue.pop() {
      if !seen.insert(current) {
        continue;
      }
      if let Some(children) = self.derived_index.get(current) {
        for child in children {
          if child == candidate {
            return true;
          }
          queue.push(child.as_str());
        }
      }
    }
    false
  }
}

/// Default value extraction: `default`, falling back to `const`, falling back
/// to a single enum value.
pub(crate) fn extract_default_value(schema: &ObjectSchema) -> Option<serde_json::Value> {
  schema
    .default
    .clone()
    .or_else(|| schema.const_value.clone())
    .or_else(|| {
      if schema.enum_values.len() == 1 {
        schema.enum_values.first().cloned()
      } else {
        None
      }
    })
}

fn build_derived_index(spec: &Spec) -> BTreeMap<String, Vec<String>> {
  let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
  let Some(ref components) = spec.components else {
    return index;
  };

  for (name, schema_ref) in &components.schemas {
    let Ok(schema) = schema_ref.resolve(spec) else {
      continue;
    };
    for base_name in schema.all_of.iter().filter_map(extract_schema_ref_name) {
      index.entry(base_name).or_default().push(name.clone());
    }
  }

  index
}

#[cfg(test)]
mod tests;
