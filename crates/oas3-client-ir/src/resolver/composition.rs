//! Composition handling: `allOf` linearization into single inheritance versus
//! flattening, and `oneOf`/`anyOf` union and intersection references.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use oas3::spec::{ObjectOrReference, ObjectSchema};

use super::{NameHint, SchemaKey, SchemaTypeResolver};
use crate::{
  ConversionResult,
  ir::{ClassDef, ClassKind, CompositeType, CompositionKind, IrArena, TypeKind, TypeReference},
  naming::to_type_symbol,
  utils::{SchemaExt, extract_schema_ref_name, parse_schema_ref_path},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Exclusivity {
  /// `oneOf`: mutually exclusive alternatives.
  Union,
  /// `anyOf`: simultaneously-present alternatives.
  Intersection,
}

/// Resolves a `oneOf`/`anyOf` schema into a union or intersection reference.
///
/// The squash rule applies first: a composition with exactly one resolvable
/// member plus only null/empty-object fillers collapses to that member's
/// type, with no wrapper emitted.
pub(crate) fn resolve_composite(
  resolver: &mut SchemaTypeResolver<'_>,
  arena: &mut IrArena,
  key: Option<SchemaKey>,
  hint: &NameHint,
  schema: &ObjectSchema,
  exclusivity: Exclusivity,
) -> ConversionResult<TypeReference> {
  let members = match exclusivity {
    Exclusivity::Union => &schema.one_of,
    Exclusivity::Intersection => &schema.any_of,
  };

  let mut real_members: Vec<&ObjectOrReference<ObjectSchema>> = Vec::new();
  let mut has_filler = false;

  for member_ref in members {
    let is_filler = match member_ref {
      ObjectOrReference::Object(member) => member.is_filler(),
      ObjectOrReference::Ref { .. } => false,
    };
    if is_filler {
      has_filler = true;
    } else {
      real_members.push(member_ref);
    }
  }

  if real_members.is_empty() {
    return Ok(TypeReference::untyped().with_nullable(has_filler));
  }

  if real_members.len() == 1 {
    let squashed = resolver.resolve(arena, hint, real_members[0])?;
    let nullable = has_filler || squashed.nullable;
    return Ok(squashed.with_nullable(nullable));
  }

  let mut resolved_members: Vec<TypeReference> = Vec::new();
  for (index, member_ref) in real_members.iter().enumerate() {
    let member_hint = match extract_schema_ref_name(member_ref) {
      Some(_) => hint.clone(),
      None => hint.member(&format!("Member{index}")),
    };
    let member_type = resolver.resolve(arena, &member_hint, member_ref)?;
    if !resolved_members.contains(&member_type) {
      resolved_members.push(member_type);
    }
  }

  if resolved_members.len() == 1 {
    let only = resolved_members.remove(0);
    let nullable = has_filler || only.nullable;
    return Ok(only.with_nullable(nullable));
  }

  let composite = CompositeType {
    name: to_type_symbol(&hint.base_name),
    members: resolved_members,
  };
  let kind = match exclusivity {
    Exclusivity::Union => TypeKind::Union(composite),
    Exclusivity::Intersection => TypeKind::Intersection(composite),
  };

  Ok(TypeReference::new(kind).with_nullable(has_filler))
}

/// Resolves an `allOf` schema.
///
/// Base schemas are linearized into a single-inheritance chain only when
/// exactly one referenced base carries a discriminator pointing (directly or
/// transitively) at the derived schema and the remaining fragments are plain
/// property carriers; every other shape merges all members into one flat
/// class with no base.
pub(crate) fn resolve_all_of(
  resolver: &mut SchemaTypeResolver<'_>,
  arena: &mut IrArena,
  key: Option<SchemaKey>,
  hint: &NameHint,
  schema: &ObjectSchema,
) -> ConversionResult<TypeReference> {
  let ref_names: Vec<String> = schema.all_of.iter().filter_map(extract_schema_ref_name).collect();
  let inline_fragments: Vec<ObjectSchema> = schema
    .all_of
    .iter()
    .filter_map(|member| match member {
      ObjectOrReference::Object(fragment) => Some(fragment.clone()),
      ObjectOrReference::Ref { .. } => None,
    })
    .collect();

  let component_name = key.as_ref().and_then(SchemaKey::component_name).map(String::from);

  let clean_parent_shape = ref_names.len() == 1
    && inline_fragments.iter().all(is_property_fragment)
    && schema.one_of.is_empty()
    && schema.any_of.is_empty();

  if clean_parent_shape
    && let Some(ref derived_name) = component_name
    && base_discriminator_links(resolver, &ref_names[0], derived_name)
  {
    let base_type = resolver.resolve_component(arena, &ref_names[0])?;
    if let Some(base_id) = base_type.as_class() {
      return inherit(resolver, arena, key, hint, schema, base_id, &inline_fragments);
    }
  }

  flatten(resolver, arena, key, hint, schema, &ref_names, &inline_fragments)
}

/// A fragment that only contributes properties: no nested composition, no
/// enum values.
fn is_property_fragment(fragment: &ObjectSchema) -> bool {
  fragment.all_of.is_empty()
    && fragment.one_of.is_empty()
    && fragment.any_of.is_empty()
    && !fragment.has_enum_values()
}

/// Whether the base component's discriminator selects the derived schema,
/// directly or through an intermediate derivation.
fn base_discriminator_links(resolver: &SchemaTypeResolver<'_>, base_name: &str, derived_name: &str) -> bool {
  let Some(base_schema) = resolver.component_schema(base_name) else {
    return false;
  };
  let Some(ref discriminator) = base_schema.discriminator else {
    return false;
  };

  let targets: Vec<String> = discriminator
    .mapping
    .as_ref()
    .map(|mapping| mapping.values().filter_map(|path| parse_schema_ref_path(path)).collect())
    .unwrap_or_default();

  if targets.is_empty() {
    // no explicit mapping: discrimination is by schema name, which covers
    // every allOf child
    return true;
  }

  targets
    .iter()
    .any(|target| resolver.derives_transitively(target, derived_name))
}

fn inherit(
  resolver: &mut SchemaTypeResolver<'_>,
  arena: &mut IrArena,
  key: Option<SchemaKey>,
  hint: &NameHint,
  schema: &ObjectSchema,
  base_id: crate::ir::ClassId,
  fragments: &[ObjectSchema],
) -> ConversionResult<TypeReference> {
  let name = arena.claim_type_name(hint.namespace, &to_type_symbol(&hint.base_name));
  let mut class = ClassDef::new(name, ClassKind::Model, hint.namespace);
  class.schema_key = key.clone();
  class.base_class = Some(base_id);
  class.composition = Some(CompositionKind::Inherited);
  class.description = schema.description.clone();
  class.deprecated = schema.deprecated.unwrap_or(false);
  let id = arena.add_class(class);

  if let Some(k) = key {
    resolver.cache.insert(k, TypeReference::class(id));
  }

  let mut entries: IndexMap<String, ObjectOrReference<ObjectSchema>> = IndexMap::new();
  let mut required: Vec<String> = Vec::new();
  let mut has_additional = schema.additional_properties.is_some();

  for fragment in fragments {
    merge_fragment(fragment, &mut entries, &mut required, &mut has_additional);
  }
  merge_fragment(schema, &mut entries, &mut required, &mut has_additional);

  resolver.attach_model_members(arena, id, entries.into_iter().collect(), has_additional, &required)?;

  record_first_discriminator(resolver, arena, id, schema, fragments);
  Ok(TypeReference::class(id))
}

fn flatten(
  resolver: &mut SchemaTypeResolver<'_>,
  arena: &mut IrArena,
  key: Option<SchemaKey>,
  hint: &NameHint,
  schema: &ObjectSchema,
  ref_names: &[String],
  fragments: &[ObjectSchema],
) -> ConversionResult<TypeReference> {
  let name = arena.claim_type_name(hint.namespace, &to_type_symbol(&hint.base_name));
  let mut class = ClassDef::new(name, ClassKind::Model, hint.namespace);
  class.schema_key = key.clone();
  class.composition = Some(CompositionKind::Flattened);
  class.description = schema.description.clone();
  class.deprecated = schema.deprecated.unwrap_or(false);
  let id = arena.add_class(class);

  if let Some(k) = key {
    resolver.cache.insert(k, TypeReference::class(id));
  }

  let mut entries: IndexMap<String, ObjectOrReference<ObjectSchema>> = IndexMap::new();
  let mut required: Vec<String> = Vec::new();
  let mut has_additional = schema.additional_properties.is_some();
  let mut seen = BTreeSet::new();

  for ref_name in ref_names {
    collect_component_properties(
      resolver,
      ref_name,
      &mut entries,
      &mut required,
      &mut has_additional,
      &mut seen,
    );
  }
  for fragment in fragments {
    merge_fragment(fragment, &mut entries, &mut required, &mut has_additional);
  }
  merge_fragment(schema, &mut entries, &mut required, &mut has_additional);

  resolver.attach_model_members(arena, id, entries.into_iter().collect(), has_additional, &required)?;

  record_first_discriminator(resolver, arena, id, schema, fragments);
  Ok(TypeReference::class(id))
}

/// Merges a referenced component's effective properties, following its own
/// `allOf` chain. A `seen` set guards against reference cycles.
fn collect_component_properties(
  resolver: &SchemaTypeResolver<'_>,
  name: &str,
  entries: &mut IndexMap<String, ObjectOrReference<ObjectSchema>>,
  required: &mut Vec<String>,
  has_additional: &mut bool,
  seen: &mut BTreeSet<String>,
) {
  if !seen.insert(name.to_string()) {
    return;
  }
  let Some(schema) = resolver.component_schema(name) else {
    return;
  };

  for member in &schema.all_of {
    match member {
      ObjectOrReference::Object(fragment) => merge_fragment(fragment, entries, required, has_additional),
      ObjectOrReference::Ref { .. } => {
        if let Some(nested) = extract_schema_ref_name(member) {
          collect_component_properties(resolver, &nested, entries, required, has_additional, seen);
        }
      }
    }
  }

  merge_fragment(&schema, entries, required, has_additional);
}

fn merge_fragment(
  fragment: &ObjectSchema,
  entries: &mut IndexMap<String, ObjectOrReference<ObjectSchema>>,
  required: &mut Vec<String>,
  has_additional: &mut bool,
) {
  for (wire_name, prop_ref) in &fragment.properties {
    entries.insert(wire_name.clone(), prop_ref.clone());
  }
  for requirement in &fragment.required {
    if !required.contains(requirement) {
      required.push(requirement.clone());
    }
  }
  if fragment.additional_properties.is_some() {
    *has_additional = true;
  }
}

fn record_first_discriminator(
  resolver: &mut SchemaTypeResolver<'_>,
  arena: &mut IrArena,
  id: crate::ir::ClassId,
  schema: &ObjectSchema,
  fragments: &[ObjectSchema],
) {
  if schema.discriminator.is_some() {
    resolver.record_discriminator(arena, id, schema);
    return;
  }
  if let Some(fragment) = fragments.iter().find(|f| f.discriminator.is_some()) {
    resolver.record_discriminator(arena, id, fragment);
  }
}
