//! The discriminator and inheritance linker: verifies raw discriminator
//! mappings against the realized inheritance graph, synthesizes factory
//! methods, and sweeps away model classes unreachable from any used root.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::{graphmap::DiGraphMap, visit::Dfs};

use crate::{
  ir::{
    ClassId, ClassKind, DiscriminatorBlock, IrArena, MethodDef, MethodKind, ParameterDef, Primitive, TypeKind,
    TypeReference,
  },
  metrics::{GenerationStats, GenerationWarning},
  resolver::SchemaKey,
};

pub(crate) fn link(arena: &mut IrArena, stats: &mut GenerationStats) {
  link_discriminators(arena, stats);
  prune_unreachable(arena, stats);
}

/// Keeps only mapping entries whose target is an actual (possibly transitive)
/// subclass of the declaring class; everything else is dropped with a
/// warning. Classes left with a non-empty mapping get a factory method.
fn link_discriminators(arena: &mut IrArena, stats: &mut GenerationStats) {
  let by_component: BTreeMap<String, ClassId> = arena
    .all_class_ids()
    .filter_map(|id| {
      arena
        .class(id)
        .schema_key
        .as_ref()
        .and_then(SchemaKey::component_name)
        .map(|name| (name.to_string(), id))
    })
    .collect();

  let ids: Vec<ClassId> = arena.all_class_ids().collect();
  for id in ids {
    let Some(raw) = arena.class(id).raw_discriminator.clone() else {
      continue;
    };
    let class_name = arena.class(id).name.clone();

    let mut verified = BTreeMap::new();
    for (value, target_name) in raw.mapping {
      let target_id = by_component.get(&target_name).copied();
      let is_derivation = target_id.is_some_and(|target| target != id && derives_from(arena, target, id));

      match target_id {
        Some(target) if is_derivation => {
          verified.insert(value, TypeReference::class(target));
        }
        _ => {
          stats.record_warning(GenerationWarning::DiscriminatorMappingDropped {
            schema_name: class_name.clone(),
            value,
            target: target_name,
          });
          stats.record_mapping_dropped();
        }
      }
    }

    if verified.is_empty() {
      continue;
    }

    let class = arena.class_mut(id);
    class.discriminator = Some(DiscriminatorBlock {
      property_name: raw.property_name,
      mapping: verified,
    });
    class.methods.push(
      MethodDef::builder()
        .name("CreateFromDiscriminatorValue")
        .kind(MethodKind::Factory)
        .parameters(vec![
          ParameterDef::builder()
            .name("discriminatorValue")
            .wire_name("discriminatorValue")
            .type_ref(TypeReference::primitive(Primitive::String))
            .build(),
        ])
        .return_type(TypeReference::class(id))
        .build(),
    );
  }
}

fn derives_from(arena: &IrArena, candidate: ClassId, ancestor: ClassId) -> bool {
  let mut current = arena.class(candidate).base_class;
  while let Some(id) = current {
    if id == ancestor {
      return true;
    }
    current = arena.class(id).base_class;
  }
  false
}

/// Removes model and error classes unreachable from any request builder or
/// parameter-set root, walking properties, methods, bases, indexers and
/// verified discriminator mappings.
fn prune_unreachable(arena: &mut IrArena, stats: &mut GenerationStats) {
  let mut graph = DiGraphMap::<u32, ()>::new();
  let mut roots: Vec<u32> = Vec::new();

  for id in arena.all_class_ids() {
    let class = arena.class(id);
    graph.add_node(id.index() as u32);

    if matches!(
      class.kind,
      ClassKind::RequestBuilder | ClassKind::QueryParameterSet | ClassKind::ParameterSet
    ) {
      roots.push(id.index() as u32);
    }

    let mut referenced: Vec<ClassId> = Vec::new();
    for property in &class.properties {
      collect_class_refs(&property.type_ref, &mut referenced);
    }
    for method in &class.methods {
      if let Some(ref return_type) = method.return_type {
        collect_class_refs(return_type, &mut referenced);
      }
      for parameter in &method.parameters {
        collect_class_refs(&parameter.type_ref, &mut referenced);
      }
      for error_type in method.error_mappings.values() {
        collect_class_refs(error_type, &mut referenced);
      }
    }
    if let Some(ref indexer) = class.indexer {
      referenced.push(indexer.return_class);
      collect_class_refs(&indexer.parameter_type, &mut referenced);
    }
    if let Some(base) = class.base_class {
      referenced.push(base);
    }
    if let Some(ref discriminator) = class.discriminator {
      for target in discriminator.mapping.values() {
        collect_class_refs(target, &mut referenced);
      }
    }

    for target in referenced {
      graph.add_edge(id.index() as u32, target.index() as u32, ());
    }
  }

  let mut reachable: BTreeSet<u32> = BTreeSet::new();
  for root in roots {
    let mut dfs = Dfs::new(&graph, root);
    while let Some(node) = dfs.next(&graph) {
      reachable.insert(node);
    }
  }

  let mut pruned = 0usize;
  for id in arena.all_class_ids().collect::<Vec<_>>() {
    let class = arena.class(id);
    let trimmable = matches!(class.kind, ClassKind::Model | ClassKind::ErrorDefinition);
    if trimmable && !reachable.contains(&(id.index() as u32)) {
      arena.prune_class(id);
      pruned += 1;
    }
  }
  stats.record_pruned(pruned);
}

fn collect_class_refs(type_ref: &TypeReference, out: &mut Vec<ClassId>) {
  match &type_ref.kind {
    TypeKind::Class(id) => out.push(*id),
    TypeKind::Union(composite) | TypeKind::Intersection(composite) => {
      for member in &composite.members {
        collect_class_refs(member, out);
      }
    }
    TypeKind::Primitive(_) | TypeKind::Enumeration(_) | TypeKind::Untyped => {}
  }
}

#[cfg(test)]
mod tests;
