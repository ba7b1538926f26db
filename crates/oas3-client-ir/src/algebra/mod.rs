//! The type algebra pass: runs after the IR builder over every union and
//! intersection reference reachable in the tree, re-applying the squash rule
//! against newly created synthetic members, deduplicating identical member
//! types, and removing intersection members that contribute nothing.

use std::collections::BTreeSet;

use crate::ir::{ClassId, ClassKind, CollectionKind, IrArena, PropertyKind, TypeKind, TypeReference};

pub(crate) fn run(arena: &mut IrArena) {
  let markers = marker_classes(arena);

  let ids: Vec<ClassId> = arena.all_class_ids().collect();
  for id in ids {
    let class = arena.class_mut(id);
    for property in &mut class.properties {
      normalize(&mut property.type_ref, &markers);
    }
    for method in &mut class.methods {
      if let Some(ref mut return_type) = method.return_type {
        normalize(return_type, &markers);
      }
      for parameter in &mut method.parameters {
        normalize(&mut parameter.type_ref, &markers);
      }
      for error_type in method.error_mappings.values_mut() {
        normalize(error_type, &markers);
      }
    }
    if let Some(ref mut indexer) = class.indexer {
      normalize(&mut indexer.parameter_type, &markers);
    }
  }
}

/// A bare marker schema: a model with no custom properties, no base and no
/// discriminator. As an intersection member it contributes zero properties.
fn marker_classes(arena: &IrArena) -> BTreeSet<ClassId> {
  arena
    .all_class_ids()
    .filter(|id| {
      let class = arena.class(*id);
      class.kind == ClassKind::Model
        && class.base_class.is_none()
        && class.raw_discriminator.is_none()
        && class
          .properties
          .iter()
          .all(|p| matches!(p.kind, PropertyKind::AdditionalData))
    })
    .collect()
}

fn normalize(type_ref: &mut TypeReference, markers: &BTreeSet<ClassId>) {
  let is_union = matches!(type_ref.kind, TypeKind::Union(_));

  let (mut members, saw_filler) = {
    let composite = match &mut type_ref.kind {
      TypeKind::Union(composite) | TypeKind::Intersection(composite) => composite,
      _ => return,
    };

    for member in &mut composite.members {
      normalize(member, markers);
    }

    let mut members: Vec<TypeReference> = Vec::new();
    let mut saw_filler = false;
    for member in composite.members.drain(..) {
      if member.is_untyped() && member.collection == CollectionKind::None {
        saw_filler = true;
        continue;
      }
      if !members.contains(&member) {
        members.push(member);
      }
    }
    (members, saw_filler)
  };

  if !is_union {
    members.retain(|member| member.as_class().is_none_or(|id| !markers.contains(&id)));
  }

  let collection = type_ref.collection;
  let nullable = type_ref.nullable || saw_filler;

  match members.len() {
    0 => {
      *type_ref = TypeReference::untyped()
        .with_collection(collection)
        .with_nullable(nullable);
    }
    1 => {
      let member = members.into_iter().next().expect("single member");
      let collection = if collection == CollectionKind::None {
        member.collection
      } else {
        collection
      };
      *type_ref = TypeReference {
        kind: member.kind,
        collection,
        nullable: nullable || member.nullable,
      };
    }
    _ => {
      if let TypeKind::Union(composite) | TypeKind::Intersection(composite) = &mut type_ref.kind {
        composite.members = members;
      }
      type_ref.nullable = nullable;
    }
  }
}

#[cfg(test)]
mod tests;
