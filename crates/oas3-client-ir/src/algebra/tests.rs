use super::run;
use crate::ir::{
  ClassDef, ClassKind, CollectionKind, CompositeType, IrArena, Primitive, PropertyDef, TypeKind, TypeReference,
};

fn arena_with_class(property_type: TypeReference) -> (IrArena, crate::ir::ClassId) {
  let mut arena = IrArena::new();
  let root = arena.add_root_namespace("ApiSdk");
  let name = arena.claim_type_name(root, "Holder");
  let mut class = ClassDef::new(name, ClassKind::Model, root);
  class.properties.push(
    PropertyDef::builder()
      .name("Value")
      .wire_name("value")
      .type_ref(property_type)
      .build(),
  );
  let id = arena.add_class(class);
  (arena, id)
}

fn union(members: Vec<TypeReference>) -> TypeReference {
  TypeReference::new(TypeKind::Union(CompositeType {
    name: "Sample".to_string(),
    members,
  }))
}

fn intersection(members: Vec<TypeReference>) -> TypeReference {
  TypeReference::new(TypeKind::Intersection(CompositeType {
    name: "Sample".to_string(),
    members,
  }))
}

#[test]
fn duplicate_members_collapse_to_the_single_type() {
  let (mut arena, id) = arena_with_class(union(vec![
    TypeReference::primitive(Primitive::String),
    TypeReference::primitive(Primitive::String),
  ]));

  run(&mut arena);

  let value = &arena.class(id).properties[0].type_ref;
  assert_eq!(value.kind, TypeKind::Primitive(Primitive::String));
}

#[test]
fn untyped_fillers_squash_into_a_nullable_member() {
  let (mut arena, id) = arena_with_class(union(vec![
    TypeReference::primitive(Primitive::Int64),
    TypeReference::untyped(),
  ]));

  run(&mut arena);

  let value = &arena.class(id).properties[0].type_ref;
  assert_eq!(value.kind, TypeKind::Primitive(Primitive::Int64));
  assert!(value.nullable);
}

#[test]
fn distinct_members_keep_the_composite() {
  let (mut arena, id) = arena_with_class(union(vec![
    TypeReference::primitive(Primitive::String),
    TypeReference::primitive(Primitive::Int64),
  ]));

  run(&mut arena);

  let value = &arena.class(id).properties[0].type_ref;
  let TypeKind::Union(composite) = &value.kind else {
    panic!("expected a union to survive");
  };
  assert_eq!(composite.members.len(), 2);
}

#[test]
fn bare_marker_members_leave_intersections() {
  let mut arena = IrArena::new();
  let root = arena.add_root_namespace("ApiSdk");

  let marker_name = arena.claim_type_name(root, "Marker");
  let marker = arena.add_class(ClassDef::new(marker_name, ClassKind::Model, root));

  let real_name = arena.claim_type_name(root, "Real");
  let mut real = ClassDef::new(real_name, ClassKind::Model, root);
  real.properties.push(
    PropertyDef::builder()
      .name("Name")
      .wire_name("name")
      .type_ref(TypeReference::primitive(Primitive::String))
      .build(),
  );
  let real = arena.add_class(real);

  let holder_name = arena.claim_type_name(root, "Holder");
  let mut holder = ClassDef::new(holder_name, ClassKind::Model, root);
  holder.properties.push(
    PropertyDef::builder()
      .name("Value")
      .wire_name("value")
      .type_ref(intersection(vec![
        TypeReference::class(real),
        TypeReference::class(marker),
      ]))
      .build(),
  );
  let holder = arena.add_class(holder);

  run(&mut arena);

  let value = &arena.class(holder).properties[0].type_ref;
  assert_eq!(value.as_class(), Some(real), "marker removed, member squashed");
}

#[test]
fn nested_composites_are_normalized_recursively() {
  let inner = union(vec![
    TypeReference::primitive(Primitive::Boolean),
    TypeReference::primitive(Primitive::Boolean),
  ]);
  let (mut arena, id) = arena_with_class(union(vec![inner, TypeReference::primitive(Primitive::Boolean)]));

  run(&mut arena);

  let value = &arena.class(id).properties[0].type_ref;
  assert_eq!(value.kind, TypeKind::Primitive(Primitive::Boolean));
}

#[test]
fn collection_flags_survive_squashing() {
  let squashable = union(vec![TypeReference::primitive(Primitive::String), TypeReference::untyped()])
    .with_collection(CollectionKind::Array);
  let (mut arena, id) = arena_with_class(squashable);

  run(&mut arena);

  let value = &arena.class(id).properties[0].type_ref;
  assert_eq!(value.kind, TypeKind::Primitive(Primitive::String));
  assert_eq!(value.collection, CollectionKind::Array);
}
