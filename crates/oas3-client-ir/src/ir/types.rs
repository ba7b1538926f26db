use strum::Display;

use super::arena::{ClassId, EnumId};

/// How a type reference is wrapped by a collection.
///
/// `Complex` marks collections whose element type needs structured
/// deserialization (e.g. an array of enumeration values), as opposed to a
/// plain array of scalars or models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionKind {
  #[default]
  None,
  Array,
  Complex,
}

/// Language-neutral primitive symbols derived from the fixed type+format
/// mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
#[strum(serialize_all = "camelCase")]
pub enum Primitive {
  String,
  Boolean,
  Integer,
  Int64,
  Float,
  Double,
  Guid,
  DateTime,
  DateOnly,
  TimeOnly,
  Duration,
  Base64,
  Binary,
  SignedByte,
  Byte,
  MultipartBody,
  Void,
}

/// A union (`oneOf`) or intersection (`anyOf`/merged `allOf`) over member
/// types, kept inline on the reference rather than materialized as a class.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeType {
  pub name: String,
  pub members: Vec<TypeReference>,
}

/// The closed set of type-reference kinds. Every consumer matches
/// exhaustively; the kind set is fixed by design.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
  Primitive(Primitive),
  Class(ClassId),
  Enumeration(EnumId),
  /// Mutually exclusive alternatives (`oneOf`).
  Union(CompositeType),
  /// Simultaneously-present alternatives (`anyOf`, flattened `allOf`).
  Intersection(CompositeType),
  /// Fallback when a schema's shape cannot be statically determined.
  Untyped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeReference {
  pub kind: TypeKind,
  pub collection: CollectionKind,
  pub nullable: bool,
}

impl TypeReference {
  pub fn new(kind: TypeKind) -> Self {
    Self {
      kind,
      collection: CollectionKind::None,
      nullable: false,
    }
  }

  pub fn primitive(primitive: Primitive) -> Self {
    Self::new(TypeKind::Primitive(primitive))
  }

  pub fn class(id: ClassId) -> Self {
    Self::new(TypeKind::Class(id))
  }

  pub fn enumeration(id: EnumId) -> Self {
    Self::new(TypeKind::Enumeration(id))
  }

  pub fn untyped() -> Self {
    Self::new(TypeKind::Untyped)
  }

  pub fn with_collection(mut self, collection: CollectionKind) -> Self {
    self.collection = collection;
    self
  }

  pub fn with_nullable(mut self, nullable: bool) -> Self {
    self.nullable = nullable;
    self
  }

  pub fn as_class(&self) -> Option<ClassId> {
    match self.kind {
      TypeKind::Class(id) => Some(id),
      _ => None,
    }
  }

  pub fn as_enumeration(&self) -> Option<EnumId> {
    match self.kind {
      TypeKind::Enumeration(id) => Some(id),
      _ => None,
    }
  }

  pub fn is_untyped(&self) -> bool {
    matches!(self.kind, TypeKind::Untyped)
  }
}
