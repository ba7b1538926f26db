use std::collections::BTreeMap;

use strum::Display;

use super::{
  arena::{ClassId, NamespaceId},
  method::MethodDef,
  property::PropertyDef,
  types::TypeReference,
};
use crate::resolver::SchemaKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ClassKind {
  Model,
  RequestBuilder,
  QueryParameterSet,
  ParameterSet,
  ErrorDefinition,
}

/// Capability markers a class implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
  AdditionalDataHolder,
  Parsable,
}

/// Why a composed schema ended up with (or without) a base class. The linker
/// relies on this to distinguish discriminator-driven inheritance from pure
/// property merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositionKind {
  /// A single `allOf` base carried a discriminator pointing at this schema.
  Inherited,
  /// All fragments were merged into one flat shape.
  Flattened,
}

/// Discriminator data exactly as the source schema declared it: the property
/// wire name plus `value -> referenced schema name` pairs. Verification
/// against the realized inheritance graph happens in the linker.
#[derive(Debug, Clone)]
pub struct RawDiscriminator {
  pub property_name: String,
  pub mapping: Vec<(String, String)>,
}

/// The verified discriminator block attached by the linker. Mapping entries
/// reference only classes that actually derive from the owner.
#[derive(Debug, Clone, Default)]
pub struct DiscriminatorBlock {
  pub property_name: String,
  pub mapping: BTreeMap<String, TypeReference>,
}

/// Maps a bracketed path-parameter segment to a per-item request builder.
#[derive(Debug, Clone)]
pub struct Indexer {
  pub parameter_name: String,
  pub parameter_type: TypeReference,
  pub description: Option<String>,
  pub nullable: bool,
  pub return_class: ClassId,
}

#[derive(Debug, Clone)]
pub struct ClassDef {
  pub name: String,
  pub kind: ClassKind,
  pub namespace: NamespaceId,
  /// Identity of the schema this class was resolved from, when any.
  pub(crate) schema_key: Option<SchemaKey>,
  pub properties: Vec<PropertyDef>,
  pub methods: Vec<MethodDef>,
  /// Single inheritance only; enforced structurally.
  pub base_class: Option<ClassId>,
  pub capabilities: Vec<Capability>,
  pub composition: Option<CompositionKind>,
  pub raw_discriminator: Option<RawDiscriminator>,
  pub discriminator: Option<DiscriminatorBlock>,
  pub indexer: Option<Indexer>,
  pub description: Option<String>,
  pub deprecated: bool,
  pub(crate) pruned: bool,
}

impl ClassDef {
  pub fn new(name: impl Into<String>, kind: ClassKind, namespace: NamespaceId) -> Self {
    Self {
      name: name.into(),
      kind,
      namespace,
      schema_key: None,
      properties: Vec::new(),
      methods: Vec::new(),
      base_class: None,
      capabilities: Vec::new(),
      composition: None,
      raw_discriminator: None,
      discriminator: None,
      indexer: None,
      description: None,
      deprecated: false,
      pruned: false,
    }
  }

  pub fn property(&self, name: &str) -> Option<&PropertyDef> {
    self.properties.iter().find(|p| p.name == name)
  }

  pub fn method(&self, name: &str) -> Option<&MethodDef> {
    self.methods.iter().find(|m| m.name == name)
  }

  pub fn has_capability(&self, capability: Capability) -> bool {
    self.capabilities.contains(&capability)
  }

  pub fn is_error_definition(&self) -> bool {
    matches!(self.kind, ClassKind::ErrorDefinition)
  }
}
