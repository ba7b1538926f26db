use strum::Display;

use super::types::TypeReference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum PropertyKind {
  #[default]
  Custom,
  /// Holds wire members not declared by the schema.
  AdditionalData,
  /// Navigates from one request builder to a child builder.
  RequestBuilderLink,
  /// Carries the RFC 6570 template for the builder's path.
  UrlTemplate,
  PathParameter,
  /// The property carrying the primary human-readable error message.
  PrimaryErrorMessage,
}

#[derive(Debug, Clone, bon::Builder)]
pub struct PropertyDef {
  #[builder(into)]
  pub name: String,
  /// The serialized name, preserved verbatim for the wire.
  #[builder(into)]
  pub wire_name: String,
  #[builder(default)]
  pub kind: PropertyKind,
  pub type_ref: TypeReference,
  #[builder(default)]
  pub read_only: bool,
  pub default_value: Option<serde_json::Value>,
  /// True when a derived type re-declares a base property solely to override
  /// its default value.
  #[builder(default)]
  pub exists_in_base: bool,
  #[builder(default)]
  pub deprecated: bool,
  pub description: Option<String>,
}
