use super::arena::NamespaceId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
  /// Cleaned symbol name.
  pub name: String,
  /// The serialized value, preserved verbatim.
  pub wire_value: String,
  pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EnumerationDef {
  pub name: String,
  pub namespace: NamespaceId,
  /// Options in document order.
  pub options: Vec<EnumOption>,
  /// True when values combine as bit flags.
  pub flags: bool,
  pub description: Option<String>,
  pub deprecated: bool,
}
