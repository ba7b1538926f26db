use super::arena::{ClassId, EnumId, NamespaceId};
use crate::naming::NameScope;

/// One node of the namespace tree. Children (namespaces, classes and
/// enumerations) share a single case-insensitive name scope, so no two
/// siblings ever collide.
#[derive(Debug, Clone)]
pub struct Namespace {
  /// The local segment name (`models`, `tasks`, ...).
  pub name: String,
  pub parent: Option<NamespaceId>,
  pub namespaces: Vec<NamespaceId>,
  pub classes: Vec<ClassId>,
  pub enums: Vec<EnumId>,
  pub(crate) scope: NameScope,
}

impl Namespace {
  pub(crate) fn new(name: impl Into<String>, parent: Option<NamespaceId>) -> Self {
    Self {
      name: name.into(),
      parent,
      namespaces: Vec::new(),
      classes: Vec::new(),
      enums: Vec::new(),
      scope: NameScope::new(),
    }
  }
}
