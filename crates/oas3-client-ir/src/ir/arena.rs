use super::{class::ClassDef, enums::EnumerationDef, namespace::Namespace};

macro_rules! arena_id {
  ($name:ident) => {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct $name(pub(crate) u32);

    impl $name {
      pub(crate) fn index(self) -> usize {
        self.0 as usize
      }
    }
  };
}

arena_id!(NamespaceId);
arena_id!(ClassId);
arena_id!(EnumId);

/// Owns every namespace, class and enumeration of one generation invocation.
///
/// Entities refer to each other by id, never by ownership, so cyclic schema
/// graphs (self-referential models, discriminator loops) are represented
/// without recursion. The arena is built fresh per invocation and discarded
/// after emission.
#[derive(Debug, Clone, Default)]
pub struct IrArena {
  namespaces: Vec<Namespace>,
  classes: Vec<ClassDef>,
  enums: Vec<EnumerationDef>,
}

impl IrArena {
  pub fn new() -> Self {
    Self::default()
  }

  pub(crate) fn add_root_namespace(&mut self, name: &str) -> NamespaceId {
    let id = NamespaceId(self.namespaces.len() as u32);
    self.namespaces.push(Namespace::new(name, None));
    id
  }

  /// Returns the child namespace named `name` under `parent`, creating it if
  /// absent. Lookup is case-insensitive to honor sibling uniqueness.
  pub(crate) fn ensure_namespace(&mut self, parent: NamespaceId, name: &str) -> NamespaceId {
    let existing = self.namespaces[parent.index()]
      .namespaces
      .iter()
      .copied()
      .find(|child| self.namespaces[child.index()].name.eq_ignore_ascii_case(name));
    if let Some(id) = existing {
      return id;
    }

    let claimed = self.namespaces[parent.index()].scope.claim(name);
    let id = NamespaceId(self.namespaces.len() as u32);
    self.namespaces.push(Namespace::new(claimed, Some(parent)));
    self.namespaces[parent.index()].namespaces.push(id);
    id
  }

  /// Walks (creating as needed) a dotted namespace path below `root`.
  pub(crate) fn ensure_namespace_path(&mut self, root: NamespaceId, dotted: &str) -> NamespaceId {
    dotted
      .split('.')
      .filter(|segment| !segment.is_empty())
      .fold(root, |parent, segment| self.ensure_namespace(parent, segment))
  }

  /// Claims a collision-free type name within the namespace scope.
  pub(crate) fn claim_type_name(&mut self, namespace: NamespaceId, candidate: &str) -> String {
    self.namespaces[namespace.index()].scope.claim(candidate)
  }

  /// Adds a class whose name was already claimed in its namespace scope.
  pub(crate) fn add_class(&mut self, class: ClassDef) -> ClassId {
    let namespace = class.namespace;
    let id = ClassId(self.classes.len() as u32);
    self.classes.push(class);
    self.namespaces[namespace.index()].classes.push(id);
    id
  }

  pub(crate) fn add_enum(&mut self, definition: EnumerationDef) -> EnumId {
    let namespace = definition.namespace;
    let id = EnumId(self.enums.len() as u32);
    self.enums.push(definition);
    self.namespaces[namespace.index()].enums.push(id);
    id
  }

  pub fn namespace(&self, id: NamespaceId) -> &Namespace {
    &self.namespaces[id.index()]
  }

  pub fn class(&self, id: ClassId) -> &ClassDef {
    &self.classes[id.index()]
  }

  pub(crate) fn class_mut(&mut self, id: ClassId) -> &mut ClassDef {
    &mut self.classes[id.index()]
  }

  pub fn enumeration(&self, id: EnumId) -> &EnumerationDef {
    &self.enums[id.index()]
  }

  /// Live (non-pruned) classes, in creation order.
  pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
    self
      .classes
      .iter()
      .enumerate()
      .filter(|(_, class)| !class.pruned)
      .map(|(index, class)| (ClassId(index as u32), class))
  }

  /// Every class slot, pruned included. Post-passes iterate this.
  pub(crate) fn all_class_ids(&self) -> impl Iterator<Item = ClassId> {
    (0..self.classes.len() as u32).map(ClassId)
  }

  pub fn enumerations(&self) -> impl Iterator<Item = (EnumId, &EnumerationDef)> {
    self
      .enums
      .iter()
      .enumerate()
      .map(|(index, definition)| (EnumId(index as u32), definition))
  }

  pub fn class_count(&self) -> usize {
    self.classes.iter().filter(|class| !class.pruned).count()
  }

  pub fn enum_count(&self) -> usize {
    self.enums.len()
  }

  /// The dotted full name of a namespace, walking parents to the root.
  pub fn full_namespace_name(&self, id: NamespaceId) -> String {
    let mut segments = Vec::new();
    let mut current = Some(id);
    while let Some(ns_id) = current {
      let namespace = self.namespace(ns_id);
      segments.push(namespace.name.clone());
      current = namespace.parent;
    }
    segments.reverse();
    segments.join(".")
  }

  /// Finds a class by case-insensitive name within one namespace.
  pub fn find_class(&self, namespace: NamespaceId, name: &str) -> Option<ClassId> {
    self.namespaces[namespace.index()]
      .classes
      .iter()
      .copied()
      .find(|id| !self.class(*id).pruned && self.class(*id).name.eq_ignore_ascii_case(name))
  }

  /// Marks a class pruned and unlinks it from its namespace listing.
  pub(crate) fn prune_class(&mut self, id: ClassId) {
    let namespace = self.classes[id.index()].namespace;
    self.classes[id.index()].pruned = true;
    self.namespaces[namespace.index()].classes.retain(|c| *c != id);
  }
}
