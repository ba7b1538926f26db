use std::collections::BTreeMap;

use http::Method;
use oas3::{
  Spec,
  spec::{ObjectOrReference, Operation, Parameter},
};

use super::filters::PathFilterSet;
use crate::naming::sanitize;

/// One HTTP operation attached to a tree node, together with the path-level
/// parameters it inherits.
#[derive(Debug, Clone)]
pub(crate) struct PathOperation {
  pub(crate) method: Method,
  pub(crate) operation: Operation,
  pub(crate) path_parameters: Vec<ObjectOrReference<Parameter>>,
}

/// A node of the URI segment tree. Children are keyed by the deduplicated
/// segment form (case-insensitive, invalid characters collapsed), so `/Users`
/// and `/users` land on the same node.
#[derive(Debug, Clone, Default)]
pub(crate) struct UriNode {
  /// Raw segment as first seen (`tasks`, `{task-id}`).
  pub(crate) segment: String,
  /// Full raw path up to and including this node.
  pub(crate) path: String,
  pub(crate) children: BTreeMap<String, UriNode>,
  pub(crate) operations: Vec<PathOperation>,
}

impl UriNode {
  fn root() -> Self {
    Self::default()
  }

  /// The cleaned, escape-safe form of the segment used for symbol naming.
  pub(crate) fn cleaned_segment(&self) -> String {
    sanitize(self.segment.trim_start_matches('{').trim_end_matches('}'))
  }

  /// True for `{param}` segments.
  pub(crate) fn is_parameter_segment(&self) -> bool {
    self.segment.starts_with('{') && self.segment.ends_with('}')
  }

  /// The bare parameter name of a `{param}` segment.
  pub(crate) fn parameter_name(&self) -> Option<&str> {
    if self.is_parameter_segment() {
      Some(self.segment.trim_start_matches('{').trim_end_matches('}'))
    } else {
      None
    }
  }

  /// When this node's only child is a single bracketed path parameter, that
  /// child becomes an indexer on this node's request builder.
  pub(crate) fn single_parameter_child(&self) -> Option<&UriNode> {
    if self.children.len() != 1 {
      return None;
    }
    self.children.values().next().filter(|child| child.is_parameter_segment())
  }

  pub(crate) fn has_operations(&self) -> bool {
    !self.operations.is_empty()
  }

  fn insert(&mut self, path: &str, operation: PathOperation) {
    let mut node = self;
    let mut walked = String::new();

    for segment in path.split('/').filter(|s| !s.is_empty()) {
      walked.push('/');
      walked.push_str(segment);

      let key = dedupe_key(segment);
      let child = node.children.entry(key).or_default();
      if child.segment.is_empty() {
        child.segment = segment.to_string();
        child.path = walked.clone();
      }
      node = child;
    }

    node.operations.push(operation);
  }
}

/// Children that differ only by case or by symbol-invalid characters share a
/// node; parameter segments always key by their bare name.
fn dedupe_key(segment: &str) -> String {
  if segment.starts_with('{') && segment.ends_with('}') {
    format!("{{{}}}", sanitize(segment.trim_start_matches('{').trim_end_matches('}')).to_ascii_lowercase())
  } else {
    sanitize(segment).to_ascii_lowercase()
  }
}

/// Builds the URI segment tree from the document's flat path set, applying
/// include/exclude filtering before any node is created.
pub(crate) fn build_uri_tree(spec: &Spec, filters: &PathFilterSet) -> UriNode {
  let mut root = UriNode::root();

  let Some(ref paths) = spec.paths else {
    return root;
  };

  let mut entries: Vec<_> = paths.iter().collect();
  entries.sort_by(|(a, _), (b, _)| a.cmp(b));

  for (path, path_item) in entries {
    if filters.excludes_path(path) {
      continue;
    }

    let mut methods: Vec<_> = path_item.methods().into_iter().collect();
    methods.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));

    for (method, operation) in methods {
      if !filters.allows(path, &method) {
        continue;
      }
      root.insert(
        path,
        PathOperation {
          method,
          operation: operation.clone(),
          path_parameters: path_item.parameters.clone(),
        },
      );
    }
  }

  root
}
