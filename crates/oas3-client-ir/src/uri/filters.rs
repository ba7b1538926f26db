use std::collections::BTreeSet;

use globset::{GlobBuilder, GlobMatcher};
use http::Method;

use crate::metrics::GenerationWarning;

/// One include or exclude pattern: a glob over the path string with an
/// optional `#METHOD[,METHOD...]` suffix restricting which operations the
/// pattern applies to.
#[derive(Debug, Clone)]
pub(crate) struct PathFilter {
  matcher: GlobMatcher,
  methods: Option<BTreeSet<String>>,
}

impl PathFilter {
  fn parse(pattern: &str) -> Result<Self, globset::Error> {
    let (glob_part, methods) = match pattern.split_once('#') {
      Some((glob_part, method_list)) => {
        let methods = method_list
          .split(',')
          .map(|m| m.trim().to_ascii_uppercase())
          .filter(|m| !m.is_empty())
          .collect::<BTreeSet<_>>();
        (glob_part, (!methods.is_empty()).then_some(methods))
      }
      None => (pattern, None),
    };

    let matcher = GlobBuilder::new(glob_part)
      .literal_separator(false)
      .case_insensitive(true)
      .build()?
      .compile_matcher();

    Ok(Self { matcher, methods })
  }

  fn matches(&self, path: &str, method: &Method) -> bool {
    self.matcher.is_match(path)
      && self
        .methods
        .as_ref()
        .is_none_or(|methods| methods.contains(method.as_str()))
  }

  /// True when the pattern names the whole path, not a subset of operations.
  fn covers_all_methods(&self) -> bool {
    self.methods.is_none()
  }
}

/// The evaluated include/exclude filter set. Includes are applied first;
/// excludes can then remove a subset of operations from an otherwise-included
/// path without removing the path itself.
#[derive(Debug, Clone, Default)]
pub(crate) struct PathFilterSet {
  includes: Vec<PathFilter>,
  excludes: Vec<PathFilter>,
}

impl PathFilterSet {
  /// Compiles the configured patterns. Invalid patterns are reported as
  /// warnings and skipped; filtering is never fatal.
  pub(crate) fn new(
    include_patterns: &[String],
    exclude_patterns: &[String],
  ) -> (Self, Vec<GenerationWarning>) {
    let mut warnings = Vec::new();
    let mut compile = |patterns: &[String]| {
      patterns
        .iter()
        .filter_map(|pattern| match PathFilter::parse(pattern) {
          Ok(filter) => Some(filter),
          Err(error) => {
            warnings.push(GenerationWarning::InvalidFilterPattern {
              pattern: pattern.clone(),
              error: error.to_string(),
            });
            None
          }
        })
        .collect::<Vec<_>>()
    };

    let includes = compile(include_patterns);
    let excludes = compile(exclude_patterns);
    (Self { includes, excludes }, warnings)
  }

  /// Whether an operation survives filtering.
  pub(crate) fn allows(&self, path: &str, method: &Method) -> bool {
    if !self.includes.is_empty() && !self.includes.iter().any(|filter| filter.matches(path, method)) {
      return false;
    }
    !self.excludes.iter().any(|filter| filter.matches(path, method))
  }

  /// Whether an entire path is excluded regardless of operation.
  pub(crate) fn excludes_path(&self, path: &str) -> bool {
    self
      .excludes
      .iter()
      .any(|filter| filter.covers_all_methods() && filter.matcher.is_match(path))
  }
}
