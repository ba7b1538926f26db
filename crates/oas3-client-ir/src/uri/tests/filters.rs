use http::Method;

use crate::uri::PathFilterSet;

fn filter_set(includes: &[&str], excludes: &[&str]) -> PathFilterSet {
  let includes: Vec<String> = includes.iter().map(|s| s.to_string()).collect();
  let excludes: Vec<String> = excludes.iter().map(|s| s.to_string()).collect();
  let (filters, warnings) = PathFilterSet::new(&includes, &excludes);
  assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
  filters
}

#[test]
fn no_patterns_allow_everything() {
  let filters = filter_set(&[], &[]);
  assert!(filters.allows("/tasks", &Method::GET));
}

#[test]
fn include_pattern_limits_paths() {
  let filters = filter_set(&["/tasks*"], &[]);
  assert!(filters.allows("/tasks", &Method::GET));
  assert!(filters.allows("/tasks/{task-id}", &Method::GET));
  assert!(!filters.allows("/users", &Method::GET));
}

#[test]
fn method_suffix_restricts_operations() {
  let filters = filter_set(&["/tasks#GET,POST"], &[]);
  assert!(filters.allows("/tasks", &Method::GET));
  assert!(filters.allows("/tasks", &Method::POST));
  assert!(!filters.allows("/tasks", &Method::DELETE));
}

#[test]
fn exclude_removes_an_operation_subset_without_the_path() {
  let filters = filter_set(&[], &["/tasks#DELETE"]);
  assert!(filters.allows("/tasks", &Method::GET));
  assert!(!filters.allows("/tasks", &Method::DELETE));
  assert!(!filters.excludes_path("/tasks"));
}

#[test]
fn exclude_without_methods_removes_the_whole_path() {
  let filters = filter_set(&[], &["/internal/*"]);
  assert!(filters.excludes_path("/internal/jobs"));
  assert!(!filters.allows("/internal/jobs", &Method::GET));
}

#[test]
fn excludes_are_evaluated_after_includes() {
  let filters = filter_set(&["/tasks*"], &["/tasks#POST"]);
  assert!(filters.allows("/tasks", &Method::GET));
  assert!(!filters.allows("/tasks", &Method::POST));
}

#[test]
fn invalid_patterns_warn_instead_of_failing() {
  let (filters, warnings) = PathFilterSet::new(&["/tasks[".to_string()], &[]);
  assert_eq!(warnings.len(), 1);
  // the broken pattern is dropped, leaving no include restriction
  assert!(filters.allows("/anything", &Method::GET));
}
