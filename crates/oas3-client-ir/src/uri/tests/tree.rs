use http::Method;

use super::spec_from_json;
use crate::uri::{PathFilterSet, build_uri_tree};

const TASKS_SPEC: &str = r#"{
  "openapi": "3.1.0",
  "info": { "title": "Tasks", "version": "1.0.0" },
  "paths": {
    "/tasks": {
      "get": { "responses": { "204": { "description": "ok" } } },
      "post": { "responses": { "204": { "description": "ok" } } }
    },
    "/tasks/{task-id}": {
      "get": { "responses": { "204": { "description": "ok" } } }
    },
    "/users/{user-id}/messages": {
      "get": { "responses": { "204": { "description": "ok" } } }
    }
  }
}"#;

#[test]
fn paths_build_a_segment_tree() {
  let spec = spec_from_json(TASKS_SPEC);
  let tree = build_uri_tree(&spec, &PathFilterSet::default());

  let tasks = &tree.children["tasks"];
  assert_eq!(tasks.segment, "tasks");
  assert_eq!(tasks.operations.len(), 2);

  let item = tasks.single_parameter_child().expect("single parameter child");
  assert!(item.is_parameter_segment());
  assert_eq!(item.parameter_name(), Some("task-id"));
  assert_eq!(item.operations.len(), 1);
  assert_eq!(item.path, "/tasks/{task-id}");
}

#[test]
fn intermediate_segments_exist_without_operations() {
  let spec = spec_from_json(TASKS_SPEC);
  let tree = build_uri_tree(&spec, &PathFilterSet::default());

  let users = &tree.children["users"];
  assert!(!users.has_operations());
  let user_item = users.single_parameter_child().expect("user id segment");
  assert!(!user_item.has_operations());
  assert!(user_item.children.contains_key("messages"));
}

#[test]
fn segments_differing_only_by_case_share_a_node() {
  let spec = spec_from_json(
    r#"{
      "openapi": "3.1.0",
      "info": { "title": "T", "version": "1" },
      "paths": {
        "/Users": { "get": { "responses": { "204": { "description": "ok" } } } },
        "/users": { "post": { "responses": { "204": { "description": "ok" } } } }
      }
    }"#,
  );
  let tree = build_uri_tree(&spec, &PathFilterSet::default());

  assert_eq!(tree.children.len(), 1);
  let node = tree.children.values().next().unwrap();
  assert_eq!(node.operations.len(), 2);
}

#[test]
fn filtered_operations_never_reach_the_tree() {
  let spec = spec_from_json(TASKS_SPEC);
  let (filters, _) = PathFilterSet::new(&["/tasks#GET".to_string()], &[]);
  let tree = build_uri_tree(&spec, &filters);

  let tasks = &tree.children["tasks"];
  assert_eq!(tasks.operations.len(), 1);
  assert_eq!(tasks.operations[0].method, Method::GET);
  assert!(tasks.children.is_empty());
  assert!(!tree.children.contains_key("users"));
}

#[test]
fn cleaned_segment_strips_invalid_characters() {
  let spec = spec_from_json(
    r#"{
      "openapi": "3.1.0",
      "info": { "title": "T", "version": "1" },
      "paths": {
        "/$batch": { "post": { "responses": { "204": { "description": "ok" } } } }
      }
    }"#,
  );
  let tree = build_uri_tree(&spec, &PathFilterSet::default());
  let node = tree.children.values().next().unwrap();
  assert_eq!(node.segment, "$batch");
  assert_eq!(node.cleaned_segment(), "batch");
}
