use super::support::{compile, compile_with, executor, find_class};
use crate::{
  config::GenerationConfiguration,
  ir::{CollectionKind, MethodKind, Primitive, PropertyKind, TypeKind},
};

const TASKS_SPEC: &str = r#"{
  "openapi": "3.1.0",
  "info": { "title": "Tasks", "version": "1.0.0" },
  "paths": {
    "/tasks": {
      "get": {
        "responses": {
          "200": {
            "description": "ok",
            "content": {
              "application/json": {
                "schema": { "type": "array", "items": { "type": "integer" } }
              }
            }
          }
        }
      }
    }
  }
}"#;

#[test]
fn tasks_collection_scenario() {
  let config = GenerationConfiguration {
    client_class_name: "Graph".to_string(),
    ..Default::default()
  };
  let (ir, stats) = compile_with(TASKS_SPEC, config);

  let root = ir.arena.class(ir.root_class);
  assert_eq!(root.name, "Graph");

  let tasks_link = root
    .properties
    .iter()
    .find(|p| p.name == "Tasks")
    .expect("Tasks navigation property");
  assert_eq!(tasks_link.kind, PropertyKind::RequestBuilderLink);

  let builder_id = tasks_link.type_ref.as_class().expect("builder reference");
  let builder = ir.arena.class(builder_id);
  assert_eq!(builder.name, "TasksRequestBuilder");

  let get = executor(builder, "Get");
  let return_type = get.return_type.as_ref().expect("typed return");
  assert_eq!(return_type.kind, TypeKind::Primitive(Primitive::Integer));
  assert_eq!(return_type.collection, CollectionKind::Complex);

  assert_eq!(stats.operations_converted, 1);
}

#[test]
fn builders_carry_url_template_and_constructor() {
  let (ir, _) = compile(TASKS_SPEC);
  let (_, builder) = find_class(&ir, "TasksRequestBuilder").expect("builder exists");

  let template = builder
    .properties
    .iter()
    .find(|p| p.kind == PropertyKind::UrlTemplate)
    .expect("url template property");
  assert_eq!(
    template.default_value,
    Some(serde_json::Value::String("{+baseurl}/tasks".to_string()))
  );
  assert!(template.read_only);

  assert!(builder.methods.iter().any(|m| m.kind == MethodKind::Constructor));
  assert!(
    builder
      .methods
      .iter()
      .any(|m| m.kind == MethodKind::RequestGenerator && m.name == "ToGetRequestInformation")
  );
}

#[test]
fn bracketed_segments_become_indexers() {
  let json = r#"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {
      "/tasks/{task-id}": {
        "get": {
          "parameters": [
            { "name": "task-id", "in": "path", "required": true, "schema": { "type": "integer" } }
          ],
          "responses": { "204": { "description": "done" } }
        }
      }
    }
  }"#;
  let (ir, stats) = compile(json);

  let (_, tasks) = find_class(&ir, "TasksRequestBuilder").expect("collection builder");
  let indexer = tasks.indexer.as_ref().expect("indexer on collection builder");
  assert_eq!(indexer.parameter_name, "taskId");
  assert_eq!(indexer.parameter_type.kind, TypeKind::Primitive(Primitive::Integer));

  let item = ir.arena.class(indexer.return_class);
  assert_eq!(item.name, "TaskItemRequestBuilder");
  assert!(item.methods.iter().any(|m| m.kind == MethodKind::RequestExecutor));

  let template = item
    .properties
    .iter()
    .find(|p| p.kind == PropertyKind::UrlTemplate)
    .unwrap();
  assert_eq!(
    template.default_value,
    Some(serde_json::Value::String("{+baseurl}/tasks/{task%2Did}".to_string()))
  );

  assert_eq!(stats.indexers_created, 1);
}

#[test]
fn indexers_at_different_depths_return_distinct_classes() {
  let json = r#"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {
      "/groups/{group-id}": {
        "get": { "responses": { "204": { "description": "ok" } } }
      },
      "/groups/{group-id}/members/{member-id}": {
        "get": { "responses": { "204": { "description": "ok" } } }
      }
    }
  }"#;
  let (ir, _) = compile(json);

  let (_, groups) = find_class(&ir, "GroupsRequestBuilder").expect("groups builder");
  let group_item = groups.indexer.as_ref().expect("group indexer").return_class;

  let (_, members) = find_class(&ir, "MembersRequestBuilder").expect("members builder");
  let member_item = members.indexer.as_ref().expect("member indexer").return_class;

  assert_ne!(group_item, member_item);
  assert_eq!(ir.arena.class(group_item).name, "GroupItemRequestBuilder");
  assert_eq!(ir.arena.class(member_item).name, "MemberItemRequestBuilder");
}

#[test]
fn undeclared_path_parameters_are_synthesized_as_strings() {
  let json = r#"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {
      "/users/{id}/messages": {
        "get": { "responses": { "204": { "description": "ok" } } }
      }
    }
  }"#;
  let (ir, _) = compile(json);

  let (_, messages) = find_class(&ir, "MessagesRequestBuilder").expect("messages builder");
  let constructor = messages
    .methods
    .iter()
    .find(|m| m.kind == MethodKind::Constructor)
    .unwrap();

  let id_param = constructor.parameters.iter().find(|p| p.wire_name == "id").expect("synthesized parameter");
  assert_eq!(id_param.name, "id");
  assert_eq!(id_param.type_ref.kind, TypeKind::Primitive(Primitive::String));
}

#[test]
fn operations_on_the_document_root_land_on_the_client_class() {
  let json = r#"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {
      "/": {
        "get": { "responses": { "204": { "description": "ok" } } }
      }
    }
  }"#;
  let (ir, stats) = compile(json);

  let root = ir.arena.class(ir.root_class);
  assert!(root.methods.iter().any(|m| m.kind == MethodKind::RequestExecutor));
  assert_eq!(stats.operations_converted, 1);
}
