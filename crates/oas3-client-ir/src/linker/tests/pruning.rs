use super::{compile, find_class};

#[test]
fn unreferenced_models_are_swept_away() {
  let json = r##"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {
      "/tasks": {
        "get": {
          "responses": {
            "200": {
              "description": "ok",
              "content": {
                "application/json": { "schema": { "$ref": "#/components/schemas/task" } }
              }
            }
          }
        }
      }
    },
    "components": {
      "schemas": {
        "task": {
          "type": "object",
          "properties": { "owner": { "$ref": "#/components/schemas/owner" } }
        },
        "owner": {
          "type": "object",
          "properties": { "name": { "type": "string" } }
        },
        "orphan": {
          "type": "object",
          "properties": { "lost": { "type": "string" } }
        }
      }
    }
  }"##;

  let (ir, stats) = compile(json);

  assert!(find_class(&ir, "Task").is_some());
  // transitively referenced models survive
  assert!(find_class(&ir, "Owner").is_some());
  // declared but never consumed
  assert!(find_class(&ir, "Orphan").is_none());
  assert_eq!(stats.classes_pruned, 1);
}

#[test]
fn pruned_classes_leave_their_namespace_listing() {
  let json = r##"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {},
    "components": {
      "schemas": {
        "orphan": { "type": "object", "properties": { "lost": { "type": "string" } } }
      }
    }
  }"##;

  let (ir, stats) = compile(json);

  assert_eq!(stats.classes_pruned, 1);
  let models = ir.arena.namespace(ir.models_namespace);
  assert!(models.classes.is_empty());
  assert_eq!(ir.arena.class_count(), 1, "only the root client class remains");
}

#[test]
fn request_builders_are_never_pruned() {
  let json = r##"{
    "openapi": "3.1.0",
    "info": { "title": "T", "version": "1" },
    "paths": {
      "/ping": {
        "get": { "responses": { "204": { "description": "ok" } } }
      }
    }
  }"##;

  let (ir, stats) = compile(json);

  assert!(find_class(&ir, "PingRequestBuilder").is_some());
  assert_eq!(stats.classes_pruned, 0);
}
