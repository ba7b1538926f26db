use super::{compile, find_class};
use crate::{ir::MethodKind, metrics::GenerationWarning};

/// `entity` discriminates over `user` (a real derivation) and `unrelated`
/// (declared in the mapping but not derived).
const DISCRIMINATED_SPEC: &str = r##"{
  "openapi": "3.1.0",
  "info": { "title": "T", "version": "1" },
  "paths": {
    "/entities": {
      "get": {
        "responses": {
          "200": {
            "description": "ok",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/entity" } }
            }
          }
        }
      }
    },
    "/unrelated": {
      "get": {
        "responses": {
          "200": {
            "description": "ok",
            "content": {
              "application/json": { "schema": { "$ref": "#/components/schemas/unrelated" } }
            }
          }
        }
      }
    }
  },
  "components": {
    "schemas": {
      "entity": {
        "type": "object",
        "properties": { "kind": { "type": "string" } },
        "discriminator": {
          "propertyName": "kind",
          "mapping": {
            "user": "#/components/schemas/user",
            "unrelated": "#/components/schemas/unrelated"
          }
        }
      },
      "user": {
        "allOf": [
          { "$ref": "#/components/schemas/entity" },
          { "type": "object", "properties": { "displayName": { "type": "string" } } }
        ]
      },
      "unrelated": {
        "type": "object",
        "properties": { "name": { "type": "string" } }
      }
    }
  }
}"##;

#[test]
fn non_derived_mapping_entries_are_dropped_with_a_warning() {
  let (ir, stats) = compile(DISCRIMINATED_SPEC);

  let (user_id, _) = find_class(&ir, "User").expect("derived class");
  let (_, entity) = find_class(&ir, "Entity").expect("base class");

  let block = entity.discriminator.as_ref().expect("verified discriminator block");
  assert_eq!(block.property_name, "kind");

  let keys: Vec<&str> = block.mapping.keys().map(String::as_str).collect();
  assert_eq!(keys, vec!["user"]);
  assert_eq!(block.mapping["user"].as_class(), Some(user_id));

  assert_eq!(stats.mappings_dropped, 1);
  assert!(stats.warnings.iter().any(|w| matches!(
    w,
    GenerationWarning::DiscriminatorMappingDropped { value, .. } if value == "unrelated"
  )));
}

#[test]
fn a_factory_is_synthesized_only_for_surviving_mappings() {
  let (ir, _) = compile(DISCRIMINATED_SPEC);

  let (entity_id, entity) = find_class(&ir, "Entity").expect("base class");
  let factory = entity
    .methods
    .iter()
    .find(|m| m.kind == MethodKind::Factory)
    .expect("factory on the discriminated base");
  assert_eq!(factory.name, "CreateFromDiscriminatorValue");
  assert_eq!(
    factory.return_type.as_ref().and_then(|t| t.as_class()),
    Some(entity_id)
  );

  // the non-derived class never gets a factory branch or block
  let (_, unrelated) = find_class(&ir, "Unrelated").expect("still alive via its own path");
  assert!(unrelated.discriminator.is_none());
  assert!(!unrelated.methods.iter().any(|m| m.kind == MethodKind::Factory));
}

#[test]
fn discriminator_stays_at_the_join_point() {
  let (ir, _) = compile(DISCRIMINATED_SPEC);

  // the derived class does not inherit a copy of the base's block
  let (_, user) = find_class(&ir, "User").expect("derived class");
  assert!(user.discriminator.is_none());
}
